//! Minimal XML element tree built from `quick-xml` events.
//!
//! PSIS responses are small (one page of at most 50 items), so the whole
//! document is materialised. An element's `text` is the character data that
//! appears before its first child element; text following a child is dropped.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::PsisError;

/// One element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub tag: String,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder helper: element with the given text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder helper: append a child element.
    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Text of the first direct child named `tag`, trimmed.
    ///
    /// Returns `Some("")` when the child exists without text and `None` when
    /// there is no such child.
    #[must_use]
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.tag == tag)
            .map(|c| c.text.as_deref().unwrap_or("").trim())
    }

    /// All descendants named `tag` in document order, excluding `self`.
    #[must_use]
    pub fn descendants(&self, tag: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        for child in &self.children {
            child.collect_named(tag, &mut found);
        }
        found
    }

    fn collect_named<'a>(&'a self, tag: &str, out: &mut Vec<&'a XmlElement>) {
        if self.tag == tag {
            out.push(self);
        }
        for child in &self.children {
            child.collect_named(tag, out);
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.children.is_empty() {
            return;
        }
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

/// Parses a complete XML document and returns its root element.
///
/// # Errors
///
/// Returns [`PsisError::Xml`] for syntax errors (including mismatched end
/// tags) and [`PsisError::MalformedXml`] when the input has no root element,
/// more than one root, or ends with elements still open.
pub fn parse_document(xml: &str) -> Result<XmlElement, PsisError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(XmlElement::new(tag_name(e.name().as_ref()))),
            Event::Empty(e) => {
                let element = XmlElement::new(tag_name(e.name().as_ref()));
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| PsisError::MalformedXml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(PsisError::MalformedXml(format!(
            "unclosed element <{}>",
            open.tag
        )));
    }
    root.ok_or_else(|| PsisError::MalformedXml("document has no root element".into()))
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), PsisError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(PsisError::MalformedXml(format!(
            "second root element <{}>",
            element.tag
        )));
    }
    *root = Some(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_document_in_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <response>
              <list>
                <item><cropNm>배추</cropNm></item>
                <item><cropNm>무</cropNm></item>
              </list>
            </response>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.tag, "response");
        let items = root.descendants("item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].child_text("cropNm"), Some("배추"));
        assert_eq!(items[1].child_text("cropNm"), Some("무"));
    }

    #[test]
    fn unescapes_entities_and_keeps_cdata() {
        let xml = "<item><a>A &amp; B</a><b><![CDATA[<raw>]]></b></item>";
        let root = parse_document(xml).unwrap();
        assert_eq!(root.child_text("a"), Some("A & B"));
        assert_eq!(root.child_text("b"), Some("<raw>"));
    }

    #[test]
    fn empty_element_has_no_text() {
        let root = parse_document("<item><useNum/></item>").unwrap();
        assert_eq!(root.children[0].text, None);
        assert_eq!(root.child_text("useNum"), Some(""));
        assert_eq!(root.child_text("missing"), None);
    }

    #[test]
    fn text_after_first_child_is_ignored() {
        let root = parse_document("<a>head<b>x</b>tail</a>").unwrap();
        assert_eq!(root.text.as_deref(), Some("head"));
    }

    #[test]
    fn descendants_excludes_self() {
        let root = parse_document("<item><item>inner</item></item>").unwrap();
        let items = root.descendants("item");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text.as_deref(), Some("inner"));
    }

    #[test]
    fn rejects_unclosed_document() {
        let err = parse_document("<response><item>").unwrap_err();
        assert!(
            matches!(err, PsisError::MalformedXml(_) | PsisError::Xml(_)),
            "got {err:?}"
        );
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse_document("").unwrap_err();
        assert!(matches!(err, PsisError::MalformedXml(_)), "got {err:?}");
    }

    #[test]
    fn rejects_mismatched_end_tag() {
        let err = parse_document("<a><b></a>").unwrap_err();
        assert!(
            matches!(err, PsisError::Xml(_) | PsisError::MalformedXml(_)),
            "got {err:?}"
        );
    }
}
