//! Flattening of result `item` elements and field fallback selection.

use std::collections::HashMap;

use crate::xml::XmlElement;

/// Field name → trimmed text of one flattened result item.
pub type FlatRecord = HashMap<String, String>;

/// Collapses a two-level `item` element into a single-level field map.
///
/// Each direct child contributes its own tag and text. A child that has
/// children of its own instead contributes each grandchild's tag and text,
/// hoisted to the top level. Nesting below that is not unwrapped. When two
/// fields share a tag, the one later in document order wins.
#[must_use]
pub fn flatten_item(item: &XmlElement) -> FlatRecord {
    let mut record = FlatRecord::new();
    for child in &item.children {
        if child.children.is_empty() {
            insert_field(&mut record, child);
        } else {
            for grandchild in &child.children {
                insert_field(&mut record, grandchild);
            }
        }
    }
    record
}

fn insert_field(record: &mut FlatRecord, element: &XmlElement) {
    let text = element.text.as_deref().unwrap_or("").trim().to_string();
    record.insert(element.tag.clone(), text);
}

/// Returns the value of the first key in `keys` that is present with a
/// non-empty value, or `default` when none is.
#[must_use]
pub fn pick<'a>(record: &'a FlatRecord, keys: &[&str], default: &'a str) -> &'a str {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, text: &str) -> XmlElement {
        XmlElement::new(tag).with_text(text)
    }

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn pick_returns_first_non_empty_candidate() {
        let rec = record(&[("useSuittime", ""), ("useSeason", "파종전")]);
        let value = pick(&rec, &["useSuittime", "useSeason", "safeUsePrid"], "-");
        assert_eq!(value, "파종전");
    }

    #[test]
    fn pick_prefers_earlier_candidate_when_both_present() {
        let rec = record(&[("prdlstNm", "A"), ("pestiBrandName", "B")]);
        assert_eq!(pick(&rec, &["prdlstNm", "pestiBrandName"], "-"), "A");
        assert_eq!(pick(&rec, &["pestiBrandName", "prdlstNm"], "-"), "B");
    }

    #[test]
    fn pick_falls_back_to_default_when_all_absent_or_empty() {
        let rec = record(&[("useNum", "")]);
        assert_eq!(pick(&rec, &["useNum", "limitNum"], "-"), "-");
        assert_eq!(pick(&rec, &["pestiCode", "pestiCd"], ""), "");
        assert_eq!(pick(&rec, &[], "fallback"), "fallback");
    }

    #[test]
    fn flatten_flat_item_has_one_entry_per_child() {
        let item = XmlElement::new("item")
            .with_child(leaf("cropNm", "  배추 "))
            .with_child(leaf("prdlstNm", "싸이퍼트린"))
            .with_child(XmlElement::new("useNum"));
        let flat = flatten_item(&item);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat["cropNm"], "배추");
        assert_eq!(flat["prdlstNm"], "싸이퍼트린");
        assert_eq!(flat["useNum"], "");
    }

    #[test]
    fn flatten_hoists_grandchildren() {
        let item = XmlElement::new("item")
            .with_child(leaf("cropNm", "배추"))
            .with_child(
                XmlElement::new("usage")
                    .with_text("ignored")
                    .with_child(leaf("useSuittime", "수확전 14일까지"))
                    .with_child(leaf("useNum", "3회 이내")),
            );
        let flat = flatten_item(&item);
        assert_eq!(flat["useSuittime"], "수확전 14일까지");
        assert_eq!(flat["useNum"], "3회 이내");
        assert!(!flat.contains_key("usage"));
    }

    #[test]
    fn flatten_does_not_unwrap_below_one_level() {
        let item = XmlElement::new("item").with_child(
            XmlElement::new("outer")
                .with_child(XmlElement::new("inner").with_child(leaf("deep", "lost"))),
        );
        let flat = flatten_item(&item);
        assert_eq!(flat.get("inner").map(String::as_str), Some(""));
        assert!(!flat.contains_key("deep"));
    }

    #[test]
    fn flatten_tag_collision_is_last_write_wins() {
        let item = XmlElement::new("item")
            .with_child(leaf("cropNm", "첫번째"))
            .with_child(XmlElement::new("detail").with_child(leaf("cropNm", "두번째")));
        let flat = flatten_item(&item);
        assert_eq!(flat["cropNm"], "두번째");
    }

    #[test]
    fn flatten_is_idempotent() {
        let item = XmlElement::new("item")
            .with_child(leaf("a", " 1 "))
            .with_child(XmlElement::new("b").with_child(leaf("c", "2")));
        assert_eq!(flatten_item(&item), flatten_item(&item));
    }
}
