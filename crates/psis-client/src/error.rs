use thiserror::Error;

/// Errors returned by the PSIS API client.
///
/// Only the list search surfaces these; detail lookups degrade to
/// placeholder values instead.
#[derive(Debug, Error)]
pub enum PsisError {
    /// Network failure, timeout, or non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The XML parsed but does not form a single complete document.
    #[error("malformed XML document: {0}")]
    MalformedXml(String),

    /// The configured endpoint could not be parsed as a URL.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
