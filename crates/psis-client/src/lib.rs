//! Client and normalization pipeline for the PSIS pesticide registration API.
//!
//! [`PsisClient::search`] runs a list search, flattens each XML result item,
//! fills missing usage fields from per-item detail lookups, and returns
//! seven-column [`psis_core::NormalizedRow`]s.

pub mod client;
pub mod error;
pub mod flatten;
pub mod normalize;
pub mod query;
pub mod types;
pub mod xml;

pub use client::PsisClient;
pub use error::PsisError;
pub use flatten::{flatten_item, pick, FlatRecord};
pub use query::SearchFilters;
pub use types::{DetailResult, SearchOutcome};
pub use xml::{parse_document, XmlElement};
