use psis_core::{NormalizedRow, SENTINEL};

/// Result of one list search.
///
/// API-level errors and empty result sets are outcomes rather than errors:
/// the caller shows them as warnings and renders no table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Normalized rows in upstream order.
    Rows(Vec<NormalizedRow>),
    /// The response root carried a non-empty `errorCode`.
    ApiError { code: String, message: String },
    /// The response parsed but contained no `item` elements.
    NoResults,
}

impl SearchOutcome {
    /// Rows of a successful search; empty for warning outcomes.
    #[must_use]
    pub fn rows(&self) -> &[NormalizedRow] {
        match self {
            SearchOutcome::Rows(rows) => rows,
            SearchOutcome::ApiError { .. } | SearchOutcome::NoResults => &[],
        }
    }
}

/// Usage timing and usage count returned by a detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailResult {
    pub use_time: String,
    pub use_count: String,
}

impl DetailResult {
    /// The placeholder pair used whenever a detail lookup fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            use_time: SENTINEL.to_string(),
            use_count: SENTINEL.to_string(),
        }
    }
}
