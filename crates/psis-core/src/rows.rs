use serde::{Deserialize, Serialize};

/// Placeholder for a field the upstream API did not provide.
pub const SENTINEL: &str = "-";

/// Display headers for the seven output columns, in column order.
pub const COLUMN_HEADERS: [&str; 7] = [
    "상표명",
    "작물명",
    "안전사용기준(시기)",
    "안전사용기준(횟수)",
    "병해충명",
    "품목명",
    "사용량",
];

/// One normalized search result row.
///
/// Every field holds either a value from the upstream record or [`SENTINEL`].
/// Serialized keys match [`COLUMN_HEADERS`] so JSON output and the exported
/// sheet share one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    #[serde(rename = "상표명")]
    pub brand_name: String,
    #[serde(rename = "작물명")]
    pub crop_name: String,
    #[serde(rename = "안전사용기준(시기)")]
    pub use_time: String,
    #[serde(rename = "안전사용기준(횟수)")]
    pub use_count: String,
    #[serde(rename = "병해충명")]
    pub disease_name: String,
    #[serde(rename = "품목명")]
    pub item_name: String,
    #[serde(rename = "사용량")]
    pub use_amount: String,
}

impl NormalizedRow {
    /// Cell values in [`COLUMN_HEADERS`] order.
    #[must_use]
    pub fn columns(&self) -> [&str; 7] {
        [
            &self.brand_name,
            &self.crop_name,
            &self.use_time,
            &self.use_count,
            &self.disease_name,
            &self.item_name,
            &self.use_amount,
        ]
    }
}
