//! Query parameter construction for the PSIS `service.do` endpoint.

pub(crate) const SERVICE_TYPE: &str = "AA001";
pub(crate) const LIST_SERVICE_CODE: &str = "SVC01";
pub(crate) const DETAIL_SERVICE_CODE: &str = "SVC02";
pub(crate) const DISPLAY_COUNT: &str = "50";
pub(crate) const START_POINT: &str = "1";

/// Free-text filters for a list search.
///
/// Blank filters are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Brand name (`pestiBrandName`).
    pub brand_name: String,
    /// Crop name (`cropName`).
    pub crop_name: String,
    /// Item/product name (`pestiKorName`).
    pub item_name: String,
    /// Company name (`compName`).
    pub company_name: String,
}

impl SearchFilters {
    /// Non-blank filters as `(parameter, trimmed value)` pairs.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("pestiBrandName", self.brand_name.as_str()),
            ("cropName", self.crop_name.as_str()),
            ("pestiKorName", self.item_name.as_str()),
            ("compName", self.company_name.as_str()),
        ]
        .into_iter()
        .map(|(name, value)| (name, value.trim()))
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

/// Parameters of a `SVC01` list search, excluding the API key.
pub(crate) fn list_params(filters: &SearchFilters) -> Vec<(&'static str, &str)> {
    let mut params = vec![
        ("serviceType", SERVICE_TYPE),
        ("serviceCode", LIST_SERVICE_CODE),
        ("displayCount", DISPLAY_COUNT),
        ("startPoint", START_POINT),
    ];
    params.extend(filters.params());
    params
}

/// Parameters of a `SVC02` detail lookup, excluding the API key.
pub(crate) fn detail_params<'a>(
    pesti_code: &'a str,
    disease_use_seq: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        ("serviceCode", DETAIL_SERVICE_CODE),
        ("serviceType", SERVICE_TYPE),
        ("pestiCode", pesti_code),
        ("diseaseUseSeq", disease_use_seq),
    ]
}
