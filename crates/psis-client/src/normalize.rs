//! Normalization of flattened PSIS items into [`NormalizedRow`]s.
//!
//! The upstream API names the same field differently across endpoints and
//! schema versions, so every column is read through an ordered alias list.

use psis_core::{NormalizedRow, SENTINEL};

use crate::flatten::{pick, FlatRecord};
use crate::types::DetailResult;

pub const BRAND_NAME_FIELDS: &[&str] = &["prdlstNm", "pestiBrandName"];
pub const CROP_NAME_FIELDS: &[&str] = &["cropNm", "cropName"];
pub const USE_TIME_FIELDS: &[&str] = &["useSuittime", "useSeason", "safeUsePrid", "useLimit"];
pub const USE_COUNT_FIELDS: &[&str] = &["useNum", "limitNum"];
pub const DISEASE_NAME_FIELDS: &[&str] =
    &["diseaseWeedNm", "diseaseWeedName", "diseaseUseNm", "virusNm"];
pub const ITEM_NAME_FIELDS: &[&str] = &["itemNm", "pestiKorName", "formulationNm"];
pub const USE_AMOUNT_FIELDS: &[&str] = &["useDilut", "dilutUnit"];

pub const PESTI_CODE_FIELDS: &[&str] = &["pestiCode", "pestiCd"];
pub const DISEASE_USE_SEQ_FIELDS: &[&str] = &["diseaseUseSeq", "diseaseSeq"];

/// Usage timing and count read from a flattened record, sentinel if absent.
#[must_use]
pub fn usage_from_record(record: &FlatRecord) -> DetailResult {
    DetailResult {
        use_time: pick(record, USE_TIME_FIELDS, SENTINEL).to_string(),
        use_count: pick(record, USE_COUNT_FIELDS, SENTINEL).to_string(),
    }
}

/// A flattened list item together with the fields that drive enrichment.
#[derive(Debug, Clone)]
pub(crate) struct PendingRow {
    record: FlatRecord,
    pesti_code: String,
    disease_use_seq: String,
    usage: DetailResult,
}

impl PendingRow {
    pub(crate) fn from_record(record: FlatRecord) -> Self {
        let pesti_code = pick(&record, PESTI_CODE_FIELDS, "").to_string();
        let disease_use_seq = pick(&record, DISEASE_USE_SEQ_FIELDS, "").to_string();
        let usage = usage_from_record(&record);
        Self {
            record,
            pesti_code,
            disease_use_seq,
            usage,
        }
    }

    /// Product code and sequence to look up, when a usage field is missing
    /// and both keys are known.
    pub(crate) fn detail_keys(&self) -> Option<(&str, &str)> {
        let missing = self.usage.use_time == SENTINEL || self.usage.use_count == SENTINEL;
        if missing && !self.pesti_code.is_empty() && !self.disease_use_seq.is_empty() {
            Some((self.pesti_code.as_str(), self.disease_use_seq.as_str()))
        } else {
            None
        }
    }

    /// Fills only the usage fields that are still at the sentinel.
    pub(crate) fn merge_detail(&mut self, detail: DetailResult) {
        if self.usage.use_time == SENTINEL {
            self.usage.use_time = detail.use_time;
        }
        if self.usage.use_count == SENTINEL {
            self.usage.use_count = detail.use_count;
        }
    }

    pub(crate) fn into_row(self) -> NormalizedRow {
        let record = &self.record;
        NormalizedRow {
            brand_name: pick(record, BRAND_NAME_FIELDS, SENTINEL).to_string(),
            crop_name: pick(record, CROP_NAME_FIELDS, SENTINEL).to_string(),
            use_time: self.usage.use_time,
            use_count: self.usage.use_count,
            disease_name: pick(record, DISEASE_NAME_FIELDS, SENTINEL).to_string(),
            item_name: pick(record, ITEM_NAME_FIELDS, SENTINEL).to_string(),
            use_amount: pick(record, USE_AMOUNT_FIELDS, SENTINEL).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn complete_item_needs_no_detail() {
        let pending = PendingRow::from_record(record(&[
            ("pestiCode", "12345"),
            ("diseaseUseSeq", "1"),
            ("useSuittime", "파종전"),
            ("useNum", "1회"),
        ]));
        assert_eq!(pending.detail_keys(), None);
    }

    #[test]
    fn missing_usage_with_keys_requests_detail() {
        let pending = PendingRow::from_record(record(&[
            ("pestiCd", "12345"),
            ("diseaseSeq", "7"),
            ("useSuittime", "파종전"),
        ]));
        assert_eq!(pending.detail_keys(), Some(("12345", "7")));
    }

    #[test]
    fn missing_usage_without_keys_skips_detail() {
        let pending = PendingRow::from_record(record(&[("pestiCode", "12345")]));
        assert_eq!(pending.detail_keys(), None);
        let pending = PendingRow::from_record(record(&[("diseaseUseSeq", "1")]));
        assert_eq!(pending.detail_keys(), None);
    }

    #[test]
    fn merge_detail_only_fills_missing_fields() {
        let mut pending = PendingRow::from_record(record(&[
            ("pestiCode", "12345"),
            ("diseaseUseSeq", "1"),
            ("useSuittime", "파종전"),
        ]));
        pending.merge_detail(DetailResult {
            use_time: "수확전 14일까지".to_string(),
            use_count: "3회 이내".to_string(),
        });
        let row = pending.into_row();
        assert_eq!(row.use_time, "파종전");
        assert_eq!(row.use_count, "3회 이내");
    }

    #[test]
    fn into_row_applies_aliases_and_sentinel() {
        let row = PendingRow::from_record(record(&[
            ("pestiBrandName", "브랜드"),
            ("cropName", "고추"),
            ("virusNm", "탄저병"),
            ("formulationNm", "수화제"),
            ("dilutUnit", "2000배"),
        ]))
        .into_row();
        assert_eq!(row.brand_name, "브랜드");
        assert_eq!(row.crop_name, "고추");
        assert_eq!(row.disease_name, "탄저병");
        assert_eq!(row.item_name, "수화제");
        assert_eq!(row.use_amount, "2000배");
        assert_eq!(row.use_time, SENTINEL);
        assert_eq!(row.use_count, SENTINEL);
    }

    #[test]
    fn usage_from_record_walks_alias_order() {
        let usage = usage_from_record(&record(&[("useLimit", "수확 7일전"), ("limitNum", "2회")]));
        assert_eq!(usage.use_time, "수확 7일전");
        assert_eq!(usage.use_count, "2회");
    }
}
