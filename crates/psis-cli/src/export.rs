//! Excel export of search rows.

use std::path::Path;

use psis_core::{NormalizedRow, COLUMN_HEADERS};
use rust_xlsxwriter::{Format, Workbook};

pub(crate) const DEFAULT_EXPORT_FILE: &str = "농약검색결과.xlsx";
pub(crate) const SHEET_NAME: &str = "검색결과";

/// Writes `rows` to a single-sheet workbook at `path`.
///
/// # Errors
///
/// Returns an error if the workbook cannot be built or saved.
pub(crate) fn write_workbook(rows: &[NormalizedRow], path: &Path) -> anyhow::Result<()> {
    let mut workbook = build_workbook(rows)?;
    workbook.save(path)?;
    Ok(())
}

/// Builds the workbook: a bold header row followed by one row per result.
fn build_workbook(rows: &[NormalizedRow]) -> anyhow::Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in COLUMN_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, u16::try_from(col)?, *header, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let sheet_row = u32::try_from(idx + 1)?;
        for (col, cell) in row.columns().iter().enumerate() {
            worksheet.write_string(sheet_row, u16::try_from(col)?, *cell)?;
        }
    }

    Ok(workbook)
}
