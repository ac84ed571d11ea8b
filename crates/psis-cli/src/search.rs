//! `search` command: run the PSIS pipeline and present its outcome.

use psis_client::{PsisClient, SearchOutcome};
use psis_core::{AppConfig, NormalizedRow, COLUMN_HEADERS};

use crate::SearchArgs;

/// Runs one search and prints the rows, or a warning for API errors and
/// empty results. Writes the workbook when `--export` was given.
///
/// # Errors
///
/// Returns an error if the list call fails (transport, status, or malformed
/// XML) or the workbook cannot be written.
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let client = PsisClient::from_config(config)?;
    let outcome = client.search(&args.filters()).await?;

    let rows = match outcome {
        SearchOutcome::ApiError { code, message } => {
            eprintln!("{}", api_error_warning(&code, &message));
            return Ok(());
        }
        SearchOutcome::NoResults => {
            eprintln!("warning: 검색 결과가 없습니다.");
            return Ok(());
        }
        SearchOutcome::Rows(rows) => rows,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_table(&rows));
    }

    if let Some(path) = &args.export {
        crate::export::write_workbook(&rows, path)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "exported workbook");
        eprintln!("exported {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}

fn api_error_warning(code: &str, message: &str) -> String {
    format!("warning: API 오류: {code} - {message}")
}

/// Formats rows as a left-aligned table under [`COLUMN_HEADERS`].
///
/// Column widths are measured in characters, so wide Hangul glyphs may not
/// line up exactly in every terminal.
fn render_table(rows: &[NormalizedRow]) -> String {
    let mut widths = COLUMN_HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.columns()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMN_HEADERS, &widths);
    for row in rows {
        push_line(&mut out, &row.columns(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str; 7], widths: &[usize; 7]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
