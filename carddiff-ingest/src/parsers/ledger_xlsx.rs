//! Parse household-ledger xlsx exports into raw ledger rows.
//!
//! The ledger app exports one sheet with a header row:
//!   日付 | 資産 | 収入/支出 | 分類 | 小分類 | 内容 | 金額(￥) | メモ
//! Only the date, asset, income/expense, description and amount columns are
//! read; columns are located by header label, not position.

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate};
use std::path::Path;

use carddiff_core::record::{Flow, LedgerRow};

const DATE_COL: &str = "日付";
const ASSET_COL: &str = "資産";
const FLOW_COL: &str = "収入/支出";
const DESC_COL: &str = "内容";
// Some exports write the amount header with the currency mark, some without.
const AMOUNT_COLS: &[&str] = &["金額(￥)", "金額(¥)", "金額"];

/// Convert an Excel serial date to a YYYY-MM-DD label.
/// Excel day 0 is 1899-12-30; the time-of-day fraction is irrelevant here.
pub fn excel_serial_to_date(serial: f64) -> Option<String> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = base.checked_add_signed(Duration::days(serial.trunc() as i64))?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Render a cell to raw text. Numeric cells keep integer form where exact;
/// date-formatted cells become YYYY-MM-DD labels.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => {
            if n.fract() == 0.0 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()).unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}

fn find_col(header: &[Data], labels: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|c| labels.contains(&cell_text(c).as_str()))
}

/// Parse the ledger spreadsheet, returning every data row of the first sheet.
/// Account filtering and sign handling happen later, in normalization.
pub fn parse_ledger_xlsx(path: impl AsRef<Path>) -> Result<Vec<LedgerRow>> {
    let path = path.as_ref();
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening {}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let Some(first_sheet) = sheet_names.first() else {
        bail!("{}: workbook has no sheets", path.display());
    };
    let range = workbook
        .worksheet_range(first_sheet)
        .with_context(|| format!("reading sheet {first_sheet:?} of {}", path.display()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let date_idx = find_col(header, &[DATE_COL])
        .with_context(|| format!("{}: missing column {DATE_COL:?}", path.display()))?;
    let asset_idx = find_col(header, &[ASSET_COL])
        .with_context(|| format!("{}: missing column {ASSET_COL:?}", path.display()))?;
    let flow_idx = find_col(header, &[FLOW_COL])
        .with_context(|| format!("{}: missing column {FLOW_COL:?}", path.display()))?;
    let desc_idx = find_col(header, &[DESC_COL])
        .with_context(|| format!("{}: missing column {DESC_COL:?}", path.display()))?;
    let amount_idx = find_col(header, AMOUNT_COLS)
        .with_context(|| format!("{}: missing amount column ({AMOUNT_COLS:?})", path.display()))?;

    let get = |row: &[Data], idx: usize| row.get(idx).map(cell_text).unwrap_or_default();

    let mut out = Vec::new();
    for row in rows {
        let date = get(row, date_idx);
        let asset = get(row, asset_idx);
        let description = get(row, desc_idx);
        let amount_raw = get(row, amount_idx);
        if date.is_empty() && asset.is_empty() && description.is_empty() && amount_raw.is_empty() {
            continue; // trailing blank rows
        }
        out.push(LedgerRow {
            date,
            asset,
            flow: Flow::parse(&get(row, flow_idx)),
            description,
            amount_raw,
        });
    }

    Ok(out)
}
