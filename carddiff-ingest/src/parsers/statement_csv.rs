//! Parse card-company statement CSV exports into raw statement rows.
//!
//! The export is Shift-JIS encoded with one preamble line, then data rows:
//!   利用日, 店名, 利用金額, 支払区分, 回数, 支払金額, 備考
//! Some downloads trim this to three columns (利用日, 店名, 支払金額). The
//! billed amount is column 5 when present, column 2 otherwise. Metadata rows
//! (masked card numbers, blanks) are left in — the normalizer filters them.

use anyhow::{Context, Result};
use encoding_rs::SHIFT_JIS;
use std::fs;
use std::path::Path;

use carddiff_core::record::StatementRow;

/// Parse a statement CSV file from disk.
pub fn parse_statement_csv(path: impl AsRef<Path>) -> Result<Vec<StatementRow>> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("opening {}", path.display()))?;
    parse_statement_csv_bytes(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Parse statement CSV content. Decoding is lossy: a few undecodable bytes in
/// a merchant name must not abort the run.
pub fn parse_statement_csv_bytes(bytes: &[u8]) -> Result<Vec<StatementRow>> {
    let (text, _, _) = SHIFT_JIS.decode(bytes);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // First line is export preamble (account holder / period), not data.
        if i == 0 {
            continue;
        }
        if record.len() < 3 {
            continue;
        }

        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        // 7-column exports bill in column 5; short exports in column 2.
        let billed = field(5);
        let amount_raw = if billed.is_empty() { field(2) } else { billed };

        out.push(StatementRow {
            date: field(0),
            merchant: field(1),
            amount_raw,
        });
    }

    Ok(out)
}
