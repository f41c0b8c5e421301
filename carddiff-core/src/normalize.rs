//! Turn raw ingested rows into canonical [`TxnRecord`]s and drop the
//! non-transaction noise rows that card exports interleave with real charges.
//!
//! Statement exports carry account-metadata rows whose "merchant" cell is a
//! masked card number:
//!   5334-99**-****-****,,0
//! These always carry a zero amount; a genuine zero-amount charge with an
//! ordinary merchant name must survive the filter.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::{Flow, LedgerRow, Source, StatementRow, TxnRecord};

/// Merchant-cell patterns that mark a statement row as card metadata rather
/// than a charge. Matched unanchored, so a masked number embedded in a longer
/// cell still counts.
static CARD_INFO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d{4}-\d{2}\*\*-\d{4}-\d{4}",
        r"\d{4}-\d{4}-\d{4}-\d{4}",
        r"\*\*-\*\*\*\*-\*\*\*\*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("card-info pattern"))
    .collect()
});

fn looks_like_card_info(merchant: &str) -> bool {
    CARD_INFO_PATTERNS.iter().any(|re| re.is_match(merchant))
}

/// Parse a raw amount cell into signed yen.
///
/// Strips currency symbols, comma grouping and whitespace first. Falls back
/// to float-and-truncate for exports that write `1200.0`. A cell that still
/// fails to parse coerces to 0 — one bad cell never fails the batch.
pub fn clean_amount(raw: &str) -> i64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '¥' | '￥' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return 0;
    }
    if let Ok(n) = cleaned.parse::<i64>() {
        return n;
    }
    cleaned.parse::<f64>().map(|f| f.trunc() as i64).unwrap_or(0)
}

/// Normalize one ledger row.
///
/// Rows whose asset tag differs from `target_account` belong to other
/// accounts and yield `None`. Income rows are negated so that expenses are
/// positive on both sides of the comparison.
pub fn normalize_ledger(row: &LedgerRow, target_account: &str) -> Option<TxnRecord> {
    if row.asset.trim() != target_account {
        return None;
    }
    let mut amount = clean_amount(&row.amount_raw);
    if row.flow == Flow::Income {
        amount = -amount;
    }
    Some(TxnRecord {
        date: row.date.trim().to_string(),
        description: row.description.trim().to_string(),
        amount,
        source: Source::Ledger,
    })
}

/// Normalize one statement row, filtering metadata noise.
///
/// A row is noise only when its amount resolves to exactly 0 AND the merchant
/// cell looks like a masked card number, or merchant and date are both empty.
/// Statement amounts are taken as-is (the export is expense-positive).
pub fn normalize_statement(row: &StatementRow) -> Option<TxnRecord> {
    let amount = clean_amount(&row.amount_raw);
    let merchant = row.merchant.trim();
    let date = row.date.trim();

    if amount == 0 {
        if looks_like_card_info(merchant) {
            return None;
        }
        if merchant.is_empty() && date.is_empty() {
            return None;
        }
    }

    Some(TxnRecord {
        date: date.to_string(),
        description: merchant.to_string(),
        amount,
        source: Source::Statement,
    })
}
