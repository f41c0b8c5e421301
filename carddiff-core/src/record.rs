//! Record types shared across the pipeline: the raw row shapes the ingest
//! adapters produce, and the canonical transaction record the matcher consumes.

use serde::{Deserialize, Serialize};

/// Which input a record came from. Carried through for reporting only;
/// matching never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Ledger,
    Statement,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Ledger => "ledger",
            Source::Statement => "statement",
        }
    }
}

/// Income/expense marker on a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flow {
    Income,
    Expense,
}

impl Flow {
    /// Parse the ledger export's income/expense column. The household-ledger
    /// app writes `収入`/`支出`; accept the English labels too.
    pub fn parse(s: &str) -> Flow {
        match s.trim() {
            "収入" => Flow::Income,
            s if s.eq_ignore_ascii_case("income") => Flow::Income,
            _ => Flow::Expense,
        }
    }
}

/// A ledger row as parsed from the spreadsheet, before normalization.
/// All fields are still raw text; `amount_raw` may carry symbols/grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: String,
    /// Asset/account tag; only rows matching the configured target account
    /// survive normalization.
    pub asset: String,
    pub flow: Flow,
    pub description: String,
    pub amount_raw: String,
}

/// A card-statement row as parsed from the CSV export, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: String,
    pub merchant: String,
    /// Billed amount as text, possibly `¥`-prefixed and comma-grouped.
    pub amount_raw: String,
}

/// Canonical transaction record, post-normalization.
///
/// `amount` is signed yen: an expense is positive, an income/refund negative,
/// uniformly across both sources. `date` is an opaque display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxnRecord {
    pub date: String,
    pub description: String,
    pub amount: i64,
    pub source: Source,
}
