//! carddiff-ingest: input adapters — ledger spreadsheet (xlsx) and card
//! statement CSV (Shift-JIS) readers, plus input-file discovery.

pub mod discover;
pub mod parsers;

pub use discover::{DiscoveredInputs, discover_inputs};
pub use parsers::ledger_xlsx::parse_ledger_xlsx;
pub use parsers::statement_csv::{parse_statement_csv, parse_statement_csv_bytes};
