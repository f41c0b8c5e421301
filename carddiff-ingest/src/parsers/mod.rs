pub mod ledger_xlsx;
pub mod statement_csv;
