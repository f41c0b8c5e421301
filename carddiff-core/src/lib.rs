//! carddiff-core: reconciliation engine for household-ledger vs. card-statement
//! comparison — canonical record types, source-specific normalization, and the
//! greedy equal-amount matcher. No I/O lives here.

pub mod matcher;
pub mod normalize;
pub mod record;

pub use matcher::{Reconciliation, reconcile, unmatched_in};
pub use normalize::{clean_amount, normalize_ledger, normalize_statement};
pub use record::{Flow, LedgerRow, Source, StatementRow, TxnRecord};
