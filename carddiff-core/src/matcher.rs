//! Greedy equal-amount matching between the two normalized record lists.
//!
//! Each direction runs independently over untouched inputs: the primary list
//! is walked in order, and each record consumes the earliest not-yet-consumed
//! record of equal amount on the other side. Records left over are that
//! direction's unmatched output. Because the two passes keep separate
//! consumed sets, the two unmatched lists are not guaranteed complementary
//! when amounts repeat with different multiplicities; that asymmetry is the
//! intended reporting behavior, not something to fold into a single optimal
//! assignment.

use serde::{Deserialize, Serialize};

use crate::record::TxnRecord;

/// Everything the report renderer needs: per-side unmatched records plus
/// pre-matching aggregates over the full normalized inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Ledger records with no equal-amount counterpart on the statement.
    pub ledger_only: Vec<TxnRecord>,
    /// Statement records with no equal-amount counterpart in the ledger.
    pub statement_only: Vec<TxnRecord>,
    pub ledger_count: usize,
    pub statement_count: usize,
    /// Sum of all normalized ledger amounts (yen), before matching.
    pub ledger_total: i64,
    /// Sum of all normalized statement amounts (yen), before matching.
    pub statement_total: i64,
    /// `ledger_total - statement_total`.
    pub difference: i64,
}

impl Reconciliation {
    /// True when neither side has unmatched records — a valid "no difference"
    /// outcome, distinct from having no data at all.
    pub fn is_settled(&self) -> bool {
        self.ledger_only.is_empty() && self.statement_only.is_empty()
    }
}

/// One direction of the scan: records of `primary` with no available
/// equal-amount counterpart in `secondary`, in original relative order.
///
/// First-match greedy: ties among equal-amount candidates go to the lowest
/// secondary index not yet consumed. O(n·m), fine for the hundreds of rows a
/// monthly statement carries. Inputs are never mutated.
pub fn unmatched_in(primary: &[TxnRecord], secondary: &[TxnRecord]) -> Vec<TxnRecord> {
    let mut consumed = vec![false; secondary.len()];
    let mut out = Vec::new();

    for rec in primary {
        let hit =
            (0..secondary.len()).find(|&i| !consumed[i] && secondary[i].amount == rec.amount);
        match hit {
            Some(i) => consumed[i] = true,
            None => out.push(rec.clone()),
        }
    }

    out
}

/// Run both directions (each with a fresh consumed set) and compute the
/// pre-match totals the report shows alongside the unmatched lists.
pub fn reconcile(ledger: &[TxnRecord], statement: &[TxnRecord]) -> Reconciliation {
    let ledger_total: i64 = ledger.iter().map(|r| r.amount).sum();
    let statement_total: i64 = statement.iter().map(|r| r.amount).sum();

    Reconciliation {
        ledger_only: unmatched_in(ledger, statement),
        statement_only: unmatched_in(statement, ledger),
        ledger_count: ledger.len(),
        statement_count: statement.len(),
        ledger_total,
        statement_total,
        difference: ledger_total - statement_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Source;

    fn rec(source: Source, amount: i64, desc: &str) -> TxnRecord {
        TxnRecord {
            date: "2025-06-01".to_string(),
            description: desc.to_string(),
            amount,
            source,
        }
    }

    fn ledger(amounts: &[i64]) -> Vec<TxnRecord> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| rec(Source::Ledger, a, &format!("L{i}")))
            .collect()
    }

    fn statement(amounts: &[i64]) -> Vec<TxnRecord> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| rec(Source::Statement, a, &format!("C{i}")))
            .collect()
    }

    #[test]
    fn test_duplicate_amount_consumes_only_one() {
        // Two ledger 1000s against one statement 1000: the first ledger
        // record consumes it, the second reports as unmatched.
        let l = ledger(&[1000, 1000, 2500]);
        let c = statement(&[1000, 2500]);

        let result = reconcile(&l, &c);
        assert_eq!(result.ledger_only.len(), 1);
        assert_eq!(result.ledger_only[0].amount, 1000);
        assert_eq!(result.ledger_only[0].description, "L1");
        assert!(result.statement_only.is_empty());
    }

    #[test]
    fn test_empty_ledger_degenerates() {
        let result = reconcile(&[], &statement(&[300]));
        assert!(result.ledger_only.is_empty());
        assert_eq!(result.statement_only.len(), 1);
        assert_eq!(result.statement_only[0].amount, 300);
        assert_eq!(result.difference, -300);
    }

    #[test]
    fn test_both_empty_is_settled() {
        let result = reconcile(&[], &[]);
        assert!(result.is_settled());
        assert_eq!(result.difference, 0);
    }

    #[test]
    fn test_consumed_plus_unmatched_equals_primary_len() {
        let l = ledger(&[500, 500, 120, 700, 120, 120]);
        let c = statement(&[120, 500, 9000]);

        let un = unmatched_in(&l, &c);
        let consumed = l.len() - un.len();
        // 500 and 120 each match once; everything else is unmatched.
        assert_eq!(consumed, 2);
        assert_eq!(consumed + un.len(), l.len());
    }

    #[test]
    fn test_matcher_is_pure_and_idempotent() {
        let l = ledger(&[100, 200, 200, 300]);
        let c = statement(&[200, 300, 300]);

        let first = reconcile(&l, &c);
        let second = reconcile(&l, &c);
        assert_eq!(first, second);
        // Inputs unchanged by matching.
        assert_eq!(l[0].amount, 100);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_secondary_reorder_keeps_unmatched_count() {
        // Reordering the secondary can change WHICH equal-amount candidate
        // gets consumed, never how many primaries end up unmatched.
        let l = ledger(&[800, 800, 450]);
        let c1 = statement(&[450, 800, 120]);
        let c2 = statement(&[120, 800, 450]);

        assert_eq!(unmatched_in(&l, &c1).len(), unmatched_in(&l, &c2).len());
    }

    #[test]
    fn test_zero_amount_matches_like_any_other() {
        let l = ledger(&[0, 500]);
        let c = statement(&[0]);

        let result = reconcile(&l, &c);
        assert_eq!(result.ledger_only.len(), 1);
        assert_eq!(result.ledger_only[0].amount, 500);
        assert!(result.statement_only.is_empty());
    }

    #[test]
    fn test_directions_are_independent() {
        // 2x100 in the ledger vs 1x100 + 1x100-refund pattern: each pass
        // restarts with a fresh consumed set, so the two outputs need not be
        // complements of one shared matching.
        let l = ledger(&[100, 100]);
        let c = statement(&[100]);

        let result = reconcile(&l, &c);
        assert_eq!(result.ledger_only.len(), 1);
        assert!(result.statement_only.is_empty());
        assert_eq!(result.ledger_total, 200);
        assert_eq!(result.statement_total, 100);
        assert_eq!(result.difference, 100);
    }

    #[test]
    fn test_negative_amounts_match_exactly() {
        // A refund recorded as income (-500) only matches another -500.
        let l = ledger(&[-500, 500]);
        let c = statement(&[500]);

        let result = reconcile(&l, &c);
        assert_eq!(result.ledger_only.len(), 1);
        assert_eq!(result.ledger_only[0].amount, -500);
    }
}
