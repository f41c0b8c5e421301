//! Render a reconciliation result as a markdown report.

use anyhow::{Context, Result};
use carddiff_core::{Reconciliation, TxnRecord};
use std::fs;
use std::path::Path;

/// Format yen with comma grouping: 1234567 -> "¥1,234,567".
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

fn push_table(out: &mut String, title: &str, records: &[TxnRecord]) {
    out.push_str(&format!("## {title}\n\n"));
    if records.is_empty() {
        out.push_str("(none)\n\n");
        return;
    }
    out.push_str("| Date | Amount | Description |\n");
    out.push_str("|------|-------:|-------------|\n");
    for r in records {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            r.date,
            format_yen(r.amount),
            r.description
        ));
    }
    out.push('\n');
}

/// Render the full report. Pure; writing is the caller's concern.
pub fn render_markdown(result: &Reconciliation) -> String {
    let mut out = String::new();
    out.push_str("# Ledger vs. card statement\n\n");

    out.push_str("| | Rows | Total |\n|---|---:|---:|\n");
    out.push_str(&format!(
        "| Ledger | {} | {} |\n",
        result.ledger_count,
        format_yen(result.ledger_total)
    ));
    out.push_str(&format!(
        "| Statement | {} | {} |\n",
        result.statement_count,
        format_yen(result.statement_total)
    ));
    out.push_str(&format!(
        "| Difference | | {} |\n\n",
        format_yen(result.difference)
    ));

    if result.is_settled() {
        out.push_str("Fully reconciled — no differences found.\n");
        return out;
    }

    push_table(
        &mut out,
        "In the ledger, missing from the statement",
        &result.ledger_only,
    );
    push_table(
        &mut out,
        "On the statement, missing from the ledger",
        &result.statement_only,
    );
    out
}

pub fn write_report(path: impl AsRef<Path>, result: &Reconciliation) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_markdown(result))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carddiff_core::{Source, reconcile};

    fn rec(source: Source, amount: i64, desc: &str) -> TxnRecord {
        TxnRecord {
            date: "2025-06-01".to_string(),
            description: desc.to_string(),
            amount,
            source,
        }
    }

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(0), "¥0");
        assert_eq!(format_yen(980), "¥980");
        assert_eq!(format_yen(1980), "¥1,980");
        assert_eq!(format_yen(1234567), "¥1,234,567");
        assert_eq!(format_yen(-4500), "-¥4,500");
    }

    #[test]
    fn test_settled_report_has_no_tables() {
        let l = vec![rec(Source::Ledger, 1000, "A")];
        let c = vec![rec(Source::Statement, 1000, "A'")];
        let md = render_markdown(&reconcile(&l, &c));
        assert!(md.contains("Fully reconciled"));
        assert!(!md.contains("missing from"));
    }

    #[test]
    fn test_unmatched_rows_listed() {
        let l = vec![
            rec(Source::Ledger, 1000, "スーパー"),
            rec(Source::Ledger, 2500, "薬局"),
        ];
        let c = vec![rec(Source::Statement, 1000, "SUPER MARKET")];
        let md = render_markdown(&reconcile(&l, &c));
        assert!(md.contains("| 2025-06-01 | ¥2,500 | 薬局 |"));
        assert!(md.contains("In the ledger, missing from the statement"));
        assert!(md.contains("(none)"));
        assert!(md.contains("| Difference | | ¥2,500 |"));
    }
}
