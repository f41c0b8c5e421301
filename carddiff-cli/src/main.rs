use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use carddiff_core::{TxnRecord, normalize_ledger, normalize_statement, reconcile};
use carddiff_ingest::{discover_inputs, parse_ledger_xlsx, parse_statement_csv};

mod config;
mod report;

#[derive(Parser, Debug)]
#[command(
    name = "carddiff",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARDDIFF_BUILD_SHA"), ")"),
    about = "Reconcile a household ledger export against a card statement"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a ledger xlsx with a statement CSV and report the differences
    Compare {
        /// Directory holding exactly one .xlsx and one .csv (default: .)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Explicit ledger xlsx path (overrides --dir discovery)
        #[arg(long, requires = "statement")]
        ledger: Option<PathBuf>,

        /// Explicit statement CSV path (overrides --dir discovery)
        #[arg(long, requires = "ledger")]
        statement: Option<PathBuf>,

        /// Ledger asset label to reconcile (default: config, then built-in)
        #[arg(long)]
        account: Option<String>,

        /// Write the markdown report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Parse one input file and dump its normalized records
    Inspect {
        /// A .xlsx ledger or .csv statement file
        #[arg(long)]
        file: PathBuf,

        /// Limit number of records printed (default: 20)
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Ledger asset label (xlsx inputs only)
        #[arg(long)]
        account: Option<String>,
    },

    /// Write a default ~/.carddiff/config.toml
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compare {
            dir,
            ledger,
            statement,
            account,
            out,
        } => run_compare(dir, ledger, statement, account, out),
        Command::Inspect {
            file,
            limit,
            account,
        } => run_inspect(&file, limit, account),
        Command::InitConfig => config::init_config(),
    }
}

/// Account label precedence: --account flag, then config file, then built-in.
fn resolve_account(flag: Option<String>) -> Result<String> {
    match flag {
        Some(label) => Ok(label),
        None => Ok(config::load_config()?.account.label),
    }
}

fn resolve_inputs(
    dir: Option<PathBuf>,
    ledger: Option<PathBuf>,
    statement: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    if let (Some(l), Some(s)) = (ledger, statement) {
        for p in [&l, &s] {
            if !p.exists() {
                bail!("input not found: {}", p.display());
            }
        }
        return Ok((l, s));
    }
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let found = discover_inputs(&dir)
        .with_context(|| format!("discovering inputs in {}", dir.display()))?;
    Ok((found.ledger, found.statement))
}

fn run_compare(
    dir: Option<PathBuf>,
    ledger: Option<PathBuf>,
    statement: Option<PathBuf>,
    account: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let account = resolve_account(account)?;
    let (ledger_path, statement_path) = resolve_inputs(dir, ledger, statement)?;

    let ledger_rows = parse_ledger_xlsx(&ledger_path)?;
    let statement_rows = parse_statement_csv(&statement_path)?;

    let ledger_recs: Vec<TxnRecord> = ledger_rows
        .iter()
        .filter_map(|r| normalize_ledger(r, &account))
        .collect();
    let statement_recs: Vec<TxnRecord> =
        statement_rows.iter().filter_map(normalize_statement).collect();

    println!(
        "Ledger:    {} rows in {}, {} for account {:?}",
        ledger_rows.len(),
        ledger_path.display(),
        ledger_recs.len(),
        account
    );
    println!(
        "Statement: {} rows in {}, {} after noise filtering",
        statement_rows.len(),
        statement_path.display(),
        statement_recs.len()
    );

    let result = reconcile(&ledger_recs, &statement_recs);
    println!(
        "Totals: ledger {}, statement {}, difference {}\n",
        report::format_yen(result.ledger_total),
        report::format_yen(result.statement_total),
        report::format_yen(result.difference)
    );

    match out {
        Some(path) => {
            report::write_report(&path, &result)?;
            println!(
                "Report written to {} ({} ledger-only, {} statement-only)",
                path.display(),
                result.ledger_only.len(),
                result.statement_only.len()
            );
        }
        None => print!("{}", report::render_markdown(&result)),
    }

    Ok(())
}

fn run_inspect(file: &PathBuf, limit: usize, account: Option<String>) -> Result<()> {
    if !file.exists() {
        bail!("input not found: {}", file.display());
    }
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let recs: Vec<TxnRecord> = match ext.as_str() {
        "xlsx" => {
            let account = resolve_account(account)?;
            let rows = parse_ledger_xlsx(file)?;
            println!("{} rows, account filter {:?}", rows.len(), account);
            rows.iter()
                .filter_map(|r| normalize_ledger(r, &account))
                .collect()
        }
        "csv" => {
            let rows = parse_statement_csv(file)?;
            println!("{} rows before noise filtering", rows.len());
            rows.iter().filter_map(normalize_statement).collect()
        }
        other => bail!("unsupported input extension {other:?} (expected .xlsx or .csv)"),
    };

    println!("{} normalized records", recs.len());
    for rec in recs.iter().take(limit) {
        println!(
            "{:<12} {:>12} {}",
            rec.date,
            report::format_yen(rec.amount),
            rec.description
        );
    }
    if recs.len() > limit {
        println!("... ({} more)", recs.len() - limit);
    }

    Ok(())
}
