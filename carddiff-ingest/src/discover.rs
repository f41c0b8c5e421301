//! Find the month's input pair in a directory: exactly one ledger xlsx and
//! exactly one statement CSV. Anything else is a pre-flight error, reported
//! before any parsing starts.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredInputs {
    pub ledger: PathBuf,
    pub statement: PathBuf,
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn is_excel_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("~$"))
}

/// Scan `dir` (non-recursive) for the input pair.
pub fn discover_inputs(dir: impl AsRef<Path>) -> Result<DiscoveredInputs> {
    let dir = dir.as_ref();
    let entries =
        fs::read_dir(dir).with_context(|| format!("scanning {}", dir.display()))?;

    let mut ledgers = Vec::new();
    let mut statements = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || is_excel_lock_file(&path) {
            continue;
        }
        if has_extension(&path, "xlsx") {
            ledgers.push(path);
        } else if has_extension(&path, "csv") {
            statements.push(path);
        }
    }
    // Deterministic error messages regardless of readdir order.
    ledgers.sort();
    statements.sort();

    let ledger = pick_one(ledgers, "ledger (.xlsx)", dir)?;
    let statement = pick_one(statements, "statement (.csv)", dir)?;
    Ok(DiscoveredInputs { ledger, statement })
}

fn pick_one(mut found: Vec<PathBuf>, kind: &str, dir: &Path) -> Result<PathBuf> {
    match found.len() {
        1 => Ok(found.remove(0)),
        0 => bail!("no {kind} file found in {}", dir.display()),
        n => bail!(
            "expected exactly one {kind} file in {}, found {n}: {}",
            dir.display(),
            found
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
