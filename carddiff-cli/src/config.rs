use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default target account when neither --account nor the config file says
/// otherwise. Matches the ledger app's asset label for the card.
pub const DEFAULT_ACCOUNT_LABEL: &str = "Amazon MasterCard";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub account: AccountSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSection {
    /// Ledger asset label to reconcile against the card statement.
    pub label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: AccountSection {
                label: DEFAULT_ACCOUNT_LABEL.to_string(),
            },
        }
    }
}

pub fn carddiff_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".carddiff"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(carddiff_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    fs::create_dir_all(p.parent().unwrap())
        .with_context(|| format!("create {}", p.parent().unwrap().display()))?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
