use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use fieldlog_core::{FiscalBoundary, ReportConfig};

pub fn fieldlog_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".fieldlog"))
}

pub fn ensure_fieldlog_home() -> Result<PathBuf> {
    let dir = fieldlog_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(fieldlog_home()?.join("config.toml"))
}

/// Load the report configuration, defaulting when no file exists.
/// `override_path` (from `--config`) must exist if given.
pub fn load_config(override_path: Option<&Path>) -> Result<ReportConfig> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = config_path()?;
            if !p.exists() {
                return Ok(ReportConfig::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ReportConfig =
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    // Serde bypasses the validating constructor; re-check the boundary.
    FiscalBoundary::new(cfg.fiscal_boundary.month, cfg.fiscal_boundary.day)?;
    Ok(cfg)
}

pub fn save_config(cfg: &ReportConfig) -> Result<PathBuf> {
    ensure_fieldlog_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&ReportConfig::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}
