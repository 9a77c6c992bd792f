//! Read hour-log entries from a JSON dump.
//!
//! Accepts either a bare array of entries or the `{ "logs": [...] }` wrapper
//! the admin API emits.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use fieldlog_core::LogEntry;

#[derive(Deserialize)]
#[serde(untagged)]
enum LogDump {
    Entries(Vec<LogEntry>),
    Wrapped { logs: Vec<LogEntry> },
}

pub fn read_log_json(path: impl AsRef<Path>) -> Result<Vec<LogEntry>> {
    let s = fs::read_to_string(path.as_ref())
        .with_context(|| format!("read {}", path.as_ref().display()))?;
    let dump: LogDump = serde_json::from_str(&s)
        .with_context(|| format!("parse {}", path.as_ref().display()))?;
    Ok(match dump {
        LogDump::Entries(entries) => entries,
        LogDump::Wrapped { logs } => logs,
    })
}
