//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::time::Duration;

/// Which backend the panels talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Memory,
    Rest { base_url: String },
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_u64(name: &str, default: u64) -> anyhow::Result<u64> {
    match var(name) {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be a valid u64 (got '{}')", name, v)),
        None => Ok(default),
    }
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    var("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))
}

/// Listen address of the console API server.
pub fn bind_addr() -> String {
    var("CONSOLE_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string())
}

/// Rows per page in every panel (minimum 1).
pub fn page_size() -> anyhow::Result<usize> {
    Ok(parse_u64("CONSOLE_PAGE_SIZE", 10)?.max(1) as usize)
}

/// Upper bound for one load; `CONSOLE_LOAD_TIMEOUT_MS=0` disables it.
pub fn load_timeout() -> anyhow::Result<Option<Duration>> {
    let ms = parse_u64("CONSOLE_LOAD_TIMEOUT_MS", 10_000)?;
    Ok((ms > 0).then(|| Duration::from_millis(ms)))
}

/// Artificial latency of the in-memory source.
pub fn simulated_delay() -> anyhow::Result<Duration> {
    Ok(Duration::from_millis(parse_u64("CONSOLE_SIMULATED_DELAY_MS", 0)?))
}

/// `memory` (default) or `rest`; `rest` requires `CONSOLE_API_BASE_URL`.
pub fn source_kind() -> anyhow::Result<SourceKind> {
    let kind = var("CONSOLE_DATA_SOURCE").unwrap_or_else(|| "memory".to_string());
    match kind.trim().to_lowercase().as_str() {
        "memory" => Ok(SourceKind::Memory),
        "rest" => {
            let base_url = var("CONSOLE_API_BASE_URL").ok_or_else(|| {
                anyhow!("CONSOLE_API_BASE_URL must be set when CONSOLE_DATA_SOURCE=rest")
            })?;
            Ok(SourceKind::Rest { base_url })
        }
        other => Err(anyhow!(
            "CONSOLE_DATA_SOURCE must be 'memory' or 'rest' (got '{}')",
            other
        )),
    }
}

/// Console settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub bind_addr: String,
    pub page_size: usize,
    pub load_timeout: Option<Duration>,
    pub simulated_delay: Duration,
    pub source: SourceKind,
}

impl ConsoleConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind_addr: bind_addr(),
            page_size: page_size()?,
            load_timeout: load_timeout()?,
            simulated_delay: simulated_delay()?,
            source: source_kind()?,
        })
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            page_size: 10,
            load_timeout: Some(Duration::from_secs(10)),
            simulated_delay: Duration::ZERO,
            source: SourceKind::Memory,
        }
    }
}
