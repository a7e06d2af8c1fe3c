use crate::utils::constants::{
    CHART_SCRIPT_URL, DEFAULT_DATA_DIR, DEFAULT_LOG_LEVEL, DEFAULT_PROFIT_FACTOR_SENTINEL,
};
use anyhow::{anyhow, Result};
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone, PartialEq)]
pub struct JournalConfig {
    pub data_dir: PathBuf,
    pub chart_script_url: String,
    pub chart_load_timeout: Option<Duration>,
    pub profit_factor_sentinel: f64,
    pub log_level: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            chart_script_url: CHART_SCRIPT_URL.to_string(),
            chart_load_timeout: None,
            profit_factor_sentinel: DEFAULT_PROFIT_FACTOR_SENTINEL,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl JournalConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up a
    /// `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup("JOURNAL_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("CHART_SCRIPT_URL") {
            config.chart_script_url = url;
        }

        if let Some(secs) = lookup("CHART_LOAD_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid CHART_LOAD_TIMEOUT_SECS '{}': {}", secs, e))?;
            config.chart_load_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(sentinel) = lookup("PROFIT_FACTOR_SENTINEL") {
            let value: f64 = sentinel
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid PROFIT_FACTOR_SENTINEL '{}': {}", sentinel, e))?;
            if !(value.is_finite() && value > 0.0) {
                return Err(anyhow!("PROFIT_FACTOR_SENTINEL must be a positive number."));
            }
            config.profit_factor_sentinel = value;
        }

        if let Some(level) = lookup("JOURNAL_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }
}
