use super::files::{atomic_write, read_optional};
use crate::domain::Roster;
use crate::ticker::DEFAULT_TICK_MS;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name used for "my shifts" and as the default reservation holder
    #[serde(default = "default_identity")]
    pub identity: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_require_clock_in")]
    pub require_clock_in: bool,
    /// Shifts and tasks for the day; the built-in sample is used when absent
    #[serde(default)]
    pub roster: Option<Roster>,
}

fn default_identity() -> String {
    "You".to_string()
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_require_clock_in() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            tick_ms: default_tick_ms(),
            require_clock_in: default_require_clock_in(),
            roster: None,
        }
    }
}

impl Config {
    /// Roster from config, or the sample roster anchored on `today`
    pub fn roster_or_sample(&self, today: NaiveDate) -> Roster {
        self.roster.clone().unwrap_or_else(|| Roster::sample(today))
    }
}

/// Load config from a config.json file; a missing file yields defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let Some(content) = read_optional(path)? else {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    };

    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    debug!(path = %path.display(), identity = %config.identity, "Loaded config");
    Ok(config)
}

/// Save config to a config.json file
pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json)?;
    Ok(())
}
