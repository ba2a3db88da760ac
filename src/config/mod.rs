use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, config_file_in, ensure_dir},
    errors::LedgerError,
    ledger::DEFAULT_UNDO_WINDOW_SECS,
    storage::json_backend::replace_file,
};

/// Longest undo window accepted from the config file, in seconds.
pub const MAX_UNDO_WINDOW_SECS: i64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub undo_window_secs: i64,
    pub advisor: AdvisorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            undo_window_secs: DEFAULT_UNDO_WINDOW_SECS,
            advisor: AdvisorConfig::default(),
        }
    }
}

impl Config {
    /// Undo window as a duration. Out-of-range values yield the default.
    pub fn undo_window(&self) -> Duration {
        Duration::try_seconds(self.undo_window_secs)
            .filter(|_| undo_window_in_range(self.undo_window_secs))
            .unwrap_or_else(|| Duration::seconds(DEFAULT_UNDO_WINDOW_SECS))
    }

    fn sanitized(mut self) -> Self {
        if !undo_window_in_range(self.undo_window_secs) {
            tracing::warn!(
                configured = self.undo_window_secs,
                fallback = DEFAULT_UNDO_WINDOW_SECS,
                max = MAX_UNDO_WINDOW_SECS,
                "undo_window_secs out of range, using default"
            );
            self.undo_window_secs = DEFAULT_UNDO_WINDOW_SECS;
        }
        self
    }
}

fn undo_window_in_range(secs: i64) -> bool {
    (1..=MAX_UNDO_WINDOW_SECS).contains(&secs)
}

/// Settings for the remote advice service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdvisorConfig {
    pub endpoint: String,
    pub advice_model: String,
    pub suggestion_model: String,
    /// Name of the environment variable carrying the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            advice_model: "gemini-3-pro-preview".into(),
            suggestion_model: "gemini-3-flash-preview".into(),
            api_key_env: "API_KEY".into(),
            timeout_secs: 30,
        }
    }
}

impl AdvisorConfig {
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            Ok(config.sanitized())
        } else {
            Ok(Config::default())
        }
    }

    /// Loads the config, writing the defaults out first when no file exists
    /// so there is something to edit.
    pub fn load_or_init(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            let config = Config::default();
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "default configuration written");
            return Ok(config);
        }
        self.load()
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
