//! Engine configuration loaded from the environment.
//!
//! Every toggle the movement and narration code consults is read once here and
//! handed to constructors; nothing reads the environment after startup.

use std::str::FromStr;

use rpgworld_domain::Markup;

use crate::use_cases::movement::NarrationConfig;

pub const DATABASE_PATH: &str = "DATABASE_PATH";
pub const NARRATION_ENABLED: &str = "NARRATION_ENABLED";
pub const NARRATION_MARKUP: &str = "NARRATION_MARKUP";
pub const NARRATION_STORE: &str = "NARRATION_STORE";
pub const PUBLIC_LOGS: &str = "PUBLIC_LOGS";

const DEFAULT_DATABASE_PATH: &str = "world.db";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a boolean, got {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("{key} has an invalid value: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Where movement narration ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationStore {
    /// Structured log lines only
    #[default]
    Log,
    /// Game Master chat messages in the world database
    Sqlite,
}

impl FromStr for NarrationStore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "" => Ok(Self::Log),
            "sqlite" | "chat" => Ok(Self::Sqlite),
            other => Err(format!("unknown narration store {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub database_path: String,
    pub narration: NarrationConfig,
    pub narration_store: NarrationStore,
    /// Mirror narration into the public content log (SQLite store only)
    pub public_logs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            narration: NarrationConfig::default(),
            narration_store: NarrationStore::default(),
            public_logs: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_path = lookup(DATABASE_PATH)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.database_path);

        let enabled = match lookup(NARRATION_ENABLED) {
            Some(value) => parse_bool(NARRATION_ENABLED, &value)?,
            None => defaults.narration.enabled,
        };

        let markup = match lookup(NARRATION_MARKUP) {
            Some(value) => value
                .parse::<Markup>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: NARRATION_MARKUP,
                    message: e.to_string(),
                })?,
            None => defaults.narration.markup,
        };

        let narration_store = match lookup(NARRATION_STORE) {
            Some(value) => value
                .parse::<NarrationStore>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: NARRATION_STORE,
                    message,
                })?,
            None => defaults.narration_store,
        };

        let public_logs = match lookup(PUBLIC_LOGS) {
            Some(value) => parse_bool(PUBLIC_LOGS, &value)?,
            None => defaults.public_logs,
        };

        Ok(Self {
            database_path,
            narration: NarrationConfig { enabled, markup },
            narration_store,
            public_logs,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
