//! Configuration for Oelo tools.
//!
//! A flat TOML file at the platform config path, overlaid with `OELO_*`
//! environment variables, translated into `oelo_core::CoordinatorConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use oelo_core::{CoordinatorConfig, CoreError, DebounceConfig};

mod zones;

pub use zones::{ZoneStore, zone_store_path};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no controller address configured")]
    MissingAddress,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConfigurationInvalid { field, reason } => Self::Validation { field, reason },
            other => Self::Validation {
                field: "config".into(),
                reason: other.to_string(),
            },
        }
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// On-disk configuration. Every field has a default except the address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Controller host, `host:port` or URL.
    pub address: Option<String>,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_zone_count")]
    pub zone_count: u8,

    #[serde(default = "default_quiet_window_ms")]
    pub quiet_window_ms: u64,

    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,

    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: None,
            poll_interval_secs: default_poll_interval_secs(),
            zone_count: default_zone_count(),
            quiet_window_ms: default_quiet_window_ms(),
            max_wait_ms: default_max_wait_ms(),
            failure_threshold: default_failure_threshold(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}
fn default_zone_count() -> u8 {
    6
}
fn default_quiet_window_ms() -> u64 {
    250
}
fn default_max_wait_ms() -> u64 {
    1000
}
fn default_failure_threshold() -> u32 {
    3
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Build and validate the coordinator settings.
    pub fn to_coordinator_config(&self) -> Result<CoordinatorConfig, ConfigError> {
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(ConfigError::MissingAddress)?;

        let config = CoordinatorConfig {
            address: address.to_owned(),
            zone_count: self.zone_count,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            debounce: DebounceConfig {
                quiet_window: Duration::from_millis(self.quiet_window_ms),
                max_wait: Duration::from_millis(self.max_wait_ms),
            },
            failure_threshold: self.failure_threshold,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "oelo", "oelo").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("oelo");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("OELO_"));

    Ok(figment.extract()?)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Write `cfg` to `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, cfg.to_toml()?)?;
    Ok(())
}
