//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use oelo_config::ConfigError;
use oelo_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach controller at {address}: {reason}")]
    #[diagnostic(
        code(oelo::connection_failed),
        help(
            "Check that the controller is powered and on the same network.\n\
             Address: {address}\n\
             Try: oelo probe --address <ip>"
        )
    )]
    ConnectionFailed { address: String, reason: String },

    #[error("Controller at {address} did not answer in time")]
    #[diagnostic(
        code(oelo::timeout),
        help("Increase the timeout with --timeout or check the controller's Wi-Fi signal.")
    )]
    Timeout { address: String },

    // ── Controller ───────────────────────────────────────────────────
    #[error("Controller rejected the request: {message}")]
    #[diagnostic(code(oelo::rejected))]
    Rejected { message: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("Zone {zone} is not configured")]
    #[diagnostic(
        code(oelo::unknown_zone),
        help("Configured zones are 1-{zone_count}. Change the count with --zones.")
    )]
    UnknownZone { zone: u8, zone_count: u8 },

    #[error("Unknown effect '{name}'")]
    #[diagnostic(
        code(oelo::unknown_effect),
        help("Run: oelo effects to see available effect names")
    )]
    UnknownEffect { name: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No controller address configured")]
    #[diagnostic(
        code(oelo::no_address),
        help(
            "Pass --address <ip>, set OELO_ADDRESS, or run: oelo config init <ip>\n\
             Config file: {path}"
        )
    )]
    NoAddress { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(oelo::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(code(oelo::config_exists), help("Use --force to overwrite it."))]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(oelo::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize configuration: {0}")]
    #[diagnostic(code(oelo::serialize))]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::UnknownZone { .. } | Self::UnknownEffect { .. } => exit_code::NOT_FOUND,
            Self::NoAddress { .. } | Self::Validation { .. } | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Map a core error, naming `address` in connection-level failures.
    pub fn from_core(err: CoreError, address: &str) -> Self {
        match err {
            CoreError::Unreachable {
                timed_out: true, ..
            } => Self::Timeout {
                address: address.into(),
            },
            CoreError::Unreachable { reason, .. } => Self::ConnectionFailed {
                address: address.into(),
                reason,
            },
            CoreError::Rejected { message, status } => Self::Rejected {
                message: match status {
                    Some(code) => format!("HTTP {code}: {message}"),
                    None => message,
                },
            },
            CoreError::ConfigurationInvalid { field, reason } => Self::Validation { field, reason },
            CoreError::UnknownEffect { name } => Self::UnknownEffect { name },
            CoreError::UnknownZone { zone, zone_count } => Self::UnknownZone { zone, zone_count },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core(err, "(configured address)")
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::MissingAddress => CliError::NoAddress {
                path: oelo_config::config_path().display().to_string(),
            },
            ConfigError::Serialization(e) => CliError::Serialize(e.to_string()),
            ConfigError::Parse(e) => CliError::Validation {
                field: "config file".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_refusals_get_distinct_codes() {
        let timeout = CliError::from_core(
            CoreError::Unreachable {
                reason: "timed out".into(),
                timed_out: true,
            },
            "10.0.0.5",
        );
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let refused = CliError::from_core(
            CoreError::Unreachable {
                reason: "connection refused".into(),
                timed_out: false,
            },
            "10.0.0.5",
        );
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn caller_mistakes_are_not_found_or_usage() {
        let effect: CliError = CoreError::UnknownEffect {
            name: "Disco".into(),
        }
        .into();
        assert_eq!(effect.exit_code(), exit_code::NOT_FOUND);

        let missing: CliError = ConfigError::MissingAddress.into();
        assert_eq!(missing.exit_code(), exit_code::USAGE);
    }
}
