// ── Core error types ──
//
// The three failure classes the coordinator knows about, plus caller
// mistakes caught at the facade. Transport-layer errors from `oelo_api`
// are folded into `Unreachable` / `Rejected` by the `From` impl below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Controller ───────────────────────────────────────────────────
    /// Network-level failure: timeout, refused connection, DNS.
    #[error("Controller unreachable: {reason}")]
    Unreachable {
        reason: String,
        /// No answer within the request timeout.
        timed_out: bool,
    },

    /// The controller answered, but not with something usable.
    #[error("Controller rejected the request: {message}")]
    Rejected {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration for {field}: {reason}")]
    ConfigurationInvalid { field: String, reason: String },

    // ── Caller errors ────────────────────────────────────────────────
    #[error("Unknown effect: {name}")]
    UnknownEffect { name: String },

    #[error("Zone {zone} is not configured (zones 1-{zone_count} available)")]
    UnknownZone { zone: u8, zone_count: u8 },
}

impl CoreError {
    /// Returns `true` for failures the next poll or flush may clear on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    pub(crate) fn config(field: &str, reason: impl Into<String>) -> Self {
        Self::ConfigurationInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<oelo_api::Error> for CoreError {
    fn from(err: oelo_api::Error) -> Self {
        if err.is_transient() {
            let timed_out = match &err {
                oelo_api::Error::Timeout { .. } => true,
                oelo_api::Error::Transport(e) => e.is_timeout(),
                _ => false,
            };
            return CoreError::Unreachable {
                reason: err.to_string(),
                timed_out,
            };
        }

        match err {
            oelo_api::Error::InvalidUrl(e) => CoreError::config("address", e.to_string()),
            oelo_api::Error::InvalidAddress { reason, .. } => CoreError::config("address", reason),
            oelo_api::Error::Transport(ref e) => match e.status() {
                Some(status) => CoreError::Rejected {
                    message: err.to_string(),
                    status: Some(status.as_u16()),
                },
                // Anything without a status never got a response.
                None => CoreError::Unreachable {
                    reason: err.to_string(),
                    timed_out: false,
                },
            },
            oelo_api::Error::Status { status, body } => CoreError::Rejected {
                message: body,
                status: Some(status),
            },
            oelo_api::Error::Deserialization { message, .. } => CoreError::Rejected {
                message,
                status: None,
            },
            oelo_api::Error::InvalidPattern(message) => CoreError::Rejected {
                message,
                status: None,
            },
            oelo_api::Error::Timeout { timeout_secs } => CoreError::Unreachable {
                reason: format!("timed out after {timeout_secs}s"),
                timed_out: true,
            },
        }
    }
}
