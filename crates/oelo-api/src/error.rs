use thiserror::Error;

/// Top-level error type for the `oelo-api` crate.
///
/// Covers every failure mode of the controller's two endpoints.
/// `oelo-core` folds these into `Unreachable` / `Rejected`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured address could not be turned into a controller URL.
    #[error("Invalid controller address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Controller responses ────────────────────────────────────────
    /// The controller answered with a non-success HTTP status.
    #[error("Controller returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Requests ────────────────────────────────────────────────────
    /// A pattern request that the controller cannot accept.
    #[error("Invalid pattern request: {0}")]
    InvalidPattern(String),
}

impl Error {
    /// Returns `true` if the controller could not be reached at all
    /// (as opposed to answering with something we didn't like).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// HTTP status code, if the controller answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
