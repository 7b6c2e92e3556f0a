// Oelo controller HTTP client
//
// Wraps `reqwest::Client` with the controller's two endpoints. The firmware
// speaks plain HTTP on the LAN; every call is a GET with its arguments on
// the query string.

use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::models::ZoneReport;
use crate::pattern::PatternRequest;
use crate::transport::TransportConfig;

/// Body the firmware sends after accepting a `setPattern` call.
const COMMAND_ACK: &str = "Command Received";

/// Raw HTTP client for one Oelo controller.
pub struct OeloClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl OeloClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` should be the controller root (e.g. `http://192.168.1.40`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Create a client from a bare address (`"192.168.1.40"`,
    /// `"oelo.local:8080"`) or a full `http://` URL.
    pub fn from_address(address: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Self::new(base_url_for(address)?, transport)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout_secs: 0,
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the state of every zone in one request.
    pub async fn get_controller(&self) -> Result<Vec<ZoneReport>, Error> {
        let url = self.endpoint("getController")?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(|e| self.map_send(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_send(e))?;
        trace!(%status, body = %body, "getController response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("expected a JSON array of zones: {e}"),
            body,
        })
    }

    /// Apply a pattern to the zones named in the request.
    pub async fn set_pattern(&self, request: &PatternRequest) -> Result<(), Error> {
        let url = self.endpoint("setPattern")?;
        let query = request.query()?;
        debug!(
            pattern = %request.pattern_type,
            zones = ?request.zones,
            "GET {}",
            url
        );

        let resp = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.map_send(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_send(e))?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        if !body.contains(COMMAND_ACK) {
            warn!(
                %status,
                body = %truncate(&body, 50),
                "controller accepted setPattern with an unexpected body"
            );
        }
        Ok(())
    }

    fn map_send(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() && self.timeout_secs > 0 {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Turn a configured address into the controller's base URL.
pub fn base_url_for(address: &str) -> Result<Url, Error> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidAddress {
            address: address.into(),
            reason: "address is empty".into(),
        });
    }

    let raw = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("http://{trimmed}")
    };

    let mut url = Url::parse(&raw)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::InvalidAddress {
            address: address.into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidAddress {
            address: address.into(),
            reason: "missing host".into(),
        });
    }
    if url.path() != "/" || url.query().is_some() {
        return Err(Error::InvalidAddress {
            address: address.into(),
            reason: "address must not contain a path or query".into(),
        });
    }
    url.set_path("/");
    Ok(url)
}

fn truncate(s: &str, max: usize) -> &str {
    let s = s.trim();
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
