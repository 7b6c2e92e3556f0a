// ── Coordinator configuration ──
//
// Runtime settings for one controller. Construction is cheap and
// infallible; `validate` runs before the coordinator starts.

use std::time::Duration;

use crate::error::CoreError;

/// Highest zone number the controller hardware exposes.
pub const MAX_ZONES: u8 = 6;

/// Timing of the command debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// A batch is sent once no new change arrived for this long.
    pub quiet_window: Duration,
    /// Upper bound between the first pending change and its flush.
    pub max_wait: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet_window: Duration::from_millis(250),
            max_wait: Duration::from_secs(1),
        }
    }
}

/// Configuration for a [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Host, `host:port` or `http://` URL of the controller.
    pub address: String,
    /// Zones 1..=zone_count get a facade.
    pub zone_count: u8,
    /// Time between scheduled polls.
    pub poll_interval: Duration,
    pub debounce: DebounceConfig,
    /// Consecutive poll failures before the controller is reported unavailable.
    pub failure_threshold: u32,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            zone_count: MAX_ZONES,
            poll_interval: Duration::from_secs(30),
            debounce: DebounceConfig::default(),
            failure_threshold: 3,
            request_timeout: oelo_api::transport::DEFAULT_TIMEOUT,
        }
    }
}

impl CoordinatorConfig {
    /// Defaults for the controller at `address`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Reject settings the coordinator cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        oelo_api::client::base_url_for(&self.address)?;

        if self.zone_count == 0 || self.zone_count > MAX_ZONES {
            return Err(CoreError::config(
                "zone_count",
                format!("must be between 1 and {MAX_ZONES}, got {}", self.zone_count),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(CoreError::config("poll_interval", "must be greater than zero"));
        }
        if self.request_timeout.is_zero() {
            return Err(CoreError::config("request_timeout", "must be greater than zero"));
        }
        if self.debounce.quiet_window.is_zero() {
            return Err(CoreError::config("quiet_window", "must be greater than zero"));
        }
        if self.debounce.max_wait < self.debounce.quiet_window {
            return Err(CoreError::config(
                "max_wait",
                format!(
                    "must not be shorter than quiet_window ({}ms < {}ms)",
                    self.debounce.max_wait.as_millis(),
                    self.debounce.quiet_window.as_millis()
                ),
            ));
        }
        if self.failure_threshold == 0 {
            return Err(CoreError::config("failure_threshold", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_once_an_address_is_set() {
        assert!(CoordinatorConfig::default().validate().is_err());
        assert!(CoordinatorConfig::new("192.168.1.40").validate().is_ok());
    }

    #[test]
    fn zone_count_is_bounded() {
        for bad in [0, 7] {
            let config = CoordinatorConfig {
                zone_count: bad,
                ..CoordinatorConfig::new("10.0.0.5")
            };
            match config.validate() {
                Err(CoreError::ConfigurationInvalid { field, .. }) => {
                    assert_eq!(field, "zone_count");
                }
                other => panic!("expected zone_count error, got {other:?}"),
            }
        }
    }

    #[test]
    fn max_wait_must_cover_quiet_window() {
        let config = CoordinatorConfig {
            debounce: DebounceConfig {
                quiet_window: Duration::from_millis(500),
                max_wait: Duration::from_millis(100),
            },
            ..CoordinatorConfig::new("10.0.0.5")
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::ConfigurationInvalid { .. })
        ));
    }

    #[test]
    fn bad_address_is_a_configuration_error() {
        let config = CoordinatorConfig::new("10.0.0.5/setPattern");
        assert!(matches!(
            config.validate(),
            Err(CoreError::ConfigurationInvalid { ref field, .. }) if field == "address"
        ));
    }
}
