// Raw wire models for the controller's `getController` endpoint.

use serde::{Deserialize, Serialize};

/// Pattern name the controller reports for a dark zone.
pub const PATTERN_OFF: &str = "off";

/// Pattern name used for a single solid color.
pub const PATTERN_CUSTOM: &str = "custom";

/// One entry of the `getController` array.
///
/// Only `num` and `pattern` are relied upon; everything else the firmware
/// sends is kept in `extra` for debugging.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ZoneReport {
    /// Zone number (1-based).
    pub num: u8,

    /// Active pattern type (`"off"`, `"custom"`, `"fade"`, ...).
    pub pattern: String,

    /// User-assigned zone name, when the firmware reports one.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ZoneReport {
    pub fn is_off(&self) -> bool {
        self.pattern == PATTERN_OFF
    }

    pub fn is_custom(&self) -> bool {
        self.pattern == PATTERN_CUSTOM
    }
}
