use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MAX_ZONES;
use crate::error::CoreError;

/// Brightness assumed for a zone the controller has never reported one for.
pub const DEFAULT_BRIGHTNESS: u8 = 255;

/// A validated, 1-based zone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(u8);

impl ZoneId {
    /// Validate `index` against the configured zone count.
    pub fn new(index: u8, zone_count: u8) -> Result<Self, CoreError> {
        if index == 0 || index > zone_count || index > MAX_ZONES {
            return Err(CoreError::UnknownZone {
                zone: index,
                zone_count,
            });
        }
        Ok(Self(index))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every zone from 1 to `zone_count`.
    pub fn all(zone_count: u8) -> impl Iterator<Item = Self> {
        (1..=zone_count.min(MAX_ZONES)).map(Self)
    }

    /// Position in a zero-based zone table.
    pub(crate) fn slot(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Color ───────────────────────────────────────────────────────────

/// An RGB triple at full brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Parses `"r,g,b"` or `"#rrggbb"`.
impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(format!("expected #rrggbb, got '{s}'"));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("'{s}': {e}"))
            };
            return Ok(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = parts[..] else {
            return Err(format!("expected r,g,b, got '{s}'"));
        };
        let channel = |v: &str| v.parse::<u8>().map_err(|e| format!("'{v}': {e}"));
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }
}

// ── Zone state ──────────────────────────────────────────────────────

/// Last known state of one zone, as held by the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneState {
    pub zone: ZoneId,
    pub power: bool,
    pub brightness: u8,
    pub color: Rgb,
    /// Catalog name, or the raw pattern type for patterns the catalog lacks.
    pub effect: Option<String>,
    /// When the controller last reported this zone.
    pub last_seen: Option<DateTime<Utc>>,
    /// Controller reachability at the time of the read.
    pub available: bool,
}

impl ZoneState {
    /// What a zone reads as before the first successful poll.
    pub fn placeholder(zone: ZoneId) -> Self {
        Self {
            zone,
            power: false,
            brightness: DEFAULT_BRIGHTNESS,
            color: Rgb::WHITE,
            effect: None,
            last_seen: None,
            available: false,
        }
    }

    /// The effect actually running: none while the zone is dark.
    pub fn active_effect(&self) -> Option<&str> {
        if self.power {
            self.effect.as_deref()
        } else {
            None
        }
    }
}
