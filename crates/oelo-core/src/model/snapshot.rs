use super::zone::{Rgb, ZoneId};

/// One zone's entry in a poll result.
///
/// The controller only reports power and pattern, so brightness and color
/// are optional; the cache keeps its previous values for what is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReading {
    /// Zone number as reported, not yet checked against the configured count.
    pub zone: u8,
    pub power: bool,
    pub brightness: Option<u8>,
    pub color: Option<Rgb>,
    pub effect: Option<String>,
}

impl ZoneReading {
    /// A lit zone showing a solid color.
    pub fn solid(zone: u8) -> Self {
        Self {
            zone,
            power: true,
            brightness: None,
            color: None,
            effect: None,
        }
    }

    pub fn off(zone: u8) -> Self {
        Self {
            power: false,
            ..Self::solid(zone)
        }
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// Everything one poll learned about the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub zones: Vec<ZoneReading>,
}

impl ControllerSnapshot {
    pub fn new(zones: Vec<ZoneReading>) -> Self {
        Self { zones }
    }

    pub fn zone(&self, zone: ZoneId) -> Option<&ZoneReading> {
        self.zones.iter().find(|r| r.zone == zone.get())
    }
}
