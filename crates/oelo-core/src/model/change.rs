use serde::Serialize;
use strum::{Display, EnumIter};

use super::zone::{Rgb, ZoneState};

/// The writable attributes of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Power,
    Brightness,
    Color,
    Effect,
}

/// One attribute write requested through a zone facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneChange {
    Power(bool),
    Brightness(u8),
    Color(Rgb),
    /// Catalog effect name; validated before it gets here.
    Effect(String),
}

impl ZoneChange {
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::Power(_) => Attribute::Power,
            Self::Brightness(_) => Attribute::Brightness,
            Self::Color(_) => Attribute::Color,
            Self::Effect(_) => Attribute::Effect,
        }
    }
}

/// Desired attribute values for one zone within the current debounce window.
///
/// Each slot holds the latest write for its attribute. A solid color and an
/// effect cannot both be pending: whichever came last replaces the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub power: Option<bool>,
    pub brightness: Option<u8>,
    pub color: Option<Rgb>,
    pub effect: Option<String>,
}

impl PendingChanges {
    pub fn apply(&mut self, change: ZoneChange) {
        match change {
            ZoneChange::Power(on) => self.power = Some(on),
            ZoneChange::Brightness(level) => self.brightness = Some(level),
            ZoneChange::Color(color) => {
                self.color = Some(color);
                self.effect = None;
            }
            ZoneChange::Effect(name) => {
                self.effect = Some(name);
                self.color = None;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.power.is_none()
            && self.brightness.is_none()
            && self.color.is_none()
            && self.effect.is_none()
    }

    /// Attributes with a pending value, in a stable order.
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut attrs = Vec::with_capacity(4);
        if self.power.is_some() {
            attrs.push(Attribute::Power);
        }
        if self.brightness.is_some() {
            attrs.push(Attribute::Brightness);
        }
        if self.color.is_some() {
            attrs.push(Attribute::Color);
        }
        if self.effect.is_some() {
            attrs.push(Attribute::Effect);
        }
        attrs
    }

    /// The state the zone should end up in once these changes land.
    ///
    /// Setting brightness, color or an effect lights a dark zone unless an
    /// explicit power-off is pending alongside it. Attributes without a
    /// pending value keep their current value.
    pub fn resolve(&self, current: &ZoneState) -> ZoneState {
        let mut target = current.clone();

        if let Some(level) = self.brightness {
            target.brightness = level;
        }
        if let Some(color) = self.color {
            target.color = color;
            target.effect = None;
        }
        if let Some(name) = &self.effect {
            if let Some(effect) = oelo_api::effects::find(name) {
                target.color = effect.primary_color().into();
            }
            target.effect = Some(name.clone());
        }

        let lights_up = self.brightness.is_some() || self.color.is_some() || self.effect.is_some();
        target.power = self.power.unwrap_or(current.power || lights_up);
        target
    }
}
