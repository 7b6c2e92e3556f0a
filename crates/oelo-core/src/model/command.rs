use std::collections::BTreeMap;

use super::zone::{Rgb, ZoneId, ZoneState};

/// What one zone should be told to do, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LightCommand {
    Off,
    Solid { color: Rgb, brightness: u8 },
    Effect { name: String, brightness: u8 },
}

impl LightCommand {
    pub fn for_state(state: &ZoneState) -> Self {
        if !state.power {
            return Self::Off;
        }
        match &state.effect {
            // Patterns outside the catalog cannot be re-sent; fall back to solid.
            Some(name) if oelo_api::effects::find(name).is_some() => Self::Effect {
                name: name.clone(),
                brightness: state.brightness,
            },
            _ => Self::Solid {
                color: state.color,
                brightness: state.brightness,
            },
        }
    }
}

/// One flush worth of commands, keyed by zone.
pub type CommandBatch = BTreeMap<ZoneId, LightCommand>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lit(effect: Option<&str>) -> ZoneState {
        let mut state = ZoneState::placeholder(ZoneId::new(2, 6).unwrap());
        state.power = true;
        state.brightness = 128;
        state.effect = effect.map(Into::into);
        state
    }

    #[test]
    fn dark_zone_is_off() {
        let dark = ZoneState::placeholder(ZoneId::new(1, 6).unwrap());
        assert_eq!(LightCommand::for_state(&dark), LightCommand::Off);
    }

    #[test]
    fn catalog_effect_is_replayed() {
        assert_eq!(
            LightCommand::for_state(&lit(Some("Pride: March"))),
            LightCommand::Effect {
                name: "Pride: March".into(),
                brightness: 128
            }
        );
    }

    #[test]
    fn foreign_pattern_falls_back_to_solid() {
        assert_eq!(
            LightCommand::for_state(&lit(Some("rainbow"))),
            LightCommand::Solid {
                color: Rgb::WHITE,
                brightness: 128
            }
        );
    }
}
