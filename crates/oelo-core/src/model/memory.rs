// What each zone was last successfully told to show.
//
// The controller reports only a pattern type, never brightness or the
// exact colors, so a fresh process would otherwise re-render a zone from
// placeholders. Persisting this per zone lets the next process pick up
// where the last write left off.

use serde::{Deserialize, Serialize};

use super::zone::{Rgb, ZoneState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMemory {
    pub brightness: u8,
    pub color: Rgb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

impl ZoneMemory {
    pub fn of(state: &ZoneState) -> Self {
        Self {
            brightness: state.brightness,
            color: state.color,
            effect: state.effect.clone(),
        }
    }

    /// Fill in what a poll cannot tell, unless the polled pattern shows the
    /// zone has been changed by something else since.
    ///
    /// Power is never touched. A dark zone takes everything, so turning it
    /// back on replays the remembered program.
    pub fn restore_into(&self, state: &mut ZoneState) {
        let consistent = !state.power
            || match (&state.effect, &self.effect) {
                (None, None) => true,
                (Some(seen), Some(mine)) => same_pattern(seen, mine),
                _ => false,
            };
        if !consistent {
            return;
        }
        state.brightness = self.brightness;
        state.color = self.color;
        state.effect.clone_from(&self.effect);
    }
}

/// Two effect names the controller would report identically.
fn same_pattern(a: &str, b: &str) -> bool {
    a == b || pattern_of(a) == pattern_of(b)
}

fn pattern_of(name: &str) -> &str {
    oelo_api::effects::find(name).map_or(name, |e| e.pattern_type)
}
