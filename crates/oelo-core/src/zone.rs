// ── Zone facade ──
//
// What the entity layer holds for each light. Reads come from the cache,
// writes go to the debouncer; a facade never talks to the network.

use std::sync::Arc;

use oelo_api::effects;

use crate::debounce::CommandQueue;
use crate::error::CoreError;
use crate::model::{Rgb, ZoneChange, ZoneId, ZoneState};
use crate::store::StateCache;
use crate::stream::ZoneStream;

/// Handle to one zone. Cheap to clone; every clone shares the
/// coordinator's cache and command queue.
#[derive(Clone)]
pub struct Zone {
    id: ZoneId,
    cache: Arc<StateCache>,
    queue: Arc<CommandQueue>,
}

impl Zone {
    pub(crate) fn new(id: ZoneId, cache: Arc<StateCache>, queue: Arc<CommandQueue>) -> Self {
        Self { id, cache, queue }
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Current cached state. Never blocks.
    pub fn state(&self) -> ZoneState {
        self.cache.read(self.id)
    }

    pub fn is_available(&self) -> bool {
        self.state().available
    }

    pub fn subscribe(&self) -> ZoneStream {
        ZoneStream::new(self.id, Arc::clone(&self.cache))
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub fn set_power(&self, on: bool) {
        self.queue.enqueue(self.id, ZoneChange::Power(on));
    }

    pub fn turn_on(&self) {
        self.set_power(true);
    }

    pub fn turn_off(&self) {
        self.set_power(false);
    }

    pub fn set_brightness(&self, brightness: u8) {
        self.queue.enqueue(self.id, ZoneChange::Brightness(brightness));
    }

    /// Solid color; replaces any effect.
    pub fn set_color(&self, color: Rgb) {
        self.queue.enqueue(self.id, ZoneChange::Color(color));
    }

    /// Run a catalog effect by name.
    pub fn set_effect(&self, name: &str) -> Result<(), CoreError> {
        let effect = effects::find(name).ok_or_else(|| CoreError::UnknownEffect {
            name: name.to_owned(),
        })?;
        self.queue
            .enqueue(self.id, ZoneChange::Effect(effect.name.to_owned()));
        Ok(())
    }

    /// Names accepted by [`set_effect`](Self::set_effect).
    pub fn effect_list(&self) -> Vec<&'static str> {
        effects::names().collect()
    }
}

impl std::fmt::Debug for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zone").field("id", &self.id).finish_non_exhaustive()
    }
}
