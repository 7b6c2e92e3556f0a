// ── Domain model ──
//
// Plain data shared by the cache, debouncer and facade. Nothing in here
// touches the network.

mod change;
mod command;
mod memory;
mod snapshot;
mod zone;

pub use change::{Attribute, PendingChanges, ZoneChange};
pub use command::{CommandBatch, LightCommand};
pub use memory::ZoneMemory;
pub use snapshot::{ControllerSnapshot, ZoneReading};
pub use zone::{DEFAULT_BRIGHTNESS, Rgb, ZoneId, ZoneState};
