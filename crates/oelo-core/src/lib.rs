// oelo-core: Shared state-synchronization layer between oelo-api and the
// per-zone light entities of a host platform.

pub mod config;
pub mod convert;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod model;
pub mod poll;
pub mod store;
pub mod stream;
pub mod transport;
pub mod zone;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CoordinatorConfig, DebounceConfig};
pub use coordinator::{Coordinator, PollOutcome};
pub use error::CoreError;
pub use poll::PollPhase;
pub use store::StateCache;
pub use stream::ZoneStream;
pub use transport::{HttpTransport, Transport};
pub use zone::Zone;

pub use model::{
    Attribute, CommandBatch, ControllerSnapshot, LightCommand, PendingChanges, Rgb, ZoneChange,
    ZoneId, ZoneMemory, ZoneReading, ZoneState,
};

// Effect catalog lives with the wire format; surfaced here for consumers.
pub use oelo_api::effects;
