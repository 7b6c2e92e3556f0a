// oelo-api: Async Rust client for the Oelo controller's local HTTP API.

pub mod client;
pub mod effects;
pub mod error;
pub mod models;
pub mod pattern;
pub mod transport;

pub use client::OeloClient;
pub use effects::Effect;
pub use error::Error;
pub use models::ZoneReport;
pub use pattern::{Direction, PatternRequest};
pub use transport::TransportConfig;
