//! Command handlers: CLI args -> coordinator calls -> output formatting.

pub mod config_cmd;
pub mod effects;
pub mod probe;
pub mod set;
pub mod status;
pub mod util;
pub mod watch;
