// ── State storage ──

mod state_cache;

pub use state_cache::StateCache;
