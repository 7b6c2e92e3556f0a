//! Shared helpers for command handlers.

use tabled::Tabled;

use oelo_config::ZoneStore;
use oelo_core::{Coordinator, CoordinatorConfig, HttpTransport, Zone, ZoneMemory, ZoneState};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Resolve settings from config file, environment and global flags.
pub fn coordinator_config(global: &GlobalOpts) -> Result<CoordinatorConfig, CliError> {
    let mut cfg = oelo_config::load_config()?;
    if let Some(address) = &global.address {
        cfg.address = Some(address.clone());
    }
    if let Some(zones) = global.zones {
        cfg.zone_count = zones;
    }
    if let Some(timeout) = global.timeout {
        cfg.request_timeout_secs = timeout;
    }
    Ok(cfg.to_coordinator_config()?)
}

/// Build an HTTP coordinator. Does not touch the network.
pub fn connect(config: CoordinatorConfig) -> Result<Coordinator<HttpTransport>, CliError> {
    tracing::debug!(address = %config.address, zones = config.zone_count, "building coordinator");
    Ok(Coordinator::http(config)?)
}

/// Poll once, mapping failures to CLI errors that name the controller,
/// then lay the remembered zone state over the result.
pub async fn poll(coordinator: &Coordinator<HttpTransport>) -> Result<(), CliError> {
    coordinator
        .refresh_now()
        .await
        .map_err(|e| CliError::from_core(e, &coordinator.config().address))?;

    let config = coordinator.config();
    match ZoneStore::load_from(&oelo_config::zone_store_path()) {
        Ok(store) => coordinator.restore(&store.zones(&config.address, config.zone_count)),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable zone store"),
    }
    Ok(())
}

/// Record what the given zones now show. Failures only warn: the
/// controller has already accepted the change.
pub fn remember(coordinator: &Coordinator<HttpTransport>, zones: &[Zone]) {
    let path = oelo_config::zone_store_path();
    let address = &coordinator.config().address;

    let mut store = ZoneStore::load_from(&path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "replacing unreadable zone store");
        ZoneStore::default()
    });
    for zone in zones {
        store.remember(address, zone.id(), ZoneMemory::of(&zone.state()));
    }
    if let Err(e) = store.save_to(&path) {
        tracing::warn!(error = %e, path = %path.display(), "could not save zone state");
    }
}

// ── Zone rendering ──────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ZoneRow {
    #[tabled(rename = "Zone")]
    pub zone: u8,
    #[tabled(rename = "Power")]
    pub power: String,
    #[tabled(rename = "Brightness")]
    pub brightness: u8,
    #[tabled(rename = "Color")]
    pub color: String,
    #[tabled(rename = "Effect")]
    pub effect: String,
    #[tabled(rename = "Available")]
    pub available: String,
}

impl ZoneRow {
    pub fn new(state: &ZoneState, color: bool) -> Self {
        Self {
            zone: state.zone.get(),
            power: output::power_label(state.power, color),
            brightness: state.brightness,
            color: state.color.to_string(),
            effect: state.active_effect().unwrap_or("-").to_owned(),
            available: output::availability_label(state.available, color),
        }
    }
}

pub fn render_zones(states: &[ZoneState], global: &GlobalOpts) -> String {
    let color = output::should_color(&global.color);
    output::render_list(
        &global.output,
        states,
        |s| ZoneRow::new(s, color),
        |s| format!("{} {}", s.zone, if s.power { "on" } else { "off" }),
    )
}

/// One key/value line of a detail view.
pub fn detail_line(key: &str, value: impl std::fmt::Display) -> String {
    format!("{key:<12} {value}")
}

