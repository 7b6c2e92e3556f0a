//! `oelo probe`: one poll, reported as a reachability summary.

use std::time::Instant;

use serde::Serialize;

use oelo_core::CoordinatorConfig;

use crate::cli::GlobalOpts;
use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ProbeReport {
    address: String,
    available: bool,
    zone_count: u8,
    zones_reported: usize,
    lit_zones: usize,
    latency_ms: u128,
}

pub async fn handle(config: CoordinatorConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let coordinator = util::connect(config)?;

    let started = Instant::now();
    util::poll(&coordinator).await?;
    let latency = started.elapsed();

    let states = coordinator.cache().read_all();
    let report = ProbeReport {
        address: coordinator.config().address.clone(),
        available: coordinator.is_available(),
        zone_count: coordinator.config().zone_count,
        zones_reported: states.iter().filter(|s| s.last_seen.is_some()).count(),
        lit_zones: states.iter().filter(|s| s.power).count(),
        latency_ms: latency.as_millis(),
    };

    let color = output::should_color(&global.color);
    let rendered = output::render_single(
        &global.output,
        &report,
        |r| {
            [
                util::detail_line("Address", &r.address),
                util::detail_line("Available", output::availability_label(r.available, color)),
                util::detail_line(
                    "Zones",
                    format!("{} of {} reported", r.zones_reported, r.zone_count),
                ),
                util::detail_line("Lit", r.lit_zones),
                util::detail_line("Latency", format!("{} ms", r.latency_ms)),
            ]
            .join("\n")
        },
        |r| r.available.to_string(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

