//! `oelo status`: poll once and print zone states.

use oelo_core::{CoordinatorConfig, ZoneState};

use crate::cli::{GlobalOpts, StatusArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    config: CoordinatorConfig,
    args: StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let coordinator = util::connect(config)?;

    // Validate zone numbers before touching the network.
    let zones = if args.zones.is_empty() {
        coordinator.zones()
    } else {
        args.zones
            .iter()
            .map(|&n| coordinator.zone(n))
            .collect::<Result<Vec<_>, _>>()?
    };

    util::poll(&coordinator).await?;

    let states: Vec<ZoneState> = zones.iter().map(oelo_core::Zone::state).collect();
    output::print_output(&util::render_zones(&states, global), global.quiet);
    Ok(())
}
