//! `oelo set`: change zones and flush the batch immediately.

use oelo_core::{CoordinatorConfig, Zone, ZoneState};

use crate::cli::{GlobalOpts, SetArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    config: CoordinatorConfig,
    args: SetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let coordinator = util::connect(config)?;
    let address = coordinator.config().address.clone();

    let zones = args
        .zones
        .iter()
        .map(|&n| coordinator.zone(n))
        .collect::<Result<Vec<_>, _>>()?;

    // Unchanged attributes are re-sent from the polled and remembered state.
    util::poll(&coordinator).await?;

    for zone in &zones {
        apply(zone, &args)?;
    }

    let sent = coordinator
        .flush_now()
        .await
        .map_err(|e| CliError::from_core(e, &address))?;
    tracing::info!(zones = sent, "changes sent");
    util::remember(&coordinator, &zones);

    if !global.quiet {
        eprintln!("Updated {sent} zone(s)");
    }

    let states: Vec<ZoneState> = zones.iter().map(Zone::state).collect();
    output::print_output(&util::render_zones(&states, global), global.quiet);
    Ok(())
}

fn apply(zone: &Zone, args: &SetArgs) -> Result<(), CliError> {
    if args.off {
        zone.turn_off();
        return Ok(());
    }
    if args.on {
        zone.turn_on();
    }
    if let Some(brightness) = args.brightness {
        zone.set_brightness(brightness);
    }
    if let Some(color) = args.color {
        zone.set_color(color);
    }
    if let Some(name) = &args.effect {
        zone.set_effect(name)?;
    }
    Ok(())
}
