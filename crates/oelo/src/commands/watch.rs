//! `oelo watch`: run the poll loop and print zone changes until Ctrl-C.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Local;
use tokio_stream::{StreamExt, StreamMap};

use oelo_core::{CoordinatorConfig, ZoneId, ZoneState};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    mut config: CoordinatorConfig,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(secs) = args.interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    let coordinator = util::connect(config)?;
    let color = output::should_color(&global.color);

    let mut streams = StreamMap::new();
    for zone in coordinator.zones() {
        streams.insert(zone.id(), zone.subscribe().into_stream());
    }
    let mut availability = coordinator.availability();
    let mut last: BTreeMap<ZoneId, ZoneState> = BTreeMap::new();

    coordinator.start().await;
    if !global.quiet {
        eprintln!(
            "Watching {} every {}s (Ctrl-C to stop)",
            coordinator.config().address,
            coordinator.config().poll_interval.as_secs()
        );
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Ok(()) = availability.changed() => {
                let up = *availability.borrow_and_update();
                tracing::info!(available = up, "controller availability changed");
                if !global.quiet {
                    eprintln!(
                        "{} controller available: {}",
                        Local::now().format("%H:%M:%S"),
                        output::availability_label(up, color)
                    );
                }
            }
            Some((zone, state)) = streams.next() => {
                // Every poll refreshes last_seen; only print visible changes.
                if last.get(&zone).is_some_and(|prev| same_visible(prev, &state)) {
                    continue;
                }
                print_change(&state, global, color);
                last.insert(zone, state);
            }
            else => break,
        }
    }

    coordinator.shutdown().await;
    Ok(())
}

fn same_visible(a: &ZoneState, b: &ZoneState) -> bool {
    a.power == b.power
        && a.brightness == b.brightness
        && a.color == b.color
        && a.active_effect() == b.active_effect()
        && a.available == b.available
}

fn print_change(state: &ZoneState, global: &GlobalOpts, color: bool) {
    let line = match global.output {
        // One document per line so the stream stays parseable.
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            output::render_json(state, true)
        }
        OutputFormat::Plain => format!("{} {}", state.zone, if state.power { "on" } else { "off" }),
        OutputFormat::Table => format!(
            "{} zone {} {:<3} brightness {:>3} color {:<11} effect {}{}",
            Local::now().format("%H:%M:%S"),
            state.zone,
            output::power_label(state.power, color),
            state.brightness,
            state.color,
            state.active_effect().unwrap_or("-"),
            if state.available { "" } else { " (unavailable)" },
        ),
    };
    output::print_output(&line, global.quiet);
}
