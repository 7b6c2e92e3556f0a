// ── Wire ↔ domain conversion ──
//
// Poll results come in as `ZoneReport`s; flushes go out as
// `PatternRequest`s. Nothing here does I/O.

use oelo_api::{PatternRequest, ZoneReport, effects};

use crate::error::CoreError;
use crate::model::{CommandBatch, ControllerSnapshot, LightCommand, ZoneReading};

impl From<&ZoneReport> for ZoneReading {
    fn from(report: &ZoneReport) -> Self {
        if report.is_off() {
            return Self::off(report.num);
        }
        let reading = Self::solid(report.num);
        if report.is_custom() {
            return reading;
        }
        // Several effects share a pattern type; catalog order picks one.
        match effects::by_pattern_type(&report.pattern) {
            Some(effect) => reading
                .with_effect(effect.name)
                .with_color(effect.primary_color().into()),
            None => reading.with_effect(report.pattern.clone()),
        }
    }
}

impl From<&[ZoneReport]> for ControllerSnapshot {
    fn from(reports: &[ZoneReport]) -> Self {
        Self::new(reports.iter().map(ZoneReading::from).collect())
    }
}

/// Render one `PatternRequest` per distinct command, zones merged.
///
/// Requests come out in order of their lowest zone number.
pub fn render_batch(batch: &CommandBatch) -> Result<Vec<PatternRequest>, CoreError> {
    let mut groups: Vec<(&LightCommand, Vec<u8>)> = Vec::new();
    for (zone, command) in batch {
        match groups.iter_mut().find(|(c, _)| *c == command) {
            Some((_, zones)) => zones.push(zone.get()),
            None => groups.push((command, vec![zone.get()])),
        }
    }

    groups
        .into_iter()
        .map(|(command, zones)| render(command, zones))
        .collect()
}

fn render(command: &LightCommand, zones: Vec<u8>) -> Result<PatternRequest, CoreError> {
    match command {
        LightCommand::Off => Ok(PatternRequest::off(zones)),
        LightCommand::Solid { color, brightness } => {
            Ok(PatternRequest::solid(zones, color.to_array(), *brightness))
        }
        LightCommand::Effect { name, brightness } => effects::find(name)
            .map(|effect| effect.request(zones, *brightness))
            .ok_or_else(|| CoreError::UnknownEffect { name: name.clone() }),
    }
}
