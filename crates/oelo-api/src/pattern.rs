// `setPattern` request model and query-string rendering.
//
// The controller takes every parameter on the query string of a GET.
// Colors are a flat comma-separated list of RGB triples, already scaled
// to the desired brightness -- the firmware has no separate dimmer.

use crate::error::Error;
use crate::models::{PATTERN_CUSTOM, PATTERN_OFF};

/// Animation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Forward => "F",
            Self::Reverse => "R",
        }
    }
}

/// A fully rendered `setPattern` call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternRequest {
    pub pattern_type: String,
    pub zones: Vec<u8>,
    pub colors: Vec<[u8; 3]>,
    pub direction: Direction,
    pub speed: u8,
    pub gap: u8,
    pub other: u8,
    pub pause: u8,
}

impl PatternRequest {
    /// Turn the given zones dark.
    pub fn off(zones: Vec<u8>) -> Self {
        Self {
            pattern_type: PATTERN_OFF.into(),
            zones,
            colors: vec![[0, 0, 0]],
            direction: Direction::Forward,
            speed: 0,
            gap: 0,
            other: 0,
            pause: 0,
        }
    }

    /// A single static color at the given brightness (0-255).
    pub fn solid(zones: Vec<u8>, color: [u8; 3], brightness: u8) -> Self {
        Self {
            pattern_type: PATTERN_CUSTOM.into(),
            zones,
            colors: vec![scale_color(color, brightness)],
            direction: Direction::Forward,
            speed: 0,
            gap: 0,
            other: 0,
            pause: 0,
        }
    }

    /// Scale every color in the request by `brightness / 255`.
    pub fn dimmed(mut self, brightness: u8) -> Self {
        for color in &mut self.colors {
            *color = scale_color(*color, brightness);
        }
        self
    }

    /// Render the query parameters in the order the firmware expects.
    pub fn query(&self) -> Result<Vec<(&'static str, String)>, Error> {
        if self.zones.is_empty() {
            return Err(Error::InvalidPattern("no zones selected".into()));
        }
        if self.colors.is_empty() {
            return Err(Error::InvalidPattern(format!(
                "pattern '{}' has no colors",
                self.pattern_type
            )));
        }

        let zones = join(self.zones.iter().map(u8::to_string));
        let colors = join(
            self.colors
                .iter()
                .flat_map(|c| c.iter())
                .map(u8::to_string),
        );

        Ok(vec![
            ("patternType", self.pattern_type.clone()),
            ("num_zones", self.zones.len().to_string()),
            ("zones", zones),
            ("num_colors", self.colors.len().to_string()),
            ("colors", colors),
            ("direction", self.direction.as_param().into()),
            ("speed", self.speed.to_string()),
            ("gap", self.gap.to_string()),
            ("other", self.other.to_string()),
            ("pause", self.pause.to_string()),
        ])
    }
}

/// Scale one 0-255 channel by `brightness / 255`, rounding to nearest.
pub fn scale_channel(value: u8, brightness: u8) -> u8 {
    let scaled = (u32::from(value) * u32::from(brightness) + 127) / 255;
    u8::try_from(scaled).unwrap_or(u8::MAX)
}

pub fn scale_color(color: [u8; 3], brightness: u8) -> [u8; 3] {
    color.map(|c| scale_channel(c, brightness))
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn param<'a>(query: &'a [(&'static str, String)], key: &str) -> &'a str {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn scale_channel_bounds() {
        assert_eq!(scale_channel(255, 255), 255);
        assert_eq!(scale_channel(255, 0), 0);
        assert_eq!(scale_channel(0, 200), 0);
        assert_eq!(scale_channel(200, 128), 100);
    }

    #[test]
    fn off_renders_single_black_color() {
        let query = PatternRequest::off(vec![2]).query().unwrap();
        assert_eq!(param(&query, "patternType"), "off");
        assert_eq!(param(&query, "num_zones"), "1");
        assert_eq!(param(&query, "zones"), "2");
        assert_eq!(param(&query, "num_colors"), "1");
        assert_eq!(param(&query, "colors"), "0,0,0");
        assert_eq!(param(&query, "direction"), "F");
    }

    #[test]
    fn solid_scales_color_and_lists_all_zones() {
        let query = PatternRequest::solid(vec![2, 4], [255, 100, 0], 128)
            .query()
            .unwrap();
        assert_eq!(param(&query, "patternType"), "custom");
        assert_eq!(param(&query, "num_zones"), "2");
        assert_eq!(param(&query, "zones"), "2,4");
        assert_eq!(param(&query, "colors"), "128,50,0");
        assert_eq!(param(&query, "speed"), "0");
    }

    #[test]
    fn query_keeps_firmware_parameter_order() {
        let query = PatternRequest::off(vec![1]).query().unwrap();
        let keys: Vec<&str> = query.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "patternType",
                "num_zones",
                "zones",
                "num_colors",
                "colors",
                "direction",
                "speed",
                "gap",
                "other",
                "pause"
            ]
        );
    }

    #[test]
    fn empty_zone_list_is_invalid() {
        let err = PatternRequest::off(Vec::new()).query().unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
