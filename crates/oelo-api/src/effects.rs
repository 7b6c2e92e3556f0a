// Built-in effect catalog.
//
// Each effect is a named `setPattern` program. Names are what the entity
// layer shows in its effect list; the controller itself only ever reports
// the pattern type, so mapping back from a poll is best-effort.

use crate::pattern::{Direction, PatternRequest};

/// A named, pre-built pattern program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    pub name: &'static str,
    pub pattern_type: &'static str,
    pub colors: &'static [[u8; 3]],
    pub direction: Direction,
    pub speed: u8,
}

impl Effect {
    /// Render this effect for the given zones at the given brightness.
    pub fn request(&self, zones: Vec<u8>, brightness: u8) -> PatternRequest {
        PatternRequest {
            pattern_type: self.pattern_type.into(),
            zones,
            colors: self.colors.to_vec(),
            direction: self.direction,
            speed: self.speed,
            gap: 0,
            other: 0,
            pause: 0,
        }
        .dimmed(brightness)
    }

    /// First color of the program; what an RGB-only consumer should show.
    pub fn primary_color(&self) -> [u8; 3] {
        self.colors.first().copied().unwrap_or([255, 255, 255])
    }
}

/// Look up an effect by its display name.
pub fn find(name: &str) -> Option<&'static Effect> {
    CATALOG.iter().find(|e| e.name == name)
}

/// First catalog effect that uses the given controller pattern type.
///
/// Several effects share a pattern type (`stationary`, `twinkle`, ...), so
/// this is ambiguous by nature; catalog order decides.
pub fn by_pattern_type(pattern_type: &str) -> Option<&'static Effect> {
    CATALOG.iter().find(|e| e.pattern_type == pattern_type)
}

/// All effect names, in catalog order.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|e| e.name)
}

pub fn all() -> &'static [Effect] {
    CATALOG
}

const fn effect(
    name: &'static str,
    pattern_type: &'static str,
    colors: &'static [[u8; 3]],
    speed: u8,
) -> Effect {
    Effect {
        name,
        pattern_type,
        colors,
        direction: Direction::Reverse,
        speed,
    }
}

const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [255, 0, 0];

static CATALOG: &[Effect] = &[
    effect(
        "Valentines: My Heart Is Yours",
        "fade",
        &[[255, 10, 228], WHITE, RED],
        1,
    ),
    effect(
        "Valentines: Cupids Twinkle",
        "twinkle",
        &[[255, 10, 228], WHITE],
        1,
    ),
    effect(
        "Valentines: Powerful Love",
        "stationary",
        &[[180, 10, 255], RED],
        1,
    ),
    effect(
        "Valentines: Adorations Smile",
        "stationary",
        &[[255, 10, 228], [255, 0, 76], [255, 143, 238]],
        1,
    ),
    effect(
        "Pride: March",
        "march",
        &[
            RED,
            RED,
            RED,
            [255, 50, 0],
            [255, 50, 0],
            [255, 50, 0],
            [255, 240, 0],
            [255, 240, 0],
            [255, 240, 0],
            [0, 255, 0],
            [0, 255, 0],
            [0, 255, 0],
            [0, 0, 255],
            [0, 0, 255],
            [0, 0, 255],
            [125, 0, 255],
            [125, 0, 255],
            [125, 0, 255],
        ],
        1,
    ),
    effect(
        "Pride: Split",
        "split",
        &[
            RED,
            [255, 50, 0],
            [255, 240, 0],
            [0, 255, 0],
            [0, 0, 255],
            [125, 0, 255],
        ],
        1,
    ),
    effect(
        "Christmas: Icicle Chase",
        "chase",
        &[WHITE, [0, 183, 245], [0, 73, 245]],
        5,
    ),
    effect(
        "Christmas: Icicle Stream",
        "river",
        &[WHITE, [0, 204, 255], [0, 70, 255], [0, 70, 255]],
        4,
    ),
    effect(
        "Christmas: Icicle Shimmer",
        "twinkle",
        &[WHITE, [0, 204, 255], [0, 70, 255], [0, 70, 255]],
        4,
    ),
    effect(
        "Christmas: Candy Cane Lane",
        "stationary",
        &[WHITE, WHITE, WHITE, RED, RED, RED],
        4,
    ),
    effect(
        "Christmas: Candy Cane Glimmer",
        "river",
        &[WHITE, RED, WHITE, RED],
        20,
    ),
    effect(
        "Christmas: Christmas Glow",
        "stationary",
        &[WHITE, WHITE, WHITE, [255, 153, 0], [255, 153, 0], [255, 153, 0]],
        2,
    ),
    effect(
        "Christmas: The Grinch Stole Christmas",
        "twinkle",
        &[
            [15, 255, 0],
            [15, 255, 0],
            [15, 255, 0],
            [15, 255, 0],
            RED,
            RED,
            WHITE,
            WHITE,
        ],
        2,
    ),
    effect(
        "Christmas: Christmas at Oelo",
        "stationary",
        &[
            [26, 213, 255],
            [26, 213, 255],
            [26, 213, 255],
            [26, 213, 255],
            [26, 213, 255],
            [255, 34, 0],
            [255, 34, 0],
        ],
        2,
    ),
    effect(
        "Christmas: Saturnalia Christmas",
        "stationary",
        &[
            WHITE,
            WHITE,
            WHITE,
            [0, 255, 47],
            [0, 255, 47],
            [0, 255, 47],
            RED,
            RED,
            RED,
        ],
        2,
    ),
    effect(
        "Christmas: Dreaming of a White Christmas",
        "stationary",
        &[
            [238, 252, 255],
            [237, 252, 255],
            [237, 252, 255],
            [0, 0, 0],
            [0, 0, 0],
        ],
        10,
    ),
    effect(
        "Christmas: Decorating the Christmas Tree",
        "stationary",
        &[[0, 219, 11], [0, 219, 11], [0, 219, 11], [255, 153, 0], WHITE],
        2,
    ),
];
