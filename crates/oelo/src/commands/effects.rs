//! `oelo effects`: list the built-in effect catalog.

use serde::Serialize;
use tabled::Tabled;

use oelo_core::Rgb;

use crate::cli::GlobalOpts;
use crate::output;

#[derive(Debug, Serialize)]
struct EffectInfo {
    name: &'static str,
    pattern_type: &'static str,
    colors: Vec<Rgb>,
    speed: u8,
}

#[derive(Tabled)]
struct EffectRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Pattern")]
    pattern: &'static str,
    #[tabled(rename = "Colors")]
    colors: usize,
    #[tabled(rename = "Primary")]
    primary: String,
    #[tabled(rename = "Speed")]
    speed: u8,
}

pub fn handle(global: &GlobalOpts) {
    let effects: Vec<EffectInfo> = oelo_core::effects::all()
        .iter()
        .map(|e| EffectInfo {
            name: e.name,
            pattern_type: e.pattern_type,
            colors: e.colors.iter().copied().map(Rgb::from).collect(),
            speed: e.speed,
        })
        .collect();

    let rendered = output::render_list(
        &global.output,
        &effects,
        |e| EffectRow {
            name: e.name,
            pattern: e.pattern_type,
            colors: e.colors.len(),
            primary: e.colors.first().map(ToString::to_string).unwrap_or_default(),
            speed: e.speed,
        },
        |e| e.name.to_owned(),
    );
    output::print_output(&rendered, global.quiet);
}
