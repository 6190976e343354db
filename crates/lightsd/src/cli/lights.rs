//! `lights` subcommand: list supported lights.

use super::{Config, HwLight, LightType, Lights, LightsOutput, Result};

/// Backlight is enumerated but never takes part in arbitration.
fn stub_note(light: &HwLight) -> &'static str {
    if light.light_type == LightType::Backlight {
        "  (stub, not arbitrated)"
    } else {
        ""
    }
}

pub(super) fn cmd_lights(config: &Config, json: bool) -> Result<()> {
    let lights = Lights::from_config(config)?.get_lights();

    if json {
        let output = LightsOutput {
            count: lights.len(),
            lights,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    println!("Supported lights (highest priority first):");
    println!();
    for (i, light) in lights.iter().enumerate() {
        let note = stub_note(light);
        println!(
            "  [{}] {:<14} id {:<2} ordinal {}{note}",
            i + 1,
            light.light_type,
            light.id,
            light.ordinal
        );
    }
    Ok(())
}
