//! `brightness` subcommand: show the brightness a color reduces to.

use super::{BrightnessOutput, Result, led};

pub(super) fn cmd_brightness(color: &str, json: bool) -> Result<()> {
    let value = led::parse_color(color)?;
    let output = BrightnessOutput {
        color: led::format_color(value),
        lit: led::is_lit(value),
        brightness: led::rgba_to_brightness(value),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    println!("{} -> brightness {}", output.color, output.brightness);
    if !output.lit {
        println!("(unlit: only the battery light is applied for this color)");
    }
    Ok(())
}
