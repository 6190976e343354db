//! `set` subcommand: apply a single light state through a fresh service.
//!
//! The service starts with every light dark, so the requested light wins
//! arbitration whenever it is lit or is the battery light.

use super::{Config, FlashMode, HwLightState, LightType, Lights, Result, led};
use lightsd_lib::LightsError;

pub(super) fn cmd_set(
    config: &Config,
    light: &str,
    color: &str,
    flash: &str,
    on_ms: i32,
    off_ms: i32,
) -> Result<()> {
    let light_type: LightType = light.parse().map_err(LightsError::Config)?;
    let state = HwLightState {
        color: led::parse_color(color)?,
        flash_mode: flash.parse::<FlashMode>().map_err(LightsError::Config)?,
        flash_on_ms: on_ms,
        flash_off_ms: off_ms,
        ..Default::default()
    };

    let lights = Lights::from_config(config)?;
    lights.set_light_state(light_type.id(), state)?;

    println!(
        "{light_type}: {} (brightness {}, flash {})",
        led::format_color(state.color),
        led::rgba_to_brightness(state.color),
        state.flash_mode
    );
    Ok(())
}
