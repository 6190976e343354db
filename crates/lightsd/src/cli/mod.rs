//! CLI subcommands: request transport, light listing, one-shot control.

mod brightness;
mod config_cmd;
mod lights;
mod serve;
mod set;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use lightsd_lib::config::Config;
pub(super) use lightsd_lib::error::Result;
pub(super) use lightsd_lib::led;
pub(super) use lightsd_lib::model::{FlashMode, HwLight, HwLightState, LightType};
pub(super) use lightsd_lib::protocol;
pub(super) use lightsd_lib::service::Lights;

const PADDING: usize = 2;

/// Options shared by all subcommands.
pub struct GlobalOpts {
    pub json: bool,
    pub config: Option<PathBuf>,
}

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load config from `custom_path` if given, else from the default location.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    let (config, warnings) = match custom_path {
        Some(p) => Config::load_from(p),
        None => Config::load_with_warnings(),
    };
    for w in &warnings {
        log::warn!("{w}");
    }
    config
}

/// Apply a `--led-path` override on top of the loaded config.
pub(super) fn with_led_path(mut config: Config, led_path: Option<PathBuf>) -> Config {
    if let Some(p) = led_path {
        config.led_path = p.display().to_string();
    }
    config
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct LightsOutput {
    pub count: usize,
    pub lights: Vec<HwLight>,
}

#[derive(Serialize)]
pub(super) struct BrightnessOutput {
    pub color: String,
    pub lit: bool,
    pub brightness: u8,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub valid: bool,
    pub problems: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve JSON light requests from stdin, one per line
    Serve {
        /// LED class device directory (overrides config)
        #[arg(long, value_name = "DIR")]
        led_path: Option<PathBuf>,
    },

    /// List supported lights in priority order
    Lights,

    /// Apply one light state to the LED and exit
    Set {
        /// Light name or id (e.g. notifications, battery, 4)
        light: String,
        /// Color as #AARRGGBB, #RRGGBB or a name
        color: String,
        /// Flash mode: none, timed or hardware
        #[arg(long, default_value = "none")]
        flash: String,
        /// Blink on time in milliseconds
        #[arg(long, default_value_t = 500)]
        on_ms: i32,
        /// Blink off time in milliseconds
        #[arg(long, default_value_t = 500)]
        off_ms: i32,
        /// LED class device directory (overrides config)
        #[arg(long, value_name = "DIR")]
        led_path: Option<PathBuf>,
    },

    /// Show the LED brightness a color maps to (no hardware required)
    Brightness {
        /// Color as #AARRGGBB, #RRGGBB or a name
        color: String,
    },

    /// Show current configuration and file path
    Config,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, opts: &GlobalOpts) -> Result<()> {
    let custom = opts.config.as_deref();
    match cmd {
        Command::Serve { led_path } => {
            if opts.json {
                warn_json_unsupported("serve");
            }
            serve::cmd_serve(with_led_path(load_config(custom), led_path))
        }
        Command::Lights => lights::cmd_lights(&load_config(custom), opts.json),
        Command::Set {
            light,
            color,
            flash,
            on_ms,
            off_ms,
            led_path,
        } => {
            if opts.json {
                warn_json_unsupported("set");
            }
            let config = with_led_path(load_config(custom), led_path);
            set::cmd_set(&config, &light, &color, &flash, on_ms, off_ms)
        }
        Command::Brightness { color } => brightness::cmd_brightness(&color, opts.json),
        Command::Config => config_cmd::cmd_config(opts.json, custom),
    }
}
