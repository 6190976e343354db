//! Service configuration: TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LightsError, Result};
use crate::led::BlinkPolicy;
use crate::model::{HwLight, LightType};
use crate::registry::LightRegistry;

/// Default LED class device driven by the service.
pub const DEFAULT_LED_PATH: &str = "/sys/class/leds/charging";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LED class device directory. Default: "/sys/class/leds/charging".
    #[serde(default = "default_led_path")]
    pub led_path: String,

    /// Lights sharing the LED, highest priority first.
    /// Default: ["notifications", "battery"].
    #[serde(default = "default_lights")]
    pub lights: Vec<String>,

    /// Blink delay write attempts after switching to the timer trigger.
    #[serde(default = "default_blink_attempts")]
    pub blink_attempts: u32,

    /// Settle time before each blink attempt, in milliseconds.
    #[serde(default = "default_blink_settle_ms")]
    pub blink_settle_ms: u64,
}

fn default_led_path() -> String {
    DEFAULT_LED_PATH.into()
}
fn default_lights() -> Vec<String> {
    vec!["notifications".into(), "battery".into()]
}
fn default_blink_attempts() -> u32 {
    BlinkPolicy::default().max_attempts
}
fn default_blink_settle_ms() -> u64 {
    BlinkPolicy::default().settle.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Config {
            led_path: default_led_path(),
            lights: default_lights(),
            blink_attempts: default_blink_attempts(),
            blink_settle_ms: default_blink_settle_ms(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `led_path` is empty or whitespace-only.
    EmptyLedPath,
    /// `lights` is empty.
    NoLights,
    /// An entry of `lights` names no known category.
    UnknownLight(String),
    /// A category appears more than once in `lights`.
    DuplicateLight(String),
    /// `backlight` is listed; it never takes part in arbitration.
    BacklightListed,
    /// `blink_attempts` is zero.
    ZeroBlinkAttempts,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyLedPath => write!(f, "led_path cannot be empty"),
            ValidationError::NoLights => write!(f, "lights cannot be empty"),
            ValidationError::UnknownLight(name) => write!(f, "Unknown light: {name}"),
            ValidationError::DuplicateLight(name) => write!(f, "Light listed twice: {name}"),
            ValidationError::BacklightListed => {
                write!(f, "backlight cannot be listed in lights (it is always a stub)")
            }
            ValidationError::ZeroBlinkAttempts => write!(f, "blink_attempts must be at least 1"),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lightsd"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Check all fields, collecting every problem found.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.led_path.trim().is_empty() {
            errors.push(ValidationError::EmptyLedPath);
        }
        if self.lights.is_empty() {
            errors.push(ValidationError::NoLights);
        }
        let mut seen = Vec::new();
        for name in &self.lights {
            match name.parse::<LightType>() {
                Ok(LightType::Backlight) => errors.push(ValidationError::BacklightListed),
                Ok(t) if seen.contains(&t) => {
                    errors.push(ValidationError::DuplicateLight(name.clone()))
                }
                Ok(t) => seen.push(t),
                Err(_) => errors.push(ValidationError::UnknownLight(name.clone())),
            }
        }
        if self.blink_attempts == 0 {
            errors.push(ValidationError::ZeroBlinkAttempts);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Light catalog in listed order; ordinal is the list position.
    pub fn lights(&self) -> Result<Vec<HwLight>> {
        self.lights
            .iter()
            .enumerate()
            .map(|(i, name)| {
                name.parse::<LightType>()
                    .map(|t| HwLight::new(t, i as i32))
                    .map_err(LightsError::Config)
            })
            .collect()
    }

    /// Build the registry, failing on the first validation error.
    pub fn registry(&self) -> Result<LightRegistry> {
        if let Err(errors) = self.validate() {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(LightsError::Config(msgs.join("; ")));
        }
        LightRegistry::new(self.lights()?)
    }

    pub fn blink_policy(&self) -> BlinkPolicy {
        BlinkPolicy {
            max_attempts: self.blink_attempts,
            settle: Duration::from_millis(self.blink_settle_ms),
        }
    }
}
