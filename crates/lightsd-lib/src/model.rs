//! Light data model: categories, descriptors and requested states.
//!
//! Integer ids match the values used by the platform light interface, so a
//! transport can pass them through unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Light category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightType {
    Backlight = 0,
    Keyboard = 1,
    Buttons = 2,
    Battery = 3,
    Notifications = 4,
    Attention = 5,
    Bluetooth = 6,
    Wifi = 7,
    Microphone = 8,
}

impl LightType {
    pub const ALL: [LightType; 9] = [
        LightType::Backlight,
        LightType::Keyboard,
        LightType::Buttons,
        LightType::Battery,
        LightType::Notifications,
        LightType::Attention,
        LightType::Bluetooth,
        LightType::Wifi,
        LightType::Microphone,
    ];

    /// Integer id of this category.
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Look up a category by integer id.
    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Lowercase name, as used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            LightType::Backlight => "backlight",
            LightType::Keyboard => "keyboard",
            LightType::Buttons => "buttons",
            LightType::Battery => "battery",
            LightType::Notifications => "notifications",
            LightType::Attention => "attention",
            LightType::Bluetooth => "bluetooth",
            LightType::Wifi => "wifi",
            LightType::Microphone => "microphone",
        }
    }
}

impl fmt::Display for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for LightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i32>() {
            return Self::from_id(id).ok_or_else(|| format!("unknown light id: {id}"));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown light: {s}"))
    }
}

/// Blink request carried by a light state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashMode {
    #[default]
    None = 0,
    Timed = 1,
    Hardware = 2,
}

impl FromStr for FlashMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "0" => Ok(FlashMode::None),
            "timed" | "1" => Ok(FlashMode::Timed),
            "hardware" | "2" => Ok(FlashMode::Hardware),
            other => Err(format!("unknown flash mode: {other}")),
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashMode::None => write!(f, "NONE"),
            FlashMode::Timed => write!(f, "TIMED"),
            FlashMode::Hardware => write!(f, "HARDWARE"),
        }
    }
}

/// Brightness source hint. Logged, never acted upon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrightnessMode {
    #[default]
    User = 0,
    Sensor = 1,
    LowPersistence = 2,
}

impl fmt::Display for BrightnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrightnessMode::User => write!(f, "USER"),
            BrightnessMode::Sensor => write!(f, "SENSOR"),
            BrightnessMode::LowPersistence => write!(f, "LOW_PERSISTENCE"),
        }
    }
}

/// A supported light as reported by enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HwLight {
    pub id: i32,
    /// Display / enumeration order. Unrelated to arbitration priority.
    pub ordinal: i32,
    #[serde(rename = "type")]
    pub light_type: LightType,
}

impl HwLight {
    /// Descriptor whose id is the category's own id.
    pub const fn new(light_type: LightType, ordinal: i32) -> Self {
        HwLight {
            id: light_type as i32,
            ordinal,
            light_type,
        }
    }
}

/// Latest requested state of one light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HwLightState {
    /// `0xAARRGGBB`.
    pub color: u32,
    pub flash_mode: FlashMode,
    pub flash_on_ms: i32,
    pub flash_off_ms: i32,
    pub brightness_mode: BrightnessMode,
}

impl HwLightState {
    /// Steady state with the given color.
    pub fn solid(color: u32) -> Self {
        HwLightState {
            color,
            ..Default::default()
        }
    }

    /// Timed blink with the given color and on/off durations.
    pub fn timed(color: u32, on_ms: i32, off_ms: i32) -> Self {
        HwLightState {
            color,
            flash_mode: FlashMode::Timed,
            flash_on_ms: on_ms,
            flash_off_ms: off_ms,
            brightness_mode: BrightnessMode::User,
        }
    }
}
