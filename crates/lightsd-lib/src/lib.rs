//! lightsd: arbitrates indicator lights sharing one sysfs LED driver.

pub mod config;
pub mod error;
pub mod led;
pub mod model;
pub mod protocol;
pub mod registry;
pub mod service;

pub use error::LightsError;
pub use model::{BrightnessMode, FlashMode, HwLight, HwLightState, LightType};
pub use registry::LightRegistry;
pub use service::Lights;
