//! Light registry: priority-ordered catalog plus latest state per light.
//!
//! Slot `i` of the state array always belongs to descriptor `i`; both are
//! sized once at construction. Backlight is never part of the catalog: it is
//! reported by [`LightRegistry::enumerate`] and accepted by
//! [`LightRegistry::update`] but has no slot.

use std::collections::HashSet;

use crate::error::{LightsError, Result};
use crate::led::is_lit;
use crate::model::{HwLight, HwLightState, LightType};

/// Ordinal reported for the backlight stub.
pub const BACKLIGHT_ORDINAL: i32 = 2;

/// Stock catalog, highest priority first.
pub const DEFAULT_LIGHTS: [HwLight; 2] = [
    HwLight::new(LightType::Notifications, 0),
    HwLight::new(LightType::Battery, 1),
];

/// Outcome of a successful [`LightRegistry::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// State stored in the given slot.
    Stored(usize),
    /// Backlight request accepted and ignored.
    BacklightStub,
}

/// The slot chosen to drive the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub light: HwLight,
    pub state: HwLightState,
}

#[derive(Debug, Clone)]
pub struct LightRegistry {
    lights: Vec<HwLight>,
    states: Vec<HwLightState>,
}

impl LightRegistry {
    /// Build a registry from descriptors in priority order.
    ///
    /// Rejects an empty catalog, a backlight entry, and duplicate ids.
    pub fn new(lights: Vec<HwLight>) -> Result<Self> {
        if lights.is_empty() {
            return Err(LightsError::Config("light catalog is empty".into()));
        }
        let mut seen = HashSet::new();
        for light in &lights {
            if light.light_type == LightType::Backlight || light.id == LightType::Backlight.id() {
                return Err(LightsError::Config(
                    "backlight cannot take part in arbitration".into(),
                ));
            }
            if !seen.insert(light.id) {
                return Err(LightsError::Config(format!(
                    "duplicate light id {} in catalog",
                    light.id
                )));
            }
        }
        if lights.iter().all(|l| l.light_type != LightType::Battery) {
            log::warn!("no battery light in catalog; all-dim states leave the LED untouched");
        }
        let states = vec![HwLightState::default(); lights.len()];
        Ok(LightRegistry { lights, states })
    }

    /// Registry with the stock notifications > battery catalog.
    pub fn with_defaults() -> Self {
        LightRegistry {
            lights: DEFAULT_LIGHTS.to_vec(),
            states: vec![HwLightState::default(); DEFAULT_LIGHTS.len()],
        }
    }

    /// All supported lights: the catalog in priority order, then backlight.
    pub fn enumerate(&self) -> Vec<HwLight> {
        let mut lights = self.lights.clone();
        lights.push(HwLight::new(LightType::Backlight, BACKLIGHT_ORDINAL));
        lights
    }

    /// Store the latest state for light `id`.
    pub fn update(&mut self, id: i32, state: HwLightState) -> Result<Update> {
        if id == LightType::Backlight.id() {
            return Ok(Update::BacklightStub);
        }
        let index = self
            .lights
            .iter()
            .position(|l| l.id == id)
            .ok_or(LightsError::UnsupportedCategory(id))?;
        self.states[index] = state;
        Ok(Update::Stored(index))
    }

    /// First lit slot in priority order, or the battery slot if reached first.
    pub fn arbitrate(&self) -> Option<Selection> {
        self.lights
            .iter()
            .zip(&self.states)
            .enumerate()
            .find(|(_, (light, state))| {
                is_lit(state.color) || light.light_type == LightType::Battery
            })
            .map(|(index, (light, state))| Selection {
                index,
                light: *light,
                state: *state,
            })
    }

    pub fn lights(&self) -> &[HwLight] {
        &self.lights
    }

    pub fn states(&self) -> &[HwLightState] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&HwLightState> {
        self.states.get(index)
    }
}

impl Default for LightRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
