//! Light service: the two inbound operations over a registry and an LED node.
//!
//! Every `set_light_state` call runs update → arbitrate → apply under a single
//! lock, so arbitration always sees a consistent set of states and concurrent
//! callers cannot interleave their attribute writes.

use std::sync::{Mutex, MutexGuard};

use crate::config::Config;
use crate::error::Result;
use crate::led::driver::{self, Applied, BlinkPolicy, Delay, ThreadDelay};
use crate::led::{LedNode, SysfsNode, format_color};
use crate::model::{HwLight, HwLightState};
use crate::registry::{LightRegistry, Selection, Update};

/// Light service driving one physical LED.
pub struct Lights<N, D = ThreadDelay> {
    registry: Mutex<LightRegistry>,
    node: N,
    delay: D,
    policy: BlinkPolicy,
}

impl Lights<SysfsNode, ThreadDelay> {
    /// Service backed by the sysfs LED and catalog named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Lights::new(
            config.registry()?,
            SysfsNode::new(&config.led_path),
            ThreadDelay,
            config.blink_policy(),
        ))
    }
}

impl<N: LedNode, D: Delay> Lights<N, D> {
    pub fn new(registry: LightRegistry, node: N, delay: D, policy: BlinkPolicy) -> Self {
        Lights {
            registry: Mutex::new(registry),
            node,
            delay,
            policy,
        }
    }

    /// Record the requested state of light `id` and re-program the LED.
    ///
    /// Fails only for unknown ids. Hardware write failures are handled by
    /// the driver fallback and never reported here.
    pub fn set_light_state(&self, id: i32, state: HwLightState) -> Result<()> {
        let mut registry = self.lock();

        let update = registry.update(id, state).inspect_err(|e| {
            log::error!("{e}");
        })?;
        if update == Update::BacklightStub {
            log::debug!("backlight request ignored");
            return Ok(());
        }

        match registry.arbitrate() {
            Some(selection) => {
                let applied =
                    driver::apply_state(&self.node, &self.delay, &self.policy, &selection.state);
                log_applied(&selection, applied);
            }
            None => log::debug!("no light eligible, LED left unchanged"),
        }
        Ok(())
    }

    /// All supported lights, backlight included.
    pub fn get_lights(&self) -> Vec<HwLight> {
        self.lock().enumerate()
    }

    /// Copy of the current registry contents.
    pub fn snapshot(&self) -> LightRegistry {
        self.lock().clone()
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    fn lock(&self) -> MutexGuard<'_, LightRegistry> {
        // States are replaced whole before any hardware write.
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn log_applied(selection: &Selection, applied: Applied) {
    let state = &selection.state;
    log::debug!(
        "apply {}: mode={}, colorARGB={}, onMS={}, offMS={}, result={applied:?}, brightnessMode={}",
        selection.light.light_type,
        state.flash_mode,
        format_color(state.color),
        state.flash_on_ms,
        state.flash_off_ms,
        state.brightness_mode,
    );
    if !applied.is_ok() {
        log::warn!("LED could not be programmed for {}", selection.light.light_type);
    }
}
