//! Driver programming: blink configuration with bounded retry, steady fallback.
//!
//! The LED class timer trigger creates `delay_on`/`delay_off` asynchronously
//! after `trigger` is switched, so the first delay writes may be rejected.
//! Blinking is retried a fixed number of times and then degrades to a
//! steady brightness.
//!
//! Steady fallback targets drivers where writing `brightness = 0` resets the
//! trigger to `none`: a dark LED is produced by an "always off" blink
//! (`delay_off = 100`, `delay_on = 0`) instead.

use std::time::Duration;

use crate::led::color::rgba_to_brightness;
use crate::led::node::{Attribute, LedNode};
use crate::model::{FlashMode, HwLightState};

/// Trigger value selecting the software blink timer.
pub const TIMER_TRIGGER: &str = "timer";

/// Off period written to park a dark LED in the blink sub-mode.
const ALWAYS_OFF_DELAY_OFF_MS: u32 = 100;

// ── Delay ──

/// Blocking sleep used between blink attempts.
pub trait Delay {
    fn delay(&self, d: Duration);
}

/// Real wall-clock sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

impl<T: Delay + ?Sized> Delay for &T {
    fn delay(&self, d: Duration) {
        (**self).delay(d)
    }
}

pub mod mock {
    use super::*;
    use std::cell::RefCell;

    /// Records requested delays without sleeping.
    #[derive(Default)]
    pub struct RecordingDelay {
        pub calls: RefCell<Vec<Duration>>,
    }

    impl RecordingDelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Delay for RecordingDelay {
        fn delay(&self, d: Duration) {
            self.calls.borrow_mut().push(d);
        }
    }
}

// ── Policy ──

/// Retry bounds for blink configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPolicy {
    /// Maximum `delay_off` + `delay_on` attempts after the trigger switch.
    pub max_attempts: u32,
    /// Settle time before each attempt.
    pub settle: Duration,
}

impl Default for BlinkPolicy {
    fn default() -> Self {
        BlinkPolicy {
            max_attempts: 20,
            settle: Duration::from_millis(2),
        }
    }
}

// ── Outcomes ──

/// Result of a blink configuration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkResult {
    /// Delays accepted after `attempts` tries.
    Blinking { attempts: u32 },
    /// The `trigger` write failed; no delay writes were made.
    TriggerRejected,
    /// Every attempt failed.
    Exhausted,
}

/// What ended up programmed on the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Hardware blink running.
    Blinking { attempts: u32 },
    /// Constant brightness written.
    Steady { brightness: u8 },
    /// Parked in the "always off" blink sub-mode.
    Off,
    /// The steady fallback writes failed too.
    Failed,
}

impl Applied {
    pub fn is_ok(self) -> bool {
        !matches!(self, Applied::Failed)
    }
}

// ── Protocol ──

/// Switch to the timer trigger and program the blink delays.
pub fn try_blink(
    node: &impl LedNode,
    delay: &impl Delay,
    policy: &BlinkPolicy,
    on_ms: i32,
    off_ms: i32,
) -> BlinkResult {
    if let Err(e) = node.write_attribute(Attribute::Trigger, TIMER_TRIGGER) {
        log::info!("timer trigger unavailable, falling back to steady: {e}");
        return BlinkResult::TriggerRejected;
    }

    let off = off_ms.to_string();
    let on = on_ms.to_string();
    for attempt in 1..=policy.max_attempts {
        delay.delay(policy.settle);
        let result = node
            .write_attribute(Attribute::DelayOff, &off)
            .and_then(|()| node.write_attribute(Attribute::DelayOn, &on));
        match result {
            Ok(()) => return BlinkResult::Blinking { attempts: attempt },
            Err(e) => log::debug!("blink attempt {attempt}/{} failed: {e}", policy.max_attempts),
        }
    }

    log::info!(
        "blink delays rejected {} times, falling back to steady",
        policy.max_attempts
    );
    BlinkResult::Exhausted
}

/// Program a constant brightness. A zero brightness parks the LED in an
/// "always off" blink instead of writing `0`.
pub fn apply_steady(node: &impl LedNode, brightness: u8) -> Applied {
    if brightness > 0 {
        return match node.write_attribute(Attribute::Brightness, &brightness.to_string()) {
            Ok(()) => Applied::Steady { brightness },
            Err(e) => {
                log::warn!("could not set brightness {brightness}: {e}");
                Applied::Failed
            }
        };
    }

    // Writing 0 to brightness would reset the trigger to "none".
    let result = node
        .write_attribute(Attribute::DelayOff, &ALWAYS_OFF_DELAY_OFF_MS.to_string())
        .and_then(|()| node.write_attribute(Attribute::DelayOn, "0"));
    match result {
        Ok(()) => Applied::Off,
        Err(e) => {
            log::warn!("could not switch LED off: {e}");
            Applied::Failed
        }
    }
}

/// Program the driver for `state`: blink if requested and supported,
/// otherwise steady brightness.
pub fn apply_state(
    node: &impl LedNode,
    delay: &impl Delay,
    policy: &BlinkPolicy,
    state: &HwLightState,
) -> Applied {
    let brightness = rgba_to_brightness(state.color);

    match state.flash_mode {
        FlashMode::Timed | FlashMode::Hardware => {
            match try_blink(node, delay, policy, state.flash_on_ms, state.flash_off_ms) {
                BlinkResult::Blinking { attempts } => Applied::Blinking { attempts },
                BlinkResult::TriggerRejected | BlinkResult::Exhausted => {
                    apply_steady(node, brightness)
                }
            }
        }
        FlashMode::None => apply_steady(node, brightness),
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingDelay;
    use super::*;
    use crate::led::node::mock::MockNode;

    fn s(v: &str) -> String {
        v.to_string()
    }

    // ── try_blink ──

    #[test]
    fn blink_first_attempt_succeeds() {
        let node = MockNode::new();
        let delay = RecordingDelay::new();
        let r = try_blink(&node, &delay, &BlinkPolicy::default(), 500, 1500);
        assert_eq!(r, BlinkResult::Blinking { attempts: 1 });
        assert_eq!(
            node.attempts(),
            vec![
                (Attribute::Trigger, s("timer")),
                (Attribute::DelayOff, s("1500")),
                (Attribute::DelayOn, s("500")),
            ]
        );
        assert_eq!(delay.calls.borrow().as_slice(), &[Duration::from_millis(2)]);
    }

    #[test]
    fn blink_trigger_rejected_skips_retry_loop() {
        let node = MockNode::new();
        node.fail_always(Attribute::Trigger);
        let delay = RecordingDelay::new();
        let r = try_blink(&node, &delay, &BlinkPolicy::default(), 500, 500);
        assert_eq!(r, BlinkResult::TriggerRejected);
        assert_eq!(node.writes.borrow().len(), 1);
        assert_eq!(delay.count(), 0);
    }

    #[test]
    fn blink_delay_on_not_written_when_delay_off_fails() {
        let node = MockNode::new();
        node.fail_next(Attribute::DelayOff, 1);
        let delay = RecordingDelay::new();
        let r = try_blink(&node, &delay, &BlinkPolicy::default(), 100, 200);
        assert_eq!(r, BlinkResult::Blinking { attempts: 2 });
        assert_eq!(
            node.attempts(),
            vec![
                (Attribute::Trigger, s("timer")),
                (Attribute::DelayOff, s("200")),
                (Attribute::DelayOff, s("200")),
                (Attribute::DelayOn, s("100")),
            ]
        );
    }

    #[test]
    fn blink_second_pair_succeeds() {
        let node = MockNode::new();
        node.fail_next(Attribute::DelayOn, 1);
        let delay = RecordingDelay::new();
        let r = try_blink(&node, &delay, &BlinkPolicy::default(), 100, 200);
        assert_eq!(r, BlinkResult::Blinking { attempts: 2 });
        assert_eq!(node.count(Attribute::DelayOff), 2);
        assert_eq!(node.count(Attribute::DelayOn), 2);
        assert_eq!(delay.count(), 2);
    }

    #[test]
    fn blink_exhausts_after_max_attempts() {
        let node = MockNode::new();
        node.fail_always(Attribute::DelayOff);
        let delay = RecordingDelay::new();
        let r = try_blink(&node, &delay, &BlinkPolicy::default(), 100, 200);
        assert_eq!(r, BlinkResult::Exhausted);
        assert_eq!(node.count(Attribute::DelayOff), 20);
        assert_eq!(node.count(Attribute::DelayOn), 0);
        assert_eq!(delay.count(), 20);
    }

    #[test]
    fn blink_respects_custom_policy() {
        let node = MockNode::new();
        node.fail_always(Attribute::DelayOn);
        let delay = RecordingDelay::new();
        let policy = BlinkPolicy {
            max_attempts: 3,
            settle: Duration::from_millis(7),
        };
        assert_eq!(
            try_blink(&node, &delay, &policy, 1, 1),
            BlinkResult::Exhausted
        );
        assert_eq!(node.count(Attribute::DelayOn), 3);
        assert!(delay.calls.borrow().iter().all(|d| *d == Duration::from_millis(7)));
    }

    // ── apply_steady ──

    #[test]
    fn steady_writes_brightness() {
        let node = MockNode::new();
        assert_eq!(apply_steady(&node, 76), Applied::Steady { brightness: 76 });
        assert_eq!(node.attempts(), vec![(Attribute::Brightness, s("76"))]);
    }

    #[test]
    fn steady_zero_never_writes_brightness() {
        let node = MockNode::new();
        assert_eq!(apply_steady(&node, 0), Applied::Off);
        assert_eq!(
            node.attempts(),
            vec![(Attribute::DelayOff, s("100")), (Attribute::DelayOn, s("0"))]
        );
        assert_eq!(node.count(Attribute::Brightness), 0);
    }

    #[test]
    fn steady_failure_reported() {
        let node = MockNode::new();
        node.fail_always(Attribute::Brightness);
        assert_eq!(apply_steady(&node, 10), Applied::Failed);

        let node = MockNode::new();
        node.fail_always(Attribute::DelayOff);
        assert_eq!(apply_steady(&node, 0), Applied::Failed);
        assert_eq!(node.count(Attribute::DelayOn), 0);
    }

    // ── apply_state ──

    #[test]
    fn state_none_is_steady() {
        let node = MockNode::new();
        let delay = RecordingDelay::new();
        let applied = apply_state(
            &node,
            &delay,
            &BlinkPolicy::default(),
            &HwLightState::solid(0xFFFF_0000),
        );
        assert_eq!(applied, Applied::Steady { brightness: 76 });
        assert_eq!(node.count(Attribute::Trigger), 0);
    }

    #[test]
    fn state_timed_trigger_rejected_falls_back_to_brightness() {
        let node = MockNode::new();
        node.fail_always(Attribute::Trigger);
        let delay = RecordingDelay::new();
        let applied = apply_state(
            &node,
            &delay,
            &BlinkPolicy::default(),
            &HwLightState::timed(0xFFFF_0000, 500, 500),
        );
        assert_eq!(applied, Applied::Steady { brightness: 76 });
        assert_eq!(
            node.attempts(),
            vec![(Attribute::Trigger, s("timer")), (Attribute::Brightness, s("76"))]
        );
        assert_eq!(delay.count(), 0);
    }

    #[test]
    fn state_hardware_flash_blinks() {
        let node = MockNode::new();
        let delay = RecordingDelay::new();
        let state = HwLightState {
            flash_mode: FlashMode::Hardware,
            ..HwLightState::timed(0xFF00_FF00, 250, 750)
        };
        let applied = apply_state(&node, &delay, &BlinkPolicy::default(), &state);
        assert_eq!(applied, Applied::Blinking { attempts: 1 });
        assert_eq!(node.value(Attribute::DelayOn).as_deref(), Some("250"));
        assert_eq!(node.value(Attribute::DelayOff).as_deref(), Some("750"));
    }

    #[test]
    fn state_timed_exhausted_dark_goes_off() {
        let node = MockNode::new();
        node.fail_next(Attribute::DelayOff, 20);
        let delay = RecordingDelay::new();
        let applied = apply_state(
            &node,
            &delay,
            &BlinkPolicy::default(),
            &HwLightState::timed(0, 500, 500),
        );
        // The 21st delay_off write is the "always off" fallback.
        assert_eq!(applied, Applied::Off);
        assert_eq!(node.count(Attribute::DelayOff), 21);
        assert_eq!(node.count(Attribute::Brightness), 0);
    }

    #[test]
    fn applied_is_ok() {
        assert!(Applied::Off.is_ok());
        assert!(Applied::Steady { brightness: 1 }.is_ok());
        assert!(Applied::Blinking { attempts: 3 }.is_ok());
        assert!(!Applied::Failed.is_ok());
    }
}
