//! Classification of raw samples into cached actions
//!
//! Buttons are edge-triggered: history only shifts when the reported action changes, and a
//! press followed by a release inside the click window is promoted to `Clicked`. Axes are
//! level-triggered: every live sample shifts history and re-arms the instance, an idle sample
//! only clears the cached axis action.

use crate::input::controls::{AxisAction, InputAction};
use crate::input::instance::InputInstance;
use crate::input::sample::RawSample;
use serde::{Deserialize, Serialize};

/// Time window between press and release for the pair to count as a click.
pub const CLICK_TIME_MS: u64 = 350;

pub const DEADZONE_THUMBSTICK: f32 = 0.25;

/// Triggers rest at -1.0, so anything at or above this is live.
pub const DEADZONE_TRIGGER: f32 = -0.95;

/// Timing and deadzone parameters of the classifier.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClassifierSettings {
    pub click_time_ms: u64,
    pub deadzone_thumbstick: f32,
    pub deadzone_trigger: f32,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            click_time_ms: CLICK_TIME_MS,
            deadzone_thumbstick: DEADZONE_THUMBSTICK,
            deadzone_trigger: DEADZONE_TRIGGER,
        }
    }
}

/// Liveness rule an axis follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Symmetric around 0.0 (thumbsticks, scroll wheel).
    Thumbstick,
    /// Rests at -1.0.
    Trigger,
}

pub fn is_axis_live(value: f32, kind: AxisKind, settings: &ClassifierSettings) -> bool {
    match kind {
        AxisKind::Trigger => value >= settings.deadzone_trigger,
        AxisKind::Thumbstick => {
            value >= settings.deadzone_thumbstick || value <= -settings.deadzone_thumbstick
        }
    }
}

/// Applies a button sample to `instance` and re-derives its cached action.
pub fn classify_button(
    instance: &mut InputInstance,
    sample: &RawSample,
    settings: &ClassifierSettings,
) {
    if instance.current_sample.action != sample.action {
        instance.consumed = false;
        instance.previous_sample = instance.current_sample;
        instance.current_sample = *sample;
    }

    let previous = instance.previous_sample.input_action();
    let current = instance.current_sample.input_action();

    instance.cached_action = if previous == InputAction::Pressed && current == InputAction::Released
    {
        let held_ms = instance
            .current_sample
            .timestamp
            .saturating_sub(instance.previous_sample.timestamp);
        if held_ms <= settings.click_time_ms {
            InputAction::Clicked
        } else {
            InputAction::Released
        }
    } else {
        current
    };
}

/// Applies an axis sample to `instance`.
///
/// An idle sample leaves `consumed` and the sample history untouched.
pub fn classify_axis(
    instance: &mut InputInstance,
    sample: &RawSample,
    kind: AxisKind,
    settings: &ClassifierSettings,
) {
    if is_axis_live(sample.value, kind, settings) {
        instance.consumed = false;
        instance.previous_sample = instance.current_sample;
        instance.current_sample = *sample;
        instance.cached_axis_action = AxisAction::Tilted;
    } else {
        instance.cached_axis_action = AxisAction::Unknown;
    }
}
