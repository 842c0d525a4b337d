use crate::input::controls::{AxisAction, ButtonState, InputAction};

/// One raw hardware sample as reported by a driver.
///
/// `action` carries an [`InputAction`] code for button-like controls and the axis liveness
/// code for axis-like controls. `value` is only meaningful for axes. `timestamp` is in
/// milliseconds and never decreases for a given device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub control: i32,
    pub action: i32,
    pub value: f32,
    pub timestamp: u64,
}

impl Default for RawSample {
    fn default() -> Self {
        Self {
            control: -1,
            action: InputAction::Released.code(),
            value: 0.0,
            timestamp: 0,
        }
    }
}

impl RawSample {
    pub fn button(control: i32, state: ButtonState, timestamp: u64) -> Self {
        let action = match state {
            ButtonState::Pressed => InputAction::Pressed,
            ButtonState::Released => InputAction::Released,
        };
        Self {
            control,
            action: action.code(),
            value: 0.0,
            timestamp,
        }
    }

    pub fn axis(control: i32, value: f32, timestamp: u64) -> Self {
        Self {
            control,
            action: AxisAction::Tilted.code(),
            value,
            timestamp,
        }
    }

    pub fn input_action(&self) -> InputAction {
        InputAction::from_raw(self.action)
    }
}
