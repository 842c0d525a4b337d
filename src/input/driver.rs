//! Contracts between the engine and the platform layer
//!
//! A concrete backend implements [`InputDriver`] and is selected once at startup. The driver
//! turns whatever the platform reports into [`DriverEvent`]s; the engine never talks to the
//! hardware directly.

use crate::input::device::{DeviceClass, DeviceIndex, GamepadId};
use crate::input::sample::RawSample;
use std::time::Instant;

/// Window the platform input is attached to.
pub trait WindowSurface {
    fn is_open(&self) -> bool;

    /// Pumps pending OS events.
    fn process_events(&mut self);
}

/// Monotonic millisecond clock used to timestamp samples.
pub trait TimeSource {
    fn now_millis(&self) -> u64;
}

/// Milliseconds elapsed since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Everything a driver can report in one poll.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Key(RawSample),
    MouseButton(RawSample),
    MouseScroll(RawSample),
    GamepadButton {
        gamepad: GamepadId,
        sample: RawSample,
    },
    GamepadAxis {
        gamepad: GamepadId,
        sample: RawSample,
    },
    Connected {
        device: DeviceIndex,
        class: DeviceClass,
    },
    Disconnected {
        device: DeviceIndex,
        class: DeviceClass,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Failed to initialize input driver: {0}")]
    InitializationError(String),

    #[error("Window surface is not open")]
    WindowClosed,
}

/// Platform backend feeding the engine.
pub trait InputDriver {
    /// Attaches to `window`. Returns connect notifications for devices already present.
    fn initialize(&mut self, window: &dyn WindowSurface) -> Result<Vec<DriverEvent>, DriverError>;

    /// Drains everything reported since the previous poll, in order.
    fn poll(&mut self) -> Vec<DriverEvent>;

    /// Instantaneous physical state, independent of bindings.
    fn is_control_down(&self, device: DeviceIndex, control: i32) -> bool;

    /// Whether the platform still sees the device.
    fn is_device_present(&self, device: DeviceIndex) -> bool;
}
