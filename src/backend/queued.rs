//! Host-fed driver
//!
//! The host window layer pushes whatever its event loop reports into a [`SampleFeed`]; the
//! [`QueuedDriver`] hands the queued events to the engine on the next poll. The feed is a
//! cheap single-threaded handle, clone it into every place that receives platform callbacks.

use crate::input::controls::{
    ButtonState, Control, GamepadAxis, GamepadButton, InputAction, Key, MouseButton,
    MouseScrollAxis,
};
use crate::input::device::{DeviceClass, DeviceIndex, GamepadId, MAX_INPUT_DEVICE_COUNT};
use crate::input::driver::{DriverError, DriverEvent, InputDriver, WindowSurface};
use crate::input::sample::RawSample;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct FeedState {
    pending: VecDeque<DriverEvent>,
    held: HashSet<(DeviceIndex, i32)>,
    present: [bool; MAX_INPUT_DEVICE_COUNT],
}

/// Shared handle used to push platform input into a [`QueuedDriver`].
#[derive(Debug, Clone, Default)]
pub struct SampleFeed {
    inner: Rc<RefCell<FeedState>>,
}

impl SampleFeed {
    pub fn push_key(&self, key: Key, state: ButtonState, timestamp: u64) {
        self.push_event(DriverEvent::Key(RawSample::button(key.id(), state, timestamp)));
    }

    pub fn push_mouse_button(&self, button: MouseButton, state: ButtonState, timestamp: u64) {
        self.push_event(DriverEvent::MouseButton(RawSample::button(
            button.id(),
            state,
            timestamp,
        )));
    }

    /// A scroll report always yields one sample per scroll axis.
    pub fn push_scroll(&self, x_offset: f32, y_offset: f32, timestamp: u64) {
        self.push_event(DriverEvent::MouseScroll(RawSample::axis(
            MouseScrollAxis::X.id(),
            x_offset,
            timestamp,
        )));
        self.push_event(DriverEvent::MouseScroll(RawSample::axis(
            MouseScrollAxis::Y.id(),
            y_offset,
            timestamp,
        )));
    }

    pub fn push_gamepad_button(
        &self,
        gamepad: GamepadId,
        button: GamepadButton,
        state: ButtonState,
        timestamp: u64,
    ) {
        self.push_event(DriverEvent::GamepadButton {
            gamepad,
            sample: RawSample::button(button.id(), state, timestamp),
        });
    }

    pub fn push_gamepad_axis(&self, gamepad: GamepadId, axis: GamepadAxis, value: f32, timestamp: u64) {
        self.push_event(DriverEvent::GamepadAxis {
            gamepad,
            sample: RawSample::axis(axis.id(), value, timestamp),
        });
    }

    pub fn connect_gamepad(&self, gamepad: GamepadId) {
        let device = DeviceIndex::from(gamepad);
        self.inner.borrow_mut().present[device.as_usize()] = true;
        self.push_event(DriverEvent::Connected {
            device,
            class: DeviceClass::Gamepad,
        });
    }

    pub fn disconnect_gamepad(&self, gamepad: GamepadId) {
        let device = DeviceIndex::from(gamepad);
        {
            let mut state = self.inner.borrow_mut();
            state.present[device.as_usize()] = false;
            state.held.retain(|(held_device, _)| *held_device != device);
        }
        self.push_event(DriverEvent::Disconnected {
            device,
            class: DeviceClass::Gamepad,
        });
    }

    /// Drops the device from the platform view without queueing a notification.
    pub fn forget_device(&self, device: DeviceIndex) {
        let mut state = self.inner.borrow_mut();
        state.present[device.as_usize()] = false;
        state.held.retain(|(held_device, _)| *held_device != device);
    }

    /// Queues `event` and updates the held-control view for button samples.
    pub fn push_event(&self, event: DriverEvent) {
        let mut state = self.inner.borrow_mut();

        let button = match &event {
            DriverEvent::Key(sample) => Some((DeviceIndex::KEYBOARD, sample)),
            DriverEvent::MouseButton(sample) => Some((DeviceIndex::MOUSE, sample)),
            DriverEvent::GamepadButton { gamepad, sample } => {
                Some((DeviceIndex::from(*gamepad), sample))
            }
            _ => None,
        };
        if let Some((device, sample)) = button {
            if sample.input_action() == InputAction::Pressed {
                state.held.insert((device, sample.control));
            } else {
                state.held.remove(&(device, sample.control));
            }
        }

        state.pending.push_back(event);
    }

    pub fn pending_len(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn is_held(&self, device: DeviceIndex, control: i32) -> bool {
        self.inner.borrow().held.contains(&(device, control))
    }

    /// Keyboard and mouse are always present.
    pub fn is_present(&self, device: DeviceIndex) -> bool {
        match device.class() {
            DeviceClass::Gamepad => self.inner.borrow().present[device.as_usize()],
            DeviceClass::Keyboard | DeviceClass::Mouse => true,
        }
    }

    pub(crate) fn drain(&self) -> Vec<DriverEvent> {
        self.inner.borrow_mut().pending.drain(..).collect()
    }
}

/// Driver that replays whatever the host pushed into its [`SampleFeed`].
#[derive(Debug)]
pub struct QueuedDriver {
    feed: SampleFeed,
}

impl QueuedDriver {
    pub fn new() -> (Self, SampleFeed) {
        Self::with_feed(SampleFeed::default())
    }

    pub fn with_feed(feed: SampleFeed) -> (Self, SampleFeed) {
        let handle = feed.clone();
        (Self { feed }, handle)
    }
}

impl InputDriver for QueuedDriver {
    fn initialize(&mut self, _window: &dyn WindowSurface) -> Result<Vec<DriverEvent>, DriverError> {
        let initial = self.feed.drain();
        info!("Queued driver attached with {} pending event(s)", initial.len());
        Ok(initial)
    }

    fn poll(&mut self) -> Vec<DriverEvent> {
        let events = self.feed.drain();
        if !events.is_empty() {
            debug!("Queued driver drained {} event(s)", events.len());
        }
        events
    }

    fn is_control_down(&self, device: DeviceIndex, control: i32) -> bool {
        self.feed.is_held(device, control)
    }

    fn is_device_present(&self, device: DeviceIndex) -> bool {
        self.feed.is_present(device)
    }
}
