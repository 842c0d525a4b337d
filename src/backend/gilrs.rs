//! Gamepad backend on top of gilrs
//!
//! Physical pads are assigned to the sixteen gamepad slots in connection order. Every poll
//! samples the complete button and axis state of each connected pad, so the classifier sees a
//! sample per control per frame. Keyboard and mouse input is not something gilrs knows about;
//! the host window pushes those through the embedded [`SampleFeed`].

use crate::backend::queued::SampleFeed;
use crate::input::controls::{ButtonState, Control, GamepadAxis, GamepadButton};
use crate::input::device::{DeviceClass, DeviceIndex, GamepadId, MAX_GAMEPAD_COUNT};
use crate::input::driver::{
    DriverError, DriverEvent, InputDriver, MonotonicClock, TimeSource, WindowSurface,
};
use crate::input::sample::RawSample;
use gilrs::{Axis, Button, Event, EventType, Gamepad, Gilrs};
use tracing::{debug, error, info, warn};

/// Fixed slot assignment for platform gamepad handles.
#[derive(Debug, Clone)]
pub struct GamepadSlots<T> {
    slots: [Option<T>; MAX_GAMEPAD_COUNT],
}

impl<T: Copy + PartialEq> Default for GamepadSlots<T> {
    fn default() -> Self {
        Self {
            slots: [None; MAX_GAMEPAD_COUNT],
        }
    }
}

impl<T: Copy + PartialEq> GamepadSlots<T> {
    /// Claims the lowest free slot. `None` if the handle is already assigned or all slots are
    /// taken.
    pub fn attach(&mut self, handle: T) -> Option<GamepadId> {
        if self.find(handle).is_some() {
            return None;
        }
        let free = self.slots.iter().position(Option::is_none)?;
        self.slots[free] = Some(handle);
        GamepadId::new(free)
    }

    pub fn detach(&mut self, handle: T) -> Option<GamepadId> {
        let id = self.find(handle)?;
        self.slots[id.slot()] = None;
        Some(id)
    }

    pub fn find(&self, handle: T) -> Option<GamepadId> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(handle))
            .and_then(GamepadId::new)
    }

    pub fn get(&self, id: GamepadId) -> Option<T> {
        self.slots[id.slot()]
    }

    pub fn occupied(&self) -> impl Iterator<Item = (GamepadId, T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(slot, handle)| {
            let handle = (*handle)?;
            GamepadId::new(slot).map(|id| (id, handle))
        })
    }
}

/// gilrs button backing a gamepad control.
pub fn gilrs_button(button: GamepadButton) -> Option<Button> {
    let mapped = match button {
        GamepadButton::A => Button::South,
        GamepadButton::B => Button::East,
        GamepadButton::X => Button::West,
        GamepadButton::Y => Button::North,
        GamepadButton::LeftBumper => Button::LeftTrigger,
        GamepadButton::RightBumper => Button::RightTrigger,
        GamepadButton::Back => Button::Select,
        GamepadButton::Start => Button::Start,
        GamepadButton::Guide => Button::Mode,
        GamepadButton::LeftThumb => Button::LeftThumb,
        GamepadButton::RightThumb => Button::RightThumb,
        GamepadButton::DpadUp => Button::DPadUp,
        GamepadButton::DpadRight => Button::DPadRight,
        GamepadButton::DpadDown => Button::DPadDown,
        GamepadButton::DpadLeft => Button::DPadLeft,
        GamepadButton::Unknown | GamepadButton::Max => return None,
    };
    Some(mapped)
}

/// Analog triggers report `0.0..=1.0`; the engine expects `-1.0` at rest.
pub fn normalize_trigger(pressure: f32) -> f32 {
    (pressure.clamp(0.0, 1.0) * 2.0) - 1.0
}

fn axis_value(gamepad: &Gamepad<'_>, axis: GamepadAxis) -> f32 {
    let trigger = |button: Button| {
        gamepad
            .button_data(button)
            .map(|data| normalize_trigger(data.value()))
            .unwrap_or(-1.0)
    };

    match axis {
        GamepadAxis::LeftX => gamepad.value(Axis::LeftStickX),
        GamepadAxis::LeftY => gamepad.value(Axis::LeftStickY),
        GamepadAxis::RightX => gamepad.value(Axis::RightStickX),
        GamepadAxis::RightY => gamepad.value(Axis::RightStickY),
        GamepadAxis::LeftTrigger => trigger(Button::LeftTrigger2),
        GamepadAxis::RightTrigger => trigger(Button::RightTrigger2),
        GamepadAxis::Unknown | GamepadAxis::Max => 0.0,
    }
}

pub struct GilrsDriver {
    gilrs: Option<Gilrs>,
    slots: GamepadSlots<gilrs::GamepadId>,
    feed: SampleFeed,
    clock: Box<dyn TimeSource>,
    gamepads_enabled: bool,
}

impl GilrsDriver {
    /// Returns the driver and the feed the host window pushes keyboard and mouse input into.
    pub fn new(gamepads_enabled: bool) -> (Self, SampleFeed) {
        Self::with_clock(gamepads_enabled, Box::new(MonotonicClock::default()))
    }

    pub fn with_clock(gamepads_enabled: bool, clock: Box<dyn TimeSource>) -> (Self, SampleFeed) {
        let feed = SampleFeed::default();
        let driver = Self {
            gilrs: None,
            slots: GamepadSlots::default(),
            feed: feed.clone(),
            clock,
            gamepads_enabled,
        };
        (driver, feed)
    }

    fn connected(&self, id: GamepadId) -> Option<Gamepad<'_>> {
        let handle = self.slots.get(id)?;
        self.gilrs.as_ref()?.connected_gamepad(handle)
    }

    fn sample_gamepads(&self, events: &mut Vec<DriverEvent>) {
        let timestamp = self.clock.now_millis();

        for (id, _) in self.slots.occupied() {
            let Some(gamepad) = self.connected(id) else {
                continue;
            };

            for button in GamepadButton::ALL {
                let Some(mapped) = gilrs_button(button) else {
                    continue;
                };
                let state = if gamepad.is_pressed(mapped) {
                    ButtonState::Pressed
                } else {
                    ButtonState::Released
                };
                events.push(DriverEvent::GamepadButton {
                    gamepad: id,
                    sample: RawSample::button(button.id(), state, timestamp),
                });
            }

            for axis in GamepadAxis::ALL {
                events.push(DriverEvent::GamepadAxis {
                    gamepad: id,
                    sample: RawSample::axis(axis.id(), axis_value(&gamepad, axis), timestamp),
                });
            }
        }
    }
}

impl InputDriver for GilrsDriver {
    fn initialize(&mut self, _window: &dyn WindowSurface) -> Result<Vec<DriverEvent>, DriverError> {
        let mut events = self.feed.drain();

        if !self.gamepads_enabled {
            info!("Gamepad support disabled, only keyboard and mouse are active");
            return Ok(events);
        }

        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                info!("Successfully initialized gilrs");
                gilrs
            }
            Err(gilrs::Error::NotImplemented(dummy)) => {
                warn!("Gamepads are not supported on this platform, continuing without them");
                dummy
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(DriverError::InitializationError(e.to_string()));
            }
        };

        for (handle, gamepad) in gilrs.gamepads() {
            match self.slots.attach(handle) {
                Some(id) => {
                    info!("  [{}] {} ({:?})", id.slot(), gamepad.name(), handle);
                    events.push(DriverEvent::Connected {
                        device: id.into(),
                        class: DeviceClass::Gamepad,
                    });
                }
                None => warn!("No free slot for gamepad {}", gamepad.name()),
            }
        }

        self.gilrs = Some(gilrs);
        Ok(events)
    }

    fn poll(&mut self) -> Vec<DriverEvent> {
        let mut events = self.feed.drain();

        let mut notifications = Vec::new();
        if let Some(gilrs) = self.gilrs.as_mut() {
            while let Some(Event { id, event, .. }) = gilrs.next_event() {
                match event {
                    EventType::Connected | EventType::Disconnected => {
                        notifications.push((id, event))
                    }
                    _ => {}
                }
            }
        }

        for (handle, event) in notifications {
            let slot = match event {
                EventType::Connected => self.slots.attach(handle),
                _ => self.slots.detach(handle),
            };
            let Some(id) = slot else {
                debug!("Ignoring {:?} for gamepad {:?}", event, handle);
                continue;
            };
            let device = id.into();
            events.push(match event {
                EventType::Connected => DriverEvent::Connected {
                    device,
                    class: DeviceClass::Gamepad,
                },
                _ => DriverEvent::Disconnected {
                    device,
                    class: DeviceClass::Gamepad,
                },
            });
        }

        self.sample_gamepads(&mut events);
        events
    }

    fn is_control_down(&self, device: DeviceIndex, control: i32) -> bool {
        let Some(id) = device.gamepad() else {
            return self.feed.is_held(device, control);
        };
        let button = GamepadButton::ALL
            .into_iter()
            .find(|button| button.id() == control)
            .and_then(gilrs_button);

        match (self.connected(id), button) {
            (Some(gamepad), Some(button)) => gamepad.is_pressed(button),
            _ => false,
        }
    }

    fn is_device_present(&self, device: DeviceIndex) -> bool {
        match device.gamepad() {
            Some(id) => self.connected(id).is_some(),
            None => true,
        }
    }
}
