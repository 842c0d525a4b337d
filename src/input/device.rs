//! Device index space
//!
//! Every physical input source is addressed by a small stable integer:
//!
//! ```text
//!  0 ..= 15   gamepad slots
//!  16         keyboard
//!  17         mouse
//! ```
//!
//! The index is the first-level key into every per-device table of the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of gamepad slots tracked by the engine.
pub const MAX_GAMEPAD_COUNT: usize = 16;

/// Up to 16 gamepads + 1 keyboard + 1 mouse.
pub const MAX_INPUT_DEVICE_COUNT: usize = 18;

const KEYBOARD_INDEX: u8 = 16;
const MOUSE_INDEX: u8 = 17;

/// Class of a physical input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    Keyboard,
    Mouse,
    Gamepad,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Keyboard => write!(f, "Keyboard"),
            DeviceClass::Mouse => write!(f, "Mouse"),
            DeviceClass::Gamepad => write!(f, "Gamepad"),
        }
    }
}

/// Stable slot of an input device, in `0..MAX_INPUT_DEVICE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeviceIndex(u8);

impl DeviceIndex {
    pub const KEYBOARD: DeviceIndex = DeviceIndex(KEYBOARD_INDEX);
    pub const MOUSE: DeviceIndex = DeviceIndex(MOUSE_INDEX);

    /// Returns `None` when `raw` is outside the device index space.
    pub fn from_raw(raw: usize) -> Option<Self> {
        if raw < MAX_INPUT_DEVICE_COUNT {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub fn class(self) -> DeviceClass {
        match self.0 {
            KEYBOARD_INDEX => DeviceClass::Keyboard,
            MOUSE_INDEX => DeviceClass::Mouse,
            _ => DeviceClass::Gamepad,
        }
    }

    /// The gamepad slot behind this index, if it is one.
    pub fn gamepad(self) -> Option<GamepadId> {
        GamepadId::new(self.0 as usize)
    }

    /// All device indices in ascending order.
    pub fn all() -> impl Iterator<Item = DeviceIndex> {
        (0..MAX_INPUT_DEVICE_COUNT as u8).map(DeviceIndex)
    }
}

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class(), self.0)
    }
}

/// One of the sixteen gamepad slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GamepadId(u8);

impl GamepadId {
    pub const GAMEPAD_1: GamepadId = GamepadId(0);
    pub const GAMEPAD_2: GamepadId = GamepadId(1);
    pub const GAMEPAD_3: GamepadId = GamepadId(2);
    pub const GAMEPAD_4: GamepadId = GamepadId(3);

    pub fn new(slot: usize) -> Option<Self> {
        if slot < MAX_GAMEPAD_COUNT {
            Some(Self(slot as u8))
        } else {
            None
        }
    }

    pub fn slot(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = GamepadId> {
        (0..MAX_GAMEPAD_COUNT as u8).map(GamepadId)
    }
}

impl From<GamepadId> for DeviceIndex {
    fn from(id: GamepadId) -> Self {
        DeviceIndex(id.0)
    }
}
