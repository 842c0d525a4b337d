//! Control namespaces and input actions
//!
//! Control ids are small integers scoped to a device class. Each device has two disjoint
//! namespaces: button-like controls (keys, mouse buttons, gamepad buttons) and axis-like
//! controls (thumbsticks, triggers, scroll wheel). Every namespace ends in a `Max` sentinel
//! that is never a valid control.

use crate::input::device::DeviceClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common view over the typed control enums.
pub trait Control: Copy + fmt::Debug {
    /// One past the last valid id of the namespace.
    const MAX: i32;

    fn id(self) -> i32;

    fn is_valid(self) -> bool {
        (0..Self::MAX).contains(&self.id())
    }
}

macro_rules! impl_control {
    ($ty:ty) => {
        impl Control for $ty {
            const MAX: i32 = <$ty>::Max as i32;

            fn id(self) -> i32 {
                self as i32
            }
        }
    };
}

/// Keyboard keys, numbered by their platform key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Key {
    Unknown = -1,
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,
    World1 = 161,
    World2 = 162,
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,
    F25 = 314,
    Numpad0 = 320,
    Numpad1 = 321,
    Numpad2 = 322,
    Numpad3 = 323,
    Numpad4 = 324,
    Numpad5 = 325,
    Numpad6 = 326,
    Numpad7 = 327,
    Numpad8 = 328,
    Numpad9 = 329,
    NumpadDecimal = 330,
    NumpadDivide = 331,
    NumpadMultiply = 332,
    NumpadSubtract = 333,
    NumpadAdd = 334,
    NumpadEnter = 335,
    NumpadEqual = 336,
    ShiftLeft = 340,
    ControlLeft = 341,
    AltLeft = 342,
    SuperLeft = 343,
    ShiftRight = 344,
    ControlRight = 345,
    AltRight = 346,
    SuperRight = 347,
    Menu = 348,
    Max = 349,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum MouseButton {
    Unknown = -1,
    /// Usually left
    Button1 = 0,
    /// Usually right
    Button2 = 1,
    /// Usually middle
    Button3 = 2,
    Button4 = 3,
    Button5 = 4,
    Button6 = 5,
    Button7 = 6,
    Button8 = 7,
    Max = 8,
}

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton::Button1;
    pub const RIGHT: MouseButton = MouseButton::Button2;
    pub const MIDDLE: MouseButton = MouseButton::Button3;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum MouseScrollAxis {
    X = 0,
    Y = 1,
    Max = 2,
}

/// Gamepad buttons in the standard (Xbox-style) layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum GamepadButton {
    Unknown = -1,
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    LeftBumper = 4,
    RightBumper = 5,
    Back = 6,
    Start = 7,
    Guide = 8,
    LeftThumb = 9,
    RightThumb = 10,
    DpadUp = 11,
    DpadRight = 12,
    DpadDown = 13,
    DpadLeft = 14,
    Max = 15,
}

impl GamepadButton {
    pub const CROSS: GamepadButton = GamepadButton::A;
    pub const CIRCLE: GamepadButton = GamepadButton::B;
    pub const SQUARE: GamepadButton = GamepadButton::X;
    pub const TRIANGLE: GamepadButton = GamepadButton::Y;

    pub const ALL: [GamepadButton; 15] = [
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
        GamepadButton::LeftBumper,
        GamepadButton::RightBumper,
        GamepadButton::Back,
        GamepadButton::Start,
        GamepadButton::Guide,
        GamepadButton::LeftThumb,
        GamepadButton::RightThumb,
        GamepadButton::DpadUp,
        GamepadButton::DpadRight,
        GamepadButton::DpadDown,
        GamepadButton::DpadLeft,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum GamepadAxis {
    Unknown = -1,
    LeftX = 0,
    LeftY = 1,
    RightX = 2,
    RightY = 3,
    LeftTrigger = 4,
    RightTrigger = 5,
    Max = 6,
}

impl GamepadAxis {
    pub const ALL: [GamepadAxis; 6] = [
        GamepadAxis::LeftX,
        GamepadAxis::LeftY,
        GamepadAxis::RightX,
        GamepadAxis::RightY,
        GamepadAxis::LeftTrigger,
        GamepadAxis::RightTrigger,
    ];

    /// Trigger axes rest at -1.0 instead of 0.0.
    pub fn is_trigger_id(id: i32) -> bool {
        id == GamepadAxis::LeftTrigger as i32 || id == GamepadAxis::RightTrigger as i32
    }
}

impl_control!(Key);
impl_control!(MouseButton);
impl_control!(MouseScrollAxis);
impl_control!(GamepadButton);
impl_control!(GamepadAxis);

/// Number of button-like controls a device class exposes.
pub fn button_capacity(class: DeviceClass) -> usize {
    match class {
        DeviceClass::Keyboard => Key::MAX as usize,
        DeviceClass::Mouse => MouseButton::MAX as usize,
        DeviceClass::Gamepad => GamepadButton::MAX as usize,
    }
}

/// Number of axis-like controls a device class exposes.
pub fn axis_capacity(class: DeviceClass) -> usize {
    match class {
        DeviceClass::Keyboard => 0,
        DeviceClass::Mouse => MouseScrollAxis::MAX as usize,
        DeviceClass::Gamepad => GamepadAxis::MAX as usize,
    }
}

/// Physical state reported by a driver for a button-like control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Debounced action derived for a button-like control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum InputAction {
    #[default]
    Unknown = -1,
    Released = 0,
    Pressed = 1,
    /// Pressed then released inside the click window.
    Clicked = 2,
}

impl InputAction {
    /// Unrecognised codes map to `Unknown`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => InputAction::Released,
            1 => InputAction::Pressed,
            2 => InputAction::Clicked,
            _ => InputAction::Unknown,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Derived action for an axis-like control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum AxisAction {
    #[default]
    Unknown = -1,
    Tilted = 0,
}

impl AxisAction {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => AxisAction::Tilted,
            _ => AxisAction::Unknown,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}
