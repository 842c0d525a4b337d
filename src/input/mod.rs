//! Engine-side input handling
//!
//! Turns raw platform samples into debounced per-control actions and fires user callbacks:
//!
//! 1. [`driver`] - Platform contract producing [`driver::DriverEvent`]s
//! 2. [`router`] - Routes samples to the right tracker table and classifier
//! 3. [`classifier`] - Press/release/click and deadzone classification
//! 4. [`dispatcher`] - Fires bound callbacks once per transition
//! 5. [`subsystem`] - Lifecycle and per-frame tick
//!
//! # Architecture
//!
//! ```text
//! Driver ──► Router ──► Classifier ──► InstanceTable ──► Dispatcher ──► Callbacks
//!   │                                                        ▲
//!   └──► Connectivity                       BindingRegistry ─┘
//! ```
//!
//! Everything here is single-threaded and runs inside the caller's frame.

pub mod bindings;
pub mod classifier;
pub mod connectivity;
pub mod controls;
pub mod device;
pub mod dispatcher;
pub mod driver;
pub mod instance;
pub mod router;
pub mod sample;
pub mod subsystem;

pub use classifier::ClassifierSettings;
pub use controls::{
    AxisAction, ButtonState, Control, GamepadAxis, GamepadButton, InputAction, Key, MouseButton,
    MouseScrollAxis,
};
pub use device::{DeviceClass, DeviceIndex, GamepadId};
pub use dispatcher::DispatchReport;
pub use driver::{DriverError, DriverEvent, InputDriver, TimeSource, WindowSurface};
pub use router::InputRouter;
pub use sample::RawSample;
pub use subsystem::{InputSubsystem, Running, Uninitialized};
