//! Concrete [`InputDriver`](crate::input::driver::InputDriver) implementations.
//!
//! - [`queued`] replays input the host pushes in (window callbacks, tests).
//! - [`gilrs`] reads physical gamepads.

pub mod gilrs;
pub mod queued;

pub use self::gilrs::GilrsDriver;
pub use self::queued::{QueuedDriver, SampleFeed};
