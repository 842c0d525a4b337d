//! Input subsystem lifecycle
//!
//! Ties an [`InputRouter`] to one concrete [`InputDriver`]. The subsystem is a typestate
//! machine so that ticking an uninitialized driver does not compile:
//!
//! ```text
//! Uninitialized ──initialize(window)──► Running ──tick()──► Running
//! ```
//!
//! Bindings can be registered in either state. The caller owns the subsystem and drives
//! `tick` once per frame from a single thread.

use crate::input::classifier::ClassifierSettings;
use crate::input::controls::{AxisAction, InputAction};
use crate::input::device::{DeviceClass, DeviceIndex};
use crate::input::dispatcher::DispatchReport;
use crate::input::driver::{DriverError, InputDriver, WindowSurface};
use crate::input::router::InputRouter;
use statum::{machine, state};
use tracing::{debug, error, info};

#[state]
#[derive(Debug, Clone)]
pub enum SubsystemState {
    Uninitialized,
    Running,
}

#[machine]
pub struct InputSubsystem<S: SubsystemState> {
    router: InputRouter,
    driver: Box<dyn InputDriver>,
    ticks: u64,
}

// Available in every state
impl<S: SubsystemState> InputSubsystem<S> {
    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    /// Access to the typed binding helpers (`bind_key`, `bind_gamepad_axis`, ...).
    pub fn router_mut(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    pub fn bind_button(
        &mut self,
        device: DeviceIndex,
        control: i32,
        action: InputAction,
        callback: impl FnMut(i32, InputAction) + 'static,
    ) -> bool {
        self.router.bind_button(device, control, action, callback)
    }

    pub fn clear_button_binding(&mut self, device: DeviceIndex, control: i32) -> bool {
        self.router.clear_button_binding(device, control)
    }

    pub fn bind_axis(
        &mut self,
        device: DeviceIndex,
        control: i32,
        action: AxisAction,
        callback: impl FnMut(i32, AxisAction, f32) + 'static,
    ) -> bool {
        self.router.bind_axis(device, control, action, callback)
    }

    pub fn clear_axis_binding(&mut self, device: DeviceIndex, control: i32) -> bool {
        self.router.clear_axis_binding(device, control)
    }

    /// Instantaneous physical state straight from the driver.
    pub fn is_control_down(&self, device: DeviceIndex, control: i32) -> bool {
        self.driver.is_control_down(device, control)
    }

    /// A gamepad only counts as connected while the driver still sees it.
    pub fn is_device_connected(&self, device: DeviceIndex) -> bool {
        if !self.router.is_device_connected(device) {
            return false;
        }
        match device.class() {
            DeviceClass::Gamepad => self.driver.is_device_present(device),
            DeviceClass::Keyboard | DeviceClass::Mouse => true,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

impl InputSubsystem<Uninitialized> {
    pub fn create(settings: Option<ClassifierSettings>, driver: Box<dyn InputDriver>) -> Self {
        debug!("Creating input subsystem");
        Self::new(InputRouter::new(settings), driver, 0)
    }

    /// Attaches the driver to `window` and registers the devices it already sees.
    pub fn initialize(
        mut self,
        window: &dyn WindowSurface,
    ) -> Result<InputSubsystem<Running>, DriverError> {
        if !window.is_open() {
            error!("Failed to initialize input subsystem: window surface is not open");
            return Err(DriverError::WindowClosed);
        }

        let initial = self.driver.initialize(window)?;
        info!(
            "Input driver initialized, {} device notification(s) at startup",
            initial.len()
        );
        for event in initial {
            self.router.handle_event(event);
        }

        info!("Input subsystem initialized, transitioning to Running state");
        Ok(self.transition())
    }
}

impl InputSubsystem<Running> {
    /// Poll, classify and dispatch for one frame.
    pub fn tick(&mut self, delta_time: f32) -> DispatchReport {
        let events = self.driver.poll();
        let event_count = events.len();
        for event in events {
            self.router.handle_event(event);
        }

        let report = self.router.execute_bindings();
        self.ticks += 1;

        if event_count > 0 || report.total() > 0 {
            debug!(
                "Tick {} ({:.4}s): {} driver events, {} button and {} axis callbacks",
                self.ticks, delta_time, event_count, report.buttons_fired, report.axes_fired
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::queued::QueuedDriver;
    use crate::input::controls::{ButtonState, GamepadButton, Key};
    use crate::input::device::GamepadId;

    struct TestWindow {
        open: bool,
    }

    impl WindowSurface for TestWindow {
        fn is_open(&self) -> bool {
            self.open
        }

        fn process_events(&mut self) {}
    }

    #[test]
    fn initialize_requires_an_open_window() {
        let (driver, _feed) = QueuedDriver::new();
        let subsystem = InputSubsystem::create(None, Box::new(driver));
        let result = subsystem.initialize(&TestWindow { open: false });
        assert!(matches!(result, Err(DriverError::WindowClosed)));
    }

    #[test]
    fn initialize_registers_present_devices() {
        let (driver, feed) = QueuedDriver::new();
        feed.connect_gamepad(GamepadId::GAMEPAD_1);

        let subsystem = InputSubsystem::create(None, Box::new(driver))
            .initialize(&TestWindow { open: true })
            .unwrap();
        assert!(subsystem.is_device_connected(GamepadId::GAMEPAD_1.into()));
        assert!(!subsystem.is_device_connected(GamepadId::GAMEPAD_2.into()));
        assert!(subsystem.is_device_connected(DeviceIndex::KEYBOARD));
    }

    #[test]
    fn gamepad_missing_from_driver_is_not_connected() {
        let (driver, feed) = QueuedDriver::new();
        let mut subsystem = InputSubsystem::create(None, Box::new(driver))
            .initialize(&TestWindow { open: true })
            .unwrap();

        let pad = GamepadId::GAMEPAD_2;
        feed.connect_gamepad(pad);
        subsystem.tick(0.016);
        assert!(subsystem.is_device_connected(pad.into()));

        // the platform lost the pad without a disconnect notification
        feed.forget_device(pad.into());
        assert!(subsystem.router().is_device_connected(pad.into()));
        assert!(!subsystem.is_device_connected(pad.into()));
    }

    #[test]
    fn bindings_registered_before_initialize_survive() {
        let (driver, feed) = QueuedDriver::new();
        let mut subsystem = InputSubsystem::create(None, Box::new(driver));
        let pad = GamepadId::GAMEPAD_1;
        assert!(subsystem.router_mut().bind_gamepad_button(
            pad,
            GamepadButton::A,
            InputAction::Pressed,
            |_, _| {}
        ));

        let mut subsystem = subsystem.initialize(&TestWindow { open: true }).unwrap();
        feed.push_gamepad_button(pad, GamepadButton::A, ButtonState::Pressed, 5);
        assert_eq!(subsystem.tick(0.016).buttons_fired, 1);
        assert_eq!(subsystem.tick_count(), 1);
    }

    #[test]
    fn is_control_down_reflects_driver_state() {
        let (driver, feed) = QueuedDriver::new();
        let subsystem = InputSubsystem::create(None, Box::new(driver))
            .initialize(&TestWindow { open: true })
            .unwrap();

        feed.push_key(Key::Escape, ButtonState::Pressed, 1);
        assert!(subsystem.is_control_down(DeviceIndex::KEYBOARD, Key::Escape as i32));
        feed.push_key(Key::Escape, ButtonState::Released, 2);
        assert!(!subsystem.is_control_down(DeviceIndex::KEYBOARD, Key::Escape as i32));
    }
}
