//! Input router: the engine facade
//!
//! Owns the instance tables, the binding registry and the connectivity tracker. Drivers push
//! samples in through the `process_*` methods (or [`InputRouter::handle_event`]), application
//! code registers bindings, and [`InputRouter::execute_bindings`] fires them once per tick.
//!
//! ```text
//! DriverEvent ──► process_* ──► classifier ──► InstanceTable
//!                                                   │
//!                     BindingRegistry ──► dispatch ◄┘──► callbacks
//! ```

use crate::input::bindings::BindingRegistry;
use crate::input::classifier::{classify_axis, classify_button, AxisKind, ClassifierSettings};
use crate::input::connectivity::{ConnectionObserver, ConnectivityTracker};
use crate::input::controls::{
    AxisAction, Control, GamepadAxis, GamepadButton, InputAction, Key, MouseButton,
    MouseScrollAxis,
};
use crate::input::device::{DeviceClass, DeviceIndex, GamepadId};
use crate::input::dispatcher::{dispatch, DispatchReport};
use crate::input::driver::DriverEvent;
use crate::input::instance::{InputInstance, InstanceTable, Namespace};
use crate::input::sample::RawSample;
use tracing::{debug, info};

pub struct InputRouter {
    settings: ClassifierSettings,
    buttons: InstanceTable,
    axes: InstanceTable,
    bindings: BindingRegistry,
    connectivity: ConnectivityTracker,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InputRouter {
    pub fn new(settings: Option<ClassifierSettings>) -> Self {
        let settings = settings.unwrap_or_default();
        info!("Creating input router with settings: {:?}", settings);

        Self {
            settings,
            buttons: InstanceTable::new(Namespace::Buttons),
            axes: InstanceTable::new(Namespace::Axes),
            bindings: BindingRegistry::new(),
            connectivity: ConnectivityTracker::default(),
        }
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: ClassifierSettings) {
        self.settings = settings;
    }

    pub fn set_connection_observer(&mut self, observer: Box<dyn ConnectionObserver>) {
        self.connectivity.set_observer(observer);
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    // ~~~ Generic binding API ~~~

    pub fn bind_button(
        &mut self,
        device: DeviceIndex,
        control: i32,
        action: InputAction,
        callback: impl FnMut(i32, InputAction) + 'static,
    ) -> bool {
        self.bindings
            .bind_button(device, control, action, Box::new(callback))
    }

    pub fn clear_button_binding(&mut self, device: DeviceIndex, control: i32) -> bool {
        self.bindings.clear_button(device, control)
    }

    pub fn bind_axis(
        &mut self,
        device: DeviceIndex,
        control: i32,
        action: AxisAction,
        callback: impl FnMut(i32, AxisAction, f32) + 'static,
    ) -> bool {
        self.bindings
            .bind_axis(device, control, action, Box::new(callback))
    }

    pub fn clear_axis_binding(&mut self, device: DeviceIndex, control: i32) -> bool {
        self.bindings.clear_axis(device, control)
    }

    // ~~~ Typed binding API ~~~

    pub fn bind_key(
        &mut self,
        key: Key,
        action: InputAction,
        callback: impl FnMut(i32, InputAction) + 'static,
    ) -> bool {
        self.bind_button(DeviceIndex::KEYBOARD, key.id(), action, callback)
    }

    pub fn bind_mouse_button(
        &mut self,
        button: MouseButton,
        action: InputAction,
        callback: impl FnMut(i32, InputAction) + 'static,
    ) -> bool {
        self.bind_button(DeviceIndex::MOUSE, button.id(), action, callback)
    }

    pub fn bind_mouse_scroll(
        &mut self,
        axis: MouseScrollAxis,
        action: AxisAction,
        callback: impl FnMut(i32, AxisAction, f32) + 'static,
    ) -> bool {
        self.bind_axis(DeviceIndex::MOUSE, axis.id(), action, callback)
    }

    pub fn bind_gamepad_button(
        &mut self,
        gamepad: GamepadId,
        button: GamepadButton,
        action: InputAction,
        callback: impl FnMut(i32, InputAction) + 'static,
    ) -> bool {
        self.bind_button(gamepad.into(), button.id(), action, callback)
    }

    pub fn bind_gamepad_axis(
        &mut self,
        gamepad: GamepadId,
        axis: GamepadAxis,
        action: AxisAction,
        callback: impl FnMut(i32, AxisAction, f32) + 'static,
    ) -> bool {
        self.bind_axis(gamepad.into(), axis.id(), action, callback)
    }

    pub fn clear_key_binding(&mut self, key: Key) -> bool {
        self.clear_button_binding(DeviceIndex::KEYBOARD, key.id())
    }

    pub fn clear_mouse_button_binding(&mut self, button: MouseButton) -> bool {
        self.clear_button_binding(DeviceIndex::MOUSE, button.id())
    }

    pub fn clear_mouse_scroll_binding(&mut self, axis: MouseScrollAxis) -> bool {
        self.clear_axis_binding(DeviceIndex::MOUSE, axis.id())
    }

    pub fn clear_gamepad_button_binding(&mut self, gamepad: GamepadId, button: GamepadButton) -> bool {
        self.clear_button_binding(gamepad.into(), button.id())
    }

    pub fn clear_gamepad_axis_binding(&mut self, gamepad: GamepadId, axis: GamepadAxis) -> bool {
        self.clear_axis_binding(gamepad.into(), axis.id())
    }

    // ~~~ Driver-facing processing ~~~

    pub fn process_key_input(&mut self, sample: &RawSample) {
        self.process_button(DeviceIndex::KEYBOARD, sample);
    }

    pub fn process_mouse_button_input(&mut self, sample: &RawSample) {
        self.process_button(DeviceIndex::MOUSE, sample);
    }

    pub fn process_mouse_scroll_input(&mut self, sample: &RawSample) {
        self.process_axis(DeviceIndex::MOUSE, sample);
    }

    pub fn process_gamepad_button_input(&mut self, gamepad: GamepadId, sample: &RawSample) {
        self.process_button(gamepad.into(), sample);
    }

    pub fn process_gamepad_axis_input(&mut self, gamepad: GamepadId, sample: &RawSample) {
        self.process_axis(gamepad.into(), sample);
    }

    /// Routes one driver event to the matching processing step.
    pub fn handle_event(&mut self, event: DriverEvent) {
        match event {
            DriverEvent::Key(sample) => self.process_key_input(&sample),
            DriverEvent::MouseButton(sample) => self.process_mouse_button_input(&sample),
            DriverEvent::MouseScroll(sample) => self.process_mouse_scroll_input(&sample),
            DriverEvent::GamepadButton { gamepad, sample } => {
                self.process_gamepad_button_input(gamepad, &sample)
            }
            DriverEvent::GamepadAxis { gamepad, sample } => {
                self.process_gamepad_axis_input(gamepad, &sample)
            }
            DriverEvent::Connected { device, class } => self.device_connected(device, class),
            DriverEvent::Disconnected { device, class } => self.device_disconnected(device, class),
        }
    }

    fn process_button(&mut self, device: DeviceIndex, sample: &RawSample) {
        match self.buttons.get_or_create(device, sample.control) {
            Some(instance) => classify_button(instance, sample, &self.settings),
            None => debug!(
                "Dropped button sample for {}: control {} is outside the namespace",
                device, sample.control
            ),
        }
    }

    fn process_axis(&mut self, device: DeviceIndex, sample: &RawSample) {
        let kind = if device.class() == DeviceClass::Gamepad
            && GamepadAxis::is_trigger_id(sample.control)
        {
            AxisKind::Trigger
        } else {
            AxisKind::Thumbstick
        };

        match self.axes.get_or_create(device, sample.control) {
            Some(instance) => classify_axis(instance, sample, kind, &self.settings),
            None => debug!(
                "Dropped axis sample for {}: axis {} is outside the namespace",
                device, sample.control
            ),
        }
    }

    // ~~~ Connectivity ~~~

    pub fn device_connected(&mut self, device: DeviceIndex, class: DeviceClass) {
        self.connectivity.device_connected(device, class);
    }

    pub fn device_disconnected(&mut self, device: DeviceIndex, class: DeviceClass) {
        self.connectivity.device_disconnected(device, class);
    }

    /// Connection flag as last reported by the driver.
    pub fn is_device_connected(&self, device: DeviceIndex) -> bool {
        self.connectivity.is_connected(device)
    }

    // ~~~ Dispatch and inspection ~~~

    /// Fires every binding whose condition currently holds.
    pub fn execute_bindings(&mut self) -> DispatchReport {
        dispatch(&mut self.bindings, &mut self.buttons, &mut self.axes)
    }

    pub fn button_instance(&self, device: DeviceIndex, control: i32) -> Option<&InputInstance> {
        self.buttons.get(device, control)
    }

    pub fn axis_instance(&self, device: DeviceIndex, control: i32) -> Option<&InputInstance> {
        self.axes.get(device, control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::controls::ButtonState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key_sample(key: Key, state: ButtonState, timestamp: u64) -> RawSample {
        RawSample::button(key.id(), state, timestamp)
    }

    #[test]
    fn space_press_then_quick_release() {
        let mut router = InputRouter::default();
        let pressed = Rc::new(RefCell::new(0));
        let sink = pressed.clone();

        // tick 1
        router.process_key_input(&key_sample(Key::Space, ButtonState::Pressed, 1000));
        let instance = router.button_instance(DeviceIndex::KEYBOARD, Key::Space.id()).unwrap();
        assert_eq!(instance.cached_action, InputAction::Pressed);
        assert!(!instance.consumed);
        router.execute_bindings();

        router.bind_key(Key::Space, InputAction::Pressed, move |control, action| {
            assert_eq!(control, Key::Space.id());
            assert_eq!(action, InputAction::Pressed);
            *sink.borrow_mut() += 1;
        });

        // tick 2 and 3, no new samples
        assert_eq!(router.execute_bindings().buttons_fired, 1);
        assert_eq!(router.execute_bindings().buttons_fired, 0);
        assert_eq!(*pressed.borrow(), 1);

        let clicked = Rc::new(RefCell::new(0));
        let sink = clicked.clone();
        router.bind_key(Key::Space, InputAction::Clicked, move |_, _| {
            *sink.borrow_mut() += 1;
        });

        // tick 4
        router.process_key_input(&key_sample(Key::Space, ButtonState::Released, 1200));
        let instance = router.button_instance(DeviceIndex::KEYBOARD, Key::Space.id()).unwrap();
        assert_eq!(instance.cached_action, InputAction::Clicked);
        assert!(!instance.consumed);
        assert_eq!(router.execute_bindings().buttons_fired, 1);
        assert_eq!(*clicked.borrow(), 1);
        assert_eq!(*pressed.borrow(), 1);
    }

    #[test]
    fn rebinding_keeps_only_the_last_callback() {
        let mut router = InputRouter::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = log.clone();
        router.bind_mouse_button(MouseButton::LEFT, InputAction::Pressed, move |_, _| {
            first.borrow_mut().push("first")
        });
        let second = log.clone();
        router.bind_mouse_button(MouseButton::LEFT, InputAction::Pressed, move |_, _| {
            second.borrow_mut().push("second")
        });

        router.process_mouse_button_input(&RawSample::button(
            MouseButton::LEFT.id(),
            ButtonState::Pressed,
            10,
        ));
        router.execute_bindings();

        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn sentinel_bindings_never_fire() {
        let mut router = InputRouter::default();
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();

        assert!(!router.bind_key(Key::Max, InputAction::Pressed, move |_, _| {
            *sink.borrow_mut() += 1
        }));
        router.process_key_input(&RawSample::button(Key::MAX, ButtonState::Pressed, 0));
        assert!(router.button_instance(DeviceIndex::KEYBOARD, Key::MAX).is_none());
        assert_eq!(router.execute_bindings().total(), 0);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn invalid_samples_create_no_instance() {
        let mut router = InputRouter::default();
        let pad = GamepadId::GAMEPAD_1;

        router.process_gamepad_button_input(pad, &RawSample::button(-1, ButtonState::Pressed, 0));
        router.process_gamepad_button_input(
            pad,
            &RawSample::button(GamepadButton::MAX, ButtonState::Pressed, 0),
        );
        router.process_gamepad_axis_input(pad, &RawSample::axis(GamepadAxis::MAX, 1.0, 0));
        router.process_mouse_scroll_input(&RawSample::axis(MouseScrollAxis::MAX, 1.0, 0));

        assert!(router.button_instance(pad.into(), -1).is_none());
        assert!(router.axis_instance(pad.into(), GamepadAxis::MAX).is_none());
        assert!(router
            .axis_instance(DeviceIndex::MOUSE, MouseScrollAxis::MAX)
            .is_none());
    }

    #[test]
    fn trigger_axes_use_the_trigger_deadzone() {
        let mut router = InputRouter::default();
        let pad = GamepadId::GAMEPAD_1;
        let trigger = GamepadAxis::LeftTrigger.id();

        router.process_gamepad_axis_input(pad, &RawSample::axis(trigger, -0.96, 0));
        let instance = router.axis_instance(pad.into(), trigger).unwrap();
        assert_eq!(instance.cached_axis_action, AxisAction::Unknown);

        router.process_gamepad_axis_input(pad, &RawSample::axis(trigger, -0.95, 16));
        let instance = router.axis_instance(pad.into(), trigger).unwrap();
        assert_eq!(instance.cached_axis_action, AxisAction::Tilted);

        // the same value on a thumbstick is live by symmetry
        let stick = GamepadAxis::LeftX.id();
        router.process_gamepad_axis_input(pad, &RawSample::axis(stick, -0.96, 16));
        let instance = router.axis_instance(pad.into(), stick).unwrap();
        assert_eq!(instance.cached_axis_action, AxisAction::Tilted);
    }

    #[test]
    fn mouse_scroll_uses_the_thumbstick_rule() {
        let mut router = InputRouter::default();
        let scrolled = Rc::new(RefCell::new(Vec::new()));
        let sink = scrolled.clone();
        router.bind_mouse_scroll(MouseScrollAxis::Y, AxisAction::Tilted, move |axis, _, value| {
            sink.borrow_mut().push((axis, value))
        });

        router.process_mouse_scroll_input(&RawSample::axis(MouseScrollAxis::Y.id(), 0.2, 5));
        router.execute_bindings();
        router.process_mouse_scroll_input(&RawSample::axis(MouseScrollAxis::Y.id(), -1.0, 6));
        router.execute_bindings();

        assert_eq!(*scrolled.borrow(), vec![(1, -1.0)]);
    }

    #[test]
    fn handle_event_routes_connectivity() {
        let mut router = InputRouter::default();
        let pad: DeviceIndex = GamepadId::GAMEPAD_4.into();
        assert!(!router.is_device_connected(pad));

        router.handle_event(DriverEvent::Connected {
            device: pad,
            class: DeviceClass::Gamepad,
        });
        assert!(router.is_device_connected(pad));

        router.handle_event(DriverEvent::Disconnected {
            device: pad,
            class: DeviceClass::Gamepad,
        });
        assert!(!router.is_device_connected(pad));
    }

    #[test]
    fn cleared_gamepad_binding_stops_firing() {
        let mut router = InputRouter::default();
        let pad = GamepadId::GAMEPAD_2;
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        router.bind_gamepad_button(pad, GamepadButton::Start, InputAction::Pressed, move |_, _| {
            *sink.borrow_mut() += 1
        });
        assert!(router.clear_gamepad_button_binding(pad, GamepadButton::Start));

        router.process_gamepad_button_input(
            pad,
            &RawSample::button(GamepadButton::Start.id(), ButtonState::Pressed, 0),
        );
        router.execute_bindings();
        assert_eq!(*hits.borrow(), 0);
    }
}
