use auxinput::backend::{QueuedDriver, SampleFeed};
use auxinput::input::{
    AxisAction, ButtonState, Control, DeviceIndex, GamepadAxis, GamepadButton, GamepadId,
    InputAction, InputSubsystem, Key, MouseButton, MouseScrollAxis, Running, WindowSurface,
};
use std::cell::RefCell;
use std::rc::Rc;

struct TestWindow;

impl WindowSurface for TestWindow {
    fn is_open(&self) -> bool {
        true
    }

    fn process_events(&mut self) {}
}

fn running() -> (InputSubsystem<Running>, SampleFeed) {
    let (driver, feed) = QueuedDriver::new();
    let subsystem = InputSubsystem::create(None, Box::new(driver))
        .initialize(&TestWindow)
        .unwrap();
    (subsystem, feed)
}

type Log = Rc<RefCell<Vec<(i32, InputAction)>>>;

fn recorder(log: &Log) -> impl FnMut(i32, InputAction) + 'static {
    let log = log.clone();
    move |control, action| log.borrow_mut().push((control, action))
}

#[test]
fn space_press_hold_and_click() {
    let (mut subsystem, feed) = running();
    let space = Key::Space.id();

    // tick 1: press arrives before anything is bound
    feed.push_key(Key::Space, ButtonState::Pressed, 1000);
    assert_eq!(subsystem.tick(0.016).total(), 0);
    let instance = subsystem
        .router()
        .button_instance(DeviceIndex::KEYBOARD, space)
        .copied()
        .unwrap();
    assert_eq!(instance.cached_action, InputAction::Pressed);
    assert!(!instance.consumed);

    let pressed: Log = Default::default();
    let clicked: Log = Default::default();
    assert!(subsystem
        .router_mut()
        .bind_key(Key::Space, InputAction::Pressed, recorder(&pressed)));

    // tick 2: still held, binding fires once
    subsystem.tick(0.016);
    assert_eq!(*pressed.borrow(), vec![(space, InputAction::Pressed)]);
    assert!(
        subsystem
            .router()
            .button_instance(DeviceIndex::KEYBOARD, space)
            .unwrap()
            .consumed
    );

    // tick 3: nothing new, nothing fires
    assert_eq!(subsystem.tick(0.016).total(), 0);
    assert_eq!(pressed.borrow().len(), 1);

    // one binding per control, so the click handler takes over the slot
    assert!(subsystem
        .router_mut()
        .bind_key(Key::Space, InputAction::Clicked, recorder(&clicked)));

    // tick 4: release within the click window
    feed.push_key(Key::Space, ButtonState::Released, 1200);
    assert_eq!(subsystem.tick(0.016).buttons_fired, 1);
    assert_eq!(*clicked.borrow(), vec![(space, InputAction::Clicked)]);
    assert_eq!(pressed.borrow().len(), 1);
}

#[test]
fn held_button_fires_once_until_repressed() {
    let (mut subsystem, feed) = running();
    let pad = GamepadId::GAMEPAD_1;
    feed.connect_gamepad(pad);

    let log: Log = Default::default();
    subsystem.router_mut().bind_gamepad_button(
        pad,
        GamepadButton::Y,
        InputAction::Pressed,
        recorder(&log),
    );

    // a polling backend reports the unchanged state every frame
    for t in 0..5 {
        feed.push_gamepad_button(pad, GamepadButton::Y, ButtonState::Pressed, 100 + t * 16);
        subsystem.tick(0.016);
    }
    assert_eq!(log.borrow().len(), 1);

    feed.push_gamepad_button(pad, GamepadButton::Y, ButtonState::Released, 2000);
    subsystem.tick(0.016);
    feed.push_gamepad_button(pad, GamepadButton::Y, ButtonState::Pressed, 2100);
    subsystem.tick(0.016);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn slow_release_is_not_a_click() {
    let (mut subsystem, feed) = running();
    let released: Log = Default::default();
    subsystem.router_mut().bind_mouse_button(
        MouseButton::LEFT,
        InputAction::Released,
        recorder(&released),
    );

    feed.push_mouse_button(MouseButton::LEFT, ButtonState::Pressed, 0);
    subsystem.tick(0.016);
    feed.push_mouse_button(MouseButton::LEFT, ButtonState::Released, 500);
    subsystem.tick(0.016);

    assert_eq!(
        *released.borrow(),
        vec![(MouseButton::LEFT.id(), InputAction::Released)]
    );
    let instance = subsystem
        .router()
        .button_instance(DeviceIndex::MOUSE, MouseButton::LEFT.id())
        .unwrap();
    assert_eq!(instance.cached_action, InputAction::Released);
}

#[test]
fn rebinding_keeps_only_the_last_callback() {
    let (mut subsystem, feed) = running();
    let first: Log = Default::default();
    let second: Log = Default::default();
    let router = subsystem.router_mut();
    router.bind_key(Key::Enter, InputAction::Pressed, recorder(&first));
    router.bind_key(Key::Enter, InputAction::Pressed, recorder(&second));

    feed.push_key(Key::Enter, ButtonState::Pressed, 10);
    subsystem.tick(0.016);

    assert!(first.borrow().is_empty());
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn sentinel_controls_never_bind() {
    let (mut subsystem, feed) = running();
    let log: Log = Default::default();
    assert!(!subsystem.bind_button(
        DeviceIndex::KEYBOARD,
        Key::MAX,
        InputAction::Pressed,
        recorder(&log)
    ));
    assert!(!subsystem.bind_axis(
        GamepadId::GAMEPAD_1.into(),
        GamepadAxis::MAX,
        AxisAction::Tilted,
        |_, _, _| {}
    ));
    assert_eq!(subsystem.router().bindings().button_binding_count(), 0);
    assert_eq!(subsystem.router().bindings().axis_binding_count(), 0);

    feed.push_key(Key::Space, ButtonState::Pressed, 1);
    assert_eq!(subsystem.tick(0.016).total(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn thumbstick_and_trigger_deadzones() {
    let (mut subsystem, feed) = running();
    let pad = GamepadId::GAMEPAD_1;
    let values = Rc::new(RefCell::new(Vec::new()));

    for axis in [GamepadAxis::LeftX, GamepadAxis::LeftTrigger] {
        let values = values.clone();
        subsystem.router_mut().bind_gamepad_axis(
            pad,
            axis,
            AxisAction::Tilted,
            move |control, _, value| values.borrow_mut().push((control, value)),
        );
    }

    feed.push_gamepad_axis(pad, GamepadAxis::LeftX, 0.24999, 1);
    feed.push_gamepad_axis(pad, GamepadAxis::LeftTrigger, -0.96, 1);
    assert_eq!(subsystem.tick(0.016).axes_fired, 0);

    feed.push_gamepad_axis(pad, GamepadAxis::LeftX, -0.25, 2);
    feed.push_gamepad_axis(pad, GamepadAxis::LeftTrigger, -0.95, 2);
    assert_eq!(subsystem.tick(0.016).axes_fired, 2);

    assert_eq!(
        *values.borrow(),
        vec![
            (GamepadAxis::LeftX.id(), -0.25),
            (GamepadAxis::LeftTrigger.id(), -0.95)
        ]
    );
}

#[test]
fn live_axis_fires_on_every_sample() {
    let (mut subsystem, feed) = running();
    let fired = Rc::new(RefCell::new(0));
    let counter = fired.clone();
    subsystem.router_mut().bind_mouse_scroll(
        MouseScrollAxis::Y,
        AxisAction::Tilted,
        move |_, _, _| *counter.borrow_mut() += 1,
    );

    feed.push_scroll(0.0, 1.0, 1);
    subsystem.tick(0.016);
    // no new sample, stays consumed
    subsystem.tick(0.016);
    feed.push_scroll(0.0, -1.0, 2);
    subsystem.tick(0.016);

    assert_eq!(*fired.borrow(), 2);
}

#[test]
fn disconnect_is_reported_once() {
    let (mut subsystem, feed) = running();
    let pad = GamepadId::GAMEPAD_4;

    feed.connect_gamepad(pad);
    subsystem.tick(0.016);
    assert!(subsystem.is_device_connected(pad.into()));

    feed.disconnect_gamepad(pad);
    feed.disconnect_gamepad(pad);
    subsystem.tick(0.016);
    assert!(!subsystem.is_device_connected(pad.into()));
    assert!(subsystem.is_device_connected(DeviceIndex::MOUSE));
}
