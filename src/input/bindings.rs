//! Binding registry
//!
//! At most one binding exists per (device, control) in each namespace. Binding again
//! replaces the previous callback; clearing removes it. Invalid binds are dropped with a
//! debug diagnostic instead of an error.

use crate::input::controls::{AxisAction, InputAction};
use crate::input::device::{DeviceIndex, MAX_INPUT_DEVICE_COUNT};
use crate::input::instance::Namespace;
use std::fmt;
use tracing::debug;

pub type ButtonCallback = Box<dyn FnMut(i32, InputAction)>;
pub type AxisCallback = Box<dyn FnMut(i32, AxisAction, f32)>;

pub struct ButtonBinding {
    pub callback: ButtonCallback,
    pub required_action: InputAction,
}

impl fmt::Debug for ButtonBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonBinding")
            .field("required_action", &self.required_action)
            .finish_non_exhaustive()
    }
}

pub struct AxisBinding {
    pub callback: AxisCallback,
    pub required_action: AxisAction,
}

impl fmt::Debug for AxisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisBinding")
            .field("required_action", &self.required_action)
            .finish_non_exhaustive()
    }
}

type Slots<T> = [Box<[Option<T>]>; MAX_INPUT_DEVICE_COUNT];

fn empty_slots<T>(namespace: Namespace) -> Slots<T> {
    std::array::from_fn(|raw| {
        let capacity = DeviceIndex::from_raw(raw)
            .map(|device| namespace.capacity(device.class()))
            .unwrap_or(0);
        std::iter::repeat_with(|| None).take(capacity).collect()
    })
}

fn slot_mut<T>(slots: &mut Slots<T>, device: DeviceIndex, control: i32) -> Option<&mut Option<T>> {
    let index = usize::try_from(control).ok()?;
    slots[device.as_usize()].get_mut(index)
}

/// Per-device button and axis bindings.
#[derive(Debug)]
pub struct BindingRegistry {
    buttons: Slots<ButtonBinding>,
    axes: Slots<AxisBinding>,
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self {
            buttons: empty_slots(Namespace::Buttons),
            axes: empty_slots(Namespace::Axes),
        }
    }

    /// Returns `false` when the bind was rejected.
    pub fn bind_button(
        &mut self,
        device: DeviceIndex,
        control: i32,
        required_action: InputAction,
        callback: ButtonCallback,
    ) -> bool {
        if required_action == InputAction::Unknown {
            debug!(
                "Rejected button binding on {} control {}: required action is Unknown",
                device, control
            );
            return false;
        }

        match slot_mut(&mut self.buttons, device, control) {
            Some(slot) => {
                if slot.is_some() {
                    debug!("Replacing button binding on {} control {}", device, control);
                }
                *slot = Some(ButtonBinding {
                    callback,
                    required_action,
                });
                true
            }
            None => {
                debug!(
                    "Rejected button binding on {}: control {} is outside the namespace",
                    device, control
                );
                false
            }
        }
    }

    /// Returns `true` when a binding was removed.
    pub fn clear_button(&mut self, device: DeviceIndex, control: i32) -> bool {
        slot_mut(&mut self.buttons, device, control)
            .and_then(Option::take)
            .is_some()
    }

    pub fn bind_axis(
        &mut self,
        device: DeviceIndex,
        control: i32,
        required_action: AxisAction,
        callback: AxisCallback,
    ) -> bool {
        if required_action == AxisAction::Unknown {
            debug!(
                "Rejected axis binding on {} axis {}: required action is Unknown",
                device, control
            );
            return false;
        }

        match slot_mut(&mut self.axes, device, control) {
            Some(slot) => {
                if slot.is_some() {
                    debug!("Replacing axis binding on {} axis {}", device, control);
                }
                *slot = Some(AxisBinding {
                    callback,
                    required_action,
                });
                true
            }
            None => {
                debug!(
                    "Rejected axis binding on {}: axis {} is outside the namespace",
                    device, control
                );
                false
            }
        }
    }

    pub fn clear_axis(&mut self, device: DeviceIndex, control: i32) -> bool {
        slot_mut(&mut self.axes, device, control)
            .and_then(Option::take)
            .is_some()
    }

    pub fn has_button_binding(&self, device: DeviceIndex, control: i32) -> bool {
        self.button_binding(device, control).is_some()
    }

    pub fn has_axis_binding(&self, device: DeviceIndex, control: i32) -> bool {
        self.axis_binding(device, control).is_some()
    }

    pub fn button_binding(&self, device: DeviceIndex, control: i32) -> Option<&ButtonBinding> {
        let index = usize::try_from(control).ok()?;
        self.buttons[device.as_usize()].get(index)?.as_ref()
    }

    pub fn axis_binding(&self, device: DeviceIndex, control: i32) -> Option<&AxisBinding> {
        let index = usize::try_from(control).ok()?;
        self.axes[device.as_usize()].get(index)?.as_ref()
    }

    pub fn button_binding_count(&self) -> usize {
        self.buttons
            .iter()
            .map(|slots| slots.iter().flatten().count())
            .sum()
    }

    pub fn axis_binding_count(&self) -> usize {
        self.axes.iter().map(|slots| slots.iter().flatten().count()).sum()
    }

    /// Bound buttons of `device` as `(control, binding)`, ascending by control.
    pub(crate) fn button_bindings_mut(
        &mut self,
        device: DeviceIndex,
    ) -> impl Iterator<Item = (i32, &mut ButtonBinding)> {
        self.buttons[device.as_usize()]
            .iter_mut()
            .enumerate()
            .filter_map(|(control, slot)| slot.as_mut().map(|binding| (control as i32, binding)))
    }

    pub(crate) fn axis_bindings_mut(
        &mut self,
        device: DeviceIndex,
    ) -> impl Iterator<Item = (i32, &mut AxisBinding)> {
        self.axes[device.as_usize()]
            .iter_mut()
            .enumerate()
            .filter_map(|(control, slot)| slot.as_mut().map(|binding| (control as i32, binding)))
    }
}
