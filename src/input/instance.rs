//! Input instance tracking
//!
//! One [`InputInstance`] exists per tracked (device, control) pair. Buttons and axes live in
//! separate [`InstanceTable`]s. Each table reserves one slot per control the device class can
//! expose, so classification never allocates; a slot stays empty until its first sample.

use crate::input::controls::{axis_capacity, button_capacity, AxisAction, InputAction};
use crate::input::device::{DeviceClass, DeviceIndex, MAX_INPUT_DEVICE_COUNT};
use crate::input::sample::RawSample;

/// Tracked state of a single button or axis on a single device.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputInstance {
    pub previous_sample: RawSample,
    pub current_sample: RawSample,

    /// Action a button binding is matched against.
    pub cached_action: InputAction,

    /// Action an axis binding is matched against.
    pub cached_axis_action: AxisAction,

    /// Set once the dispatcher fired for the current cached action.
    pub consumed: bool,
}

/// Which control namespace a table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Buttons,
    Axes,
}

impl Namespace {
    pub fn capacity(self, class: DeviceClass) -> usize {
        match self {
            Namespace::Buttons => button_capacity(class),
            Namespace::Axes => axis_capacity(class),
        }
    }
}

/// Fixed-size per-device storage of input instances for one namespace.
#[derive(Debug, Clone)]
pub struct InstanceTable {
    namespace: Namespace,
    devices: [Box<[Option<InputInstance>]>; MAX_INPUT_DEVICE_COUNT],
}

impl InstanceTable {
    pub fn new(namespace: Namespace) -> Self {
        let devices = std::array::from_fn(|raw| {
            let capacity = DeviceIndex::from_raw(raw)
                .map(|device| namespace.capacity(device.class()))
                .unwrap_or(0);
            vec![None; capacity].into_boxed_slice()
        });

        Self { namespace, devices }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Number of controls `device` can expose in this namespace.
    pub fn capacity(&self, device: DeviceIndex) -> usize {
        self.devices[device.as_usize()].len()
    }

    pub fn contains_control(&self, device: DeviceIndex, control: i32) -> bool {
        control >= 0 && (control as usize) < self.capacity(device)
    }

    pub fn get(&self, device: DeviceIndex, control: i32) -> Option<&InputInstance> {
        if !self.contains_control(device, control) {
            return None;
        }
        self.devices[device.as_usize()][control as usize].as_ref()
    }

    pub fn get_mut(&mut self, device: DeviceIndex, control: i32) -> Option<&mut InputInstance> {
        if !self.contains_control(device, control) {
            return None;
        }
        self.devices[device.as_usize()][control as usize].as_mut()
    }

    /// Returns the instance for `(device, control)`, creating a default one on first use.
    /// `None` only for controls outside the namespace.
    pub fn get_or_create(
        &mut self,
        device: DeviceIndex,
        control: i32,
    ) -> Option<&mut InputInstance> {
        if !self.contains_control(device, control) {
            return None;
        }
        let slot = &mut self.devices[device.as_usize()][control as usize];
        Some(slot.get_or_insert_with(InputInstance::default))
    }

    /// Number of instances created so far.
    pub fn tracked_count(&self) -> usize {
        self.devices
            .iter()
            .map(|slots| slots.iter().filter(|slot| slot.is_some()).count())
            .sum()
    }
}
