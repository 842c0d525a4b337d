use crate::input::bindings::BindingRegistry;
use crate::input::controls::{AxisAction, InputAction};
use crate::input::device::DeviceIndex;
use crate::input::instance::InstanceTable;
use tracing::debug;

/// Callbacks fired by one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub buttons_fired: usize,
    pub axes_fired: usize,
}

impl DispatchReport {
    pub fn total(&self) -> usize {
        self.buttons_fired + self.axes_fired
    }
}

/// Fires every binding whose instance currently shows the required action and has not been
/// consumed yet, then marks that instance consumed.
///
/// Devices are walked in ascending index order and controls in ascending id order. Callers
/// must not rely on that order across different (device, control) pairs.
pub fn dispatch(
    registry: &mut BindingRegistry,
    buttons: &mut InstanceTable,
    axes: &mut InstanceTable,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for device in DeviceIndex::all() {
        for (control, binding) in registry.button_bindings_mut(device) {
            if binding.required_action == InputAction::Unknown {
                continue;
            }
            let Some(instance) = buttons.get_mut(device, control) else {
                continue;
            };
            if !instance.consumed && instance.cached_action == binding.required_action {
                debug!(
                    "Firing button binding {} control {} ({:?})",
                    device, control, binding.required_action
                );
                (binding.callback)(control, binding.required_action);
                instance.consumed = true;
                report.buttons_fired += 1;
            }
        }

        for (control, binding) in registry.axis_bindings_mut(device) {
            if binding.required_action == AxisAction::Unknown {
                continue;
            }
            let Some(instance) = axes.get_mut(device, control) else {
                continue;
            };
            if !instance.consumed && instance.cached_axis_action == binding.required_action {
                let value = instance.current_sample.value;
                debug!(
                    "Firing axis binding {} axis {} ({:?}, {:.4})",
                    device, control, binding.required_action, value
                );
                (binding.callback)(control, binding.required_action, value);
                instance.consumed = true;
                report.axes_fired += 1;
            }
        }
    }

    report
}
