use crate::input::device::{DeviceClass, DeviceIndex, MAX_INPUT_DEVICE_COUNT};
use chrono::Local;
use tracing::{debug, info};

/// Hooks fired when a device changes connection state.
pub trait ConnectionObserver {
    fn on_device_connected(&mut self, device: DeviceIndex, class: DeviceClass);
    fn on_device_disconnected(&mut self, device: DeviceIndex, class: DeviceClass);
}

/// Default observer, logs every transition.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl ConnectionObserver for LoggingObserver {
    fn on_device_connected(&mut self, device: DeviceIndex, class: DeviceClass) {
        info!(
            "{} connected, id = {} at {}",
            class,
            device.as_usize(),
            Local::now().format("%H:%M:%S.%3f")
        );
    }

    fn on_device_disconnected(&mut self, device: DeviceIndex, class: DeviceClass) {
        info!(
            "{} disconnected, id = {} at {}",
            class,
            device.as_usize(),
            Local::now().format("%H:%M:%S.%3f")
        );
    }
}

/// Connection flag per device index.
///
/// Keyboard and mouse start connected; gamepads start disconnected until the driver reports
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityTable {
    connected: [bool; MAX_INPUT_DEVICE_COUNT],
}

impl Default for ConnectivityTable {
    fn default() -> Self {
        let mut connected = [false; MAX_INPUT_DEVICE_COUNT];
        connected[DeviceIndex::KEYBOARD.as_usize()] = true;
        connected[DeviceIndex::MOUSE.as_usize()] = true;
        Self { connected }
    }
}

impl ConnectivityTable {
    pub fn is_connected(&self, device: DeviceIndex) -> bool {
        self.connected[device.as_usize()]
    }

    /// Returns `true` if the flag flipped.
    pub fn set_connected(&mut self, device: DeviceIndex, connected: bool) -> bool {
        let slot = &mut self.connected[device.as_usize()];
        if *slot == connected {
            return false;
        }
        *slot = connected;
        true
    }

    pub fn connected_devices(&self) -> impl Iterator<Item = DeviceIndex> + '_ {
        DeviceIndex::all().filter(|device| self.is_connected(*device))
    }
}

/// Connectivity table plus the observer notified on transitions.
pub struct ConnectivityTracker {
    table: ConnectivityTable,
    observer: Box<dyn ConnectionObserver>,
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self::new(Box::new(LoggingObserver))
    }
}

impl ConnectivityTracker {
    pub fn new(observer: Box<dyn ConnectionObserver>) -> Self {
        Self {
            table: ConnectivityTable::default(),
            observer,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn ConnectionObserver>) {
        self.observer = observer;
    }

    pub fn table(&self) -> &ConnectivityTable {
        &self.table
    }

    pub fn is_connected(&self, device: DeviceIndex) -> bool {
        self.table.is_connected(device)
    }

    pub fn device_connected(&mut self, device: DeviceIndex, class: DeviceClass) {
        if self.table.set_connected(device, true) {
            self.observer.on_device_connected(device, class);
        } else {
            debug!("Ignoring connect for already connected {}", device);
        }
    }

    pub fn device_disconnected(&mut self, device: DeviceIndex, class: DeviceClass) {
        if self.table.set_connected(device, false) {
            self.observer.on_device_disconnected(device, class);
        } else {
            debug!("Ignoring disconnect for already disconnected {}", device);
        }
    }
}
