use std::sync::Arc;
use uuid::Uuid;

use crate::traits::listener::SensorListener;
use crate::types::sensors::{SensorInfo, SensorType};

/// Subscription interface of the sensor subsystem.
pub trait SensorSource: Send + Sync {
    /// Returns the default sensor of the given type, or `None` if the device has none.
    fn default_sensor(&self, sensor_type: SensorType) -> Option<SensorInfo>;

    /// Registers a listener for events of `sensor_type`, requesting one event every
    /// `sampling_period_us` microseconds. Returns the id of the registration.
    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor_type: SensorType,
        sampling_period_us: u32,
    ) -> Result<Uuid, String>;

    /// Removes a registration. An event already being dispatched when this is called
    /// may still reach the listener.
    fn unregister_listener(&self, id: Uuid) -> Result<(), String>;
}
