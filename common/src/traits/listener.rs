use crate::types::sensors::{SensorEvent, SensorType};

/// Capability of receiving events from a sensor subscription.
pub trait SensorListener: Send + Sync {
    /// Called for every event delivered while the listener is registered.
    fn on_event(&self, event: &SensorEvent);

    /// Called when the reported accuracy of a sensor changes.
    fn on_accuracy_changed(&self, _sensor_type: SensorType, _accuracy: i32) {}
}
