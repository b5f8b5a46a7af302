use crate::types::sensors::SensorType;
use crate::types::untimed::XYZ;

/// Raw sample delivered by a sensor source to its registered listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorEvent {
    sensor_type: SensorType,
    timestamp_ns: i64,
    values: XYZ,
}

impl SensorEvent {
    /// Creates an event from the sensor that produced it, the sensor clock in nanoseconds
    /// and the three-axis measurement.
    pub fn new(sensor_type: SensorType, timestamp_ns: i64, values: XYZ) -> Self {
        Self {
            sensor_type,
            timestamp_ns,
            values,
        }
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn timestamp_ns(&self) -> i64 {
        self.timestamp_ns
    }

    pub fn values(&self) -> XYZ {
        self.values
    }
}
