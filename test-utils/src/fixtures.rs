use common::types::{SensorEvent, SensorType, XYZ};

pub fn accelerometer_event(timestamp_ns: i64) -> SensorEvent {
    SensorEvent::new(
        SensorType::Accelerometer,
        timestamp_ns,
        XYZ::new([0.1, -0.2, 9.81]),
    )
}

pub fn gyroscope_event(timestamp_ns: i64) -> SensorEvent {
    SensorEvent::new(
        SensorType::Gyroscope,
        timestamp_ns,
        XYZ::new([0.01, 0.02, -0.03]),
    )
}

pub fn magnetometer_event(timestamp_ns: i64) -> SensorEvent {
    SensorEvent::new(
        SensorType::Magnetometer,
        timestamp_ns,
        XYZ::new([21.5, -4.0, 40.25]),
    )
}

/// Event of the given sensor with fixed measurement values.
pub fn event(sensor_type: SensorType, timestamp_ns: i64) -> SensorEvent {
    match sensor_type {
        SensorType::Accelerometer => accelerometer_event(timestamp_ns),
        SensorType::Gyroscope => gyroscope_event(timestamp_ns),
        SensorType::Magnetometer => magnetometer_event(timestamp_ns),
    }
}
