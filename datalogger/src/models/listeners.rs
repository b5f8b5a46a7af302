//! Sensor listeners registered during a sweep. A recording listener is created for a single
//! registration and only records under the key of the cell it was registered for.

use chrono::Local;
use std::sync::Arc;

use common::traits::SensorListener;
use common::types::{ExperimentKey, Reading, SensorEvent, SensorType};

use crate::models::accumulator::Accumulator;

fn record(
    accumulator: &Accumulator,
    key: ExperimentKey,
    expected: SensorType,
    event: &SensorEvent,
) {
    if event.sensor_type() != expected {
        return;
    }
    let reading = Reading::from_event(event, Local::now());
    if !accumulator.append(key, reading) {
        log::trace!(
            "Dropped {} event for {} outside its recording window",
            expected,
            key
        );
    }
}

/// Records accelerometer events in the accumulator.
pub struct AccelerometerListener {
    accumulator: Arc<Accumulator>,
    key: ExperimentKey,
}

impl AccelerometerListener {
    pub fn new(accumulator: Arc<Accumulator>, key: ExperimentKey) -> Self {
        Self { accumulator, key }
    }
}

impl SensorListener for AccelerometerListener {
    fn on_event(&self, event: &SensorEvent) {
        record(&self.accumulator, self.key, SensorType::Accelerometer, event);
    }
}

/// Records gyroscope events in the accumulator.
pub struct GyroscopeListener {
    accumulator: Arc<Accumulator>,
    key: ExperimentKey,
}

impl GyroscopeListener {
    pub fn new(accumulator: Arc<Accumulator>, key: ExperimentKey) -> Self {
        Self { accumulator, key }
    }
}

impl SensorListener for GyroscopeListener {
    fn on_event(&self, event: &SensorEvent) {
        record(&self.accumulator, self.key, SensorType::Gyroscope, event);
    }
}

/// Keeps the magnetometer powered during a cell. Its events are ignored.
#[derive(Default)]
pub struct MagnetometerListener;

impl SensorListener for MagnetometerListener {
    fn on_event(&self, _event: &SensorEvent) {}
}
