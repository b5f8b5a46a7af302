//! In-memory store of the readings recorded during a sweep.
//!
//! Readings are only accepted while the recording window of their sensor is open for the cell
//! whose registration delivered them. The driver opens the window with the key of the active cell
//! right before registering the sensor's listener and closes it right after unregistering, so an
//! event that slips in before a registration, after it, or while the next cell is already running
//! never lands in the data. Windows and data share one lock.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use common::types::{ExperimentKey, Reading, SensorType};

/// Number of sensors whose readings are recorded: accelerometer and gyroscope.
const N_RECORDED: usize = 2;

/// Rendered readings, keyed by the rendered experiment key.
pub type RecordMap = HashMap<String, Vec<String>>;

/// Snapshot of the accumulator in upload form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedData {
    pub accelerometer: RecordMap,
    pub gyroscope: RecordMap,
}

#[derive(Default)]
struct Recording {
    windows: [Option<ExperimentKey>; N_RECORDED],
    readings: [HashMap<ExperimentKey, Vec<Reading>>; N_RECORDED],
}

#[derive(Default)]
pub struct Accumulator {
    inner: Mutex<Recording>,
}

fn slot(sensor_type: SensorType) -> Option<usize> {
    match sensor_type {
        SensorType::Accelerometer | SensorType::Gyroscope => Some(usize::from(sensor_type)),
        SensorType::Magnetometer => None,
    }
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        // A panicking listener must not stop the recording
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Starts accepting readings of `sensor_type`, labelled with `key`.
    pub fn open_window(&self, sensor_type: SensorType, key: ExperimentKey) {
        if let Some(idx) = slot(sensor_type) {
            self.lock().windows[idx] = Some(key);
        }
    }

    /// Stops accepting readings of `sensor_type`.
    pub fn close_window(&self, sensor_type: SensorType) {
        if let Some(idx) = slot(sensor_type) {
            self.lock().windows[idx] = None;
        }
    }

    /// Key readings of `sensor_type` are currently recorded under, if any.
    pub fn active_key(&self, sensor_type: SensorType) -> Option<ExperimentKey> {
        slot(sensor_type).and_then(|idx| self.lock().windows[idx])
    }

    /// Appends a reading delivered by the registration made for `key`.
    /// Returns false if the reading was dropped because the window of its sensor is closed or
    /// belongs to another cell.
    pub fn append(&self, key: ExperimentKey, reading: Reading) -> bool {
        let Some(idx) = slot(reading.sensor_type()) else {
            return false;
        };
        let mut recording = self.lock();
        if recording.windows[idx] != Some(key) {
            return false;
        }
        recording.readings[idx].entry(key).or_default().push(reading);
        true
    }

    /// Drops every reading and closes all windows.
    pub fn clear(&self) {
        let mut recording = self.lock();
        *recording = Recording::default();
    }

    /// Keys with at least one reading of `sensor_type`, in sweep key order.
    pub fn keys(&self, sensor_type: SensorType) -> Vec<ExperimentKey> {
        let Some(idx) = slot(sensor_type) else {
            return vec![];
        };
        let mut keys: Vec<ExperimentKey> = self.lock().readings[idx].keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn readings(&self, sensor_type: SensorType, key: &ExperimentKey) -> Vec<Reading> {
        slot(sensor_type)
            .and_then(|idx| self.lock().readings[idx].get(key).cloned())
            .unwrap_or_default()
    }

    /// Total number of readings of `sensor_type`.
    pub fn len(&self, sensor_type: SensorType) -> usize {
        slot(sensor_type).map_or(0, |idx| {
            self.lock().readings[idx].values().map(Vec::len).sum()
        })
    }

    /// Number of readings of `sensor_type` recorded under `key`.
    pub fn count(&self, sensor_type: SensorType, key: &ExperimentKey) -> usize {
        slot(sensor_type).map_or(0, |idx| {
            self.lock().readings[idx].get(key).map_or(0, Vec::len)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lock().readings.iter().all(HashMap::is_empty)
    }

    /// Renders every reading into its record string.
    pub fn export(&self) -> RecordedData {
        let recording = self.lock();
        let render = |readings: &HashMap<ExperimentKey, Vec<Reading>>| -> RecordMap {
            readings
                .iter()
                .map(|(key, readings)| {
                    (
                        key.to_string(),
                        readings.iter().map(Reading::to_string).collect(),
                    )
                })
                .collect()
        };
        RecordedData {
            accelerometer: render(&recording.readings[usize::from(SensorType::Accelerometer)]),
            gyroscope: render(&recording.readings[usize::from(SensorType::Gyroscope)]),
        }
    }
}
