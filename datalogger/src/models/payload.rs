use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use common::types::SensorInfo;

use crate::helpers;
use crate::models::accumulator::{RecordMap, RecordedData};
use crate::models::config::DeviceConfig;

/// Extra device information sent with the readings, for later analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceMetadata(BTreeMap<String, String>);

impl DeviceMetadata {
    /// Collects the metadata of the device. `MAG_MAX_FREQ` is derived from the magnetometer's
    /// minimum delay.
    pub fn collect(device: &DeviceConfig, magnetometer: &SensorInfo) -> Self {
        let entries = [
            ("SDK_INT", device.sdk_int.clone()),
            ("RELEASE", device.release.clone()),
            ("BOARD", device.board.clone()),
            ("BRAND", device.brand.clone()),
            ("HARDWARE", device.hardware.clone()),
            ("PRODUCT", device.product.clone()),
            (
                "MAG_MAX_FREQ",
                helpers::format_frequency(magnetometer.max_frequency_hz()),
            ),
            ("BOOTLOADER", device.bootloader.clone()),
        ];
        Self(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of the upload request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub accelerometer: RecordMap,
    pub gyroscope: RecordMap,
    pub device_name: String,
    pub manufacturer: String,
    pub model: String,
    pub metadata: DeviceMetadata,
}

impl UploadPayload {
    pub fn new(recorded: RecordedData, device: &DeviceConfig, metadata: DeviceMetadata) -> Self {
        Self {
            accelerometer: recorded.accelerometer,
            gyroscope: recorded.gyroscope,
            device_name: device.device_name.clone(),
            manufacturer: device.manufacturer.clone(),
            model: device.model.clone(),
            metadata,
        }
    }

    /// Number of records for both sensors.
    pub fn record_count(&self) -> usize {
        self.accelerometer
            .values()
            .chain(self.gyroscope.values())
            .map(Vec::len)
            .sum()
    }
}
