use crate::types::sensors::SensorType;

/// Description of the default sensor of a given type, as reported by a sensor source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensorInfo {
    sensor_type: SensorType,
    name: String,
    min_delay_us: u32,
}

impl SensorInfo {
    pub fn new(sensor_type: SensorType, name: &str, min_delay_us: u32) -> Self {
        Self {
            sensor_type,
            name: name.to_string(),
            min_delay_us,
        }
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum delay between two events in microseconds. Zero means the sensor
    /// only reports on change.
    pub fn min_delay_us(&self) -> u32 {
        self.min_delay_us
    }

    /// Highest sampling frequency in Hz, or `None` for on-change sensors.
    pub fn max_frequency_hz(&self) -> Option<f64> {
        if self.min_delay_us == 0 {
            return None;
        }
        Some(1e6 / self.min_delay_us as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_frequency() {
        let info = SensorInfo::new(SensorType::Magnetometer, "mag", 10_000);
        assert_eq!(info.max_frequency_hz(), Some(100.0));
    }

    #[test]
    fn test_max_frequency_on_change_sensor() {
        let info = SensorInfo::new(SensorType::Magnetometer, "mag", 0);
        assert_eq!(info.max_frequency_hz(), None);
    }
}
