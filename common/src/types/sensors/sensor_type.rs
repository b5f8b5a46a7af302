use std::fmt;

/// Represents the sensors taking part in an experiment.
///
/// # Variants
///
/// - `Accelerometer`: Represents an accelerometer sensor.
/// - `Gyroscope`: Represents a gyroscope sensor.
/// - `Magnetometer`: Represents a magnetometer sensor. It is only switched on and off
///   during a sweep; its readings are never recorded.
///
/// # Examples
///
/// ```
/// use common::types::sensors::SensorType;
///
/// let sensor = SensorType::Gyroscope;
/// assert_eq!(usize::from(sensor), 1);
///
/// let sensor = SensorType::try_from("Accelerometer").unwrap();
/// assert_eq!(sensor, SensorType::Accelerometer);
/// assert_eq!(sensor.record_prefix(), "ACC");
/// ```

pub const N_SENSORS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Hash, Eq)]
pub enum SensorType {
    Accelerometer,
    Gyroscope,
    Magnetometer,
}

impl SensorType {
    pub const ALL: [SensorType; N_SENSORS] = [
        SensorType::Accelerometer,
        SensorType::Gyroscope,
        SensorType::Magnetometer,
    ];

    /// Prefix of the record strings built from this sensor's readings.
    pub fn record_prefix(&self) -> &'static str {
        match self {
            SensorType::Accelerometer => "ACC",
            SensorType::Gyroscope => "GYRO",
            SensorType::Magnetometer => "MAG",
        }
    }
}

impl From<&SensorType> for usize {
    fn from(value: &SensorType) -> Self {
        match value {
            SensorType::Accelerometer => 0,
            SensorType::Gyroscope => 1,
            SensorType::Magnetometer => 2,
        }
    }
}

impl From<SensorType> for usize {
    fn from(value: SensorType) -> Self {
        usize::from(&value)
    }
}

impl TryFrom<&str> for SensorType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower_case_value = value.to_lowercase();
        if lower_case_value.contains("acc") {
            Ok(Self::Accelerometer)
        } else if lower_case_value.contains("gyr") {
            Ok(Self::Gyroscope)
        } else if lower_case_value.contains("mag") {
            Ok(Self::Magnetometer)
        } else {
            Err(format!("Unknown sensor type {}", value))
        }
    }
}

impl TryFrom<String> for SensorType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SensorType::try_from(value.as_str())
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorType::Accelerometer => "accelerometer",
            SensorType::Gyroscope => "gyroscope",
            SensorType::Magnetometer => "magnetometer",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_usize() {
        assert_eq!(usize::from(SensorType::Accelerometer), 0);
        assert_eq!(usize::from(SensorType::Gyroscope), 1);
        assert_eq!(usize::from(SensorType::Magnetometer), 2);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            SensorType::try_from("accelerometer").unwrap(),
            SensorType::Accelerometer
        );
        assert_eq!(
            SensorType::try_from("gyroscope").unwrap(),
            SensorType::Gyroscope
        );
        assert_eq!(
            SensorType::try_from("magnetometer").unwrap(),
            SensorType::Magnetometer
        );
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            SensorType::try_from("ACCEleroMeter").unwrap(),
            SensorType::Accelerometer
        );
        assert_eq!(
            SensorType::try_from("gyrosCOPE").unwrap(),
            SensorType::Gyroscope
        );
        assert_eq!(
            SensorType::try_from("magneTometer").unwrap(),
            SensorType::Magnetometer
        );
    }

    #[test]
    fn test_from_str_partial_match() {
        assert_eq!(SensorType::try_from("acC").unwrap(), SensorType::Accelerometer);
        assert_eq!(SensorType::try_from("GyR").unwrap(), SensorType::Gyroscope);
        assert_eq!(SensorType::try_from("Mag").unwrap(), SensorType::Magnetometer);
    }

    #[test]
    fn test_from_unknown_str() {
        assert!(SensorType::try_from("barometer").is_err());
    }

    #[test]
    fn test_record_prefix() {
        assert_eq!(SensorType::Accelerometer.record_prefix(), "ACC");
        assert_eq!(SensorType::Gyroscope.record_prefix(), "GYRO");
        assert_eq!(SensorType::Magnetometer.record_prefix(), "MAG");
    }
}
