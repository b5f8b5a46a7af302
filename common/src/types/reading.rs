use chrono::{DateTime, Local};
use std::fmt;

use crate::types::sensors::{SensorEvent, SensorType};
use crate::types::untimed::XYZ;

/// Wall clock format of a record: date and time separated by a comma.
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d,%H:%M:%S";

/// One timestamped three-axis sample, rendered as a comma separated record:
/// `<kind>,<yyyy-MM-dd>,<HH:mm:ss>,<sensor timestamp>,<x>,<y>,<z>`.
///
/// # Examples
///
/// ```
/// use chrono::{Local, TimeZone};
/// use common::types::{Reading, SensorType, XYZ};
///
/// let wall_clock = Local.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap();
/// let reading = Reading::new(SensorType::Gyroscope, wall_clock, 42, XYZ::new([0.5, 1.0, -2.25]));
/// assert_eq!(reading.to_string(), "GYRO,2024-03-01,10:15:30,42,0.5,1.0,-2.25");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    sensor_type: SensorType,
    wall_clock: DateTime<Local>,
    sensor_timestamp_ns: i64,
    measurement: XYZ,
}

impl Reading {
    pub fn new(
        sensor_type: SensorType,
        wall_clock: DateTime<Local>,
        sensor_timestamp_ns: i64,
        measurement: XYZ,
    ) -> Self {
        Self {
            sensor_type,
            wall_clock,
            sensor_timestamp_ns,
            measurement,
        }
    }

    /// Stamps a sensor event with the wall clock time it was received at.
    pub fn from_event(event: &SensorEvent, wall_clock: DateTime<Local>) -> Self {
        Self::new(
            event.sensor_type(),
            wall_clock,
            event.timestamp_ns(),
            event.values(),
        )
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn wall_clock(&self) -> DateTime<Local> {
        self.wall_clock
    }

    pub fn sensor_timestamp_ns(&self) -> i64 {
        self.sensor_timestamp_ns
    }

    pub fn measurement(&self) -> XYZ {
        self.measurement
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.sensor_type.record_prefix(),
            self.wall_clock.format(WALL_CLOCK_FORMAT),
            self.sensor_timestamp_ns,
            self.measurement
        )
    }
}
