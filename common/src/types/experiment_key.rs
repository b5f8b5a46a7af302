use std::fmt;

/// Label of one sweep cell: the sampling frequency in Hz and whether the
/// magnetometer was switched on.
///
/// # Examples
///
/// ```
/// use common::types::ExperimentKey;
///
/// assert_eq!(ExperimentKey::new(200, true).to_string(), "200-On");
/// assert_eq!(ExperimentKey::new(139, false).to_string(), "139-Off");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExperimentKey {
    frequency_hz: u32,
    magnetometer_enabled: bool,
}

impl ExperimentKey {
    pub fn new(frequency_hz: u32, magnetometer_enabled: bool) -> Self {
        Self {
            frequency_hz,
            magnetometer_enabled,
        }
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn magnetometer_enabled(&self) -> bool {
        self.magnetometer_enabled
    }
}

impl fmt::Display for ExperimentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.magnetometer_enabled { "On" } else { "Off" };
        write!(f, "{}-{}", self.frequency_hz, state)
    }
}
