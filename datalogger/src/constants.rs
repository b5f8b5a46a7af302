/// Upload endpoint
pub(crate) const DEFAULT_BASE_URL: &str = "http://139.59.65.232";
pub(crate) const DEFAULT_UPLOAD_PATH: &str = "sensorData";
pub(crate) const API_KEY_HEADER: &str = "X-API-Key";

/// Sweep defaults
pub(crate) const DEFAULT_FREQUENCIES_HZ: [u32; 3] = [200, 173, 139];
pub(crate) const DEFAULT_MAGNETOMETER_STATES: [bool; 2] = [true, false];
pub(crate) const DEFAULT_CELL_DURATION_MS: u64 = 2500;
pub(crate) const DEFAULT_UPDATE_INTERVAL_MS: u64 = 50;
pub(crate) const DEFAULT_GYROSCOPE_STAGGER_MS: u64 = 2;
pub(crate) const DEFAULT_MAGNETOMETER_SAMPLING_PERIOD_US: u32 = 5001;

/// Environment variables read by `DataLoggerConfig::from_env`
pub(crate) const ENV_CONFIG_PATH: &str = "DATALOGGER_CONFIG";
pub(crate) const ENV_API_KEY: &str = "DATALOGGER_API_KEY";
pub(crate) const ENV_BASE_URL: &str = "DATALOGGER_BASE_URL";

pub(crate) const CONNECTIVITY_TIMEOUT_MS: u64 = 3000;
pub(crate) const UNKNOWN: &str = "unknown";
