use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::*;
use crate::models::errors::DataLoggerError;
use crate::models::scheduler::SweepPlan;

/// Configuration of an experiment: where to upload, what to sweep and how the device
/// identifies itself.
///
/// Every section falls back to its defaults when missing from the TOML file.
///
/// ```
/// use datalogger::DataLoggerConfig;
///
/// let config = DataLoggerConfig::from_toml_str(r#"
///     [upload]
///     api_key = "secret"
///
///     [sweep]
///     frequencies = [100, 50]
/// "#).unwrap();
///
/// assert_eq!(config.upload.api_key, "secret");
/// assert_eq!(config.sweep.frequencies, vec![100, 50]);
/// assert_eq!(config.sweep.magnetometer_states, vec![true, false]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLoggerConfig {
    pub upload: UploadConfig,
    pub sweep: SweepConfig,
    pub device: DeviceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub base_url: String,
    pub path: String,
    /// Shared key sent in the `X-API-Key` header. There is no built-in value; it comes from the
    /// configuration file or `DATALOGGER_API_KEY`.
    pub api_key: String,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub frequencies: Vec<u32>,
    pub magnetometer_states: Vec<bool>,
    pub cell_duration_ms: u64,
    pub update_interval_ms: u64,
    /// Delay between accelerometer and gyroscope registration within a cell.
    pub gyroscope_stagger_ms: u64,
    pub magnetometer_sampling_period_us: u32,
}

/// Identity reported with the upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub device_name: String,
    pub manufacturer: String,
    pub model: String,
    pub sdk_int: String,
    pub release: String,
    pub board: String,
    pub brand: String,
    pub hardware: String,
    pub product: String,
    pub bootloader: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            path: DEFAULT_UPLOAD_PATH.to_string(),
            api_key: String::new(),
            request_timeout_secs: None,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            frequencies: DEFAULT_FREQUENCIES_HZ.to_vec(),
            magnetometer_states: DEFAULT_MAGNETOMETER_STATES.to_vec(),
            cell_duration_ms: DEFAULT_CELL_DURATION_MS,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            gyroscope_stagger_ms: DEFAULT_GYROSCOPE_STAGGER_MS,
            magnetometer_sampling_period_us: DEFAULT_MAGNETOMETER_SAMPLING_PERIOD_US,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let host_name = std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .unwrap_or_else(|_| UNKNOWN.to_string());
        Self {
            device_name: host_name,
            manufacturer: UNKNOWN.to_string(),
            model: std::env::consts::ARCH.to_string(),
            sdk_int: UNKNOWN.to_string(),
            release: std::env::consts::OS.to_string(),
            board: std::env::consts::ARCH.to_string(),
            brand: UNKNOWN.to_string(),
            hardware: std::env::consts::ARCH.to_string(),
            product: std::env::consts::FAMILY.to_string(),
            bootloader: UNKNOWN.to_string(),
        }
    }
}

impl DataLoggerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, DataLoggerError> {
        let config: DataLoggerConfig =
            toml::from_str(content).map_err(|e| DataLoggerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataLoggerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DataLoggerError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Builds the configuration from the environment. A `.env` file is read first if present.
    /// `DATALOGGER_CONFIG` names a TOML file to start from; `DATALOGGER_API_KEY` and
    /// `DATALOGGER_BASE_URL` override the upload section.
    pub fn from_env() -> Result<Self, DataLoggerError> {
        dotenv::dotenv().ok();

        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            config.upload.api_key = api_key;
        }
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.upload.base_url = base_url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration can drive a sweep.
    pub fn validate(&self) -> Result<(), DataLoggerError> {
        if self.upload.base_url.trim().is_empty() {
            return Err(DataLoggerError::Config(
                "Upload base URL must not be empty".to_string(),
            ));
        }
        if self.sweep.frequencies.is_empty() {
            return Err(DataLoggerError::Config(
                "At least one frequency is required".to_string(),
            ));
        }
        if self.sweep.frequencies.contains(&0) {
            return Err(DataLoggerError::Config(
                "Frequencies must be positive".to_string(),
            ));
        }
        if self.sweep.magnetometer_states.is_empty() {
            return Err(DataLoggerError::Config(
                "At least one magnetometer state is required".to_string(),
            ));
        }
        if self.sweep.update_interval_ms == 0 {
            return Err(DataLoggerError::Config(
                "Update interval must be positive".to_string(),
            ));
        }
        if self.sweep.cell_duration_ms < self.sweep.update_interval_ms {
            return Err(DataLoggerError::Config(
                "Cell duration must be at least one update interval".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sweep_plan(&self) -> SweepPlan {
        SweepPlan {
            frequencies: self.sweep.frequencies.clone(),
            magnetometer_states: self.sweep.magnetometer_states.clone(),
            cell_duration: Duration::from_millis(self.sweep.cell_duration_ms),
            update_interval: Duration::from_millis(self.sweep.update_interval_ms),
            gyroscope_stagger: Duration::from_millis(self.sweep.gyroscope_stagger_ms),
            magnetometer_sampling_period_us: self.sweep.magnetometer_sampling_period_us,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DataLoggerConfig::default();
        assert_eq!(config.upload.base_url, "http://139.59.65.232");
        assert_eq!(config.upload.path, "sensorData");
        assert!(config.upload.api_key.is_empty());
        assert_eq!(config.upload.request_timeout_secs, None);
        assert_eq!(config.sweep.frequencies, vec![200, 173, 139]);
        assert_eq!(config.sweep.magnetometer_states, vec![true, false]);
        assert_eq!(config.sweep.cell_duration_ms, 2500);
        assert_eq!(config.sweep.update_interval_ms, 50);
        assert_eq!(config.sweep.gyroscope_stagger_ms, 2);
        assert_eq!(config.sweep.magnetometer_sampling_period_us, 5001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_document() {
        let config = DataLoggerConfig::from_toml_str(
            r#"
            [upload]
            base_url = "http://localhost:8080"
            path = "upload"
            api_key = "key"
            request_timeout_secs = 10

            [sweep]
            frequencies = [50]
            magnetometer_states = [false]
            cell_duration_ms = 1000
            update_interval_ms = 100
            gyroscope_stagger_ms = 0
            magnetometer_sampling_period_us = 10000

            [device]
            device_name = "bench"
            manufacturer = "acme"
            "#,
        )
        .unwrap();

        assert_eq!(config.upload.base_url, "http://localhost:8080");
        assert_eq!(config.upload.request_timeout_secs, Some(10));
        assert_eq!(config.sweep.frequencies, vec![50]);
        assert_eq!(config.sweep.magnetometer_states, vec![false]);
        assert_eq!(config.device.device_name, "bench");
        assert_eq!(config.device.manufacturer, "acme");
        assert_eq!(config.device.bootloader, "unknown");
    }

    #[test]
    fn test_invalid_document() {
        let result = DataLoggerConfig::from_toml_str("[sweep]\nfrequencies = \"fast\"");
        assert!(matches!(result, Err(DataLoggerError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_frequency() {
        let mut config = DataLoggerConfig::default();
        config.sweep.frequencies = vec![200, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_sweep() {
        let mut config = DataLoggerConfig::default();
        config.sweep.magnetometer_states.clear();
        assert!(config.validate().is_err());

        let mut config = DataLoggerConfig::default();
        config.sweep.frequencies.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_cells() {
        let mut config = DataLoggerConfig::default();
        config.sweep.cell_duration_ms = 20;
        assert!(config.validate().is_err());

        config.sweep.update_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = DataLoggerConfig::load_from_file("/nonexistent/datalogger.toml");
        assert!(matches!(result, Err(DataLoggerError::Config(_))));
    }

    #[test]
    fn test_sweep_plan() {
        let plan = DataLoggerConfig::default().sweep_plan();
        assert_eq!(plan.cell_duration, Duration::from_millis(2500));
        assert_eq!(plan.update_interval, Duration::from_millis(50));
        assert_eq!(plan.gyroscope_stagger, Duration::from_millis(2));
        assert_eq!(plan.cells().len(), 6);
    }
}
