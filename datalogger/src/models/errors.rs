//! Module errors

use common::types::SensorType;
use thiserror::Error;

/// Represents the different types of errors that can occur while running an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataLoggerError {
    /// A sensor required by the experiment is missing on the device.
    #[error("{0} is not available")]
    SensorUnavailable(SensorType),

    /// No internet connection when the sweep was requested.
    #[error("Network is unavailable")]
    NetworkUnavailable,

    /// A sweep was requested while another one is still running.
    #[error("A sweep is already running")]
    SweepInProgress,

    /// Error indicating that there was an issue building the HTTP client.
    #[error("Error building HTTP client: {0}")]
    ClientBuild(String),

    /// The server answered the upload with a non-success status code.
    #[error("Upload rejected with status {0}")]
    UploadRejected(u16),

    /// The upload request could not be completed.
    #[error("Error sending data: {0}")]
    Transport(String),

    /// A listener could not be registered with the sensor source.
    #[error("Error registering listener: {0}")]
    Registration(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
