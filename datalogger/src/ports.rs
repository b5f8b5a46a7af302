use async_trait::async_trait;

use crate::models::errors::DataLoggerError;
use crate::models::payload::UploadPayload;

/// Delivers the payload of a finished sweep.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Sends the payload once. Returns UploadRejected for a non-success status and Transport
    /// if the request could not be completed.
    async fn send(&self, payload: &UploadPayload) -> Result<(), DataLoggerError>;
}

/// Tells whether the device can reach the internet.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn has_internet(&self) -> bool;
}
