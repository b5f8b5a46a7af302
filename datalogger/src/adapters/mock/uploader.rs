use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::errors::DataLoggerError;
use crate::models::payload::UploadPayload;
use crate::ports::Uploader;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockResponse {
    Status(u16),
    TransportError,
}

/// Uploader answering every request with a fixed response. Clones share the record of
/// received payloads.
#[derive(Clone)]
pub struct MockUploader {
    response: MockResponse,
    received: Arc<Mutex<Vec<UploadPayload>>>,
}

impl MockUploader {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self::new(MockResponse::Status(status))
    }

    pub fn failing() -> Self {
        Self::new(MockResponse::TransportError)
    }

    /// Payloads received so far.
    pub fn requests(&self) -> Vec<UploadPayload> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl Uploader for MockUploader {
    async fn send(&self, payload: &UploadPayload) -> Result<(), DataLoggerError> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(payload.clone());
        match self.response {
            MockResponse::Status(status) if (200..300).contains(&status) => Ok(()),
            MockResponse::Status(status) => Err(DataLoggerError::UploadRejected(status)),
            MockResponse::TransportError => {
                Err(DataLoggerError::Transport("connection reset".to_string()))
            }
        }
    }
}
