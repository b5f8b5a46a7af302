// Upload and connectivity adapters backed by the network.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::constants::{API_KEY_HEADER, CONNECTIVITY_TIMEOUT_MS};
use crate::models::config::UploadConfig;
use crate::models::errors::DataLoggerError;
use crate::models::http_client::HttpClient;
use crate::models::payload::UploadPayload;
use crate::ports::{ConnectivityProbe, Uploader};

/// Posts the payload to the collection server.
pub struct HttpUploader {
    client: HttpClient,
    path: String,
    api_key: String,
}

impl HttpUploader {
    /// Returns a Config error if no API key is configured and ClientBuild if the HTTP client
    /// cannot be created.
    pub fn new(config: &UploadConfig) -> Result<Self, DataLoggerError> {
        if config.api_key.trim().is_empty() {
            return Err(DataLoggerError::Config(
                "No API key configured for the upload".to_string(),
            ));
        }
        let client = HttpClient::new(
            &config.base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )?;

        Ok(Self {
            client,
            path: config.path.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn send(&self, payload: &UploadPayload) -> Result<(), DataLoggerError> {
        let status = self
            .client
            .post_json(
                &self.path,
                &[(API_KEY_HEADER, self.api_key.as_str())],
                payload,
            )
            .await?;
        log::debug!("Upload response: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            Err(DataLoggerError::UploadRejected(status.as_u16()))
        }
    }
}

/// Considers the network available if a TCP connection to the upload host can be opened.
pub struct TcpConnectivity {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpConnectivity {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout: Duration::from_millis(CONNECTIVITY_TIMEOUT_MS),
        }
    }

    /// Probes the host of the upload URL.
    pub fn for_url(base_url: &str) -> Result<Self, DataLoggerError> {
        let url = Url::parse(base_url)
            .map_err(|e| DataLoggerError::Config(format!("{}: {}", base_url, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| DataLoggerError::Config(format!("{} has no host", base_url)))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| DataLoggerError::Config(format!("{} has no port", base_url)))?;
        Ok(Self::new(host, port))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ConnectivityProbe for TcpConnectivity {
    async fn has_internet(&self) -> bool {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                log::warn!("{}:{} unreachable: {}", self.host, self.port, e);
                false
            }
            Err(_) => {
                log::warn!("{}:{} timed out", self.host, self.port);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accumulator::RecordedData;
    use crate::models::config::DeviceConfig;
    use crate::models::payload::DeviceMetadata;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upload_config(base_url: &str) -> UploadConfig {
        UploadConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            ..UploadConfig::default()
        }
    }

    fn payload() -> UploadPayload {
        let mut recorded = RecordedData::default();
        recorded
            .accelerometer
            .insert("200-On".to_string(), vec!["ACC,record".to_string()]);
        UploadPayload::new(
            recorded,
            &DeviceConfig::default(),
            DeviceMetadata::default(),
        )
    }

    #[test]
    fn test_uploader_requires_api_key() {
        let config = UploadConfig::default();
        assert!(matches!(
            HttpUploader::new(&config),
            Err(DataLoggerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sensorData"))
            .and(header("X-API-Key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "accelerometer": {"200-On": ["ACC,record"]},
                "gyroscope": {}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uploader = HttpUploader::new(&upload_config(&mock_server.uri())).unwrap();
        assert_eq!(uploader.send(&payload()).await, Ok(()));
    }

    #[tokio::test]
    async fn test_upload_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uploader = HttpUploader::new(&upload_config(&mock_server.uri())).unwrap();
        assert_eq!(
            uploader.send(&payload()).await,
            Err(DataLoggerError::UploadRejected(500))
        );
    }

    #[test]
    fn test_connectivity_for_url() {
        let probe = TcpConnectivity::for_url("http://139.59.65.232").unwrap();
        assert_eq!(probe.host, "139.59.65.232");
        assert_eq!(probe.port, 80);

        let probe = TcpConnectivity::for_url("https://example.com:8443/api").unwrap();
        assert_eq!(probe.host, "example.com");
        assert_eq!(probe.port, 8443);

        assert!(TcpConnectivity::for_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_connectivity_reachable_host() {
        let mock_server = MockServer::start().await;
        let probe = TcpConnectivity::for_url(&mock_server.uri()).unwrap();
        assert!(probe.has_internet().await);
    }

    #[tokio::test]
    async fn test_connectivity_unreachable_host() {
        let probe = TcpConnectivity::new("127.0.0.1", 9).with_timeout(Duration::from_millis(500));
        assert!(!probe.has_internet().await);
    }
}
