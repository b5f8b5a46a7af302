use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::models::errors::DataLoggerError;

pub(crate) struct HttpClient {
    client: ReqwestClient,
    base_url: String,
}

impl HttpClient {
    /// Without a timeout, requests wait as long as the transport allows.
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DataLoggerError> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DataLoggerError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Posts `body` as JSON and returns the response status. The response body is ignored.
    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        body: &T,
    ) -> Result<StatusCode, DataLoggerError> {
        let mut request = self.client.post(self.url(path)).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| DataLoggerError::Transport(e.to_string()))?;
        Ok(response.status())
    }
}
