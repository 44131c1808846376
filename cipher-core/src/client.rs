// File:    client.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: The request/response boundary to the remote computation service.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Transport to the computation service.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Default address of a locally running computation service.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// A request that could not be completed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connecting, sending or reading the body failed.
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    /// The body arrived but was not JSON.
    #[error("response body is not JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Sends one JSON request to a service path and returns the decoded JSON reply.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `body` to `path` and waits for the single reply.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the exchange could not be completed or
    /// the reply is not JSON.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}

/// [`Transport`] over HTTP.
///
/// Error statuses are not treated as failures: the service reports its own
/// failures as `{"success": false, "error": ...}` bodies, which are passed on.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport posting to paths under `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The service address requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        log::debug!("POST {url} answered {status} with {} bytes", bytes.len());
        serde_json::from_slice(&bytes).map_err(TransportError::Decode)
    }
}
