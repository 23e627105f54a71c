//! Host bridge between the console and the backend.
//!
//! # Design
//! - `Bridge` is the only seam that performs I/O; everything above it is
//!   testable against an in-memory implementation.
//! - Non-2xx statuses become `BridgeError::Status`; no retries are attempted.
//! - Empty success bodies decode to `{}`.
//! - The base URL sits behind a lock so settings changes re-target a live
//!   bridge without rebuilding the HTTP client.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use thiserror::Error;
use url::Url;

/// Request timeout applied when the caller does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// Failures raised by a bridge call.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client {
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// The request could not be completed (connection, timeout, body read).
    #[error("request failed")]
    Transport {
        /// HTTP method.
        method: &'static str,
        /// Endpoint requested.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    #[error("backend rejected request")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// A success body was not valid JSON.
    #[error("failed to parse response")]
    Decode {
        /// Endpoint requested.
        endpoint: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The base URL or endpoint did not form a valid URL.
    #[error("invalid request target")]
    InvalidTarget {
        /// Offending value.
        value: String,
    },
    /// The base URL lock was poisoned by a panicking writer.
    #[error("bridge target lock poisoned")]
    LockPoisoned,
}

impl BridgeError {
    /// Render the error with its context.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Client { source } => format!("Failed to build HTTP client: {source}"),
            Self::Transport {
                method,
                endpoint,
                source,
            } => format!("Request failed ({method} {endpoint}): {source}"),
            Self::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("API error ({status})")
                } else {
                    format!("API error ({status}): {body}")
                }
            }
            Self::Decode { endpoint, source } => {
                format!("Failed to parse response from {endpoint}: {source}")
            }
            Self::InvalidTarget { value } => format!("Invalid request URL: {value}"),
            Self::LockPoisoned => self.to_string(),
        }
    }
}

/// Convenience alias for bridge results.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// File attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    /// File name reported to the backend.
    pub file_name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// Transport used by the façade.
#[async_trait]
pub trait Bridge: Send + Sync {
    /// `GET endpoint`, decoded as JSON.
    async fn get(&self, endpoint: &str) -> BridgeResult<Value>;
    /// `POST endpoint` with a JSON body.
    async fn post(&self, endpoint: &str, body: Value) -> BridgeResult<Value>;
    /// `PUT endpoint` with a JSON body.
    async fn put(&self, endpoint: &str, body: Value) -> BridgeResult<Value>;
    /// `DELETE endpoint`.
    async fn delete(&self, endpoint: &str) -> BridgeResult<Value>;
    /// `GET endpoint`, returning the raw body.
    async fn download(&self, endpoint: &str) -> BridgeResult<Vec<u8>>;
    /// `POST endpoint` as multipart form data with a single `file` field.
    async fn upload(&self, endpoint: &str, part: UploadPart) -> BridgeResult<Value>;
    /// Point subsequent calls at `base_url`.
    ///
    /// # Errors
    /// Returns an error when the target cannot be updated.
    fn retarget(&self, base_url: Url) -> BridgeResult<()>;
    /// Base URL currently in use.
    ///
    /// # Errors
    /// Returns an error when the target cannot be read.
    fn target(&self) -> BridgeResult<Url>;
}

/// Construction options for [`HttpBridge`].
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value sent as `x-request-id` on every request.
    pub request_id: Option<String>,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            request_id: None,
        }
    }
}

/// `reqwest`-backed bridge.
#[derive(Debug)]
pub struct HttpBridge {
    client: Client,
    base_url: RwLock<Url>,
}

impl HttpBridge {
    /// Build a bridge targeting `base_url`.
    ///
    /// # Errors
    /// Returns an error when the request id is not a valid header value or
    /// the client cannot be built.
    pub fn new(base_url: Url, options: &BridgeOptions) -> BridgeResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(request_id) = &options.request_id {
            let value =
                HeaderValue::from_str(request_id).map_err(|_| BridgeError::InvalidTarget {
                    value: request_id.clone(),
                })?;
            headers.insert(HEADER_REQUEST_ID, value);
        }
        let client = Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| BridgeError::Client { source })?;
        Ok(Self {
            client,
            base_url: RwLock::new(base_url),
        })
    }

    fn url_for(&self, endpoint: &str) -> BridgeResult<Url> {
        let base = self.target()?;
        let joined = format!("{}{endpoint}", base.as_str().trim_end_matches('/'));
        Url::parse(&joined).map_err(|_| BridgeError::InvalidTarget { value: joined })
    }

    async fn send(
        &self,
        method: &'static str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> BridgeResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|source| BridgeError::Transport {
                method,
                endpoint: endpoint.to_string(),
                source,
            })?;
        let status = response.status();
        tracing::debug!(method, endpoint, status = status.as_u16(), "bridge call");
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(BridgeError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json(
        &self,
        method: &'static str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> BridgeResult<Value> {
        let response = self.send(method, endpoint, request).await?;
        let text = response
            .text()
            .await
            .map_err(|source| BridgeError::Transport {
                method,
                endpoint: endpoint.to_string(),
                source,
            })?;
        decode_body(endpoint, &text)
    }
}

pub(crate) fn decode_body(endpoint: &str, text: &str) -> BridgeResult<Value> {
    if text.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(text).map_err(|source| BridgeError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[async_trait]
impl Bridge for HttpBridge {
    async fn get(&self, endpoint: &str) -> BridgeResult<Value> {
        let url = self.url_for(endpoint)?;
        self.send_json("GET", endpoint, self.client.get(url)).await
    }

    async fn post(&self, endpoint: &str, body: Value) -> BridgeResult<Value> {
        let url = self.url_for(endpoint)?;
        self.send_json("POST", endpoint, self.client.post(url).json(&body))
            .await
    }

    async fn put(&self, endpoint: &str, body: Value) -> BridgeResult<Value> {
        let url = self.url_for(endpoint)?;
        self.send_json("PUT", endpoint, self.client.put(url).json(&body))
            .await
    }

    async fn delete(&self, endpoint: &str) -> BridgeResult<Value> {
        let url = self.url_for(endpoint)?;
        self.send_json("DELETE", endpoint, self.client.delete(url))
            .await
    }

    async fn download(&self, endpoint: &str) -> BridgeResult<Vec<u8>> {
        let url = self.url_for(endpoint)?;
        let response = self.send("GET", endpoint, self.client.get(url)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| BridgeError::Transport {
                method: "GET",
                endpoint: endpoint.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    async fn upload(&self, endpoint: &str, part: UploadPart) -> BridgeResult<Value> {
        let url = self.url_for(endpoint)?;
        let form = Form::new().part("file", Part::bytes(part.bytes).file_name(part.file_name));
        self.send_json("POST", endpoint, self.client.post(url).multipart(form))
            .await
    }

    fn retarget(&self, base_url: Url) -> BridgeResult<()> {
        let mut guard = self
            .base_url
            .write()
            .map_err(|_| BridgeError::LockPoisoned)?;
        tracing::info!(base_url = %base_url, "bridge retargeted");
        *guard = base_url;
        Ok(())
    }

    fn target(&self) -> BridgeResult<Url> {
        self.base_url
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| BridgeError::LockPoisoned)
    }
}
