//! Remote procedure façade over a [`Bridge`].
//!
//! Every typed call decodes into an explicit type at this boundary so callers
//! never inspect raw JSON.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::bridge::{Bridge, UploadPart};
use crate::error::{ApiError, ApiResult};

/// Cheaply clonable handle over the shared bridge.
#[derive(Clone)]
pub struct Facade {
    bridge: Arc<dyn Bridge>,
}

impl Facade {
    /// Wrap `bridge`.
    #[must_use]
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// `GET endpoint` as raw JSON.
    ///
    /// # Errors
    /// Propagates bridge failures.
    pub async fn get(&self, endpoint: &str) -> ApiResult<Value> {
        Ok(self.bridge.get(endpoint).await?)
    }

    /// `POST endpoint` with a raw JSON body.
    ///
    /// # Errors
    /// Propagates bridge failures.
    pub async fn post(&self, endpoint: &str, body: Value) -> ApiResult<Value> {
        Ok(self.bridge.post(endpoint, body).await?)
    }

    /// `PUT endpoint` with a raw JSON body.
    ///
    /// # Errors
    /// Propagates bridge failures.
    pub async fn put(&self, endpoint: &str, body: Value) -> ApiResult<Value> {
        Ok(self.bridge.put(endpoint, body).await?)
    }

    /// `DELETE endpoint` as raw JSON.
    ///
    /// # Errors
    /// Propagates bridge failures.
    pub async fn delete(&self, endpoint: &str) -> ApiResult<Value> {
        Ok(self.bridge.delete(endpoint).await?)
    }

    /// `GET endpoint` decoded into `T`.
    ///
    /// # Errors
    /// Returns bridge failures or [`ApiError::Decode`].
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let value = self.get(endpoint).await?;
        decode(endpoint, value)
    }

    /// `POST endpoint` with `body`, decoded into `T`.
    ///
    /// # Errors
    /// Returns bridge failures, [`ApiError::Encode`], or [`ApiError::Decode`].
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.post(endpoint, encode(endpoint, body)?).await?;
        decode(endpoint, value)
    }

    /// `PUT endpoint` with `body`, decoded into `T`.
    ///
    /// # Errors
    /// Returns bridge failures, [`ApiError::Encode`], or [`ApiError::Decode`].
    pub async fn put_json<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.put(endpoint, encode(endpoint, body)?).await?;
        decode(endpoint, value)
    }

    /// `DELETE endpoint` decoded into `T`.
    ///
    /// # Errors
    /// Returns bridge failures or [`ApiError::Decode`].
    pub async fn delete_json<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let value = self.delete(endpoint).await?;
        decode(endpoint, value)
    }

    /// `GET endpoint` as raw bytes.
    ///
    /// # Errors
    /// Propagates bridge failures.
    pub async fn download(&self, endpoint: &str) -> ApiResult<Vec<u8>> {
        Ok(self.bridge.download(endpoint).await?)
    }

    /// Multipart upload of `part`, decoded into `T`.
    ///
    /// # Errors
    /// Returns bridge failures or [`ApiError::Decode`].
    pub async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        part: UploadPart,
    ) -> ApiResult<T> {
        let value = self.bridge.upload(endpoint, part).await?;
        decode(endpoint, value)
    }

    /// Point the underlying bridge at `base_url`.
    ///
    /// # Errors
    /// Propagates bridge failures.
    pub fn retarget(&self, base_url: Url) -> ApiResult<()> {
        Ok(self.bridge.retarget(base_url)?)
    }

    /// Base URL currently targeted.
    ///
    /// # Errors
    /// Propagates bridge failures.
    pub fn target(&self) -> ApiResult<Url> {
        Ok(self.bridge.target()?)
    }
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade").finish_non_exhaustive()
    }
}

fn encode<B: Serialize + ?Sized>(endpoint: &str, body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|source| ApiError::Encode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
