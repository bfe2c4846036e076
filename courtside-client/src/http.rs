//! HTTP transport
//!
//! All endpoints answer with the `{code, msg, data}` envelope; the
//! envelope is decoded here and never leaks past this module. The
//! [`HttpApi`] trait is the seam the tests replace with an in-memory
//! transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::{ApiEnvelope, ApiError};

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP transport trait
///
/// `get`/`post` expect a payload inside the envelope; `post_empty` accepts
/// a success envelope with or without one.
#[async_trait]
pub trait HttpApi: Send + Sync {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T>;

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;

    async fn post_empty<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()>;
}

/// Network transport over reqwest
///
/// The service authenticates through a session cookie, so the client keeps
/// a cookie store; timeouts are the transport's only time bound.
#[derive(Debug, Clone)]
pub struct NetworkHttpApi {
    client: Client,
    base_url: String,
}

impl NetworkHttpApi {
    /// Create a transport from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<ApiEnvelope<T>> {
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<ApiEnvelope<T>>(&bytes) {
            Ok(envelope) => Ok(envelope),
            // Some deployments answer errors with a bare HTTP status and a
            // non-envelope body; carry the status as the result code the
            // way the envelope would.
            Err(_) if !status.is_success() => Err(ClientError::Api(ApiError::new(
                i32::from(status.as_u16()),
                format!("HTTP {status}"),
            ))),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl HttpApi for NetworkHttpApi {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        let envelope = Self::decode::<T>(response).await?;
        envelope
            .into_result()?
            .ok_or_else(|| ClientError::InvalidResponse(format!("{path}: missing data")))
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let envelope = Self::decode::<T>(response).await?;
        envelope
            .into_result()?
            .ok_or_else(|| ClientError::InvalidResponse(format!("{path}: missing data")))
    }

    async fn post_empty<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let envelope = Self::decode::<serde_json::Value>(response).await?;
        envelope.into_result()?;
        Ok(())
    }
}
