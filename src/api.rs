//! REST client boundary.
//!
//! `BatchApi` is the seam every view talks to; `HttpClient` is the reqwest
//! implementation. Each call is a single request with no retry, caching or
//! timeout. Any non-2xx status is an error; bodies of create/update
//! responses are not read.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::is_http_url;
use crate::errors::ApiError;
use crate::model::{Batch, BatchUpdate, HistoryRecord, NewBatch};

/// Operations the views need from the farm REST service.
#[async_trait]
pub trait BatchApi: Send + Sync {
    /// `GET /batches/`
    async fn list_batches(&self) -> Result<Vec<Batch>, ApiError>;

    /// `GET /batches/:id`
    async fn get_batch(&self, id: i64) -> Result<Batch, ApiError>;

    /// `POST /batches/`
    async fn create_batch(&self, batch: &NewBatch) -> Result<(), ApiError>;

    /// `PATCH /batches/:id`
    async fn update_batch(&self, id: i64, update: &BatchUpdate) -> Result<(), ApiError>;

    /// `GET /batch-history`
    async fn list_history(&self) -> Result<Vec<HistoryRecord>, ApiError>;
}

/// reqwest-backed `BatchApi`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client for `base_url`. A trailing slash is ignored.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !is_http_url(base_url) {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        tracing::debug!(%url, %status, "response received");
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(&url), &url).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    async fn write_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, %method, "sending");
        self.send(self.client.request(method, &url).json(body), &url)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl BatchApi for HttpClient {
    async fn list_batches(&self) -> Result<Vec<Batch>, ApiError> {
        self.get_json("/batches/").await
    }

    async fn get_batch(&self, id: i64) -> Result<Batch, ApiError> {
        self.get_json(&format!("/batches/{}", id)).await
    }

    async fn create_batch(&self, batch: &NewBatch) -> Result<(), ApiError> {
        self.write_json(reqwest::Method::POST, "/batches/", batch)
            .await
    }

    async fn update_batch(&self, id: i64, update: &BatchUpdate) -> Result<(), ApiError> {
        self.write_json(reqwest::Method::PATCH, &format!("/batches/{}", id), update)
            .await
    }

    async fn list_history(&self) -> Result<Vec<HistoryRecord>, ApiError> {
        self.get_json("/batch-history").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = HttpClient::new("http://farm.local:8000/").unwrap();
        assert_eq!(client.base_url(), "http://farm.local:8000");
        assert_eq!(client.url("/batches/"), "http://farm.local:8000/batches/");
    }

    #[test]
    fn test_new_rejects_non_http_url() {
        let err = HttpClient::new("farm.local").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(ref u) if u == "farm.local"));
    }
}
