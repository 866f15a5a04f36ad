// src/api/http.rs

//! `reqwest`-backed implementation of [`ApiGet`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::api::ApiGet;
use crate::error::{ApiError, ApiResult, Result};
use crate::models::ApiConfig;
use crate::query::QueryParams;
use crate::utils::api_url;
use crate::utils::http::{check_status, create_async_client, parse_body};

/// API client talking HTTP to the rates backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_client(&config.base_url, create_async_client(config)?))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl ApiGet for HttpApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, params: Option<&QueryParams>) -> ApiResult<Value> {
        let url = api_url(&self.base_url, path, params).map_err(ApiError::transport)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::transport)?;

        // Error statuses are reported without touching the body
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok());
        check_status(response.status(), reason)?;

        let body = response.bytes().await.map_err(ApiError::transport)?;
        parse_body(&body)
    }
}
