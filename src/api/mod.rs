//! Backend API client.
//!
//! Everything above this layer depends only on [`ApiGet`]: one GET per
//! call, one result per call, every failure reported as an [`ApiError`].
//! No caching and no retries.

mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, Result};
use crate::models::{RatesResponse, ScheduleMetadata};
use crate::query::QueryParams;
use crate::utils::api_url;

/// Default API base path.
pub const API_BASE: &str = "/api";

pub const PATH_SCHEDULES: &str = "/schedules";
pub const PATH_RATES: &str = "/rates";
pub const PATH_RATES_CSV: &str = "/rates/csv";
pub const PATH_SEARCH: &str = "/search";

/// A GET-only JSON API relative to a fixed base.
#[async_trait]
pub trait ApiGet: Send + Sync {
    /// Base URL that paths are appended to.
    fn base_url(&self) -> &str;

    /// GET `path` with optional form-encoded parameters and parse the body.
    async fn get(&self, path: &str, params: Option<&QueryParams>) -> ApiResult<Value>;

    /// Fetch metadata for every schedule.
    async fn get_schedules(&self) -> ApiResult<Vec<ScheduleMetadata>> {
        let body = self.get(PATH_SCHEDULES, None).await?;
        decode(body)
    }

    /// Fetch one page of rates.
    async fn get_rates(&self, params: &QueryParams) -> ApiResult<RatesResponse> {
        let body = self.get(PATH_RATES, Some(params)).await?;
        decode(body)
    }

    /// Autocomplete suggestions for a search term, as raw JSON.
    async fn search(&self, params: &QueryParams) -> ApiResult<Value> {
        self.get(PATH_SEARCH, Some(params)).await
    }

    /// Download link for the CSV export of a query. Nothing is fetched.
    fn csv_url(&self, params: &QueryParams) -> Result<String> {
        Ok(api_url(self.base_url(), PATH_RATES_CSV, Some(params))?.to_string())
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(ApiError::malformed)
}
