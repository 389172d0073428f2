//! HTTP access to the JMA open-data endpoints.
//!
//! No authentication; a fixed request timeout plus transient-failure retry.
//! Each call blocks its caller until the fetch completes; there is no
//! background polling here.

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::directory::{build_hierarchy, AreaDirectory, DIRECTORY_PATH};
use crate::error::WeatherError;
use crate::forecast::{forecast_path, ForecastDocument};
use crate::retry::{send_with_retry, RetryPolicy};
use crate::types::Hierarchy;

const JMA_BASE_URL: &str = "https://www.jma.go.jp/bosai";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct JmaClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl JmaClient {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(JMA_BASE_URL)
    }

    /// Point the client at a different host (tests, mirrors).
    pub fn with_base_url(base_url: &str) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch the taxonomy document and resolve the region -> office
    /// hierarchy. All-or-nothing: any fetch or schema failure yields an
    /// error and no partial hierarchy.
    pub async fn resolve_hierarchy(&self) -> Result<Hierarchy, WeatherError> {
        let directory: AreaDirectory = self.fetch_json(DIRECTORY_PATH, "area directory").await?;
        let hierarchy = build_hierarchy(&directory);
        tracing::info!(regions = hierarchy.regions.len(), "area directory resolved");
        Ok(hierarchy)
    }

    /// Fetch the raw forecast documents for one area code.
    pub(crate) async fn fetch_forecast(
        &self,
        area_code: &str,
    ) -> Result<Vec<ForecastDocument>, WeatherError> {
        self.fetch_json(&forecast_path(area_code), "forecast document")
            .await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, what, "fetching upstream document");

        let response = send_with_retry(&self.retry, || self.http.get(&url).send())
            .await?
            .error_for_status()?;

        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                WeatherError::Schema(format!("{what}: {err}"))
            } else {
                WeatherError::Fetch(err)
            }
        })
    }
}
