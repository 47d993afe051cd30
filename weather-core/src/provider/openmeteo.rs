use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::DEFAULT_BASE_URL,
    error::{DashboardError, truncate_body},
    query::QueryParams,
};

use super::WeatherSource;

/// Client for the Open-Meteo hourly forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    base_url: String,
    http: Client,
}

impl OpenMeteoSource {
    pub fn new(timeout: Duration) -> Result<Self, DashboardError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, DashboardError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Client(e.to_string()))?;

        Ok(Self { base_url: base_url.to_string(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    #[instrument(skip(self, query), fields(metric = query.metric.api_key()))]
    async fn fetch_hourly(&self, query: &QueryParams) -> Result<Value, DashboardError> {
        let pairs = query.to_pairs();
        debug!(url = %self.base_url, ?pairs, "requesting hourly data");

        let res = self.http.get(&self.base_url).query(&pairs).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| DashboardError::malformed(format!("response is not valid JSON: {e}")))
    }
}
