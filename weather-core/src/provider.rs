use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{Config, error::DashboardError, provider::openmeteo::OpenMeteoSource, query::QueryParams};

pub mod openmeteo;

/// Something that answers an hourly-data query with the raw JSON body.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_hourly(&self, query: &QueryParams) -> Result<Value, DashboardError>;
}

/// Construct the Open-Meteo source described by the `[api]` section.
pub fn source_from_config(config: &Config) -> Result<Box<dyn WeatherSource>, DashboardError> {
    let source = OpenMeteoSource::with_base_url(&config.api.base_url, config.api.timeout())?;
    Ok(Box::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_default_config() {
        let source = source_from_config(&Config::default()).expect("default config builds a source");
        assert!(format!("{source:?}").contains("api.open-meteo.com"));
    }
}
