use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    chart::Panels,
    error::DashboardError,
    model::DashboardInputs,
    projector::{ProjectedSeries, project},
    provider::WeatherSource,
    query::build_query,
};

/// One update cycle: build the query, fetch, project, describe both charts.
#[derive(Debug)]
pub struct Pipeline {
    source: Box<dyn WeatherSource>,
    timezone: String,
}

impl Pipeline {
    pub fn new(source: Box<dyn WeatherSource>, timezone: impl Into<String>) -> Self {
        Self { source, timezone: timezone.into() }
    }

    /// Never fails: any error becomes an error placeholder in both panels.
    pub async fn run(&self, inputs: &DashboardInputs, reference_date: NaiveDate) -> Panels {
        match self.fetch_series(inputs, reference_date).await {
            Ok(series) => {
                debug!(points = series.points.len(), title = %series.title, "cycle succeeded");
                Panels::from_series(series)
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "cycle failed");
                Panels::failed(&err)
            }
        }
    }

    pub async fn fetch_series(
        &self,
        inputs: &DashboardInputs,
        reference_date: NaiveDate,
    ) -> Result<ProjectedSeries, DashboardError> {
        let query = build_query(inputs, reference_date, &self.timezone);
        let payload = self.source.fetch_hourly(&query).await?;
        project(&payload, inputs.metric)
    }
}
