//! Chart descriptions handed to the rendering layer.

use serde::Serialize;

use crate::{error::DashboardError, model::TimeSeries, projector::ProjectedSeries};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Figure {
    Line {
        title: String,
        x_label: String,
        y_label: String,
        points: TimeSeries,
    },
    /// Empty chart whose title carries the failure.
    Placeholder { title: String },
}

impl Figure {
    pub fn line(series: ProjectedSeries) -> Self {
        Figure::Line {
            title: series.title,
            x_label: "Time".to_string(),
            y_label: "Value".to_string(),
            points: series.points,
        }
    }

    pub fn error(err: &DashboardError) -> Self {
        Figure::Placeholder { title: format!("Error: Unable to fetch data - {err}") }
    }

    pub fn title(&self) -> &str {
        match self {
            Figure::Line { title, .. } | Figure::Placeholder { title } => title,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Figure::Placeholder { .. })
    }
}

/// The two chart panels of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panels {
    pub daily: Figure,
    pub hourly: Figure,
}

impl Panels {
    /// Both panels show the same series.
    pub fn from_series(series: ProjectedSeries) -> Self {
        let figure = Figure::line(series);
        Self { daily: figure.clone(), hourly: figure }
    }

    pub fn failed(err: &DashboardError) -> Self {
        let figure = Figure::error(err);
        Self { daily: figure.clone(), hourly: figure }
    }

    pub fn is_failed(&self) -> bool {
        self.daily.is_placeholder() && self.hourly.is_placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metric;

    #[test]
    fn failed_panels_carry_error_text() {
        let err = DashboardError::HttpStatus { status: 500, body: "Internal Server Error".into() };
        let panels = Panels::failed(&err);

        assert!(panels.is_failed());
        assert_eq!(panels.daily, panels.hourly);
        assert_eq!(
            panels.hourly.title(),
            "Error: Unable to fetch data - request failed with status 500: Internal Server Error"
        );
    }

    #[test]
    fn series_panels_are_identical_lines() {
        let series =
            ProjectedSeries { title: "Hourly Precipitation".into(), metric: Metric::Precipitation, points: vec![] };
        let panels = Panels::from_series(series);

        assert!(!panels.is_failed());
        assert_eq!(panels.daily, panels.hourly);
        assert_eq!(panels.daily.title(), "Hourly Precipitation");
    }

    #[test]
    fn figure_json_is_tagged() {
        let json = serde_json::to_value(Figure::Placeholder { title: "x".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "placeholder", "title": "x" }));
    }
}
