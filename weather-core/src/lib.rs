//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The dashboard inputs (location, metric, range) and the query built from them
//! - The Open-Meteo source and the projection of its hourly payload into a series
//! - Chart descriptions for the two panels, including the error placeholder
//! - The update pipeline and the application context that drives it
//! - Configuration handling
//!
//! It is used by `weather-dashboard`, but can also back other front ends.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod projector;
pub mod provider;
pub mod query;

pub use chart::{Figure, Panels};
pub use config::{ApiConfig, Config, DefaultsConfig};
pub use dashboard::{Dashboard, InputEvent};
pub use error::DashboardError;
pub use model::{DashboardInputs, Location, Metric, RangeMode, SeriesPoint, TimeSeries};
pub use pipeline::Pipeline;
pub use projector::{ProjectedSeries, metric_title, project};
pub use provider::{WeatherSource, openmeteo::OpenMeteoSource};
pub use query::{QueryParams, build_query, historical_window};
