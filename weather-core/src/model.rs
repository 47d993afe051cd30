use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A point picked on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl Default for Location {
    /// Berlin, where the marker starts.
    fn default() -> Self {
        Self::new(52.52, 13.419)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Hourly field plotted on the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    #[serde(rename = "temperature_2m")]
    Temperature,
    #[serde(rename = "precipitation")]
    Precipitation,
    #[serde(rename = "windspeed_10m")]
    WindSpeed,
}

impl Metric {
    /// Field name used both in the `hourly` query parameter and in the response body.
    pub fn api_key(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature_2m",
            Metric::Precipitation => "precipitation",
            Metric::WindSpeed => "windspeed_10m",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Precipitation => "Precipitation",
            Metric::WindSpeed => "Wind Speed",
        }
    }

    pub const fn all() -> &'static [Metric] {
        &[Metric::Temperature, Metric::Precipitation, Metric::WindSpeed]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "temperature" | "temperature_2m" => Ok(Metric::Temperature),
            "precipitation" => Ok(Metric::Precipitation),
            "wind_speed" | "windspeed" | "windspeed_10m" => Ok(Metric::WindSpeed),
            _ => Err(anyhow::anyhow!(
                "Unknown metric '{value}'. Supported metrics: temperature_2m, precipitation, windspeed_10m."
            )),
        }
    }
}

/// Whether the charts show the upcoming week or the one that just passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    #[default]
    Forecast,
    Historical,
}

impl RangeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeMode::Forecast => "forecast",
            RangeMode::Historical => "historical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangeMode::Forecast => "Forecast (next 7 days)",
            RangeMode::Historical => "Historical (past 7 days)",
        }
    }

    pub const fn all() -> &'static [RangeMode] {
        &[RangeMode::Forecast, RangeMode::Historical]
    }
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RangeMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "forecast" => Ok(RangeMode::Forecast),
            "historical" | "history" => Ok(RangeMode::Historical),
            _ => Err(anyhow::anyhow!(
                "Unknown range '{value}'. Supported ranges: forecast, historical."
            )),
        }
    }
}

/// Current value of every dashboard input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardInputs {
    pub location: Location,
    pub metric: Metric,
    pub range: RangeMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: NaiveDateTime,
    pub value: Option<f64>,
}

/// Hourly points in the order the API returned them.
pub type TimeSeries = Vec<SeriesPoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_api_key_roundtrip() {
        for metric in Metric::all() {
            let parsed: Metric = metric.api_key().parse().expect("api key should parse");
            assert_eq!(*metric, parsed);
        }
    }

    #[test]
    fn metric_accepts_friendly_names() {
        assert_eq!("Wind Speed".parse::<Metric>().unwrap(), Metric::WindSpeed);
        assert_eq!("wind-speed".parse::<Metric>().unwrap(), Metric::WindSpeed);
        assert_eq!("TEMPERATURE".parse::<Metric>().unwrap(), Metric::Temperature);
    }

    #[test]
    fn unknown_metric_error() {
        let err = "humidity".parse::<Metric>().unwrap_err();
        assert!(err.to_string().contains("Unknown metric"));
    }

    #[test]
    fn range_parse() {
        assert_eq!("forecast".parse::<RangeMode>().unwrap(), RangeMode::Forecast);
        assert_eq!("Historical".parse::<RangeMode>().unwrap(), RangeMode::Historical);
        assert!("tomorrow".parse::<RangeMode>().is_err());
    }

    #[test]
    fn default_inputs() {
        let inputs = DashboardInputs::default();
        assert_eq!(inputs.location, Location::new(52.52, 13.419));
        assert_eq!(inputs.metric, Metric::Temperature);
        assert_eq!(inputs.range, RangeMode::Forecast);
    }

    #[test]
    fn metric_serializes_as_api_key() {
        let json = serde_json::to_string(&Metric::WindSpeed).unwrap();
        assert_eq!(json, "\"windspeed_10m\"");
    }
}
