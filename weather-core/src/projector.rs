use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::DashboardError,
    model::{Metric, SeriesPoint, TimeSeries},
};

/// A chart-ready series for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedSeries {
    pub title: String,
    pub metric: Metric,
    pub points: TimeSeries,
}

/// "Hourly " followed by the field name with underscores turned into spaces and
/// every word title-cased.
///
/// A letter is upper-cased when the character before it is not a letter, so
/// `windspeed_10m` becomes `Hourly Windspeed 10M`.
pub fn metric_title(key: &str) -> String {
    let mut title = String::with_capacity(key.len() + 7);
    title.push_str("Hourly ");

    let mut prev_is_letter = false;
    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            title.push(c);
            prev_is_letter = false;
        }
    }

    title
}

/// Zip `hourly.time` with `hourly.<metric>` into timestamp/value pairs.
///
/// Order is preserved exactly. Arrays of different lengths are rejected rather
/// than truncated.
pub fn project(payload: &Value, metric: Metric) -> Result<ProjectedSeries, DashboardError> {
    let key = metric.api_key();

    let hourly = payload
        .get("hourly")
        .and_then(Value::as_object)
        .ok_or_else(|| DashboardError::malformed("missing `hourly` object"))?;

    let times = hourly
        .get("time")
        .and_then(Value::as_array)
        .ok_or_else(|| DashboardError::malformed("missing `hourly.time` array"))?;

    let values = hourly
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| DashboardError::malformed(format!("missing `hourly.{key}` array")))?;

    if times.len() != values.len() {
        return Err(DashboardError::malformed(format!(
            "`hourly.time` has {} entries but `hourly.{key}` has {}",
            times.len(),
            values.len()
        )));
    }

    let points = times
        .iter()
        .zip(values)
        .enumerate()
        .map(|(idx, (time, value))| -> Result<SeriesPoint, DashboardError> {
            Ok(SeriesPoint { time: parse_time(idx, time)?, value: parse_value(idx, key, value)? })
        })
        .collect::<Result<TimeSeries, _>>()?;

    Ok(ProjectedSeries { title: metric_title(key), metric, points })
}

fn parse_time(idx: usize, raw: &Value) -> Result<NaiveDateTime, DashboardError> {
    let s = raw.as_str().ok_or_else(|| {
        DashboardError::malformed(format!("`hourly.time[{idx}]` is not a string"))
    })?;

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| {
            DashboardError::malformed(format!("`hourly.time[{idx}]` = {s:?} is not a timestamp: {e}"))
        })
}

fn parse_value(idx: usize, key: &str, raw: &Value) -> Result<Option<f64>, DashboardError> {
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| {
            DashboardError::malformed(format!("`hourly.{key}[{idx}]` is out of range"))
        }),
        other => Err(DashboardError::malformed(format!(
            "`hourly.{key}[{idx}]` is not a number: {other}"
        ))),
    }
}
