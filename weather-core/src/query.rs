use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::{DashboardInputs, Metric, RangeMode};

pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outbound parameters for one hourly-data request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParams {
    pub latitude: f64,
    pub longitude: f64,
    pub metric: Metric,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl QueryParams {
    pub fn for_inputs(inputs: &DashboardInputs, reference_date: NaiveDate) -> Self {
        build_query(inputs, reference_date, DEFAULT_TIMEZONE)
    }

    /// Query string pairs in the order they are sent.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("hourly", self.metric.api_key().to_string()),
        ];

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            pairs.push(("start_date", start.format(DATE_FORMAT).to_string()));
            pairs.push(("end_date", end.format(DATE_FORMAT).to_string()));
        }

        pairs.push(("timezone", self.timezone.clone()));
        pairs
    }
}

/// The seven days ending yesterday, both ends inclusive.
///
/// Returns `(start, end)`. Saturates at the calendar limits instead of panicking.
pub fn historical_window(reference_date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = reference_date.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN);
    let start = end.checked_sub_days(Days::new(6)).unwrap_or(NaiveDate::MIN);
    (start, end)
}

/// Translate the current inputs into request parameters.
///
/// Forecast mode leaves the window to the API default. Coordinates are passed
/// through as-is; the API validates them.
pub fn build_query(
    inputs: &DashboardInputs,
    reference_date: NaiveDate,
    timezone: &str,
) -> QueryParams {
    let (start_date, end_date) = match inputs.range {
        RangeMode::Forecast => (None, None),
        RangeMode::Historical => {
            let (start, end) = historical_window(reference_date);
            (Some(start), Some(end))
        }
    };

    QueryParams {
        latitude: inputs.location.latitude,
        longitude: inputs.location.longitude,
        metric: inputs.metric,
        timezone: timezone.to_string(),
        start_date,
        end_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn berlin(range: RangeMode) -> DashboardInputs {
        DashboardInputs {
            location: Location::new(52.52, 13.419),
            metric: Metric::Temperature,
            range,
        }
    }

    #[test]
    fn forecast_has_no_date_bounds() {
        let query = QueryParams::for_inputs(&berlin(RangeMode::Forecast), date(2024, 6, 10));

        assert_eq!(query.start_date, None);
        assert_eq!(query.end_date, None);

        let pairs = query.to_pairs();
        assert!(pairs.iter().all(|(k, _)| *k != "start_date" && *k != "end_date"));
        assert!(pairs.contains(&("hourly", "temperature_2m".to_string())));
        assert!(pairs.contains(&("timezone", "Europe/Berlin".to_string())));
        assert!(pairs.contains(&("latitude", "52.52".to_string())));
        assert!(pairs.contains(&("longitude", "13.419".to_string())));
    }

    #[test]
    fn historical_window_ends_yesterday() {
        let query = QueryParams::for_inputs(&berlin(RangeMode::Historical), date(2024, 6, 10));

        assert_eq!(query.start_date, Some(date(2024, 6, 3)));
        assert_eq!(query.end_date, Some(date(2024, 6, 9)));

        let pairs = query.to_pairs();
        assert!(pairs.contains(&("start_date", "2024-06-03".to_string())));
        assert!(pairs.contains(&("end_date", "2024-06-09".to_string())));
    }

    #[test]
    fn historical_window_always_spans_seven_days() {
        let mut reference = date(2023, 12, 25);
        for _ in 0..800 {
            let (start, end) = historical_window(reference);
            assert_eq!(reference - start, chrono::Duration::days(7));
            assert_eq!(reference - end, chrono::Duration::days(1));
            assert_eq!((end - start).num_days() + 1, 7);
            reference = reference.succ_opt().unwrap();
        }
    }

    #[test]
    fn historical_window_crosses_year_and_leap_day() {
        assert_eq!(historical_window(date(2024, 1, 3)), (date(2023, 12, 27), date(2024, 1, 2)));
        assert_eq!(historical_window(date(2024, 3, 2)), (date(2024, 2, 24), date(2024, 3, 1)));
    }

    #[test]
    fn coordinates_pass_through_unvalidated() {
        let inputs = DashboardInputs {
            location: Location::new(123.0, -500.5),
            ..Default::default()
        };
        let query = build_query(&inputs, date(2024, 6, 10), "UTC");
        assert_eq!(query.latitude, 123.0);
        assert_eq!(query.longitude, -500.5);
        assert_eq!(query.timezone, "UTC");
    }

    #[test]
    fn pair_order_matches_request_layout() {
        let query = QueryParams::for_inputs(&berlin(RangeMode::Historical), date(2024, 6, 10));
        let keys: Vec<_> = query.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            ["latitude", "longitude", "hourly", "start_date", "end_date", "timezone"]
        );
    }
}
