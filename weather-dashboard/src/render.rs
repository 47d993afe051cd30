use std::fmt::{self, Write};
use weather_core::{Figure, Panels, SeriesPoint};

const SPARK_WIDTH: usize = 72;
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Both panels, one block each.
pub fn panels(panels: &Panels) -> String {
    let mut out = String::new();
    out.push_str(&panel("Daily", &panels.daily));
    out.push('\n');
    out.push_str(&panel("Hourly", &panels.hourly));
    out
}

pub fn panel(name: &str, figure: &Figure) -> String {
    PanelView { name, figure }.to_string()
}

struct PanelView<'a> {
    name: &'a str,
    figure: &'a Figure,
}

impl fmt::Display for PanelView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_panel(f, self.name, self.figure)
    }
}

fn write_panel(out: &mut impl Write, name: &str, figure: &Figure) -> fmt::Result {
    writeln!(out, "── {name} ──")?;

    let (title, x_label, y_label, points) = match figure {
        Figure::Placeholder { title } => return writeln!(out, "{title}"),
        Figure::Line { title, x_label, y_label, points } => (title, x_label, y_label, points),
    };
    writeln!(out, "{title}")?;

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return writeln!(out, "(no data)");
    };

    let present: Vec<f64> = points.iter().filter_map(|p| p.value).collect();
    let missing = points.len() - present.len();

    write!(
        out,
        "{x_label}: {} .. {}  ({} points",
        first.time.format("%Y-%m-%d %H:%M"),
        last.time.format("%Y-%m-%d %H:%M"),
        points.len(),
    )?;
    if missing > 0 {
        write!(out, ", {missing} missing")?;
    }
    writeln!(out, ")")?;

    if let Some((min, max)) = min_max(&present) {
        writeln!(out, "{y_label}: min {min:.1}  max {max:.1}")?;
    }

    writeln!(out, "{}", sparkline(points, SPARK_WIDTH))
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// One bar per bucket of points, averaging present values; empty buckets stay blank.
fn sparkline(points: &[SeriesPoint], width: usize) -> String {
    if points.is_empty() || width == 0 {
        return String::new();
    }

    let buckets = points.len().min(width);
    let averages: Vec<Option<f64>> = (0..buckets)
        .map(|i| {
            let lo = i * points.len() / buckets;
            let hi = (i + 1) * points.len() / buckets;
            let vals: Vec<f64> = points[lo..hi].iter().filter_map(|p| p.value).collect();
            (!vals.is_empty()).then(|| vals.iter().sum::<f64>() / vals.len() as f64)
        })
        .collect();

    let present: Vec<f64> = averages.iter().flatten().copied().collect();
    let Some((min, max)) = min_max(&present) else {
        return " ".repeat(buckets);
    };
    let span = max - min;

    averages
        .iter()
        .map(|avg| match avg {
            None => ' ',
            Some(_) if span == 0.0 => BARS[BARS.len() / 2],
            Some(v) => {
                let idx = ((v - min) / span * (BARS.len() - 1) as f64).round() as usize;
                BARS[idx.min(BARS.len() - 1)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn point(hour: u32, value: Option<f64>) -> SeriesPoint {
        let time = NaiveDateTime::parse_from_str(&format!("2024-06-10T{hour:02}:00"), "%Y-%m-%dT%H:%M")
            .unwrap();
        SeriesPoint { time, value }
    }

    #[test]
    fn placeholder_shows_error_title() {
        let figure = Figure::Placeholder { title: "Error: Unable to fetch data - boom".into() };
        let out = panel("Daily", &figure);
        assert!(out.contains("── Daily ──"));
        assert!(out.contains("Error: Unable to fetch data - boom"));
    }

    #[test]
    fn line_shows_span_and_extremes() {
        let figure = Figure::Line {
            title: "Hourly Temperature 2M".into(),
            x_label: "Time".into(),
            y_label: "Value".into(),
            points: vec![point(0, Some(12.0)), point(1, None), point(2, Some(18.0))],
        };

        let out = panel("Hourly", &figure);

        assert!(out.contains("Hourly Temperature 2M"));
        assert!(out.contains("Time: 2024-06-10 00:00 .. 2024-06-10 02:00  (3 points, 1 missing)"));
        assert!(out.contains("Value: min 12.0  max 18.0"));
        assert!(out.contains("▁ █"));
    }

    #[test]
    fn empty_line_says_no_data() {
        let figure = Figure::Line {
            title: "Hourly Precipitation".into(),
            x_label: "Time".into(),
            y_label: "Value".into(),
            points: vec![],
        };
        assert!(panel("Daily", &figure).contains("(no data)"));
    }

    #[test]
    fn sparkline_downsamples_to_width() {
        let points: Vec<_> = (0..168).map(|h| point(h % 24, Some(h as f64))).collect();
        let line = sparkline(&points, 72);
        assert_eq!(line.chars().count(), 72);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn flat_series_uses_middle_bar() {
        let points = vec![point(0, Some(0.0)), point(1, Some(0.0))];
        assert_eq!(sparkline(&points, 72), "▅▅");
    }

    #[test]
    fn complete_series_has_no_missing_note() {
        let figure = Figure::Line {
            title: "Hourly Precipitation".into(),
            x_label: "Time".into(),
            y_label: "Value".into(),
            points: vec![point(0, Some(0.0)), point(1, Some(0.4))],
        };
        let out = panel("Daily", &figure);
        assert!(out.contains("(2 points)\n"));
        assert!(!out.contains("missing"));
    }

    #[test]
    fn both_panels_rendered() {
        let figure = Figure::Placeholder { title: "x".into() };
        let out = panels(&Panels { daily: figure.clone(), hourly: figure });
        assert!(out.contains("── Daily ──"));
        assert!(out.contains("── Hourly ──"));
    }
}
