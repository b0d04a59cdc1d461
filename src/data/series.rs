use chrono::NaiveDateTime;

use super::model::Record;

// ---------------------------------------------------------------------------
// ChartSeries – what the dual-axis chart draws
// ---------------------------------------------------------------------------

/// `(x, value)` pairs for the three plotted quantities, sorted by time.
///
/// `x` is seconds since the Unix epoch of the record's wall clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub tws: Vec<[f64; 2]>,
    pub gust: Vec<[f64; 2]>,
    pub twd: Vec<[f64; 2]>,
}

impl ChartSeries {
    /// Stable-sort the records by time and split them into series.
    pub fn from_records(records: &[Record]) -> Self {
        let mut sorted: Vec<&Record> = records.iter().collect();
        sorted.sort_by_key(|r| r.time);

        let mut series = ChartSeries::default();
        for r in sorted {
            let x = to_plot_x(r.time.wall_clock());
            series.tws.push([x, r.tws]);
            series.gust.push([x, r.gust]);
            series.twd.push([x, r.twd]);
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.tws.is_empty()
    }

    /// Time span covered, in seconds.
    pub fn span_secs(&self) -> f64 {
        match (self.tws.first(), self.tws.last()) {
            (Some(first), Some(last)) => last[0] - first[0],
            _ => 0.0,
        }
    }
}

/// Plot x coordinate for a wall-clock time.
pub fn to_plot_x(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64
}

/// Inverse of [`to_plot_x`]; `None` outside chrono's range.
pub fn from_plot_x(x: f64) -> Option<NaiveDateTime> {
    if !x.is_finite() {
        return None;
    }
    chrono::DateTime::from_timestamp(x.round() as i64, 0).map(|dt| dt.naive_utc())
}

/// Axis label for an x coordinate: `HH:MM`, with the date when the visible
/// span is longer than a day.
pub fn format_time_tick(x: f64, span_secs: f64) -> String {
    const DAY: f64 = 24.0 * 3600.0;
    match from_plot_x(x) {
        Some(t) if span_secs > DAY => t.format("%d %b %H:%M").to_string(),
        Some(t) => t.format("%H:%M").to_string(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Point annotations
// ---------------------------------------------------------------------------

/// Vertical offset of TWS / Gust labels above their point (kt).
pub const SPEED_LABEL_OFFSET: f64 = 0.3;
/// Vertical offset of TWD labels above their point (deg).
pub const DIRECTION_LABEL_OFFSET: f64 = 3.0;

pub fn speed_label(v: f64) -> String {
    format!("{v:.1}")
}

/// Whole degrees, truncated toward zero like an integer cast.
pub fn direction_label(v: f64) -> String {
    format!("{}", v.trunc() as i64)
}

/// Chart title from a template with a `{model}` placeholder.
pub fn chart_title(template: &str, model_name: &str) -> String {
    template.replace("{model}", model_name)
}

// ---------------------------------------------------------------------------
// TableView – what the styled table shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub time: String,
    pub tws: f64,
    pub twd: f64,
    pub gust: f64,
}

/// Display rows plus the TWS extent the colour scale spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    /// `(min, max)` of the displayed TWS values; `None` when empty.
    pub tws_range: Option<(f64, f64)>,
}

impl TableView {
    pub fn from_records(records: &[Record]) -> Self {
        let rows = records
            .iter()
            .map(|r| TableRow {
                time: r.time.to_string(),
                tws: r.tws,
                twd: r.twd,
                gust: r.gust,
            })
            .collect();

        let tws_range = records.iter().map(|r| r.tws).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        });

        Self { rows, tws_range }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Instant;

    fn record(t: &str, tws: f64) -> Record {
        Record {
            time: Instant::Naive(NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M").unwrap()),
            tws,
            twd: 200.0,
            gust: tws + 4.0,
        }
    }

    #[test]
    fn series_are_aligned_and_sorted() {
        let records = vec![
            record("2025-07-01 12:00", 3.0),
            record("2025-07-01 06:00", 1.0),
            record("2025-07-01 09:00", 2.0),
        ];
        let s = ChartSeries::from_records(&records);
        assert_eq!(s.tws.len(), 3);
        let tws: Vec<f64> = s.tws.iter().map(|p| p[1]).collect();
        assert_eq!(tws, vec![1.0, 2.0, 3.0]);
        assert!(s.tws.windows(2).all(|w| w[0][0] <= w[1][0]));
        assert_eq!(s.gust[0], [s.tws[0][0], 5.0]);
        assert_eq!(s.span_secs(), 6.0 * 3600.0);
    }

    #[test]
    fn empty_records_give_empty_series_and_table() {
        let s = ChartSeries::from_records(&[]);
        assert!(s.is_empty());
        assert_eq!(s.span_secs(), 0.0);
        let t = TableView::from_records(&[]);
        assert!(t.rows.is_empty());
        assert_eq!(t.tws_range, None);
    }

    #[test]
    fn tick_format_depends_on_span() {
        let x = to_plot_x(NaiveDateTime::parse_from_str("2025-07-01 08:05", "%Y-%m-%d %H:%M").unwrap());
        assert_eq!(format_time_tick(x, 3600.0), "08:05");
        assert_eq!(format_time_tick(x, 3.0 * 24.0 * 3600.0), "01 Jul 08:05");
        assert_eq!(format_time_tick(f64::NAN, 0.0), "");
    }

    #[test]
    fn labels_round_like_the_chart() {
        assert_eq!(speed_label(12.34), "12.3");
        assert_eq!(speed_label(7.0), "7.0");
        assert_eq!(direction_label(359.9), "359");
        assert_eq!(direction_label(45.0), "45");
    }

    #[test]
    fn title_substitutes_model() {
        assert_eq!(
            chart_title("TWS/Direction\nModels: {model}", "UM-Global"),
            "TWS/Direction\nModels: UM-Global"
        );
    }

    #[test]
    fn table_range_tracks_displayed_values() {
        let t = TableView::from_records(&[
            record("2025-07-01 06:00", 8.5),
            record("2025-07-01 07:00", 3.0),
            record("2025-07-01 08:00", 12.0),
        ]);
        assert_eq!(t.tws_range, Some((3.0, 12.0)));
        assert_eq!(t.rows[0].time, "2025-07-01 06:00");
    }

    #[test]
    fn utc_rows_are_marked_in_the_table() {
        let time = Instant::Utc(
            NaiveDateTime::parse_from_str("2025-07-01 06:00", "%Y-%m-%d %H:%M")
                .unwrap()
                .and_utc(),
        );
        let t = TableView::from_records(&[Record { time, tws: 5.0, twd: 90.0, gust: 7.0 }]);
        assert_eq!(t.rows[0].time, "2025-07-01 06:00 UTC");
    }
}
