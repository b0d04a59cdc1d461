use super::columns::{ColumnNames, Schema};
use super::filter::{filter_rows, FilterWindow};
use super::loader::{decode, read_table, SourceEncoding};
use super::model::{DropCounts, RawTable, Record, TimedRow};
use super::project::project;
use super::time::{parse_times, TimezonePolicy};
use crate::error::PipelineResult;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Everything ingestion needs, passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOptions {
    pub encoding: SourceEncoding,
    pub timezone: TimezonePolicy,
    pub columns: ColumnNames,
}

// ---------------------------------------------------------------------------
// Dataset – the full parsed upload
// ---------------------------------------------------------------------------

/// A validated upload: the raw table and every row whose timestamp parsed.
///
/// Filtering always starts again from here, never from an earlier result.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: RawTable,
    pub columns: ColumnNames,
    pub timed: Vec<TimedRow>,
    pub unparsable_time: usize,
}

impl Dataset {
    /// Number of data rows in the file.
    pub fn rows_read(&self) -> usize {
        self.table.len()
    }
}

/// Decode, read, repair headers, validate the schema, parse the time column.
///
/// Fails with `TimeColumnMissing` / `MissingColumn` before any row is parsed.
pub fn ingest(bytes: &[u8], options: &IngestOptions) -> PipelineResult<Dataset> {
    let text = decode(bytes, options.encoding);
    let table = read_table(&text)?;
    if table.is_empty() {
        log::warn!("file has a header but no data rows");
    }

    let schema = Schema::resolve(&table.headers, &options.columns)?;
    log::debug!(
        "schema: time={} tws={} twd={} gust={}",
        schema.timestamp,
        schema.wind_speed,
        schema.wind_direction,
        schema.gust
    );

    let parsed = parse_times(&table, schema.timestamp, options.timezone);
    if parsed.unparsable > 0 {
        log::info!(
            "Dropped {} of {} rows with unparsable '{}' values",
            parsed.unparsable,
            table.len(),
            options.columns.timestamp
        );
    }

    Ok(Dataset {
        table,
        columns: options.columns.clone(),
        timed: parsed.rows,
        unparsable_time: parsed.unparsable,
    })
}

// ---------------------------------------------------------------------------
// FilteredView – one filter invocation
// ---------------------------------------------------------------------------

/// Records ready for the chart and table, with the exclusion tally.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    pub records: Vec<Record>,
    pub dropped: DropCounts,
}

/// Range-filter the full dataset, then project the survivors.
pub fn apply(dataset: &Dataset, window: &FilterWindow) -> PipelineResult<FilteredView> {
    let in_window = filter_rows(&dataset.timed, window);
    let projection = project(&dataset.table, &in_window, &dataset.columns)?;

    let dropped = DropCounts {
        unparsable_time: dataset.unparsable_time,
        outside_window: dataset.timed.len() - in_window.len(),
        non_numeric: projection.dropped,
    };
    log::debug!("filter kept {} records ({dropped})", projection.records.len());

    Ok(FilteredView {
        records: projection.records,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterInputs, FilterMode};
    use crate::error::PipelineError;
    use chrono::{NaiveDate, NaiveTime};

    const HEADER: &str = "W. Europe Daylight Time,kt,Wind10m deg,kt.3";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut s = String::from(HEADER);
        for r in rows {
            s.push('\n');
            s.push_str(r);
        }
        s.push('\n');
        s.into_bytes()
    }

    fn everything(dataset: &Dataset) -> FilterWindow {
        FilterInputs::spanning(&dataset.timed)
            .to_window(FilterMode::DateOnly)
            .unwrap()
    }

    #[test]
    fn empty_speed_cell_drops_that_row() {
        let bytes = csv(&[
            "2025-07-01 08:00,10.2,180,14.1",
            "2025-07-01 09:00,,185,15.0",
            "2025-07-01 10:00,11.4,190,16.3",
        ]);
        let ds = ingest(&bytes, &IngestOptions::default()).unwrap();
        let view = apply(&ds, &everything(&ds)).unwrap();
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.records[0].tws, 10.2);
        assert_eq!(view.records[1].tws, 11.4);
        assert_eq!(view.dropped.non_numeric, 1);
    }

    #[test]
    fn compound_window_selects_inclusive_middle() {
        let bytes = csv(&[
            "2025-07-01 07:59,1,10,2",
            "2025-07-01 08:00,2,20,3",
            "2025-07-01 20:00,3,30,4",
            "2025-07-01 20:01,4,40,5",
        ]);
        let ds = ingest(&bytes, &IngestOptions::default()).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let inputs = FilterInputs {
            start_date: day,
            end_date: day,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            ..FilterInputs::default()
        };
        let window = inputs.to_window(FilterMode::DateAndTimeOfDay).unwrap();
        let view = apply(&ds, &window).unwrap();
        let tws: Vec<f64> = view.records.iter().map(|r| r.tws).collect();
        assert_eq!(tws, vec![2.0, 3.0]);
        assert_eq!(view.dropped.outside_window, 2);
    }

    #[test]
    fn latin1_degree_header_is_found() {
        let mut bytes = b"W. Europe Daylight Time,kt,Wind10m \xB0,kt,kt,kt\n".to_vec();
        bytes.extend_from_slice(b"2025-07-01 08:00,10,200,1,2,15\n");
        let ds = ingest(&bytes, &IngestOptions::default()).unwrap();
        assert!(ds.table.headers.iter().any(|h| h == "Wind10m deg"));
        let view = apply(&ds, &everything(&ds)).unwrap();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].twd, 200.0);
        assert_eq!(view.records[0].gust, 15.0);
    }

    #[test]
    fn utf8_degree_header_read_as_latin1_is_found() {
        let mut bytes = "W. Europe Daylight Time,kt,Wind10m \u{00B0},kt,kt,kt\n".as_bytes().to_vec();
        bytes.extend_from_slice(b"2025-07-01 08:00,10,200,1,2,15\n");
        let ds = ingest(&bytes, &IngestOptions::default()).unwrap();
        assert!(ds.table.headers.iter().any(|h| h == "Wind10m deg"));
    }

    #[test]
    fn missing_gust_column_fails_up_front() {
        let bytes = b"W. Europe Daylight Time,kt,Wind10m deg\n2025-07-01 08:00,1,2\n";
        let err = ingest(bytes, &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref name) if name == "kt.3"));
        assert_eq!(err.to_string(), "Column 'kt.3' not found!");
    }

    #[test]
    fn missing_time_column_is_reported_as_such() {
        let bytes = b"Time,kt,Wind10m deg,kt.3\n2025-07-01 08:00,1,2,3\n";
        let err = ingest(bytes, &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::TimeColumnMissing(_)));
    }

    #[test]
    fn window_without_matches_is_empty() {
        let bytes = csv(&["2025-07-01 08:00,1,10,2"]);
        let ds = ingest(&bytes, &IngestOptions::default()).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let inputs = FilterInputs {
            start_date: day,
            end_date: day,
            ..FilterInputs::default()
        };
        let view = apply(&ds, &inputs.to_window(FilterMode::DateOnly).unwrap()).unwrap();
        assert!(view.records.is_empty());
    }

    #[test]
    fn bad_timestamps_are_counted() {
        let bytes = csv(&[
            "2025-07-01 08:00,1,10,2",
            "not a time,1,10,2",
            ",1,10,2",
            "2025-07-01 09:00,1,10,2",
        ]);
        let ds = ingest(&bytes, &IngestOptions::default()).unwrap();
        assert_eq!(ds.rows_read(), 4);
        assert_eq!(ds.unparsable_time, 2);
        let view = apply(&ds, &everything(&ds)).unwrap();
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.dropped.unparsable_time, 2);
    }

    #[test]
    fn refiltering_starts_from_full_dataset() {
        let bytes = csv(&[
            "2025-07-01 08:00,1,10,2",
            "2025-07-02 08:00,2,20,3",
        ]);
        let ds = ingest(&bytes, &IngestOptions::default()).unwrap();
        let first = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();

        let narrow = FilterInputs {
            start_date: first,
            end_date: first,
            ..FilterInputs::default()
        };
        assert_eq!(apply(&ds, &narrow.to_window(FilterMode::DateOnly).unwrap()).unwrap().records.len(), 1);

        let wide = FilterInputs {
            start_date: first,
            end_date: second,
            ..FilterInputs::default()
        };
        assert_eq!(apply(&ds, &wide.to_window(FilterMode::DateOnly).unwrap()).unwrap().records.len(), 2);
    }

    #[test]
    fn utc_policy_shifts_offset_rows_across_midnight() {
        let bytes = csv(&["2025-07-02T01:00:00+02:00,1,10,2"]);
        let options = IngestOptions {
            timezone: TimezonePolicy::Utc,
            ..IngestOptions::default()
        };
        let ds = ingest(&bytes, &options).unwrap();
        assert_eq!(ds.timed[0].time.date(), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());

        let local = ingest(&bytes, &IngestOptions::default()).unwrap();
        assert_eq!(local.timed[0].time.date(), NaiveDate::from_ymd_opt(2025, 7, 2).unwrap());
    }
}
