use super::columns::{resolve_measurements, ColumnNames};
use super::model::{RawTable, Record, TimedRow};
use crate::error::PipelineResult;

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Lenient decimal parse: surrounding whitespace is ignored; empty text,
/// words, `NaN` and infinities are rejected.
pub fn coerce_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Records built from the filtered rows, plus how many rows were incomplete.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub records: Vec<Record>,
    pub dropped: usize,
}

/// Turn time-filtered rows into [`Record`]s.
///
/// The three measurement columns are located before any row is read; an
/// absent one fails with `MissingColumn`. A row becomes a record only when
/// TWS, TWD and Gust all coerce.
pub fn project(table: &RawTable, rows: &[TimedRow], columns: &ColumnNames) -> PipelineResult<Projection> {
    let [tws_col, twd_col, gust_col] = resolve_measurements(&table.headers, columns)?;

    let mut out = Projection {
        records: Vec::with_capacity(rows.len()),
        dropped: 0,
    };

    for timed in rows {
        let value = |col| coerce_number(table.cell(timed.row, col));
        match (value(tws_col), value(twd_col), value(gust_col)) {
            (Some(tws), Some(twd), Some(gust)) => out.records.push(Record {
                time: timed.time,
                tws,
                twd,
                gust,
            }),
            _ => out.dropped += 1,
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Instant;
    use crate::error::PipelineError;
    use chrono::NaiveDateTime;

    #[test]
    fn coercion_accepts_decimal_notation() {
        assert_eq!(coerce_number("12"), Some(12.0));
        assert_eq!(coerce_number(" 12.5 "), Some(12.5));
        assert_eq!(coerce_number("-0.5"), Some(-0.5));
        assert_eq!(coerce_number("+3"), Some(3.0));
        assert_eq!(coerce_number(".5"), Some(0.5));
        assert_eq!(coerce_number("1e2"), Some(100.0));
    }

    #[test]
    fn coercion_rejects_everything_else() {
        for text in ["", "  ", "abc", "NaN", "nan", "inf", "-infinity", "12kt", "1,5", "--1"] {
            assert_eq!(coerce_number(text), None, "{text:?}");
        }
    }

    fn table(rows: &[[&str; 4]]) -> RawTable {
        RawTable {
            headers: ["W. Europe Daylight Time", "kt", "Wind10m deg", "kt.3"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    fn timed(n: usize) -> Vec<TimedRow> {
        let base = NaiveDateTime::parse_from_str("2025-07-01 00:00", "%Y-%m-%d %H:%M").unwrap();
        (0..n)
            .map(|row| TimedRow {
                time: Instant::Naive(base + chrono::Duration::hours(row as i64)),
                row,
            })
            .collect()
    }

    #[test]
    fn incomplete_rows_are_dropped_whole() {
        let t = table(&[
            ["", "10.0", "180", "14.0"],
            ["", "", "185", "15.0"],
            ["", "11.0", "190", ""],
            ["", "12.0", "n/a", "16.0"],
            ["", "13.0", "200", "17.5"],
        ]);
        let out = project(&t, &timed(5), &ColumnNames::default()).unwrap();
        assert_eq!(out.dropped, 3);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].tws, 10.0);
        assert_eq!(out.records[1].gust, 17.5);
        assert!(out
            .records
            .iter()
            .all(|r| r.tws.is_finite() && r.twd.is_finite() && r.gust.is_finite()));
    }

    #[test]
    fn only_requested_rows_are_projected_in_order() {
        let t = table(&[
            ["", "1", "10", "2"],
            ["", "2", "20", "3"],
            ["", "3", "30", "4"],
        ]);
        let all = timed(3);
        let subset = vec![all[2], all[0]];
        let out = project(&t, &subset, &ColumnNames::default()).unwrap();
        let tws: Vec<f64> = out.records.iter().map(|r| r.tws).collect();
        assert_eq!(tws, vec![3.0, 1.0]);
    }

    #[test]
    fn short_records_read_as_missing() {
        let mut t = table(&[["", "1", "10", "2"]]);
        t.rows[0].truncate(3);
        let out = project(&t, &timed(1), &ColumnNames::default()).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.dropped, 1);
    }

    #[test]
    fn missing_column_fails_before_rows() {
        let mut t = table(&[["", "1", "10", "2"]]);
        t.headers[3] = "kt.2".to_string();
        let err = project(&t, &timed(1), &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref name) if name == "kt.3"));
    }
}
