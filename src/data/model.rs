use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

// ---------------------------------------------------------------------------
// RawTable – the decoded CSV before any typing
// ---------------------------------------------------------------------------

/// Header names plus untyped cell strings, one `Vec<String>` per CSV record.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names after duplicate mangling and degree-sign repair.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell text at `(row, col)`. Short records read as empty cells.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Instant – a parsed timestamp under one timezone policy
// ---------------------------------------------------------------------------

/// A parsed timestamp.
///
/// Every instant of a dataset carries the same variant because the timezone
/// policy is fixed for the session. Comparison goes through [`Instant::wall_clock`],
/// which is the UTC clock for `Utc` and the exported local clock for `Naive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instant {
    Utc(DateTime<Utc>),
    Naive(NaiveDateTime),
}

impl Instant {
    /// The clock reading this instant is compared and displayed by.
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            Instant::Utc(dt) => dt.naive_utc(),
            Instant::Naive(dt) => *dt,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.wall_clock().date()
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.wall_clock().time()
    }
}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wall_clock().cmp(&other.wall_clock())
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instant::Utc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            Instant::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
        }
    }
}

// ---------------------------------------------------------------------------
// TimedRow / Record
// ---------------------------------------------------------------------------

/// A row whose timestamp parsed: its instant and the index of its raw row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedRow {
    pub time: Instant,
    pub row: usize,
}

/// One fully populated measurement row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub time: Instant,
    /// True wind speed (kt).
    pub tws: f64,
    /// True wind direction (deg).
    pub twd: f64,
    /// Peak gust (kt).
    pub gust: f64,
}

// ---------------------------------------------------------------------------
// DropCounts – row-level exclusions
// ---------------------------------------------------------------------------

/// How many rows each stage silently excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub unparsable_time: usize,
    pub outside_window: usize,
    pub non_numeric: usize,
}

impl fmt::Display for DropCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bad timestamps, {} outside filter, {} incomplete",
            self.unparsable_time, self.outside_window, self.non_numeric
        )
    }
}
