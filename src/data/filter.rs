use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::model::{Instant, TimedRow};
use crate::error::{PipelineError, PipelineResult};

// ---------------------------------------------------------------------------
// Inclusive ranges, validated on construction
// ---------------------------------------------------------------------------

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> PipelineResult<Self> {
        check_order("date", start, end)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Inclusive time-of-day range, applied to every day independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDayRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeOfDayRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> PipelineResult<Self> {
        check_order("time", start, end)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Inclusive range of wall-clock instants (see [`Instant::wall_clock`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl InstantRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> PipelineResult<Self> {
        check_order("instant", start, end)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: &Instant) -> bool {
        let t = instant.wall_clock();
        self.start <= t && t <= self.end
    }
}

fn check_order<T: PartialOrd + std::fmt::Display>(
    what: &'static str,
    start: T,
    end: T,
) -> PipelineResult<()> {
    if start > end {
        return Err(PipelineError::InvertedFilterRange {
            what,
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filter window
// ---------------------------------------------------------------------------

/// Which kind of window the session filters by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    DateOnly,
    #[default]
    DateAndTimeOfDay,
    InstantRange,
}

/// An active, validated filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterWindow {
    DateOnly {
        dates: DateRange,
    },
    /// Date bound and time-of-day bound must both hold.
    DateAndTimeOfDay {
        dates: DateRange,
        times: TimeOfDayRange,
    },
    InstantRange(InstantRange),
}

impl FilterWindow {
    pub fn matches(&self, instant: &Instant) -> bool {
        match self {
            FilterWindow::DateOnly { dates } => dates.contains(instant.date()),
            FilterWindow::DateAndTimeOfDay { dates, times } => {
                dates.contains(instant.date()) && times.contains(instant.time_of_day())
            }
            FilterWindow::InstantRange(range) => range.contains(instant),
        }
    }
}

/// Rows whose instant lies in `window`, in input order.
pub fn filter_rows(rows: &[TimedRow], window: &FilterWindow) -> Vec<TimedRow> {
    rows.iter()
        .filter(|r| window.matches(&r.time))
        .copied()
        .collect()
}

// ---------------------------------------------------------------------------
// Filter inputs – the plain values the side panel edits
// ---------------------------------------------------------------------------

/// Raw filter values as edited in the UI, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterInputs {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_instant: NaiveDateTime,
    pub end_instant: NaiveDateTime,
}

impl Default for FilterInputs {
    fn default() -> Self {
        let epoch = NaiveDateTime::default();
        Self {
            start_date: epoch.date(),
            end_date: epoch.date(),
            start_time: day_start(),
            end_time: day_end(),
            start_instant: epoch,
            end_instant: epoch,
        }
    }
}

impl FilterInputs {
    /// Inputs that cover every row: first to last date, whole day, first to
    /// last instant.
    pub fn spanning(rows: &[TimedRow]) -> Self {
        let first = rows.iter().map(|r| r.time.wall_clock()).min();
        let last = rows.iter().map(|r| r.time.wall_clock()).max();
        match (first, last) {
            (Some(first), Some(last)) => Self {
                start_date: first.date(),
                end_date: last.date(),
                start_time: day_start(),
                end_time: day_end(),
                start_instant: first,
                end_instant: last,
            },
            _ => Self::default(),
        }
    }

    /// Build the validated window for `mode`. Inverted bounds are rejected.
    pub fn to_window(&self, mode: FilterMode) -> PipelineResult<FilterWindow> {
        match mode {
            FilterMode::DateOnly => Ok(FilterWindow::DateOnly {
                dates: DateRange::new(self.start_date, self.end_date)?,
            }),
            FilterMode::DateAndTimeOfDay => Ok(FilterWindow::DateAndTimeOfDay {
                dates: DateRange::new(self.start_date, self.end_date)?,
                times: TimeOfDayRange::new(self.start_time, self.end_time)?,
            }),
            FilterMode::InstantRange => Ok(FilterWindow::InstantRange(InstantRange::new(
                self.start_instant,
                self.end_instant,
            )?)),
        }
    }
}

fn day_start() -> NaiveTime {
    NaiveTime::default()
}

/// Last representable moment of a day.
fn day_end() -> NaiveTime {
    end_of_minute(23, 59).unwrap_or_default()
}

/// The last nanosecond of `hour:minute`, so an end bound set in whole
/// minutes still covers rows stamped with seconds.
pub fn end_of_minute(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_nano_opt(hour, minute, 59, 999_999_999)
}
