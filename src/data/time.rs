use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{Instant, RawTable, TimedRow};

// ---------------------------------------------------------------------------
// Timezone policy
// ---------------------------------------------------------------------------

/// How parsed timestamps are bound to a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezonePolicy {
    /// Wall-clock time of the exported zone. Offsets in the text are dropped.
    #[default]
    NaiveLocal,
    /// Absolute instants. Offset-free text is read as UTC.
    Utc,
}

// ---------------------------------------------------------------------------
// Single value parsing
// ---------------------------------------------------------------------------

/// Offset-bearing layouts (tried after RFC 3339).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

/// Naive date-time layouts, in order of preference.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse one timestamp cell. Returns `None` for empty or unrecognised text.
pub fn parse_instant(text: &str, policy: TimezonePolicy) -> Option<Instant> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(dt) = parse_with_offset(text) {
        return Some(match policy {
            TimezonePolicy::Utc => Instant::Utc(dt.with_timezone(&Utc)),
            TimezonePolicy::NaiveLocal => Instant::Naive(dt.naive_local()),
        });
    }

    let naive = parse_naive(text)?;
    Some(match policy {
        TimezonePolicy::Utc => Instant::Utc(naive.and_utc()),
        TimezonePolicy::NaiveLocal => Instant::Naive(naive),
    })
}

fn parse_with_offset(text: &str) -> Option<DateTime<chrono::FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    // A trailing `Z` outside strict RFC 3339 (e.g. space separator, no seconds).
    if let Some(stripped) = text.strip_suffix('Z') {
        if let Some(naive) = parse_naive(stripped) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ---------------------------------------------------------------------------
// Column parsing
// ---------------------------------------------------------------------------

/// Result of parsing the timestamp column of a table.
#[derive(Debug, Clone, Default)]
pub struct TimeParse {
    /// Parsable rows, in source order.
    pub rows: Vec<TimedRow>,
    /// Rows dropped because the timestamp was empty or unrecognised.
    pub unparsable: usize,
}

/// Parse the timestamp column of every row, keeping source order.
///
/// `column` must be a valid header index; schema resolution runs first.
pub fn parse_times(table: &RawTable, column: usize, policy: TimezonePolicy) -> TimeParse {
    let mut out = TimeParse {
        rows: Vec::with_capacity(table.len()),
        unparsable: 0,
    };
    for row in 0..table.len() {
        match parse_instant(table.cell(row, column), policy) {
            Some(time) => out.rows.push(TimedRow { time, row }),
            None => out.unparsable += 1,
        }
    }
    out
}
