use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

// ---------------------------------------------------------------------------
// Header repair
// ---------------------------------------------------------------------------

/// UTF-8 degree sign (`C2 B0`) read back through a single-byte code page.
const DEGREE_MOJIBAKE: &str = "\u{00C2}\u{00B0}";
const DEGREE: &str = "\u{00B0}";

/// Replace degree-sign artifacts in a column name with the literal `deg`.
///
/// The two-character mojibake goes first so it becomes a single `deg`.
/// Idempotent: the output never contains either pattern.
pub fn normalize_column_name(name: &str) -> String {
    name.replace(DEGREE_MOJIBAKE, "deg").replace(DEGREE, "deg")
}

/// Apply [`normalize_column_name`] to every header.
pub fn normalize_columns<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|n| normalize_column_name(n.as_ref()))
        .collect()
}

/// Disambiguate repeated header names: the first keeps its name, later
/// copies become `name.1`, `name.2`, ..., skipping names already taken.
///
/// Exports carry several columns titled `kt`; this is what makes the gust
/// column addressable as `kt.3`.
pub fn mangle_duplicate_headers<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        match counts.get_mut(name) {
            None => {
                counts.insert(name.to_string(), 0);
                out.push(name.to_string());
            }
            Some(count) => {
                let mut candidate;
                loop {
                    *count += 1;
                    candidate = format!("{name}.{count}");
                    if !taken.contains(&candidate) {
                        break;
                    }
                }
                taken.insert(candidate.clone());
                out.push(candidate);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Canonical schema
// ---------------------------------------------------------------------------

/// Source column names for the four logical fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub timestamp: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub gust: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            timestamp: "W. Europe Daylight Time".to_string(),
            wind_speed: "kt".to_string(),
            wind_direction: "Wind10m deg".to_string(),
            gust: "kt.3".to_string(),
        }
    }
}

impl ColumnNames {
    /// The three measurement columns in projection order: TWS, TWD, Gust.
    pub fn measurements(&self) -> [&str; 3] {
        [&self.wind_speed, &self.wind_direction, &self.gust]
    }
}

/// Header positions of the four logical fields in a given table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub timestamp: usize,
    pub wind_speed: usize,
    pub wind_direction: usize,
    pub gust: usize,
}

impl Schema {
    /// Locate every logical column, failing on the first one absent.
    ///
    /// The timestamp column is checked first and reported as
    /// [`PipelineError::TimeColumnMissing`].
    pub fn resolve(headers: &[String], columns: &ColumnNames) -> PipelineResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let timestamp = find(&columns.timestamp)
            .ok_or_else(|| PipelineError::TimeColumnMissing(columns.timestamp.clone()))?;
        let [wind_speed, wind_direction, gust] = resolve_measurements(headers, columns)?;

        Ok(Self {
            timestamp,
            wind_speed,
            wind_direction,
            gust,
        })
    }
}

/// Positions of TWS, TWD and Gust, or `MissingColumn` for the first absent.
pub fn resolve_measurements(headers: &[String], columns: &ColumnNames) -> PipelineResult<[usize; 3]> {
    let mut idx = [0usize; 3];
    for (slot, name) in idx.iter_mut().zip(columns.measurements()) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?;
    }
    Ok(idx)
}
