use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Fatal errors raised by the ingest / filter pipeline.
///
/// Row-level problems (unparsable timestamps, non-numeric measurements) are
/// not errors: those rows are dropped and counted in [`crate::data::model::DropCounts`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required measurement column is absent after header normalization.
    #[error("Column '{0}' not found!")]
    MissingColumn(String),

    /// The timestamp column is absent after header normalization.
    #[error("Column '{0}' not found!")]
    TimeColumnMissing(String),

    /// A user-supplied range whose start lies after its end.
    #[error("Invalid {what} range: start {start} is after end {end}")]
    InvertedFilterRange {
        what: &'static str,
        start: String,
        end: String,
    },

    /// The file is not readable as CSV at all.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    /// Name of the missing column, if this is one of the schema errors.
    pub fn missing_column(&self) -> Option<&str> {
        match self {
            PipelineError::MissingColumn(name) | PipelineError::TimeColumnMissing(name) => {
                Some(name)
            }
            _ => None,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
