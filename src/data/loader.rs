use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};

use super::columns::{mangle_duplicate_headers, normalize_columns};
use super::model::RawTable;
use super::pipeline::{ingest, Dataset, IngestOptions};
use crate::error::PipelineResult;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a wind export from disk and run it through ingestion.
///
/// I/O failures carry file context; schema and CSV failures come through
/// as [`crate::error::PipelineError`] inside the `anyhow` chain.
pub fn load_file(path: &Path, options: &IngestOptions) -> Result<Dataset> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let dataset = ingest(&bytes, options)?;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Text decoding
// ---------------------------------------------------------------------------

/// Character encoding of the exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    /// Single-byte Western code page; every byte maps to one character.
    #[default]
    Latin1,
    /// UTF-8, with invalid sequences replaced.
    Utf8,
    /// UTF-8 when the bytes are valid UTF-8, otherwise Latin-1.
    Auto,
}

/// Decode file bytes to text. A UTF-8 byte-order mark is dropped.
pub fn decode(bytes: &[u8], encoding: SourceEncoding) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let codec = match encoding {
        SourceEncoding::Latin1 => WINDOWS_1252,
        SourceEncoding::Utf8 => UTF_8,
        SourceEncoding::Auto => {
            if std::str::from_utf8(bytes).is_ok() {
                UTF_8
            } else {
                WINDOWS_1252
            }
        }
    };
    let (text, had_errors) = codec.decode_without_bom_handling(bytes);
    if had_errors {
        log::warn!("{} decoding replaced invalid byte sequences", codec.name());
    }
    text
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, comma-delimited records.
/// Records may be shorter or longer than the header.
///
/// Headers go through duplicate mangling, then degree-sign repair.
pub fn read_table(text: &str) -> PipelineResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let headers = normalize_columns(&mangle_duplicate_headers(&raw_headers));

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}
