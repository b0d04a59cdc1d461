use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::columns::ColumnNames;
use crate::data::filter::FilterMode;
use crate::data::loader::SourceEncoding;
use crate::data::pipeline::IngestOptions;
use crate::data::time::TimezonePolicy;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WINDVIEW_CONFIG";
/// Config file looked up in the working directory when the variable is unset.
pub const CONFIG_FILE: &str = "windview.json";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Deployment settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_name: String,
    /// Chart title; `{model}` is replaced with the model name.
    pub title_template: String,
    pub filter_mode: FilterMode,
    pub timezone: TimezonePolicy,
    pub encoding: SourceEncoding,
    pub columns: ColumnNames,
    pub show_table: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_name: "UM-Global".to_string(),
            title_template: "TWS/Direction\nModels: {model}".to_string(),
            filter_mode: FilterMode::default(),
            timezone: TimezonePolicy::default(),
            encoding: SourceEncoding::default(),
            columns: ColumnNames::default(),
            show_table: true,
        }
    }
}

impl ViewerConfig {
    /// Ingest parameters derived from this config.
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            encoding: self.encoding,
            timezone: self.timezone,
            columns: self.columns.clone(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing viewer config")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Load from `$WINDVIEW_CONFIG`, else `./windview.json`, else defaults.
    ///
    /// A file that exists but does not parse is logged and ignored.
    pub fn load() -> Self {
        Self::load_from(std::env::var_os(CONFIG_ENV).map(PathBuf::from), Path::new(CONFIG_FILE))
    }

    /// Lookup behind [`ViewerConfig::load`]: `explicit` wins, then `fallback`
    /// if it exists, then defaults.
    fn load_from(explicit: Option<PathBuf>, fallback: &Path) -> Self {
        let path = explicit.or_else(|| Some(fallback.to_path_buf()).filter(|p| p.exists()));

        let Some(path) = path else {
            log::debug!("no config file, using defaults");
            return Self::default();
        };

        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e:#}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let cfg = ViewerConfig::from_json(
            r#"{
                "model_name": "ECMWF",
                "filter_mode": "instant_range",
                "timezone": "utc",
                "encoding": "auto",
                "columns": { "gust": "kt.2" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.model_name, "ECMWF");
        assert_eq!(cfg.filter_mode, FilterMode::InstantRange);
        assert_eq!(cfg.timezone, TimezonePolicy::Utc);
        assert_eq!(cfg.encoding, SourceEncoding::Auto);
        assert_eq!(cfg.columns.gust, "kt.2");
        assert_eq!(cfg.columns.wind_speed, "kt");
        assert!(cfg.show_table);

        let opts = cfg.ingest_options();
        assert_eq!(opts.columns.gust, "kt.2");
        assert_eq!(opts.timezone, TimezonePolicy::Utc);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(ViewerConfig::from_json(r#"{ "filter_mode": "weekly" }"#).is_err());
    }

    fn write_config(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("windview-{}-{name}", std::process::id()));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn explicit_path_wins_over_working_directory_file() {
        let explicit = write_config("explicit.json", r#"{ "model_name": "ICON" }"#);
        let fallback = write_config("fallback.json", r#"{ "model_name": "GFS" }"#);
        let cfg = ViewerConfig::load_from(Some(explicit.clone()), &fallback);
        assert_eq!(cfg.model_name, "ICON");

        let cfg = ViewerConfig::load_from(None, &fallback);
        assert_eq!(cfg.model_name, "GFS");

        std::fs::remove_file(explicit).unwrap();
        std::fs::remove_file(fallback).unwrap();
    }

    #[test]
    fn no_file_means_defaults() {
        let missing = std::env::temp_dir().join("windview-does-not-exist.json");
        assert_eq!(ViewerConfig::load_from(None, &missing), ViewerConfig::default());
        assert_eq!(
            ViewerConfig::load_from(Some(missing.clone()), &missing),
            ViewerConfig::default()
        );
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let bad = write_config("bad.json", r#"{ "filter_mode": "weekly" "#);
        assert_eq!(ViewerConfig::load_from(Some(bad.clone()), &bad), ViewerConfig::default());
        assert_eq!(ViewerConfig::load_from(None, &bad), ViewerConfig::default());
        std::fs::remove_file(bad).unwrap();
    }

    #[test]
    fn default_round_trips_through_json() {
        let text = serde_json::to_string(&ViewerConfig::default()).unwrap();
        assert_eq!(ViewerConfig::from_json(&text).unwrap(), ViewerConfig::default());
    }
}
