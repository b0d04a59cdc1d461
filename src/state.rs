use std::path::Path;

use crate::color::SpeedScale;
use crate::config::ViewerConfig;
use crate::data::filter::FilterInputs;
use crate::data::pipeline::{apply, Dataset, FilteredView};
use crate::data::series::{ChartSeries, TableView};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Filter values as currently edited in the side panel.
    pub filters: FilterInputs,

    /// Result of the last successful filter run (cleared on error).
    pub view: Option<FilteredView>,

    /// Chart and table data derived from `view`.
    pub series: ChartSeries,
    pub table: TableView,
    pub speed_scale: Option<SpeedScale>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            dataset: None,
            filters: FilterInputs::default(),
            view: None,
            series: ChartSeries::default(),
            table: TableView::default(),
            speed_scale: None,
            status_message: None,
        }
    }

    /// Read and ingest a file; on failure the previous dataset is dropped
    /// and the error is shown.
    pub fn load_path(&mut self, path: &Path) {
        let options = self.config.ingest_options();
        match crate::data::loader::load_file(path, &options) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {}: {} rows, {} with usable timestamps, columns {:?}",
                    path.display(),
                    dataset.rows_read(),
                    dataset.timed.len(),
                    dataset.table.headers
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                if let Some(col) = e
                    .downcast_ref::<PipelineError>()
                    .and_then(PipelineError::missing_column)
                {
                    log::error!("{} lacks required column '{col}'", path.display());
                }
                log::error!("Failed to load file: {e:#}");
                self.clear_dataset();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Install a freshly ingested dataset and filter it over its full span.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = FilterInputs::spanning(&dataset.timed);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    fn clear_dataset(&mut self) {
        self.dataset = None;
        self.clear_view();
    }

    fn clear_view(&mut self) {
        self.view = None;
        self.series = ChartSeries::default();
        self.table = TableView::default();
        self.speed_scale = None;
    }

    /// Rerun filter + projection on the full dataset with the current inputs.
    ///
    /// An inverted range clears the chart and table and reports the error.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };

        let result = self
            .filters
            .to_window(self.config.filter_mode)
            .and_then(|window| apply(ds, &window));

        match result {
            Ok(view) => {
                self.series = ChartSeries::from_records(&view.records);
                self.table = TableView::from_records(&view.records);
                self.speed_scale = self.table.tws_range.map(|(lo, hi)| SpeedScale::new(lo, hi));
                self.view = Some(view);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Filter rejected: {e}");
                self.clear_view();
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Current chart title.
    pub fn title(&self) -> String {
        crate::data::series::chart_title(&self.config.title_template, &self.config.model_name)
    }
}
