use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::data::cache::DatasetCache;
use crate::data::filter::{self, FilterCriteria, InclusiveRange};
use crate::data::model::{CellValue, Dataset};
use crate::export;
use crate::view_model::{self, RenderOptions, ViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Macro,
    Micro,
    Data,
}

/// One session's UI state, independent of rendering.
pub struct AppState {
    /// Load-once source of the current dataset.
    pub cache: DatasetCache,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// This session's filter selections.
    pub criteria: FilterCriteria,

    /// Outputs for the current criteria, recomputed on every change.
    pub view: Option<ViewModel>,

    pub render_options: RenderOptions,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            cache: DatasetCache::new(&config.data_path),
            dataset: None,
            criteria: FilterCriteria::default(),
            view: None,
            render_options: config.render_options(),
            tab: Tab::default(),
            status_message: None,
        }
    }

    /// Load (or fetch the cached) dataset and reset the filters to their defaults.
    pub fn load(&mut self) {
        if self.cache.is_loaded() {
            log::debug!("Reusing cached dataset {}", self.cache.path().display());
        }
        match self.cache.get_or_load() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.cache.path().display());
                self.status_message = Some(format!("Load failed: {e}"));
            }
        }
    }

    /// Switch the session to another source file.
    ///
    /// The current source, dataset and filters are kept when the new file fails to load.
    pub fn open(&mut self, path: PathBuf) {
        let cache = DatasetCache::new(path);
        match cache.get_or_load() {
            Ok(dataset) => {
                self.cache = cache;
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", cache.path().display());
                self.status_message = Some(format!("Load failed: {e}"));
            }
        }
    }

    /// Ingest a loaded dataset and initialise the filters.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        if dataset.is_empty() {
            log::warn!("{} holds no employee records", self.cache.path().display());
        }
        self.criteria = FilterCriteria::defaults(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    pub fn source_path(&self) -> &Path {
        self.cache.path()
    }

    /// Recompute every output from the dataset and current criteria.
    pub fn refresh(&mut self) {
        self.view = self
            .dataset
            .as_deref()
            .map(|ds| view_model::render_with(ds, &self.criteria, &self.render_options));
    }

    /// Toggle a single value in a column's selection.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        self.criteria.toggle(column, value);
        self.refresh();
    }

    /// Select every observed value of a column.
    pub fn select_all(&mut self, column: &str) {
        let all = self
            .dataset
            .as_ref()
            .and_then(|ds| ds.unique_values.get(column).cloned())
            .unwrap_or_default();
        self.criteria.select(column, all);
        self.refresh();
    }

    /// Deselect all values in a column: nothing passes.
    pub fn select_none(&mut self, column: &str) {
        self.criteria.select(column, BTreeSet::new());
        self.refresh();
    }

    /// Set an inclusive range; bounds given in either order.
    pub fn set_range(&mut self, column: &str, a: f64, b: f64) {
        self.criteria
            .set_range(column, InclusiveRange::new(a.min(b), a.max(b)));
        self.refresh();
    }

    /// Suggested file name for exporting the current view.
    pub fn export_file_name(&self) -> String {
        export::export_file_name(self.source_path())
    }

    /// Write the currently filtered rows to `path`.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let dataset = self.dataset.as_deref().context("no dataset loaded")?;
        let view = filter::apply(dataset, &self.criteria);
        export::save_csv(&view, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn loaded_state(dir: &tempfile::TempDir) -> AppState {
        let path = dir.path().join("EA.csv");
        std::fs::write(&path, fixtures::csv_text(&fixtures::sample_rows())).unwrap();
        let config = AppConfig {
            data_path: path,
            ..AppConfig::default()
        };
        let mut state = AppState::new(&config);
        state.load();
        state
    }

    fn rows(state: &AppState) -> usize {
        state.view.as_ref().map(ViewModel::row_count).unwrap_or(0)
    }

    #[test]
    fn load_initialises_filters_and_view() {
        let dir = tempfile::tempdir().unwrap();
        let state = loaded_state(&dir);
        assert!(state.status_message.is_none());
        assert_eq!(rows(&state), 10);
        assert_eq!(state.criteria.active_count(), 4);
        assert_eq!(state.export_file_name(), "filtered_EA.csv");
    }

    #[test]
    fn every_filter_change_recomputes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        let sales = CellValue::String("Sales".into());

        state.toggle_filter_value("Department", &sales);
        assert_eq!(rows(&state), 6);
        state.select_none("Gender");
        assert_eq!(rows(&state), 0);
        state.select_all("Gender");
        state.select_all("Department");
        assert_eq!(rows(&state), 10);
        state.set_range("Age", 40.0, 30.0);
        assert_eq!(state.criteria.ranges["Age"], InclusiveRange::new(30.0, 40.0));
        assert_eq!(rows(&state), 6);
    }

    #[test]
    fn load_failure_is_reported() {
        let config = AppConfig {
            data_path: "/no/such/dir/EA.csv".into(),
            ..AppConfig::default()
        };
        let mut state = AppState::new(&config);
        state.load();
        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Load failed"));
        assert!(state.export_to(Path::new("/tmp/out.csv")).is_err());
    }

    #[test]
    fn failed_open_keeps_the_current_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        state.set_range("Age", 30.0, 37.0);

        state.open(dir.path().join("missing_staff.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Load failed"));
        assert_eq!(state.source_path(), dir.path().join("EA.csv").as_path());
        assert_eq!(state.export_file_name(), "filtered_EA.csv");
        assert_eq!(rows(&state), 5);
        assert!(state.dataset.is_some());
    }

    #[test]
    fn open_switches_to_the_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        let other = dir.path().join("staff.csv");
        std::fs::write(&other, fixtures::csv_text(&fixtures::hundred_rows())).unwrap();

        state.open(other.clone());
        assert!(state.status_message.is_none());
        assert_eq!(state.source_path(), other.as_path());
        assert_eq!(state.export_file_name(), "filtered_staff.csv");
        assert_eq!(rows(&state), 100);
    }

    #[test]
    fn export_writes_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        state.set_range("Age", 30.0, 37.0);
        let out = dir.path().join(state.export_file_name());
        state.export_to(&out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 6);
    }
}
