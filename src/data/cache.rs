use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use super::error::LoadError;
use super::loader::load_file;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Load-once dataset cache
// ---------------------------------------------------------------------------

/// Memoized loader for a fixed source file.
///
/// The first successful [`get_or_load`](Self::get_or_load) publishes the dataset;
/// every later call returns the same `Arc` without touching the disk. A failed
/// load publishes nothing, so the next call retries. If two threads race on the
/// first load, both read the file but only one instance is ever published and
/// both callers receive it.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceLock<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    /// Source file this cache reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a dataset has already been published.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the cached dataset, loading it on first use.
    pub fn get_or_load(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(ds) = self.cell.get() {
            return Ok(Arc::clone(ds));
        }
        let loaded = Arc::new(load_file(&self.path)?);
        log::info!(
            "Loaded {} employee records with {} columns from {}",
            loaded.len(),
            loaded.columns.len(),
            self.path.display()
        );
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }
}
