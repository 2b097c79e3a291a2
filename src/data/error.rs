use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be loaded. Fatal for the dataset in question.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file extension: .{0}")]
    Unsupported(String),

    #[error("malformed dataset {}: {source:#}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: Attrition value '{value}' is not 0/1 or true/false")]
    InvalidAttrition { row: usize, value: String },
}
