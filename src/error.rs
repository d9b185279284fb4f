use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole load. Row-level chemistry problems never end
/// up here; they are reported through [`crate::batch::RowOutcome`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{column}' not found in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// An exception raised inside RDKit that is not one of the handled
    /// parse or standardization failures
    #[error("python error: {0}")]
    Python(#[from] pyo3::PyErr),
}

pub type Result<T> = std::result::Result<T, Error>;
