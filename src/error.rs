use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be produced. Every variant is terminal for the
/// current load: no partial dataset is kept.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No upload was given and the fallback file could not be read.
    #[error("No data file found at '{}'. Open a .csv or .xlsx file instead.", .path.display())]
    MissingFallback {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents could not be parsed.
    #[error("Could not parse '{name}': {reason}")]
    Malformed { name: String, reason: String },

    /// The file has no header row at all.
    #[error("'{0}' contains no header row")]
    Empty(String),

    /// A column the dashboard needs is absent after header trimming.
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
}

impl LoadError {
    pub(crate) fn malformed(name: &str, reason: impl ToString) -> Self {
        LoadError::Malformed {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
