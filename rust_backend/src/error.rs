use std::path::PathBuf;

use crate::core::domain::Variable;

/// Result type for engine operations
pub type MetoceanResult<T> = Result<T, MetoceanError>;

/// Error type for engine operations.
///
/// Every variant is fatal for the run that raised it. Empty table cells are
/// not errors; they are reported as `NaN` values inside the tables.
#[derive(Debug, thiserror::Error)]
pub enum MetoceanError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Schema error in {}: {message}", file.display())]
    Schema { file: PathBuf, message: String },

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Column {0} is not present in the dataset")]
    MissingColumn(Variable),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MetoceanError {
    pub(crate) fn schema(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetoceanError::Schema {
            file: file.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MetoceanError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<String> for MetoceanError {
    fn from(s: String) -> Self {
        MetoceanError::Precondition(s)
    }
}

impl From<&str> for MetoceanError {
    fn from(s: &str) -> Self {
        MetoceanError::Precondition(s.to_string())
    }
}
