use std::io;
use std::path::PathBuf;

/// Represents the different types of errors that can occur while loading data,
/// configuring, building or training the classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// A training or test file could not be opened or read
    #[error("Data error: cannot read {}: {source}", .path.display())]
    DataError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A record stream could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred while reading or checking the configuration
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl ClassifierError {
    /// True when the error comes from a missing or unreadable data source.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::DataError { .. })
    }
}
