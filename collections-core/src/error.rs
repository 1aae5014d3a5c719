use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Conflict: {0}")]
    Conflict(anyhow::Error),

    /// A secondary write failed after the primary write succeeded. The
    /// primary write has already been compensated when this is returned.
    #[error("Partial write failure in step '{step}': {source}")]
    PartialWrite {
        step: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("No clients matched the filter; nothing to export")]
    EmptyExport,

    #[error("Storage error: {0}")]
    Storage(anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}
