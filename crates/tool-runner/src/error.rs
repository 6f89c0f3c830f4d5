//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
