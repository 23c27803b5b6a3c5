//! Top-level error types for the command line front end.
//!
//! Converter errors are wrapped as-is; recovery text comes from
//! [`crate::converter::Error::hint`] so every failure ends with a next step.

use thiserror::Error;

/// Result type alias for front end operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Converter errors
    #[error("{0}")]
    Converter(#[from] crate::converter::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl AppError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            AppError::Converter(e) => match e.hint() {
                Some(hint) => vec![hint],
                None => vec!["Check the error message above for specific details".to_string()],
            },
            AppError::Cli(CliError::InvalidArguments { .. }) => {
                vec!["Run with --help to see the accepted options".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
