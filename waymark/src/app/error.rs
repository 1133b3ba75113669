//! Application error types.

use std::fmt;

/// Errors that can occur during application lifecycle.
#[derive(Debug)]
pub enum AppError {
    /// Configuration error.
    Config(String),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            AppError::RuntimeCreation(msg) => {
                write!(f, "Failed to create Tokio runtime: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {}
