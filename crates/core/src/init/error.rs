//! Error types for scaffolding operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scaffolding operations.
pub type InitResult<T> = Result<T, InitError>;

/// Errors that can occur while generating a starter project.
#[derive(Debug, Error)]
pub enum InitError {
    /// A bundle configuration already exists and force flag was not set.
    #[error("A bundle configuration already exists at {0:?}. Use --force to overwrite.")]
    ConfigExists(PathBuf),

    /// A required template file was not found in embedded assets.
    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    /// Failed to create a directory.
    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
