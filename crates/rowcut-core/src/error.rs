//! Error types for rowcut

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowcutError {
    // Pipeline preconditions
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    // Geometry errors
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    // Format errors
    #[error("Unsupported format '{extension}'. Supported: {supported:?}")]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error("{format} error: {message}")]
    FormatError { format: String, message: String },

    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    // CRS errors
    #[error("Projection error: {reason}")]
    Projection { reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, RowcutError>;
