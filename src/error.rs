use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::FormatError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("binary format error: {0}")]
    Format(#[from] FormatError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid schedule document: {0}")]
    InvalidDocument(String),

    #[error("unsupported file format {path:?}: use .json, .hbin or .bin")]
    UnsupportedFormat { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
