use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("Failed to open document {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a valid docx package: {0}")]
    Package(String),

    #[error("Failed to parse {part}: {detail}")]
    Parse { part: String, detail: String },

    #[error("Failed to save document {path}: {detail}")]
    Save { path: PathBuf, detail: String },

    #[error("Document not found for id {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
