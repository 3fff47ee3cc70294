//! rf-export: block-format contract for trained surrogate parameters.

pub mod blocks;
pub mod document;
pub mod writer;

pub use blocks::{ExportBlock, ExportSelection};
pub use document::*;
pub use writer::{ExportFormat, read_document, render, write_document, write_rendered};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("The following export blocks are not recognized: {}", names.join(","))]
    UnknownBlocks { names: Vec<String> },

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
