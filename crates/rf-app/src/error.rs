//! Error types for the rf-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("ROM definition error: {0}")]
    Project(String),

    #[error("ROM validation failed: {0}")]
    Validation(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write output file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl From<rf_project::ProjectError> for AppError {
    fn from(err: rf_project::ProjectError) -> Self {
        match err {
            rf_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<rf_project::ValidationError> for AppError {
    fn from(err: rf_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<rf_dmdc::DmdcError> for AppError {
    fn from(err: rf_dmdc::DmdcError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<rf_export::ExportError> for AppError {
    fn from(err: rf_export::ExportError) -> Self {
        AppError::Export(err.to_string())
    }
}

impl From<rf_core::RfError> for AppError {
    fn from(err: rf_core::RfError) -> Self {
        AppError::Data(err.to_string())
    }
}

impl From<rf_linalg::LinalgError> for AppError {
    fn from(err: rf_linalg::LinalgError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
