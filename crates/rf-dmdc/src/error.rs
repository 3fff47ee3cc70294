//! Error types for DMDc training, evaluation and export.

use rf_core::SampleId;
use rf_core::error::RfError;
use rf_export::ExportError;
use rf_linalg::LinalgError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DmdcError {
    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Shape error: {what}")]
    Shape { what: String },

    #[error("The R matrix is singular for sample {sample} (effective rank {rank}); check the singularity of [X1; U] or adjust the SVD rank")]
    SingularR { sample: SampleId, rank: usize },

    #[error("Model is not trained")]
    NotTrained,

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Data error: {0}")]
    Data(#[from] RfError),
}

pub type DmdcResult<T> = Result<T, DmdcError>;

impl DmdcError {
    pub(crate) fn config(what: impl Into<String>) -> Self {
        DmdcError::Config { what: what.into() }
    }

    pub(crate) fn shape(what: impl Into<String>) -> Self {
        DmdcError::Shape { what: what.into() }
    }
}
