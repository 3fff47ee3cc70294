//! Error types for linear algebra operations.

use thiserror::Error;

/// Errors that can occur while factorizing or solving.
#[derive(Error, Debug)]
pub enum LinalgError {
    #[error("Invalid rank policy: {what}")]
    InvalidRank { what: String },

    #[error("SVD did not converge for a {rows}x{cols} matrix")]
    SvdFailed { rows: usize, cols: usize },

    #[error("The R factor is singular (effective rank {rank}); check the singularity of [X1; U]")]
    SingularR { rank: usize },

    #[error("Dimension mismatch: {what}")]
    Dimension { what: String },
}

pub type LinalgResult<T> = Result<T, LinalgError>;
