//! Dense linear algebra used by the DMDc identifier.
//!
//! This crate provides the rank-controlled singular value decomposition, the
//! QR-based least-squares step that avoids inverting the snapshot matrix, and
//! a full pseudoinverse for the output map.

pub mod error;
pub mod lstsq;
pub mod pinv;
pub mod svd;

pub use error::{LinalgError, LinalgResult};
pub use lstsq::projected_least_squares;
pub use pinv::pseudo_inverse;
pub use svd::{RankPolicy, TruncatedSvd, truncated_svd};
