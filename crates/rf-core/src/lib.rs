//! rf-core: stable foundation for romflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact sample ids for per-sample model storage)
//! - batch (samples x timesteps x columns arrays)
//! - timing (elapsed-time reporting through tracing)
//! - error (shared error types)

pub mod batch;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use batch::SeriesBatch;
pub use error::{RfError, RfResult};
pub use ids::*;
pub use numeric::*;
