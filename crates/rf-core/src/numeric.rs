use crate::RfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Singular values below this magnitude are always discarded during identification.
pub const SINGULAR_VALUE_FLOOR: Real = 1e-6;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RfError::NonFinite { what, value: v })
    }
}

/// Largest absolute element-wise difference between two equally long slices.
///
/// Returns `Real::INFINITY` when the lengths differ.
pub fn max_abs_diff(a: &[Real], b: &[Real]) -> Real {
    if a.len() != b.len() {
        return Real::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, Real::max)
}
