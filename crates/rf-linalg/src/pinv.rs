//! Moore-Penrose pseudoinverse.

use crate::error::{LinalgError, LinalgResult};
use nalgebra::DMatrix;
use rf_core::Real;

/// Singular values below `CUTOFF_FACTOR * eps * s_max` are treated as zero.
const CUTOFF_FACTOR: Real = 1e6;

/// Full (untruncated) pseudoinverse of `m`, shape `cols x rows`.
///
/// Only numerically zero singular values are discarded; no rank policy applies.
pub fn pseudo_inverse(m: &DMatrix<Real>) -> LinalgResult<DMatrix<Real>> {
    let (rows, cols) = m.shape();
    if rows == 0 || cols == 0 {
        return Ok(DMatrix::zeros(cols, rows));
    }

    let svd = m
        .clone()
        .try_svd(true, true, Real::EPSILON, 0)
        .ok_or(LinalgError::SvdFailed { rows, cols })?;
    let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
        return Err(LinalgError::SvdFailed { rows, cols });
    };

    let s_max = svd.singular_values.iter().copied().fold(0.0, Real::max);
    let cutoff = CUTOFF_FACTOR * Real::EPSILON * s_max;

    let mut pinv = DMatrix::zeros(cols, rows);
    for (k, &sigma) in svd.singular_values.iter().enumerate() {
        if sigma > cutoff {
            pinv += v_t.row(k).transpose() * u.column(k).transpose() / sigma;
        }
    }
    Ok(pinv)
}
