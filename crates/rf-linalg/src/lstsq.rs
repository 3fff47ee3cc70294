//! QR-based least-squares step on a truncated SVD basis.

use crate::error::{LinalgError, LinalgResult};
use crate::svd::TruncatedSvd;
use nalgebra::DMatrix;
use rf_core::Real;

/// Solve for `beta = rhs * V * R^-1 * Q^T` where `Q R` factors the diagonal of
/// kept singular values.
///
/// `beta * U^T` is then the least-squares map from the decomposed matrix to
/// `rhs`. `R^-1 Q^T` is obtained by back substitution, never by forming an inverse.
pub fn projected_least_squares(
    rhs: &DMatrix<Real>,
    svd: &TruncatedSvd,
) -> LinalgResult<DMatrix<Real>> {
    let rank = svd.rank();
    if rhs.ncols() != svd.v.nrows() {
        return Err(LinalgError::Dimension {
            what: format!(
                "rhs has {} columns but the decomposed matrix has {}",
                rhs.ncols(),
                svd.v.nrows()
            ),
        });
    }
    // Nothing survived truncation: there is no basis to solve on.
    if rank == 0 {
        return Err(LinalgError::SingularR { rank });
    }

    let sigma = DMatrix::from_diagonal(&svd.s);
    let qr = sigma.qr();
    let q = qr.q();
    let r = qr.r();

    if r.determinant() == 0.0 {
        return Err(LinalgError::SingularR { rank });
    }

    let r_inv_qt = r
        .solve_upper_triangular(&q.transpose())
        .ok_or(LinalgError::SingularR { rank })?;

    Ok(rhs * &svd.v * r_inv_qt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svd::{RankPolicy, truncated_svd};

    #[test]
    fn recovers_exact_linear_map() {
        // rhs = M * omega for a known M.
        let omega = DMatrix::from_row_slice(2, 4, &[1.0, 0.5, -0.2, 0.3, 0.4, 1.1, 0.7, -0.6]);
        let map = DMatrix::from_row_slice(1, 2, &[0.9, 0.5]);
        let rhs = &map * &omega;

        let svd = truncated_svd(&omega, RankPolicy::Full).unwrap();
        let beta = projected_least_squares(&rhs, &svd).unwrap();
        let recovered = beta * svd.u.transpose();

        assert!((recovered - map).abs().max() < 1e-10);
    }

    #[test]
    fn zero_matrix_is_singular() {
        let omega = DMatrix::<Real>::zeros(2, 3);
        let rhs = DMatrix::<Real>::zeros(1, 3);
        let svd = truncated_svd(&omega, RankPolicy::Full).unwrap();
        assert_eq!(svd.rank(), 0);
        let err = projected_least_squares(&rhs, &svd).unwrap_err();
        assert!(matches!(err, LinalgError::SingularR { rank: 0 }));
    }

    #[test]
    fn column_mismatch_rejected() {
        let omega = DMatrix::<Real>::identity(2, 2);
        let rhs = DMatrix::<Real>::zeros(1, 3);
        let svd = truncated_svd(&omega, RankPolicy::Full).unwrap();
        assert!(matches!(
            projected_least_squares(&rhs, &svd),
            Err(LinalgError::Dimension { .. })
        ));
    }
}
