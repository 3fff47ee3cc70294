//! Rank-controlled singular value decomposition.

use crate::error::{LinalgError, LinalgResult};
use nalgebra::{DMatrix, DVector};
use rf_core::{Real, SINGULAR_VALUE_FLOOR};

/// How many singular components to keep before the magnitude floor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RankPolicy {
    /// Keep every component.
    #[default]
    Full,
    /// Gavish-Donoho optimal hard threshold for an unknown noise level.
    Optimal,
    /// Smallest rank whose cumulative squared-singular-value energy reaches the fraction.
    Energy(Real),
    /// Keep at most this many components.
    Fixed(usize),
}

impl RankPolicy {
    /// Decode the numeric convention used in ROM definitions:
    /// `-1` full, `0` optimal, `(0, 1)` energy fraction, integer `>= 1` fixed rank.
    pub fn from_code(code: Real) -> LinalgResult<Self> {
        if !code.is_finite() {
            return Err(LinalgError::InvalidRank {
                what: format!("non-finite rank code {code}"),
            });
        }
        if code == -1.0 {
            Ok(Self::Full)
        } else if code == 0.0 {
            Ok(Self::Optimal)
        } else if code > 0.0 && code < 1.0 {
            Ok(Self::Energy(code))
        } else if code >= 1.0 && code.fract() == 0.0 {
            Ok(Self::Fixed(code as usize))
        } else {
            Err(LinalgError::InvalidRank {
                what: format!("rank code {code} is not -1, 0, a fraction in (0,1) or a positive integer"),
            })
        }
    }

    /// Inverse of [`RankPolicy::from_code`].
    pub fn code(&self) -> Real {
        match self {
            Self::Full => -1.0,
            Self::Optimal => 0.0,
            Self::Energy(f) => *f,
            Self::Fixed(r) => *r as Real,
        }
    }

    pub fn validate(&self) -> LinalgResult<()> {
        match *self {
            Self::Fixed(0) => Err(LinalgError::InvalidRank {
                what: "fixed rank must be at least 1".to_string(),
            }),
            Self::Energy(f) if !(f > 0.0 && f < 1.0) => Err(LinalgError::InvalidRank {
                what: format!("energy fraction {f} must lie in (0, 1)"),
            }),
            _ => Ok(()),
        }
    }

    /// Number of leading components the policy keeps for descending singular values `s`
    /// of a `rows x cols` matrix.
    pub fn select(&self, s: &[Real], rows: usize, cols: usize) -> usize {
        match *self {
            Self::Full => s.len(),
            Self::Fixed(r) => r.min(s.len()),
            Self::Energy(fraction) => {
                let total: Real = s.iter().map(|v| v * v).sum();
                if total <= 0.0 {
                    return s.len();
                }
                let mut cumulative = 0.0;
                let mut below = 0;
                for v in s {
                    cumulative += v * v / total;
                    if cumulative < fraction {
                        below += 1;
                    } else {
                        break;
                    }
                }
                (below + 1).min(s.len())
            }
            Self::Optimal => {
                if s.is_empty() {
                    return 0;
                }
                let (lo, hi) = (rows.min(cols) as Real, rows.max(cols) as Real);
                let beta = lo / hi;
                let omega = 0.56 * beta.powi(3) - 0.95 * beta.powi(2) + 1.82 * beta + 1.43;
                let tau = median(s) * omega;
                s.iter().filter(|&&v| v > tau).count()
            }
        }
    }
}

fn median(values: &[Real]) -> Real {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Leading singular triplets of a matrix, sorted by descending singular value.
#[derive(Debug, Clone)]
pub struct TruncatedSvd {
    /// Left singular vectors, `rows x rank`.
    pub u: DMatrix<Real>,
    /// Singular values, length `rank`.
    pub s: DVector<Real>,
    /// Right singular vectors, `cols x rank`.
    pub v: DMatrix<Real>,
    /// Rank kept by the policy before the magnitude floor.
    pub policy_rank: usize,
}

impl TruncatedSvd {
    /// Effective rank after the policy and the magnitude floor.
    pub fn rank(&self) -> usize {
        self.s.len()
    }
}

/// Decompose `m`, keep the components selected by `policy`, then drop any singular
/// value below [`SINGULAR_VALUE_FLOOR`].
pub fn truncated_svd(m: &DMatrix<Real>, policy: RankPolicy) -> LinalgResult<TruncatedSvd> {
    policy.validate()?;
    let (rows, cols) = m.shape();

    let svd = m
        .clone()
        .try_svd(true, true, Real::EPSILON, 0)
        .ok_or(LinalgError::SvdFailed { rows, cols })?;
    let (Some(u_full), Some(v_t_full)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
        return Err(LinalgError::SvdFailed { rows, cols });
    };

    let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
    order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));
    let sorted: Vec<Real> = order.iter().map(|&i| svd.singular_values[i]).collect();

    let policy_rank = policy.select(&sorted, rows, cols);
    let rank = sorted[..policy_rank]
        .iter()
        .take_while(|&&v| v >= SINGULAR_VALUE_FLOOR)
        .count();

    let u = DMatrix::from_fn(rows, rank, |r, c| u_full[(r, order[c])]);
    let v = DMatrix::from_fn(cols, rank, |r, c| v_t_full[(order[c], r)]);
    let s = DVector::from_iterator(rank, sorted.iter().take(rank).copied());

    Ok(TruncatedSvd {
        u,
        s,
        v,
        policy_rank,
    })
}
