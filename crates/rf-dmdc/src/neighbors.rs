//! 1-nearest-neighbor lookup over scheduling parameters.
//!
//! A brute-force scan: the parameter count is only known at runtime, which rules
//! out compile-time-dimension k-d trees, and the scan order fixes the tie-break.

use crate::error::{DmdcError, DmdcResult};
use nalgebra::DMatrix;
use rf_core::{Real, SampleId, ensure_finite};

/// Exact nearest-neighbor index keyed by training sample row.
///
/// Distances are Euclidean. The scan visits samples in row order and only
/// replaces the incumbent on a strictly smaller distance, so ties resolve to
/// the lowest sample index.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborIndex {
    /// One row per training sample, one column per scheduling parameter.
    points: DMatrix<Real>,
}

impl NeighborIndex {
    pub fn build(points: DMatrix<Real>) -> DmdcResult<Self> {
        if points.nrows() == 0 || points.ncols() == 0 {
            return Err(DmdcError::shape(format!(
                "neighbor index needs at least one sample and one parameter, got {}x{}",
                points.nrows(),
                points.ncols()
            )));
        }
        for &v in points.iter() {
            ensure_finite(v, "scheduling parameter")?;
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Number of scheduling parameters.
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// Parameter values of one training sample.
    pub fn point(&self, sample: SampleId) -> Vec<Real> {
        self.points.row(sample.index()).iter().copied().collect()
    }

    pub fn nearest(&self, query: &[Real]) -> DmdcResult<SampleId> {
        if query.len() != self.dim() {
            return Err(DmdcError::shape(format!(
                "query has {} scheduling parameters, index has {}",
                query.len(),
                self.dim()
            )));
        }
        for &v in query {
            ensure_finite(v, "scheduling parameter query")?;
        }

        let mut best = 0;
        let mut best_d2 = Real::INFINITY;
        for (row, point) in self.points.row_iter().enumerate() {
            let d2: Real = point
                .iter()
                .zip(query)
                .map(|(p, q)| (p - q) * (p - q))
                .sum();
            if d2 < best_d2 {
                best = row;
                best_d2 = d2;
            }
        }
        Ok(SampleId::from_index(best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NeighborIndex {
        NeighborIndex::build(DMatrix::from_row_slice(
            3,
            2,
            &[0.0, 0.0, 1.0, 1.0, 5.0, 5.0],
        ))
        .unwrap()
    }

    #[test]
    fn exact_match_selects_that_sample() {
        let idx = index();
        for row in 0..3 {
            let id = SampleId::from_index(row);
            assert_eq!(idx.nearest(&idx.point(id)).unwrap(), id);
        }
    }

    #[test]
    fn closest_sample_wins() {
        let idx = index();
        assert_eq!(idx.nearest(&[3.9, 4.2]).unwrap().index(), 2);
        assert_eq!(idx.nearest(&[0.6, 0.6]).unwrap().index(), 1);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let idx = index();
        assert_eq!(idx.nearest(&[0.5, 0.5]).unwrap().index(), 0);

        let dup = NeighborIndex::build(DMatrix::from_row_slice(2, 1, &[2.0, 2.0])).unwrap();
        assert_eq!(dup.nearest(&[2.0]).unwrap().index(), 0);
    }

    #[test]
    fn dimension_mismatch_rejected() {
        assert!(matches!(index().nearest(&[1.0]), Err(DmdcError::Shape { .. })));
    }

    #[test]
    fn non_finite_query_rejected() {
        assert!(index().nearest(&[Real::NAN, 0.0]).is_err());
    }
}
