//! Trajectory extraction from `samples x timesteps x columns` arrays.

use crate::error::{DmdcError, DmdcResult};
use crate::neighbors::NeighborIndex;
use crate::settings::VariableLayout;
use nalgebra::DMatrix;
use rf_core::{Real, SeriesBatch, Tolerances, nearly_equal};

/// Signals of one sample, one column per timestep (snapshot convention).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSignals {
    /// Actuators, `m x T`.
    pub u: DMatrix<Real>,
    /// States, `n x T`.
    pub x: DMatrix<Real>,
    /// Outputs, `p x T`.
    pub y: DMatrix<Real>,
}

impl SampleSignals {
    pub fn timesteps(&self) -> usize {
        self.x.ncols()
    }
}

/// Time axis descriptor. Spacing is taken from the first interval and assumed uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub t0: Real,
    pub intervals: usize,
    pub dt: Real,
}

impl TimeScale {
    pub fn from_pivot(pivot: &[Real]) -> DmdcResult<Self> {
        if pivot.len() < 2 {
            return Err(DmdcError::shape(format!(
                "pivot needs at least 2 timesteps, got {}",
                pivot.len()
            )));
        }
        Ok(Self {
            t0: pivot[0],
            intervals: pivot.len() - 1,
            dt: pivot[1] - pivot[0],
        })
    }

    /// `t0 + i*dt` for `i = 0..=intervals`.
    pub fn times(&self) -> Vec<Real> {
        (0..=self.intervals)
            .map(|i| self.t0 + i as Real * self.dt)
            .collect()
    }

    /// Whether `pivot` deviates from the uniform grid this descriptor implies.
    pub fn is_uniform(&self, pivot: &[Real]) -> bool {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        pivot.len() == self.intervals + 1
            && self
                .times()
                .iter()
                .zip(pivot)
                .all(|(a, b)| nearly_equal(*a, *b, tol))
    }
}

/// Named signal arrays sliced out of the raw training data.
#[derive(Debug, Clone)]
pub struct Trajectories {
    /// Index-aligned with the sample rows of the input arrays.
    pub samples: Vec<SampleSignals>,
    /// Shared time axis, taken from sample 0.
    pub pivot: Vec<Real>,
    pub time_scale: TimeScale,
    /// Present when scheduling parameters exist.
    pub neighbors: Option<NeighborIndex>,
}

impl Trajectories {
    pub fn extract(
        layout: &VariableLayout,
        features: &SeriesBatch,
        targets: &SeriesBatch,
    ) -> DmdcResult<Self> {
        check_columns(features, layout.feature_count, "feature")?;
        check_columns(targets, layout.target_count, "target")?;
        if features.samples() == 0 {
            return Err(DmdcError::shape("training data has no samples"));
        }
        if features.samples() != targets.samples() {
            return Err(DmdcError::shape(format!(
                "feature array has {} samples, target array has {}",
                features.samples(),
                targets.samples()
            )));
        }
        if features.timesteps() != targets.timesteps() {
            return Err(DmdcError::shape(format!(
                "feature array has {} timesteps, target array has {}",
                features.timesteps(),
                targets.timesteps()
            )));
        }

        let pivot = targets.series(0, layout.pivot_col);
        let time_scale = TimeScale::from_pivot(&pivot)?;
        if !time_scale.is_uniform(&pivot) {
            tracing::warn!(
                pivot = %layout.pivot_id,
                dt = time_scale.dt,
                "pivot spacing is not uniform; treating it as uniform"
            );
        }

        let samples = (0..features.samples())
            .map(|s| SampleSignals {
                u: signal_block(features, s, &layout.actuator_cols),
                x: signal_block(targets, s, &layout.state_cols),
                y: signal_block(targets, s, &layout.output_cols),
            })
            .collect();

        let neighbors = if layout.is_parametric() {
            Some(NeighborIndex::build(initial_values(
                features,
                &layout.parameter_cols,
            ))?)
        } else {
            None
        };

        Ok(Self {
            samples,
            pivot,
            time_scale,
            neighbors,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

pub(crate) fn check_columns(batch: &SeriesBatch, expected: usize, what: &str) -> DmdcResult<()> {
    if batch.columns() != expected {
        return Err(DmdcError::shape(format!(
            "{what} array has {} columns, expected {expected}",
            batch.columns()
        )));
    }
    Ok(())
}

/// `columns.len() x T` block of one sample.
pub(crate) fn signal_block(batch: &SeriesBatch, sample: usize, columns: &[usize]) -> DMatrix<Real> {
    DMatrix::from_fn(columns.len(), batch.timesteps(), |r, t| {
        batch.get(sample, t, columns[r])
    })
}

/// `samples x columns.len()` matrix of the t=0 values.
pub(crate) fn initial_values(batch: &SeriesBatch, columns: &[usize]) -> DMatrix<Real> {
    DMatrix::from_fn(batch.samples(), columns.len(), |s, c| {
        batch.get(s, 0, columns[c])
    })
}
