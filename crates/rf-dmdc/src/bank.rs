//! Per-sample model storage.

use crate::error::{DmdcError, DmdcResult};
use crate::extract::SampleSignals;
use nalgebra::{DMatrix, DVector};
use rf_core::{Real, SampleId};

/// Identified state-space triple of one training sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleModel {
    /// State transition, `n x n`.
    pub a: DMatrix<Real>,
    /// Input map, `n x m`.
    pub b: DMatrix<Real>,
    /// Output map, `p x n`.
    pub c: DMatrix<Real>,
    /// Effective SVD rank used for `a` and `b`.
    pub rank: usize,
}

/// Initial values of one training sample plus its final state.
#[derive(Debug, Clone, PartialEq)]
pub struct CenteringRef {
    pub u0: DVector<Real>,
    pub x0: DVector<Real>,
    pub y0: DVector<Real>,
    /// Final state before any centering; kept for export only.
    pub x_last: DVector<Real>,
}

impl CenteringRef {
    pub fn of(signals: &SampleSignals) -> Self {
        let last = signals.timesteps().saturating_sub(1);
        Self {
            u0: signals.u.column(0).into_owned(),
            x0: signals.x.column(0).into_owned(),
            y0: signals.y.column(0).into_owned(),
            x_last: signals.x.column(last).into_owned(),
        }
    }
}

/// Fixed-size arena of identified models, index-aligned with training samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBank {
    models: Box<[SampleModel]>,
    references: Box<[CenteringRef]>,
}

impl ModelBank {
    pub fn new(models: Vec<SampleModel>, references: Vec<CenteringRef>) -> DmdcResult<Self> {
        if models.len() != references.len() {
            return Err(DmdcError::shape(format!(
                "{} models for {} centering references",
                models.len(),
                references.len()
            )));
        }
        Ok(Self {
            models: models.into_boxed_slice(),
            references: references.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, sample: SampleId) -> Option<(&SampleModel, &CenteringRef)> {
        let i = sample.index();
        Some((self.models.get(i)?, self.references.get(i)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SampleId, &SampleModel, &CenteringRef)> + '_ {
        self.models
            .iter()
            .zip(self.references.iter())
            .enumerate()
            .map(|(i, (m, r))| (SampleId::from_index(i), m, r))
    }

    pub fn effective_ranks(&self) -> Vec<usize> {
        self.models.iter().map(|m| m.rank).collect()
    }
}
