//! Evaluation output keyed by variable id.

use nalgebra::DMatrix;
use rf_core::Real;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time series of one variable: flat for a single request, one row per request otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    Single(Vec<Real>),
    Batch(Vec<Vec<Real>>),
}

impl Series {
    pub fn from_rows(mut rows: Vec<Vec<Real>>) -> Self {
        if rows.len() == 1 {
            Series::Single(rows.remove(0))
        } else {
            Series::Batch(rows)
        }
    }

    pub fn requests(&self) -> usize {
        match self {
            Series::Single(_) => 1,
            Series::Batch(rows) => rows.len(),
        }
    }

    /// Series of one request.
    pub fn request(&self, index: usize) -> Option<&[Real]> {
        match self {
            Series::Single(values) if index == 0 => Some(values.as_slice()),
            Series::Single(_) => None,
            Series::Batch(rows) => rows.get(index).map(Vec::as_slice),
        }
    }
}

/// Mapping from every actuator, state, output and pivot id to its series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluation {
    pub series: BTreeMap<String, Series>,
}

impl Evaluation {
    pub fn get(&self, id: &str) -> Option<&Series> {
        self.series.get(id)
    }

    pub(crate) fn insert_rows(&mut self, id: &str, rows: Vec<Vec<Real>>) {
        self.series.insert(id.to_string(), Series::from_rows(rows));
    }

    /// Insert row `row` of every matrix (one matrix per request) under `id`.
    pub(crate) fn insert_matrix_rows(&mut self, id: &str, matrices: &[&DMatrix<Real>], row: usize) {
        let rows = matrices
            .iter()
            .map(|m| m.row(row).iter().copied().collect())
            .collect();
        self.insert_rows(id, rows);
    }
}
