//! Dense `samples x timesteps x columns` arrays.
//!
//! Training data and evaluation requests both arrive in this layout: one row
//! block per sample, one row per timestep, one column per named variable.

use crate::{Real, RfError, RfResult};

/// Row-major 3-D array of trajectory snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBatch {
    samples: usize,
    timesteps: usize,
    columns: usize,
    data: Vec<Real>,
}

impl SeriesBatch {
    pub fn zeros(samples: usize, timesteps: usize, columns: usize) -> Self {
        Self {
            samples,
            timesteps,
            columns,
            data: vec![0.0; samples * timesteps * columns],
        }
    }

    /// Build from nested `[sample][timestep][column]` vectors, rejecting ragged input.
    pub fn from_nested(nested: &[Vec<Vec<Real>>]) -> RfResult<Self> {
        let samples = nested.len();
        let timesteps = nested.first().map(|s| s.len()).unwrap_or(0);
        let columns = nested
            .first()
            .and_then(|s| s.first())
            .map(|row| row.len())
            .unwrap_or(0);

        let mut data = Vec::with_capacity(samples * timesteps * columns);
        for sample in nested {
            if sample.len() != timesteps {
                return Err(RfError::Shape {
                    what: "timesteps per sample",
                    expected: timesteps,
                    actual: sample.len(),
                });
            }
            for row in sample {
                if row.len() != columns {
                    return Err(RfError::Shape {
                        what: "columns per timestep",
                        expected: columns,
                        actual: row.len(),
                    });
                }
                data.extend_from_slice(row);
            }
        }

        Ok(Self {
            samples,
            timesteps,
            columns,
            data,
        })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn offset(&self, sample: usize, timestep: usize, column: usize) -> usize {
        (sample * self.timesteps + timestep) * self.columns + column
    }

    /// Value at `(sample, timestep, column)`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn get(&self, sample: usize, timestep: usize, column: usize) -> Real {
        self.data[self.offset(sample, timestep, column)]
    }

    /// Time series of one column for one sample.
    pub fn series(&self, sample: usize, column: usize) -> Vec<Real> {
        (0..self.timesteps)
            .map(|t| self.get(sample, t, column))
            .collect()
    }
}
