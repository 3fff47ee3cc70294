//! Training data and evaluation request files.

use rf_core::{RfResult, SeriesBatch};
use serde::{Deserialize, Serialize};

/// Nested `[sample][timestep][column]` arrays, columns ordered as in the ROM definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingData {
    pub features: Vec<Vec<Vec<f64>>>,
    pub targets: Vec<Vec<Vec<f64>>>,
}

impl TrainingData {
    pub fn feature_batch(&self) -> RfResult<SeriesBatch> {
        SeriesBatch::from_nested(&self.features)
    }

    pub fn target_batch(&self) -> RfResult<SeriesBatch> {
        SeriesBatch::from_nested(&self.targets)
    }
}

/// Nested `[request][timestep][feature]` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationRequests {
    pub features: Vec<Vec<Vec<f64>>>,
}

impl EvaluationRequests {
    pub fn feature_batch(&self) -> RfResult<SeriesBatch> {
        SeriesBatch::from_nested(&self.features)
    }
}
