//! Export document types.
//!
//! The layout follows the block contract: scalar metadata blocks, then
//! per-sample vector and matrix blocks tagged with the sample index and the
//! sample's scheduling-parameter values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ExportBlock;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDocument {
    /// Name of the exported model node.
    pub target: String,
    pub description: String,
    #[serde(default)]
    pub scalars: Vec<ScalarBlock>,
    #[serde(default)]
    pub vectors: Vec<VectorBlock>,
    #[serde(default)]
    pub matrices: Vec<MatrixBlock>,
}

impl ExportDocument {
    pub fn new(target: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            description: description.into(),
            scalars: Vec::new(),
            vectors: Vec::new(),
            matrices: Vec::new(),
        }
    }

    pub fn scalar(&self, block: ExportBlock) -> Option<&ScalarValue> {
        self.scalars.iter().find(|s| s.block == block).map(|s| &s.value)
    }

    pub fn vector(&self, block: ExportBlock) -> Option<&VectorBlock> {
        self.vectors.iter().find(|v| v.block == block)
    }

    pub fn matrix(&self, block: ExportBlock) -> Option<&MatrixBlock> {
        self.matrices.iter().find(|m| m.block == block)
    }

    /// Names of every block present in the document, in insertion order.
    pub fn block_names(&self) -> Vec<&'static str> {
        self.scalars
            .iter()
            .map(|s| s.block)
            .chain(self.vectors.iter().map(|v| v.block))
            .chain(self.matrices.iter().map(|m| m.block))
            .map(ExportBlock::name)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalarBlock {
    pub block: ExportBlock,
    pub value: ScalarValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScalarValue {
    Rank {
        /// Requested rank code: -1 full, 0 optimal, fraction for energy, integer for fixed.
        requested: f64,
        /// Effective rank achieved for each sample.
        effective: Vec<usize>,
    },
    Ids(Vec<String>),
    Numbers(Vec<f64>),
}

/// Tags attached to every per-sample realization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleTags {
    pub sample: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorBlock {
    pub block: ExportBlock,
    pub realizations: Vec<VectorRealization>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRealization {
    #[serde(flatten)]
    pub tags: SampleTags,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixBlock {
    pub block: ExportBlock,
    pub realizations: Vec<MatrixRealization>,
}

/// Matrix values flattened column-major.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixRealization {
    #[serde(flatten)]
    pub tags: SampleTags,
    pub real: Vec<f64>,
    pub imaginary: Vec<f64>,
    pub shape: [usize; 2],
}

impl MatrixRealization {
    /// Realization of a real-valued matrix; the imaginary part is all zeros.
    pub fn real_valued(tags: SampleTags, shape: [usize; 2], column_major: &[f64]) -> Self {
        Self {
            tags,
            real: column_major.to_vec(),
            imaginary: vec![0.0; column_major.len()],
            shape,
        }
    }

    /// Element `(row, col)` of the real part.
    pub fn real_at(&self, row: usize, col: usize) -> f64 {
        self.real[col * self.shape[0] + row]
    }
}
