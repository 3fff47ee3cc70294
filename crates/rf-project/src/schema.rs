//! ROM definition schema.

use serde::{Deserialize, Serialize};

/// Definition of a DMDc surrogate: variable roles and fitting options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RomDef {
    pub version: u32,
    pub name: String,
    /// Ordered feature ids; columns of the feature arrays.
    pub features: Vec<String>,
    /// Ordered target ids; columns of the target arrays.
    pub targets: Vec<String>,
    /// Time axis id, listed among the targets.
    pub pivot: String,
    pub actuators: Vec<String>,
    pub state_variables: Vec<String>,
    #[serde(default)]
    pub init_state_variables: Vec<String>,
    /// Subtract the initial values of u, x and y before fitting.
    #[serde(default)]
    pub subtract_norm_uxy: bool,
    /// `-1` or absent: full rank; `0`: optimal hard threshold;
    /// `(0, 1)`: energy fraction; integer `>= 1`: fixed rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_svd: Option<f64>,
    #[serde(default)]
    pub decenter: DecenterDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecenterDef {
    #[default]
    LastSelected,
    PerRequest,
}
