//! Model settings and the resolved variable layout.

use crate::error::{DmdcError, DmdcResult};
use rf_linalg::RankPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which selected sample's centering references are added back after a batch rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecenterPolicy {
    /// Every trajectory in the batch is de-centered with the references of the
    /// sample selected for the last request. Matches the historical surrogate output.
    #[default]
    LastSelected,
    /// Each trajectory is de-centered with the references of its own selected sample.
    PerRequest,
}

/// Everything needed to build a DMDc model, with variable ids already resolved
/// by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DmdcSettings {
    /// Ordered feature ids (columns of the feature array).
    pub features: Vec<String>,
    /// Ordered target ids (columns of the target array).
    pub targets: Vec<String>,
    /// Time axis id; must be a target.
    pub pivot_id: String,
    pub actuators: Vec<String>,
    pub state_variables: Vec<String>,
    pub init_state_variables: Vec<String>,
    /// Subtract each sample's t=0 values before fitting and evaluation.
    pub center: bool,
    pub rank: RankPolicy,
    pub decenter: DecenterPolicy,
}

impl DmdcSettings {
    /// Resolve every id list against the feature and target columns.
    ///
    /// All contract violations are reported here, before any numeric work.
    pub fn layout(&self) -> DmdcResult<VariableLayout> {
        ensure_unique(&self.features, "features")?;
        ensure_unique(&self.targets, "targets")?;
        self.rank.validate()?;

        if self.actuators.is_empty() {
            return Err(DmdcError::config("at least one actuator is required"));
        }
        if self.state_variables.is_empty() {
            return Err(DmdcError::config("at least one state variable is required"));
        }

        let target_set: HashSet<&str> = self.targets.iter().map(String::as_str).collect();
        let feature_set: HashSet<&str> = self.features.iter().map(String::as_str).collect();

        if let Some(missing) = first_missing(&self.state_variables, &target_set) {
            return Err(DmdcError::config(format!(
                "stateVariables must also be listed among target variables (missing '{missing}')"
            )));
        }
        if let Some(missing) = first_missing(&self.init_state_variables, &feature_set) {
            return Err(DmdcError::config(format!(
                "initStateVariables must also be listed among feature variables (missing '{missing}')"
            )));
        }
        if let Some(missing) = first_missing(&self.actuators, &feature_set) {
            return Err(DmdcError::config(format!(
                "actuators must also be listed among feature variables (missing '{missing}')"
            )));
        }
        if !target_set.contains(self.pivot_id.as_str()) {
            return Err(DmdcError::config(format!(
                "pivot '{}' must be listed among target variables",
                self.pivot_id
            )));
        }

        let state_set: HashSet<&str> = self.state_variables.iter().map(String::as_str).collect();
        let output_ids: Vec<String> = self
            .targets
            .iter()
            .filter(|t| !state_set.contains(t.as_str()) && **t != self.pivot_id)
            .cloned()
            .collect();

        let non_parameters: HashSet<&str> = self
            .actuators
            .iter()
            .chain(&self.init_state_variables)
            .map(String::as_str)
            .collect();
        let parameter_ids: Vec<String> = self
            .features
            .iter()
            .filter(|f| !non_parameters.contains(f.as_str()))
            .cloned()
            .collect();

        Ok(VariableLayout {
            actuator_cols: columns_of(&self.actuators, &self.features),
            init_state_cols: columns_of(&self.init_state_variables, &self.features),
            parameter_cols: columns_of(&parameter_ids, &self.features),
            state_cols: columns_of(&self.state_variables, &self.targets),
            output_cols: columns_of(&output_ids, &self.targets),
            pivot_col: self
                .targets
                .iter()
                .position(|t| *t == self.pivot_id)
                .unwrap_or_default(),
            actuator_ids: self.actuators.clone(),
            state_ids: self.state_variables.clone(),
            init_state_ids: self.init_state_variables.clone(),
            output_ids,
            parameter_ids,
            pivot_id: self.pivot_id.clone(),
            feature_count: self.features.len(),
            target_count: self.targets.len(),
        })
    }
}

/// Ids grouped by role, with their column positions in the feature/target arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableLayout {
    pub actuator_ids: Vec<String>,
    pub state_ids: Vec<String>,
    pub init_state_ids: Vec<String>,
    /// Targets that are neither state variables nor the pivot.
    pub output_ids: Vec<String>,
    /// Features that are neither actuators nor init-state variables.
    pub parameter_ids: Vec<String>,
    pub pivot_id: String,

    pub actuator_cols: Vec<usize>,
    pub init_state_cols: Vec<usize>,
    pub parameter_cols: Vec<usize>,
    pub state_cols: Vec<usize>,
    pub output_cols: Vec<usize>,
    pub pivot_col: usize,

    pub feature_count: usize,
    pub target_count: usize,
}

impl VariableLayout {
    pub fn is_parametric(&self) -> bool {
        !self.parameter_ids.is_empty()
    }
}

fn ensure_unique(ids: &[String], what: &str) -> DmdcResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(DmdcError::config(format!("duplicate id '{id}' in {what}")));
        }
    }
    Ok(())
}

fn first_missing<'a>(ids: &'a [String], set: &HashSet<&str>) -> Option<&'a str> {
    ids.iter().map(String::as_str).find(|id| !set.contains(id))
}

// Callers have already checked membership.
fn columns_of(ids: &[String], columns: &[String]) -> Vec<usize> {
    ids.iter()
        .filter_map(|id| columns.iter().position(|c| c == id))
        .collect()
}
