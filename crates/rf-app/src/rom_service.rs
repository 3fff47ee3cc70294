//! ROM definition loading and compilation into model settings.

use std::path::Path;

use rf_dmdc::{DecenterPolicy, DmdcSettings};
use rf_linalg::RankPolicy;
use rf_project::schema::{DecenterDef, RomDef};

use crate::error::AppResult;

/// Variable roles of a definition, as resolved for the model.
#[derive(Debug, Clone)]
pub struct RomSummary {
    pub name: String,
    pub actuators: Vec<String>,
    pub states: Vec<String>,
    pub init_states: Vec<String>,
    pub outputs: Vec<String>,
    pub parameters: Vec<String>,
    pub pivot: String,
    pub center: bool,
    pub rank: RankPolicy,
    pub decenter: DecenterPolicy,
}

/// Load and validate a ROM definition (YAML, or JSON by extension).
pub fn load_rom(path: &Path) -> AppResult<RomDef> {
    Ok(rf_project::load_rom(path)?)
}

pub fn compile_settings(rom: &RomDef) -> AppResult<DmdcSettings> {
    let rank = match rom.rank_svd {
        Some(code) => RankPolicy::from_code(code)?,
        None => RankPolicy::Full,
    };
    let decenter = match rom.decenter {
        DecenterDef::LastSelected => DecenterPolicy::LastSelected,
        DecenterDef::PerRequest => DecenterPolicy::PerRequest,
    };

    Ok(DmdcSettings {
        features: rom.features.clone(),
        targets: rom.targets.clone(),
        pivot_id: rom.pivot.clone(),
        actuators: rom.actuators.clone(),
        state_variables: rom.state_variables.clone(),
        init_state_variables: rom.init_state_variables.clone(),
        center: rom.subtract_norm_uxy,
        rank,
        decenter,
    })
}

pub fn summarize(rom: &RomDef) -> AppResult<RomSummary> {
    let settings = compile_settings(rom)?;
    let layout = settings.layout()?;
    Ok(RomSummary {
        name: rom.name.clone(),
        actuators: layout.actuator_ids,
        states: layout.state_ids,
        init_states: layout.init_state_ids,
        outputs: layout.output_ids,
        parameters: layout.parameter_ids,
        pivot: layout.pivot_id,
        center: settings.center,
        rank: settings.rank,
        decenter: settings.decenter,
    })
}
