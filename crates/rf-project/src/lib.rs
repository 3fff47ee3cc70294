//! rf-project: ROM definition and data file formats, with validation.

pub mod data;
pub mod schema;
pub mod validate;

pub use data::{EvaluationRequests, TrainingData};
pub use schema::*;
pub use validate::{ValidationError, validate_data_columns, validate_rom};

pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data error: {0}")]
    Data(#[from] rf_core::RfError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a ROM definition, picking the parser from the file extension (YAML unless `.json`).
pub fn load_rom(path: &std::path::Path) -> ProjectResult<RomDef> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<RomDef> {
    let content = std::fs::read_to_string(path)?;
    let rom: RomDef = serde_yaml::from_str(&content)?;
    validate_rom(&rom)?;
    Ok(rom)
}

pub fn save_yaml(path: &std::path::Path, rom: &RomDef) -> ProjectResult<()> {
    validate_rom(rom)?;
    let content = serde_yaml::to_string(rom)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<RomDef> {
    let content = std::fs::read_to_string(path)?;
    let rom: RomDef = serde_json::from_str(&content)?;
    validate_rom(&rom)?;
    Ok(rom)
}

pub fn save_json(path: &std::path::Path, rom: &RomDef) -> ProjectResult<()> {
    validate_rom(rom)?;
    let content = serde_json::to_string_pretty(rom)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_training_data(path: &std::path::Path) -> ProjectResult<TrainingData> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn load_requests(path: &std::path::Path) -> ProjectResult<EvaluationRequests> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
