//! Training from definition and data files.

use std::path::Path;

use rf_core::timing::Timer;
use rf_dmdc::Dmdc;
use rf_project::schema::RomDef;

use crate::error::{AppError, AppResult};
use crate::rom_service;

/// Concise outcome of a training call.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    pub samples: usize,
    pub timesteps: usize,
    pub effective_ranks: Vec<usize>,
    pub parametric: bool,
    pub uniform_time: bool,
    pub dt: f64,
    pub elapsed_s: f64,
}

/// A definition together with the model trained from it.
#[derive(Debug, Clone)]
pub struct TrainedRom {
    pub rom: RomDef,
    pub model: Dmdc,
    pub summary: TrainSummary,
}

pub fn train_from_files(rom_path: &Path, data_path: &Path) -> AppResult<TrainedRom> {
    let timer = Timer::start("train_from_files");
    let rom = rom_service::load_rom(rom_path)?;
    let data = rf_project::load_training_data(data_path)?;

    let features = data.feature_batch()?;
    let targets = data.target_batch()?;
    rf_project::validate_data_columns(&rom, features.columns(), Some(targets.columns()))?;
    if features.samples() != targets.samples() || features.timesteps() != targets.timesteps() {
        return Err(AppError::InvalidInput(format!(
            "features are {}x{} (samples x timesteps) but targets are {}x{}",
            features.samples(),
            features.timesteps(),
            targets.samples(),
            targets.timesteps()
        )));
    }

    let settings = rom_service::compile_settings(&rom)?;
    let mut model = Dmdc::new(settings)?;
    model.train(&features, &targets)?;

    let trained = model.trained()?;
    let summary = TrainSummary {
        samples: trained.bank.len(),
        timesteps: trained.pivot.len(),
        effective_ranks: trained.bank.effective_ranks(),
        parametric: trained.neighbors.is_some(),
        uniform_time: trained.time_scale.is_uniform(&trained.pivot),
        dt: trained.time_scale.dt,
        elapsed_s: timer.stop(),
    };

    tracing::info!(rom = %rom.name, samples = summary.samples, "ROM trained");
    Ok(TrainedRom {
        rom,
        model,
        summary,
    })
}
