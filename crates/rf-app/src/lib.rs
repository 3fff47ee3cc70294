//! Shared application service layer for romflow.
//!
//! Loads ROM definitions and data files, drives training, evaluation and
//! export, and converts backend errors into one error type for frontends.

pub mod error;
pub mod evaluate_service;
pub mod export_service;
pub mod rom_service;
pub mod train_service;

pub use error::{AppError, AppResult};
pub use evaluate_service::{evaluate_file, render_evaluation, write_evaluation};
pub use export_service::{ExportRequest, export_model};
pub use rom_service::{RomSummary, compile_settings, load_rom, summarize};
pub use train_service::{TrainSummary, TrainedRom, train_from_files};
