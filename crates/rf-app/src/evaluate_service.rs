//! Evaluation of request files against a trained model.

use std::path::Path;

use rf_dmdc::{Dmdc, Evaluation};

use crate::error::{AppError, AppResult};

pub fn evaluate_file(model: &Dmdc, requests_path: &Path) -> AppResult<Evaluation> {
    let requests = rf_project::load_requests(requests_path)?;
    let batch = requests.feature_batch()?;
    let expected = model.settings().features.len();
    if batch.columns() != expected {
        return Err(AppError::InvalidInput(format!(
            "requests carry {} feature columns, the model expects {}",
            batch.columns(),
            expected
        )));
    }
    Ok(model.evaluate(&batch)?)
}

/// Pretty JSON keyed by variable id.
pub fn render_evaluation(evaluation: &Evaluation) -> AppResult<String> {
    serde_json::to_string_pretty(evaluation)
        .map_err(|e| AppError::InvalidInput(format!("Failed to serialize evaluation: {e}")))
}

pub fn write_evaluation(path: &Path, evaluation: &Evaluation) -> AppResult<()> {
    let content = render_evaluation(evaluation)?;
    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
