//! Export of trained model parameters.

use std::path::Path;

use rf_dmdc::Dmdc;
use rf_export::{ExportDocument, ExportFormat, ExportSelection};

use crate::error::{AppError, AppResult};

/// Which blocks to export, and where.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest<'a> {
    /// `None` selects every block.
    pub what: Option<Vec<String>>,
    pub skip: Vec<String>,
    pub format: ExportFormat,
    /// `None` returns the rendered text without writing.
    pub output: Option<&'a Path>,
}

/// Validate the selection, build the document and optionally write it.
///
/// Returns the document and its rendered text. Unknown block names fail before
/// anything is written.
pub fn export_model(
    model: &Dmdc,
    request: &ExportRequest<'_>,
) -> AppResult<(ExportDocument, String)> {
    let selection = ExportSelection::from_names(request.what.as_deref(), request.skip.as_slice())?;
    if selection.is_empty() {
        return Err(AppError::InvalidInput(
            "export selection is empty after applying skip".to_string(),
        ));
    }

    let document = model.export(&selection)?;
    let rendered = rf_export::render(&document, request.format)?;

    if let Some(path) = request.output {
        rf_export::write_rendered(path, &rendered)?;
        tracing::info!(
            path = %path.display(),
            blocks = document.block_names().len(),
            "export written"
        );
    }
    Ok((document, rendered))
}
