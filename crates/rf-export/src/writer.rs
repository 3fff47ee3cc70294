//! Serialize export documents to JSON or YAML.

use crate::{ExportDocument, ExportError, ExportResult};
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

pub fn render(document: &ExportDocument, format: ExportFormat) -> ExportResult<String> {
    Ok(match format {
        ExportFormat::Json => serde_json::to_string_pretty(document)?,
        ExportFormat::Yaml => serde_yaml::to_string(document)?,
    })
}

/// Render fully in memory first so a serialization failure never leaves a partial file.
pub fn write_document(
    path: &Path,
    document: &ExportDocument,
    format: ExportFormat,
) -> ExportResult<()> {
    let content = render(document, format)?;
    write_rendered(path, &content)
}

/// Write text produced by [`render`], creating missing parent directories.
pub fn write_rendered(path: &Path, content: &str) -> ExportResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn read_document(path: &Path, format: ExportFormat) -> ExportResult<ExportDocument> {
    let content = fs::read_to_string(path)?;
    Ok(match format {
        ExportFormat::Json => serde_json::from_str(&content)?,
        ExportFormat::Yaml => serde_yaml::from_str(&content)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
