//! JSON deck files on disk.

use deck_core::{Error, Exporter, Importer, Presentation, Slide};
use std::fs;
use std::path::PathBuf;

/// A deck stored as a JSON array of slides.
#[derive(Debug, Clone)]
pub struct JsonDeckFile {
    path: PathBuf,
}

impl JsonDeckFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Importer for JsonDeckFile {
    fn import(&self) -> deck_core::Result<Vec<Slide>> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::ImportFailed(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Exporter for JsonDeckFile {
    fn export(&self, slides: &[Slide]) -> deck_core::Result<()> {
        let json = serde_json::to_string_pretty(slides)?;
        fs::write(&self.path, json).map_err(|e| {
            Error::ExportFailed(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

/// Render a presentation as pretty JSON.
pub fn to_json(presentation: &Presentation) -> deck_core::Result<String> {
    Ok(serde_json::to_string_pretty(presentation)?)
}
