//! Boundaries to the import and export collaborators.
//!
//! The engine never touches files or the network itself. Collaborators turn
//! some source into slides, or slides into some destination.

use crate::error::Result;
use crate::types::{Presentation, Slide};

/// Produces the initial slide list for a document.
pub trait Importer {
    fn import(&self) -> Result<Vec<Slide>>;
}

/// Persists the current slide list.
pub trait Exporter {
    fn export(&self, slides: &[Slide]) -> Result<()>;
}

/// Import a presentation, degrading to a single `blank` slide on failure.
pub fn import_or_blank(importer: &dyn Importer) -> Presentation {
    match importer.import() {
        Ok(slides) => match Presentation::from_slides(slides) {
            Ok(presentation) => presentation,
            Err(e) => {
                log::warn!("Import produced no usable slides: {}", e);
                Presentation::blank()
            }
        },
        Err(e) => {
            log::warn!("Import failed, starting from a blank slide: {}", e);
            Presentation::blank()
        }
    }
}
