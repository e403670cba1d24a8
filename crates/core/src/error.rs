//! Error types for deck editing.

use crate::types::ElementType;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing a presentation.
///
/// Inside an operation batch these never abort the batch; they are recorded
/// against the single operation that produced them.
#[derive(Error, Debug)]
pub enum Error {
    /// A slide index did not address an existing slide.
    #[error("Slide index {index} out of range (presentation has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    /// No element with the given id exists on the target slide.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The only remaining slide cannot be deleted.
    #[error("Cannot delete the last remaining slide")]
    LastSlide,

    /// A payload named a different element type than its target.
    #[error("Element type mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: ElementType,
        found: ElementType,
    },

    /// A patch carried a field that the target element type does not have.
    #[error("Field '{field}' does not apply to {kind} elements")]
    FieldNotApplicable {
        field: &'static str,
        kind: ElementType,
    },

    /// A geometry value fell outside the slide's percentage space.
    #[error("Geometry field '{field}' out of bounds: {value}")]
    OutOfBounds { field: &'static str, value: f64 },

    /// A table's declared dimensions disagree with its cell grid.
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// A full replacement carried no slides.
    #[error("Replacement presentation must contain at least one slide")]
    EmptyReplacement,

    /// The import collaborator could not produce slides.
    #[error("Import failed: {0}")]
    ImportFailed(String),

    /// Failed to decode a JSON payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export collaborator failed to persist the deck.
    #[error("Export failed: {0}")]
    ExportFailed(String),
}
