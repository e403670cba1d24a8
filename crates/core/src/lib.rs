//! Slide-deck editing engine: document model, operation-based mutation,
//! bounded undo history, layout/theme application, and drag/resize geometry.

pub mod agent;
pub mod collab;
pub mod color;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod operations;
pub mod patch;
pub mod table;
pub mod theme;
pub mod transition;
pub mod types;

pub use agent::{agent_channel, AgentEvent, AgentSender};
pub use collab::{import_or_blank, Exporter, Importer};
pub use editor::{Editor, EditorConfig};
pub use error::{Error, Result};
pub use geometry::{CanvasSize, GeometryLimits, GestureMode, Rect, ResizeHandle};
pub use history::{HistoryManager, Snapshot};
pub use layout::{apply_layout, LayoutType};
pub use operations::{apply, replace, ApplyOutcome, OpOutcome, Operation};
pub use patch::ElementPatch;
pub use theme::{apply_theme, ThemeType};
pub use transition::{apply_transition, TransitionType};
pub use types::{
    ElementKind, ElementType, Presentation, ShapeType, Slide, SlideElement, TableCell,
};
