//! Drag and resize geometry in the slide's percentage space.
//!
//! Every function here is pure. A gesture captures the element's geometry
//! once when it starts; each pointer move recomputes from that snapshot and
//! the total pointer travel, never from the previous move.

use crate::types::{SlideElement, MIN_ELEMENT_SIZE};
use serde::{Deserialize, Serialize};

/// Position and size of an element, in percent of the slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn of(element: &SlideElement) -> Self {
        Self::new(element.x, element.y, element.width, element.height)
    }

    /// Write this geometry onto `element`.
    pub fn write_to(&self, element: &mut SlideElement) {
        element.x = self.x;
        element.y = self.y;
        element.width = self.width;
        element.height = self.height;
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// One of the eight resize grips around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Which horizontal edge this handle moves, if any.
    fn horizontal(&self) -> Option<Edge> {
        match self {
            Self::Left | Self::TopLeft | Self::BottomLeft => Some(Edge::Near),
            Self::Right | Self::TopRight | Self::BottomRight => Some(Edge::Far),
            Self::Top | Self::Bottom => None,
        }
    }

    /// Which vertical edge this handle moves, if any.
    fn vertical(&self) -> Option<Edge> {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Some(Edge::Near),
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Some(Edge::Far),
            Self::Left | Self::Right => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    /// Left or top: position moves, opposite edge stays put.
    Near,
    /// Right or bottom: size changes, position stays put.
    Far,
}

/// Pixel dimensions of the live canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Convert a pixel delta into percent of the canvas.
    pub fn to_percent(&self, dx_px: f64, dy_px: f64) -> (f64, f64) {
        let px = |d: f64, extent: f64| {
            if extent.is_finite() && extent > 0.0 {
                d / extent * 100.0
            } else {
                0.0
            }
        };
        (px(dx_px, self.width), px(dy_px, self.height))
    }
}

/// Bounds applied to drag and resize results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryLimits {
    /// Smallest width or height a resize may produce.
    pub min_size: f64,
    /// Largest x or y a drag may produce.
    pub drag_max: f64,
    /// Far edge of the canvas.
    pub canvas_max: f64,
}

impl Default for GeometryLimits {
    fn default() -> Self {
        Self {
            min_size: MIN_ELEMENT_SIZE,
            // Keeps at least a tenth of the canvas under any dropped element.
            drag_max: 90.0,
            canvas_max: 100.0,
        }
    }
}

impl GeometryLimits {
    /// Move `start` by `(dx, dy)` percent.
    pub fn drag(&self, start: Rect, dx: f64, dy: f64) -> Rect {
        Rect {
            x: (start.x + dx).clamp(0.0, self.drag_max),
            y: (start.y + dy).clamp(0.0, self.drag_max),
            ..start
        }
    }

    /// Resize `start` by dragging `handle` by `(dx, dy)` percent.
    ///
    /// Corner handles apply the two axis rules independently.
    pub fn resize(&self, start: Rect, handle: ResizeHandle, dx: f64, dy: f64) -> Rect {
        let mut next = start;
        if let Some(edge) = handle.horizontal() {
            (next.x, next.width) = self.resize_axis(edge, start.x, start.width, dx);
        }
        if let Some(edge) = handle.vertical() {
            (next.y, next.height) = self.resize_axis(edge, start.y, start.height, dy);
        }
        next
    }

    /// Apply one axis of a resize, returning the new `(position, size)`.
    fn resize_axis(&self, edge: Edge, pos: f64, size: f64, delta: f64) -> (f64, f64) {
        match edge {
            Edge::Far => {
                let pos = pos.min(self.canvas_max - self.min_size);
                let size = (size + delta).min(self.canvas_max - pos).max(self.min_size);
                (pos, size)
            }
            Edge::Near => {
                // An element hanging past the canvas is anchored at the edge.
                let anchor = (pos + size).min(self.canvas_max);
                let mut new_pos = pos + delta;
                let mut new_size = anchor - new_pos;
                if new_size < self.min_size {
                    new_size = self.min_size;
                    new_pos = anchor - self.min_size;
                }
                if new_pos < 0.0 {
                    new_pos = 0.0;
                    new_size = anchor;
                }
                (new_pos, new_size)
            }
        }
    }
}

/// Move `start` by `(dx, dy)` percent using the default limits.
pub fn drag(start: Rect, dx: f64, dy: f64) -> Rect {
    GeometryLimits::default().drag(start, dx, dy)
}

/// Resize `start` via `handle` using the default limits.
pub fn resize(start: Rect, handle: ResizeHandle, dx: f64, dy: f64) -> Rect {
    GeometryLimits::default().resize(start, handle, dx, dy)
}

/// What a pointer gesture does to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "handle")]
pub enum GestureMode {
    Drag,
    Resize(ResizeHandle),
}

/// An in-progress drag or resize of a single element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gesture {
    pub slide_index: usize,
    pub element_id: String,
    pub mode: GestureMode,
    /// Element geometry when the gesture began.
    pub start: Rect,
    /// Pointer position in pixels when the gesture began.
    pub pointer_origin: (f64, f64),
}

impl Gesture {
    /// Geometry for the pointer currently at `pointer` pixels.
    pub fn geometry_at(
        &self,
        limits: &GeometryLimits,
        pointer: (f64, f64),
        canvas: CanvasSize,
    ) -> Rect {
        let (dx, dy) = canvas.to_percent(
            pointer.0 - self.pointer_origin.0,
            pointer.1 - self.pointer_origin.1,
        );
        match self.mode {
            GestureMode::Drag => limits.drag(self.start, dx, dy),
            GestureMode::Resize(handle) => limits.resize(self.start, handle, dx, dy),
        }
    }
}
