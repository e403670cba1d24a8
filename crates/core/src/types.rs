//! Domain types for the slide-deck document model.
//!
//! All element geometry is expressed as percentages of the slide's width and
//! height, so every coordinate lives in `[0, 100]`.

use crate::error::{Error, Result};
use crate::layout::{self, LayoutType};
use crate::theme::{self, ThemeType};
use crate::transition::{self, TransitionType};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Smallest width or height an element may have, in percent.
pub const MIN_ELEMENT_SIZE: f64 = 2.0;

/// Fill given to shapes that the user has not recolored.
pub const DEFAULT_SHAPE_FILL: &str = "#4a90d9";

/// Stroke given to newly created shapes.
pub const DEFAULT_SHAPE_STROKE: &str = "#2c5aa0";

/// Text color for new text elements and table cells.
pub const DEFAULT_TEXT_COLOR: &str = "#333333";

/// Font face for new text elements and table cells.
pub const DEFAULT_FONT_FACE: &str = "Arial";

/// Placeholder copy for a fresh text box.
pub const PLACEHOLDER_TEXT: &str = "Click to add text";

/// Generate a fresh opaque identifier with a readable prefix.
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Discriminant of a [`SlideElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Shape,
    Image,
    Table,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Shape => "shape",
            Self::Image => "image",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical text alignment within the element box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Catalog of drawable shape geometries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    #[default]
    Rect,
    RoundRect,
    Snip1Rect,
    Snip2SameRect,
    Round1Rect,
    Ellipse,
    Triangle,
    RtTriangle,
    Parallelogram,
    Trapezoid,
    Diamond,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
    Decagon,
    Dodecagon,
    Star4,
    Star5,
    Star6,
    Star7,
    Star8,
    Star10,
    Star12,
    Star16,
    Star24,
    Star32,
    RightArrow,
    LeftArrow,
    UpArrow,
    DownArrow,
    LeftRightArrow,
    UpDownArrow,
    QuadArrow,
    BentArrow,
    UturnArrow,
    CurvedRightArrow,
    CurvedLeftArrow,
    CurvedUpArrow,
    CurvedDownArrow,
    Chevron,
    HomePlate,
    Heart,
    LightningBolt,
    Sun,
    Moon,
    Cloud,
    SmileyFace,
    Donut,
    NoSmoking,
    BlockArc,
    FoldedCorner,
    Frame,
    Plaque,
    Can,
    Cube,
    Bevel,
    Line,
    WedgeRectCallout,
    WedgeRoundRectCallout,
    WedgeEllipseCallout,
    CloudCallout,
    MathPlus,
    MathMinus,
    FlowChartProcess,
    FlowChartDecision,
    FlowChartTerminator,
}

impl ShapeType {
    /// All shapes in catalog order.
    pub const ALL: [Self; 67] = [
        Self::Rect,
        Self::RoundRect,
        Self::Snip1Rect,
        Self::Snip2SameRect,
        Self::Round1Rect,
        Self::Ellipse,
        Self::Triangle,
        Self::RtTriangle,
        Self::Parallelogram,
        Self::Trapezoid,
        Self::Diamond,
        Self::Pentagon,
        Self::Hexagon,
        Self::Heptagon,
        Self::Octagon,
        Self::Decagon,
        Self::Dodecagon,
        Self::Star4,
        Self::Star5,
        Self::Star6,
        Self::Star7,
        Self::Star8,
        Self::Star10,
        Self::Star12,
        Self::Star16,
        Self::Star24,
        Self::Star32,
        Self::RightArrow,
        Self::LeftArrow,
        Self::UpArrow,
        Self::DownArrow,
        Self::LeftRightArrow,
        Self::UpDownArrow,
        Self::QuadArrow,
        Self::BentArrow,
        Self::UturnArrow,
        Self::CurvedRightArrow,
        Self::CurvedLeftArrow,
        Self::CurvedUpArrow,
        Self::CurvedDownArrow,
        Self::Chevron,
        Self::HomePlate,
        Self::Heart,
        Self::LightningBolt,
        Self::Sun,
        Self::Moon,
        Self::Cloud,
        Self::SmileyFace,
        Self::Donut,
        Self::NoSmoking,
        Self::BlockArc,
        Self::FoldedCorner,
        Self::Frame,
        Self::Plaque,
        Self::Can,
        Self::Cube,
        Self::Bevel,
        Self::Line,
        Self::WedgeRectCallout,
        Self::WedgeRoundRectCallout,
        Self::WedgeEllipseCallout,
        Self::CloudCallout,
        Self::MathPlus,
        Self::MathMinus,
        Self::FlowChartProcess,
        Self::FlowChartDecision,
        Self::FlowChartTerminator,
    ];
}

/// Attributes of a text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    pub content: String,
    pub font_size: f64,
    pub font_face: String,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: 18.0,
            font_face: DEFAULT_FONT_FACE.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            bold: false,
            italic: false,
            align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
        }
    }
}

/// Attributes of a drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeProps {
    pub shape_type: ShapeType,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// Clockwise rotation in degrees, `[0, 360)`.
    pub rotation: f64,
    /// Optional label drawn inside the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Default for ShapeProps {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rect,
            fill: DEFAULT_SHAPE_FILL.to_string(),
            stroke: DEFAULT_SHAPE_STROKE.to_string(),
            stroke_width: 1.0,
            rotation: 0.0,
            content: None,
        }
    }
}

/// Attributes of an image. The reference is never dereferenced here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub image_url: String,
}

/// One cell of a table, addressed only by its row and column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub content: String,
    pub font_size: f64,
    pub font_face: String,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub align: HorizontalAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: 14.0,
            font_face: DEFAULT_FONT_FACE.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            bold: false,
            italic: false,
            align: HorizontalAlign::Left,
            background_color: None,
        }
    }
}

/// Attributes of a table. `rows` and `columns` always match `cells`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableProps {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<TableCell>>,
    pub border_color: String,
    pub border_width: f64,
    pub header_row: bool,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            cells: vec![vec![TableCell::default()]],
            border_color: "#cccccc".to_string(),
            border_width: 1.0,
            header_row: false,
        }
    }
}

impl TableProps {
    /// Check that the declared dimensions agree with the cell grid.
    pub fn validate(&self) -> Result<()> {
        if self.cells.len() != self.rows {
            return Err(Error::MalformedTable(format!(
                "declared {} rows but grid has {}",
                self.rows,
                self.cells.len()
            )));
        }
        if let Some(row) = self.cells.iter().position(|r| r.len() != self.columns) {
            return Err(Error::MalformedTable(format!(
                "row {} does not have {} columns",
                row, self.columns
            )));
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(Error::MalformedTable("table has no cells".to_string()));
        }
        Ok(())
    }
}

/// Type-specific part of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextProps),
    Shape(ShapeProps),
    Image(ImageProps),
    Table(TableProps),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::Shape(_) => ElementType::Shape,
            Self::Image(_) => ElementType::Image,
            Self::Table(_) => ElementType::Table,
        }
    }

    /// Default attributes for a freshly created element of the given type.
    pub fn default_for(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Text => Self::Text(TextProps::default()),
            ElementType::Shape => Self::Shape(ShapeProps::default()),
            ElementType::Image => Self::Image(ImageProps::default()),
            ElementType::Table => Self::Table(TableProps::default()),
        }
    }
}

/// A positioned, typed content item on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl SlideElement {
    /// Create an element with a fresh id.
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: new_id("el"),
            x,
            y,
            width,
            height,
            kind,
        }
    }

    /// Create a text box with default formatting.
    pub fn text(content: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let props = TextProps {
            content: content.into(),
            ..TextProps::default()
        };
        Self::new(ElementKind::Text(props), x, y, width, height)
    }

    /// Create a shape with the default fill and stroke.
    pub fn shape(shape_type: ShapeType, x: f64, y: f64, width: f64, height: f64) -> Self {
        let props = ShapeProps {
            shape_type,
            ..ShapeProps::default()
        };
        Self::new(ElementKind::Shape(props), x, y, width, height)
    }

    /// Create an image element referencing `image_url`.
    pub fn image(image_url: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let props = ImageProps {
            image_url: image_url.into(),
        };
        Self::new(ElementKind::Image(props), x, y, width, height)
    }

    /// The default text placeholder placed on new slides.
    pub fn placeholder() -> Self {
        let mut element = Self::text(PLACEHOLDER_TEXT, 10.0, 40.0, 80.0, 20.0);
        if let ElementKind::Text(ref mut props) = element.kind {
            props.font_size = 24.0;
            props.align = HorizontalAlign::Center;
            props.vertical_align = VerticalAlign::Middle;
        }
        element
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Check the geometry fields against the percentage space.
    pub fn validate_geometry(&self) -> Result<()> {
        check_range("x", self.x, 0.0)?;
        check_range("y", self.y, 0.0)?;
        check_range("width", self.width, MIN_ELEMENT_SIZE)?;
        check_range("height", self.height, MIN_ELEMENT_SIZE)?;
        Ok(())
    }

    /// Copy of this element under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id("el"),
            ..self.clone()
        }
    }

    pub fn as_table(&self) -> Option<&TableProps> {
        match &self.kind {
            ElementKind::Table(table) => Some(table),
            _ => None,
        }
    }
}

fn check_range(field: &'static str, value: f64, min: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > 100.0 {
        return Err(Error::OutOfBounds { field, value });
    }
    Ok(())
}

/// One page of the presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,

    /// Offset of this slide in its presentation; maintained by reindexing.
    #[serde(default)]
    pub index: usize,

    /// Elements in paint order; later entries draw over earlier ones.
    #[serde(default)]
    pub elements: Vec<SlideElement>,

    /// Background color. `None` means the default canvas color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionType>,

    /// Speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Slide {
    /// Create an empty slide at the given position.
    pub fn new(index: usize) -> Self {
        Self {
            id: new_id("slide"),
            index,
            elements: Vec::new(),
            background: None,
            layout: None,
            theme: None,
            transition: None,
            notes: None,
        }
    }

    /// Create a slide holding the default text placeholder.
    pub fn with_placeholder(index: usize) -> Self {
        let mut slide = Self::new(index);
        slide.elements.push(SlideElement::placeholder());
        slide
    }

    /// Create an empty slide tagged with the `blank` layout.
    pub fn blank(index: usize) -> Self {
        let mut slide = Self::new(index);
        slide.layout = Some(LayoutType::Blank);
        slide
    }

    pub fn element(&self, id: &str) -> Option<&SlideElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut SlideElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Remove an element by id, returning it.
    pub fn remove_element(&mut self, id: &str) -> Result<SlideElement> {
        let pos = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(pos))
    }

    /// Replace every element with the template for `layout` and record it.
    pub fn set_layout(&mut self, layout: LayoutType) {
        self.elements = layout::apply_layout(self, layout);
        self.layout = Some(layout);
    }

    /// Recolor the slide for `theme` and record it.
    pub fn set_theme(&mut self, theme: ThemeType) {
        let applied = theme::apply_theme(self, theme);
        self.background = Some(applied.background);
        self.elements = applied.elements;
        self.theme = Some(theme);
    }

    pub fn set_transition(&mut self, transition: TransitionType) {
        self.transition = Some(transition::apply_transition(transition));
    }

    /// Deep copy under fresh slide and element ids.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id("slide"),
            elements: self.elements.iter().map(SlideElement::duplicate).collect(),
            ..self.clone()
        }
    }
}

/// An ordered, never-empty deck of slides.
///
/// The slide list is private so that every structural change ends with a
/// reindex; `slides[i].index == i` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slide>", into = "Vec<Slide>")]
pub struct Presentation {
    slides: Vec<Slide>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Slide>> for Presentation {
    type Error = Error;

    fn try_from(slides: Vec<Slide>) -> Result<Self> {
        Self::from_slides(slides)
    }
}

impl From<Presentation> for Vec<Slide> {
    fn from(presentation: Presentation) -> Self {
        presentation.slides
    }
}

impl Presentation {
    /// A fresh deck with one placeholder slide.
    pub fn new() -> Self {
        Self {
            slides: vec![Slide::with_placeholder(0)],
        }
    }

    /// A deck with a single empty `blank` slide.
    pub fn blank() -> Self {
        Self {
            slides: vec![Slide::blank(0)],
        }
    }

    /// Build a deck from a slide list, reindexing it.
    pub fn from_slides(slides: Vec<Slide>) -> Result<Self> {
        if slides.is_empty() {
            return Err(Error::EmptyReplacement);
        }
        let mut presentation = Self { slides };
        presentation.reindex();
        Ok(presentation)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn into_slides(self) -> Vec<Slide> {
        self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Look up a slide or report the out-of-range index.
    pub fn slide_mut_checked(&mut self, index: usize) -> Result<&mut Slide> {
        let len = self.slides.len();
        self.slides
            .get_mut(index)
            .ok_or(Error::SlideOutOfRange { index, len })
    }

    /// Total number of elements across all slides.
    pub fn element_count(&self) -> usize {
        self.slides.iter().map(|s| s.elements.len()).sum()
    }

    /// Reassign `index` so that it equals each slide's position.
    pub fn reindex(&mut self) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.index = i;
        }
    }

    /// Insert `slide` at `at` (clamped to the end) and return its position.
    pub fn insert_slide(&mut self, at: Option<usize>, slide: Slide) -> usize {
        let pos = at.unwrap_or(self.slides.len()).min(self.slides.len());
        self.slides.insert(pos, slide);
        self.reindex();
        pos
    }

    /// Insert a slide holding the default placeholder.
    pub fn add_slide(&mut self, at: Option<usize>) -> usize {
        self.insert_slide(at, Slide::with_placeholder(0))
    }

    /// Insert a copy of the slide at `index` right after it.
    pub fn duplicate_slide(&mut self, index: usize) -> Result<usize> {
        let len = self.slides.len();
        let copy = self
            .slides
            .get(index)
            .ok_or(Error::SlideOutOfRange { index, len })?
            .duplicate();
        Ok(self.insert_slide(Some(index + 1), copy))
    }

    /// Remove the slide at `index`. The last remaining slide is protected.
    pub fn remove_slide(&mut self, index: usize) -> Result<Slide> {
        let len = self.slides.len();
        if index >= len {
            return Err(Error::SlideOutOfRange { index, len });
        }
        if len == 1 {
            return Err(Error::LastSlide);
        }
        let removed = self.slides.remove(index);
        self.reindex();
        Ok(removed)
    }

    /// Move the slide at `from` so that it ends up at `to`.
    pub fn move_slide(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.slides.len();
        if from >= len {
            return Err(Error::SlideOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(Error::SlideOutOfRange { index: to, len });
        }
        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);
        self.reindex();
        Ok(())
    }

    /// Swap the whole slide list for `slides`.
    pub fn replace_slides(&mut self, slides: Vec<Slide>) -> Result<()> {
        *self = Self::from_slides(slides)?;
        Ok(())
    }

    /// Apply `theme` to every slide.
    pub fn apply_theme_all(&mut self, theme: ThemeType) {
        for slide in &mut self.slides {
            slide.set_theme(theme);
        }
    }
}
