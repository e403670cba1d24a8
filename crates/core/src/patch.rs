//! Partial element updates with per-variant field validation.
//!
//! Agents describe new elements and edits as a flat bag of optional fields.
//! A patch is merged onto an element only if every field it carries belongs
//! to that element's type; otherwise the whole patch is rejected.

use crate::error::{Error, Result};
use crate::types::{
    ElementKind, ElementType, HorizontalAlign, ShapeType, SlideElement, TableCell, VerticalAlign,
};
use serde::{Deserialize, Serialize};

/// A flat set of optional element fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    /// Must match the target's type when present.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<ElementType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    // Text (content also labels shapes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<HorizontalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,

    // Shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    // Image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    // Table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<Vec<TableCell>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_row: Option<bool>,
}

impl ElementPatch {
    /// Names of the type-specific fields this patch sets.
    fn set_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut note = |set: bool, name: &'static str| {
            if set {
                fields.push(name);
            }
        };
        note(self.content.is_some(), "content");
        note(self.font_size.is_some(), "fontSize");
        note(self.font_face.is_some(), "fontFace");
        note(self.color.is_some(), "color");
        note(self.bold.is_some(), "bold");
        note(self.italic.is_some(), "italic");
        note(self.align.is_some(), "align");
        note(self.vertical_align.is_some(), "verticalAlign");
        note(self.shape_type.is_some(), "shapeType");
        note(self.fill.is_some(), "fill");
        note(self.stroke.is_some(), "stroke");
        note(self.stroke_width.is_some(), "strokeWidth");
        note(self.rotation.is_some(), "rotation");
        note(self.image_url.is_some(), "imageUrl");
        note(self.rows.is_some(), "rows");
        note(self.columns.is_some(), "columns");
        note(self.cells.is_some(), "cells");
        note(self.border_color.is_some(), "borderColor");
        note(self.border_width.is_some(), "borderWidth");
        note(self.header_row.is_some(), "headerRow");
        fields
    }

    /// Reject the patch if it carries fields foreign to `kind`.
    pub fn check_applicable(&self, kind: ElementType) -> Result<()> {
        if let Some(expected) = self.element_type {
            if expected != kind {
                return Err(Error::KindMismatch {
                    expected,
                    found: kind,
                });
            }
        }
        let allowed = allowed_fields(kind);
        match self.set_fields().into_iter().find(|f| !allowed.contains(f)) {
            Some(field) => Err(Error::FieldNotApplicable { field, kind }),
            None => Ok(()),
        }
    }

    /// Merge onto `element`, validating the result.
    ///
    /// On error `element` is left untouched.
    pub fn apply_to(&self, element: &mut SlideElement) -> Result<()> {
        self.check_applicable(element.element_type())?;

        let mut next = element.clone();
        merge(&mut next.x, self.x);
        merge(&mut next.y, self.y);
        merge(&mut next.width, self.width);
        merge(&mut next.height, self.height);

        match &mut next.kind {
            ElementKind::Text(text) => {
                merge(&mut text.content, self.content.clone());
                merge(&mut text.font_size, self.font_size);
                merge(&mut text.font_face, self.font_face.clone());
                merge(&mut text.color, self.color.clone());
                merge(&mut text.bold, self.bold);
                merge(&mut text.italic, self.italic);
                merge(&mut text.align, self.align);
                merge(&mut text.vertical_align, self.vertical_align);
            }
            ElementKind::Shape(shape) => {
                if self.content.is_some() {
                    shape.content = self.content.clone();
                }
                merge(&mut shape.shape_type, self.shape_type);
                merge(&mut shape.fill, self.fill.clone());
                merge(&mut shape.stroke, self.stroke.clone());
                merge(&mut shape.stroke_width, self.stroke_width);
                if let Some(rotation) = self.rotation {
                    shape.rotation = normalize_rotation(rotation);
                }
            }
            ElementKind::Image(image) => {
                merge(&mut image.image_url, self.image_url.clone());
            }
            ElementKind::Table(table) => {
                if let Some(cells) = &self.cells {
                    table.cells = cells.clone();
                    table.rows = cells.len();
                    table.columns = cells.first().map_or(0, Vec::len);
                }
                merge(&mut table.rows, self.rows);
                merge(&mut table.columns, self.columns);
                merge(&mut table.border_color, self.border_color.clone());
                merge(&mut table.border_width, self.border_width);
                merge(&mut table.header_row, self.header_row);
                table.validate()?;
            }
        }

        next.validate_geometry()?;
        *element = next;
        Ok(())
    }

    /// Build a new element of `kind` from this patch over default attributes.
    pub fn build(
        &self,
        kind: ElementType,
        default_rect: (f64, f64, f64, f64),
    ) -> Result<SlideElement> {
        let (x, y, width, height) = default_rect;
        let mut element = SlideElement::new(ElementKind::default_for(kind), x, y, width, height);
        self.apply_to(&mut element)?;
        Ok(element)
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn normalize_rotation(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

fn allowed_fields(kind: ElementType) -> &'static [&'static str] {
    match kind {
        ElementType::Text => &[
            "content",
            "fontSize",
            "fontFace",
            "color",
            "bold",
            "italic",
            "align",
            "verticalAlign",
        ],
        ElementType::Shape => &[
            "content",
            "shapeType",
            "fill",
            "stroke",
            "strokeWidth",
            "rotation",
        ],
        ElementType::Image => &["imageUrl"],
        ElementType::Table => &[
            "rows",
            "columns",
            "cells",
            "borderColor",
            "borderWidth",
            "headerRow",
        ],
    }
}
