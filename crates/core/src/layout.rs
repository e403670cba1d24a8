//! Named slide layouts.
//!
//! A layout is a template stamp: applying one replaces the slide's elements
//! with a fixed set of placeholders. Nothing from the previous element list
//! survives.

use crate::theme::palette;
use crate::types::{
    ElementKind, HorizontalAlign, ImageProps, Slide, SlideElement, TextProps, VerticalAlign,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout presets. `content` and `twoColumn` are accepted as older names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    Blank,
    Title,
    #[serde(alias = "content")]
    TitleBody,
    #[serde(alias = "twoColumn")]
    TitleTwoColumn,
    TitleOnly,
    SectionHeader,
    Comparison,
    Quote,
    ImageCaption,
    BigNumber,
}

impl LayoutType {
    pub const ALL: [Self; 10] = [
        Self::Blank,
        Self::Title,
        Self::TitleBody,
        Self::TitleTwoColumn,
        Self::TitleOnly,
        Self::SectionHeader,
        Self::Comparison,
        Self::Quote,
        Self::ImageCaption,
        Self::BigNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Title => "title",
            Self::TitleBody => "title-body",
            Self::TitleTwoColumn => "title-two-column",
            Self::TitleOnly => "title-only",
            Self::SectionHeader => "section-header",
            Self::Comparison => "comparison",
            Self::Quote => "quote",
            Self::ImageCaption => "image-caption",
            Self::BigNumber => "big-number",
        }
    }

    /// Parse a layout name, resolving the legacy aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "content" => Some(Self::TitleBody),
            "twoColumn" => Some(Self::TitleTwoColumn),
            _ => Self::ALL.into_iter().find(|l| l.as_str() == name),
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text placeholder builder.
struct Placeholder {
    content: &'static str,
    rect: (f64, f64, f64, f64),
    font_size: f64,
    bold: bool,
    italic: bool,
    align: HorizontalAlign,
    vertical_align: VerticalAlign,
}

impl Placeholder {
    fn new(content: &'static str, rect: (f64, f64, f64, f64), font_size: f64) -> Self {
        Self {
            content,
            rect,
            font_size,
            bold: false,
            italic: false,
            align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
        }
    }

    fn heading(content: &'static str, rect: (f64, f64, f64, f64), font_size: f64) -> Self {
        Self {
            bold: true,
            vertical_align: VerticalAlign::Middle,
            ..Self::new(content, rect, font_size)
        }
    }

    fn centered(mut self) -> Self {
        self.align = HorizontalAlign::Center;
        self
    }

    fn build(self, color: &str) -> SlideElement {
        let (x, y, width, height) = self.rect;
        let props = TextProps {
            content: self.content.to_string(),
            font_size: self.font_size,
            color: color.to_string(),
            bold: self.bold,
            italic: self.italic,
            align: self.align,
            vertical_align: self.vertical_align,
            ..TextProps::default()
        };
        SlideElement::new(ElementKind::Text(props), x, y, width, height)
    }
}

const TITLE_BAR: (f64, f64, f64, f64) = (5.0, 5.0, 90.0, 15.0);

/// Build the complete element list for `layout`.
///
/// Text placeholders take the slide theme's text color when one is set.
pub fn apply_layout(slide: &Slide, layout: LayoutType) -> Vec<SlideElement> {
    let text_color = slide
        .theme
        .map(|t| palette(t).text.to_string())
        .unwrap_or_else(|| TextProps::default().color);

    let placeholders = match layout {
        LayoutType::Blank => Vec::new(),
        LayoutType::Title => vec![
            Placeholder::heading("Click to add title", (10.0, 30.0, 80.0, 20.0), 44.0).centered(),
            Placeholder::new("Click to add subtitle", (15.0, 55.0, 70.0, 12.0), 24.0).centered(),
        ],
        LayoutType::TitleBody => vec![
            Placeholder::heading("Click to add title", TITLE_BAR, 36.0),
            Placeholder::new("Click to add text", (5.0, 25.0, 90.0, 65.0), 20.0),
        ],
        LayoutType::TitleTwoColumn => vec![
            Placeholder::heading("Click to add title", TITLE_BAR, 36.0),
            Placeholder::new("Left column", (5.0, 25.0, 43.0, 65.0), 20.0),
            Placeholder::new("Right column", (52.0, 25.0, 43.0, 65.0), 20.0),
        ],
        LayoutType::TitleOnly => vec![Placeholder::heading("Click to add title", TITLE_BAR, 36.0)],
        LayoutType::SectionHeader => vec![
            Placeholder::heading("Section title", (10.0, 40.0, 80.0, 15.0), 40.0),
            Placeholder::new("Section description", (10.0, 58.0, 80.0, 10.0), 20.0),
        ],
        LayoutType::Comparison => vec![
            Placeholder::heading("Click to add title", TITLE_BAR, 36.0),
            Placeholder::heading("Option A", (5.0, 22.0, 43.0, 8.0), 24.0),
            Placeholder::new("Details", (5.0, 32.0, 43.0, 58.0), 18.0),
            Placeholder::heading("Option B", (52.0, 22.0, 43.0, 8.0), 24.0),
            Placeholder::new("Details", (52.0, 32.0, 43.0, 58.0), 18.0),
        ],
        LayoutType::Quote => vec![
            Placeholder {
                italic: true,
                vertical_align: VerticalAlign::Middle,
                ..Placeholder::new("\"Add a quote\"", (10.0, 30.0, 80.0, 30.0), 32.0).centered()
            },
            Placeholder {
                align: HorizontalAlign::Right,
                ..Placeholder::new("Attribution", (40.0, 65.0, 50.0, 8.0), 18.0)
            },
        ],
        LayoutType::ImageCaption => vec![
            Placeholder::heading("Click to add title", (5.0, 5.0, 90.0, 12.0), 32.0),
            Placeholder::new("Add a caption", (15.0, 80.0, 70.0, 10.0), 18.0).centered(),
        ],
        LayoutType::BigNumber => vec![
            Placeholder::heading("100%", (10.0, 25.0, 80.0, 30.0), 72.0).centered(),
            Placeholder::new("What this number means", (10.0, 60.0, 80.0, 15.0), 24.0).centered(),
        ],
    };

    let mut elements: Vec<SlideElement> = placeholders
        .into_iter()
        .map(|p| p.build(&text_color))
        .collect();

    if layout == LayoutType::ImageCaption {
        let frame = SlideElement::new(
            ElementKind::Image(ImageProps::default()),
            15.0,
            20.0,
            70.0,
            55.0,
        );
        elements.insert(1, frame);
    }

    elements
}
