//! Named color themes and the recolor pass that applies them.

use crate::color::same_color;
use crate::types::{ElementKind, Slide, SlideElement, DEFAULT_SHAPE_FILL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeType {
    Default,
    Dark,
    Ocean,
    Forest,
    Sunset,
    Minimal,
    Corporate,
    Vibrant,
}

impl ThemeType {
    pub const ALL: [Self; 8] = [
        Self::Default,
        Self::Dark,
        Self::Ocean,
        Self::Forest,
        Self::Sunset,
        Self::Minimal,
        Self::Corporate,
        Self::Vibrant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Sunset => "sunset",
            Self::Minimal => "minimal",
            Self::Corporate => "corporate",
            Self::Vibrant => "vibrant",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colors that make up a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub secondary: &'static str,
}

/// Look up the palette for `theme`.
pub fn palette(theme: ThemeType) -> ThemePalette {
    let (background, text, accent, secondary) = match theme {
        ThemeType::Default => ("#ffffff", "#333333", "#4a90d9", "#f5f5f5"),
        ThemeType::Dark => ("#1a1a2e", "#eaeaea", "#e94560", "#16213e"),
        ThemeType::Ocean => ("#e8f4f8", "#1b3a4b", "#0077b6", "#90e0ef"),
        ThemeType::Forest => ("#f1f8e9", "#2e4a1f", "#4caf50", "#c5e1a5"),
        ThemeType::Sunset => ("#fff3e0", "#4e342e", "#ff7043", "#ffcc80"),
        ThemeType::Minimal => ("#fafafa", "#212121", "#757575", "#e0e0e0"),
        ThemeType::Corporate => ("#ffffff", "#1f2d3d", "#2b5797", "#dfe6ee"),
        ThemeType::Vibrant => ("#fdf6ff", "#2d1b3d", "#9c27b0", "#ffeb3b"),
    };
    ThemePalette {
        background,
        text,
        accent,
        secondary,
    }
}

/// Recolored state produced by [`apply_theme`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeApplication {
    pub background: String,
    pub elements: Vec<SlideElement>,
}

/// Recolor `slide` for `theme`.
///
/// Text always takes the theme's text color. A shape fill is only replaced
/// when it is empty or still the stock default; any other fill is treated as
/// a user choice and kept.
pub fn apply_theme(slide: &Slide, theme: ThemeType) -> ThemeApplication {
    let colors = palette(theme);
    let elements = slide
        .elements
        .iter()
        .map(|element| {
            let mut element = element.clone();
            match &mut element.kind {
                ElementKind::Text(text) => text.color = colors.text.to_string(),
                ElementKind::Shape(shape) => {
                    if shape.fill.trim().is_empty() || same_color(&shape.fill, DEFAULT_SHAPE_FILL) {
                        shape.fill = colors.accent.to_string();
                    }
                }
                ElementKind::Image(_) | ElementKind::Table(_) => {}
            }
            element
        })
        .collect();

    ThemeApplication {
        background: colors.background.to_string(),
        elements,
    }
}
