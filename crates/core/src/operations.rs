//! Operation-based mutation of a presentation.
//!
//! Operations apply strictly in order, each seeing the effect of the ones
//! before it. An operation whose target cannot be validated is skipped and
//! the rest of the batch still applies.

use crate::error::{Error, Result};
use crate::layout::LayoutType;
use crate::patch::ElementPatch;
use crate::theme::ThemeType;
use crate::types::{ElementType, Presentation, Slide, SlideElement};
use serde::{Deserialize, Serialize};

/// Default rectangles for elements added without explicit geometry.
const DEFAULT_TEXT_RECT: (f64, f64, f64, f64) = (10.0, 10.0, 80.0, 15.0);
const DEFAULT_SHAPE_RECT: (f64, f64, f64, f64) = (35.0, 35.0, 30.0, 30.0);
const DEFAULT_IMAGE_RECT: (f64, f64, f64, f64) = (25.0, 25.0, 50.0, 50.0);

/// A typed instruction that mutates a presentation.
///
/// Omitted `slideIndex` fields target the active slide, except for
/// `createSlide`, which appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Operation {
    CreateSlide {
        #[serde(default)]
        slide_index: Option<usize>,
        #[serde(default)]
        layout: Option<LayoutType>,
        #[serde(default)]
        background: Option<String>,
    },
    DeleteSlide {
        slide_index: usize,
    },
    ReorderSlides {
        from_index: usize,
        to_index: usize,
    },
    AddText {
        #[serde(default)]
        slide_index: Option<usize>,
        #[serde(default)]
        element: ElementPatch,
    },
    AddShape {
        #[serde(default)]
        slide_index: Option<usize>,
        #[serde(default)]
        element: ElementPatch,
    },
    AddImage {
        #[serde(default)]
        slide_index: Option<usize>,
        #[serde(default)]
        element: ElementPatch,
    },
    UpdateElement {
        #[serde(default)]
        slide_index: Option<usize>,
        element_id: String,
        #[serde(default)]
        element: ElementPatch,
    },
    DeleteElement {
        #[serde(default)]
        slide_index: Option<usize>,
        element_id: String,
    },
    SetSlideBackground {
        #[serde(default)]
        slide_index: Option<usize>,
        background: String,
    },
    /// Recorded only; recoloring is done by the theme applier.
    ApplyTheme {
        theme: ThemeType,
    },
}

impl Operation {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateSlide { .. } => "createSlide",
            Self::DeleteSlide { .. } => "deleteSlide",
            Self::ReorderSlides { .. } => "reorderSlides",
            Self::AddText { .. } => "addText",
            Self::AddShape { .. } => "addShape",
            Self::AddImage { .. } => "addImage",
            Self::UpdateElement { .. } => "updateElement",
            Self::DeleteElement { .. } => "deleteElement",
            Self::SetSlideBackground { .. } => "setSlideBackground",
            Self::ApplyTheme { .. } => "applyTheme",
        }
    }
}

/// What happened to one operation of a batch.
#[derive(Debug)]
pub enum OpOutcome {
    Applied,
    Skipped(Error),
}

impl OpOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of applying a batch.
#[derive(Debug)]
pub struct ApplyOutcome {
    pub presentation: Presentation,
    /// One entry per input operation, in order.
    pub results: Vec<OpOutcome>,
    /// Last theme requested by an `applyTheme` operation, if any.
    pub theme: Option<ThemeType>,
}

impl ApplyOutcome {
    pub fn applied_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_applied()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.results.iter().enumerate().filter_map(|(i, r)| match r {
            OpOutcome::Skipped(err) => Some((i, err)),
            OpOutcome::Applied => None,
        })
    }
}

/// Apply `operations` to a copy of `presentation`.
///
/// The input is never modified, so earlier snapshots of it stay valid.
pub fn apply(
    presentation: &Presentation,
    active_slide: usize,
    operations: &[Operation],
) -> ApplyOutcome {
    let mut next = presentation.clone();
    let mut results = Vec::with_capacity(operations.len());
    let mut theme = None;

    for (i, op) in operations.iter().enumerate() {
        if let Operation::ApplyTheme { theme: t } = op {
            theme = Some(*t);
        }
        match apply_one(&mut next, active_slide, op) {
            Ok(()) => {
                log::debug!("Applied operation {} ({})", i, op.name());
                results.push(OpOutcome::Applied);
            }
            Err(e) => {
                log::warn!("Skipping operation {} ({}): {}", i, op.name(), e);
                results.push(OpOutcome::Skipped(e));
            }
        }
    }

    ApplyOutcome {
        presentation: next,
        results,
        theme,
    }
}

/// Replace the whole presentation with `slides`, bypassing operation checks.
///
/// Slides are reindexed; an empty list is refused.
pub fn replace(slides: Vec<Slide>) -> Result<Presentation> {
    Presentation::from_slides(slides)
}

fn apply_one(p: &mut Presentation, active_slide: usize, op: &Operation) -> Result<()> {
    match op {
        Operation::CreateSlide {
            slide_index,
            layout,
            background,
        } => {
            let len = p.len();
            if let Some(index) = *slide_index {
                if index > len {
                    return Err(Error::SlideOutOfRange { index, len });
                }
            }
            let mut slide = Slide::with_placeholder(0);
            slide.layout = *layout;
            slide.background = background.clone();
            p.insert_slide(*slide_index, slide);
            Ok(())
        }
        Operation::DeleteSlide { slide_index } => p.remove_slide(*slide_index).map(|_| ()),
        Operation::ReorderSlides {
            from_index,
            to_index,
        } => p.move_slide(*from_index, *to_index),
        Operation::AddText {
            slide_index,
            element,
        } => {
            let index = slide_index.unwrap_or(active_slide);
            add_element(p, index, element, ElementType::Text, DEFAULT_TEXT_RECT)
        }
        Operation::AddShape {
            slide_index,
            element,
        } => {
            let index = slide_index.unwrap_or(active_slide);
            add_element(p, index, element, ElementType::Shape, DEFAULT_SHAPE_RECT)
        }
        Operation::AddImage {
            slide_index,
            element,
        } => {
            let index = slide_index.unwrap_or(active_slide);
            add_element(p, index, element, ElementType::Image, DEFAULT_IMAGE_RECT)
        }
        Operation::UpdateElement {
            slide_index,
            element_id,
            element,
        } => {
            let slide = p.slide_mut_checked(slide_index.unwrap_or(active_slide))?;
            let target = slide
                .element_mut(element_id)
                .ok_or_else(|| Error::ElementNotFound(element_id.clone()))?;
            element.apply_to(target)
        }
        Operation::DeleteElement {
            slide_index,
            element_id,
        } => {
            let slide = p.slide_mut_checked(slide_index.unwrap_or(active_slide))?;
            slide.remove_element(element_id).map(|_| ())
        }
        Operation::SetSlideBackground {
            slide_index,
            background,
        } => {
            let slide = p.slide_mut_checked(slide_index.unwrap_or(active_slide))?;
            slide.background = Some(background.clone());
            Ok(())
        }
        Operation::ApplyTheme { .. } => Ok(()),
    }
}

fn add_element(
    p: &mut Presentation,
    slide_index: usize,
    patch: &ElementPatch,
    kind: ElementType,
    default_rect: (f64, f64, f64, f64),
) -> Result<()> {
    let slide = p.slide_mut_checked(slide_index)?;
    let element: SlideElement = patch.build(kind, default_rect)?;
    slide.elements.push(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementKind;

    fn text_patch(content: &str) -> ElementPatch {
        ElementPatch {
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_batch_partial_application() {
        let p = Presentation::new();
        let valid_id = p.slides()[0].elements[0].id.clone();
        let ops = vec![
            Operation::UpdateElement {
                slide_index: None,
                element_id: valid_id.clone(),
                element: text_patch("Updated"),
            },
            Operation::UpdateElement {
                slide_index: None,
                element_id: "missing-id".to_string(),
                element: text_patch("Nope"),
            },
            Operation::SetSlideBackground {
                slide_index: None,
                background: "#ff0000".to_string(),
            },
        ];

        let outcome = apply(&p, 0, &ops);
        assert!(outcome.results[0].is_applied());
        assert!(matches!(
            outcome.results[1],
            OpOutcome::Skipped(Error::ElementNotFound(_))
        ));
        assert!(outcome.results[2].is_applied());

        let slide = &outcome.presentation.slides()[0];
        assert_eq!(slide.background.as_deref(), Some("#ff0000"));
        match &slide.element(&valid_id).unwrap().kind {
            ElementKind::Text(text) => assert_eq!(text.content, "Updated"),
            _ => panic!("expected text"),
        }
        // The input is untouched.
        assert_eq!(p.slides()[0].background, None);
    }

    #[test]
    fn test_later_ops_see_earlier_ones() {
        let p = Presentation::new();
        let ops = vec![
            Operation::CreateSlide {
                slide_index: None,
                layout: None,
                background: None,
            },
            Operation::AddText {
                slide_index: Some(1),
                element: text_patch("On the new slide"),
            },
        ];
        let outcome = apply(&p, 0, &ops);
        assert_eq!(outcome.applied_count(), 2);
        let slides = outcome.presentation.slides();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].elements.len(), 2);
    }

    #[test]
    fn test_create_slide_has_one_placeholder() {
        let outcome = apply(
            &Presentation::new(),
            0,
            &[Operation::CreateSlide {
                slide_index: Some(0),
                layout: Some(LayoutType::Title),
                background: Some("#000000".to_string()),
            }],
        );
        let first = &outcome.presentation.slides()[0];
        assert_eq!(first.elements.len(), 1);
        assert_eq!(first.layout, Some(LayoutType::Title));
        assert_eq!(first.index, 0);
        assert_eq!(outcome.presentation.slides()[1].index, 1);
    }

    #[test]
    fn test_delete_never_empties() {
        let mut p = Presentation::new();
        p.add_slide(None);
        p.add_slide(None);
        let ops: Vec<_> = (0..5)
            .map(|_| Operation::DeleteSlide { slide_index: 0 })
            .collect();
        let outcome = apply(&p, 0, &ops);
        assert_eq!(outcome.presentation.len(), 1);
        assert_eq!(outcome.applied_count(), 2);
        assert!(matches!(outcome.results[4], OpOutcome::Skipped(Error::LastSlide)));
    }

    #[test]
    fn test_out_of_range_slide_skipped() {
        let ops = vec![
            Operation::AddShape {
                slide_index: Some(9),
                element: ElementPatch::default(),
            },
            Operation::AddShape {
                slide_index: None,
                element: ElementPatch::default(),
            },
        ];
        let outcome = apply(&Presentation::new(), 0, &ops);
        assert!(matches!(
            outcome.results[0],
            OpOutcome::Skipped(Error::SlideOutOfRange { index: 9, len: 1 })
        ));
        assert!(outcome.results[1].is_applied());
        assert_eq!(outcome.presentation.slides()[0].elements.len(), 2);
    }

    #[test]
    fn test_reorder_and_delete_element() {
        let mut p = Presentation::new();
        p.add_slide(None);
        let moved = p.slides()[1].id.clone();
        let element_id = p.slides()[1].elements[0].id.clone();
        let ops = vec![
            Operation::ReorderSlides {
                from_index: 1,
                to_index: 0,
            },
            Operation::DeleteElement {
                slide_index: Some(0),
                element_id,
            },
        ];
        let outcome = apply(&p, 0, &ops);
        let slides = outcome.presentation.slides();
        assert_eq!(slides[0].id, moved);
        assert!(slides[0].elements.is_empty());
        assert_eq!(slides[0].index, 0);
        assert_eq!(slides[1].index, 1);
    }

    #[test]
    fn test_apply_theme_is_recorded_not_applied() {
        let p = Presentation::new();
        let outcome = apply(&p, 0, &[Operation::ApplyTheme { theme: ThemeType::Dark }]);
        assert_eq!(outcome.theme, Some(ThemeType::Dark));
        assert_eq!(outcome.presentation, p);
    }

    #[test]
    fn test_operations_from_json() {
        let json = r##"[
            {"type":"createSlide","layout":"content"},
            {"type":"addImage","slideIndex":1,"element":{"imageUrl":"https://example.com/a.png"}},
            {"type":"setSlideBackground","slideIndex":1,"background":"#101010"},
            {"type":"applyTheme","theme":"ocean"}
        ]"##;
        let ops: Vec<Operation> = serde_json::from_str(json).unwrap();
        assert_eq!(ops.len(), 4);
        let outcome = apply(&Presentation::new(), 0, &ops);
        assert_eq!(outcome.applied_count(), 4);
        let slide = &outcome.presentation.slides()[1];
        assert_eq!(slide.layout, Some(LayoutType::TitleBody));
        assert_eq!(slide.elements[1].element_type(), ElementType::Image);
    }

    #[test]
    fn test_replace_reindexes() {
        let slides = vec![Slide::blank(4), Slide::blank(4)];
        let p = replace(slides).unwrap();
        assert_eq!(p.slides()[1].index, 1);
        assert!(matches!(replace(Vec::new()), Err(Error::EmptyReplacement)));
    }
}
