//! Cross-module properties of the editing engine.

use deck_core::geometry::{resize, Rect};
use deck_core::table::{
    add_table_column, add_table_row, new_table, remove_table_column, remove_table_row,
};
use deck_core::types::{ElementKind, ShapeProps, DEFAULT_SHAPE_FILL};
use deck_core::{
    apply, apply_layout, apply_theme, AgentEvent, CanvasSize, Editor, ElementPatch, GestureMode,
    HistoryManager, LayoutType, OpOutcome, Operation, Presentation, ResizeHandle, ShapeType, Slide,
    SlideElement, ThemeType,
};

fn assert_indexed(p: &Presentation) {
    for (i, slide) in p.slides().iter().enumerate() {
        assert_eq!(slide.index, i, "slide {} has index {}", i, slide.index);
    }
}

#[test]
fn test_slide_count_and_indices_under_mixed_batches() {
    let mut p = Presentation::new();
    let batches: Vec<Vec<Operation>> = vec![
        (0..4)
            .map(|i| Operation::CreateSlide {
                slide_index: Some(i % 2),
                layout: None,
                background: None,
            })
            .collect(),
        vec![
            Operation::ReorderSlides {
                from_index: 4,
                to_index: 0,
            },
            Operation::DeleteSlide { slide_index: 2 },
            Operation::ReorderSlides {
                from_index: 0,
                to_index: 9,
            },
        ],
        (0..10)
            .map(|_| Operation::DeleteSlide { slide_index: 0 })
            .collect(),
    ];

    for batch in &batches {
        p = apply(&p, 0, batch).presentation;
        assert!(p.len() >= 1);
        assert_indexed(&p);
    }
    assert_eq!(p.len(), 1);
}

#[test]
fn test_history_snapshot_isolation() {
    let mut history = HistoryManager::new();
    let mut live = Presentation::new();
    history.push(&live, 0);
    live.add_slide(None);
    history.push(&live, 1);

    let first = history.undo().expect("one step back");
    let frozen = first.clone();

    // Push the undone state back, then keep mutating the live copy.
    history.push(&first.presentation, first.active_slide);
    live.slide_mut(0).unwrap().notes = Some("edited later".to_string());
    live.add_slide(None);

    assert_eq!(first, frozen);
    assert_eq!(first.presentation.slides()[0].notes, None);
}

#[test]
fn test_redo_invalidated_by_push() {
    let mut history = HistoryManager::new();
    history.push(&Presentation::new(), 0);
    history.push(&Presentation::blank(), 0);
    history.undo();
    history.push(&Presentation::new(), 0);
    assert!(history.redo().is_none());
}

#[test]
fn test_resize_anchor_and_floor() {
    let start = Rect::new(20.0, 20.0, 30.0, 30.0);
    let next = resize(start, ResizeHandle::TopLeft, 4.0, -6.0);
    assert!((next.x + next.width - 50.0).abs() < 1e-9);
    assert!((next.y + next.height - 50.0).abs() < 1e-9);

    for handle in ResizeHandle::ALL {
        for step in -50..=50 {
            let d = step as f64 * 3.0;
            let r = resize(start, handle, d, -d);
            assert!(r.width >= 2.0 && r.height >= 2.0, "{:?} {}", handle, d);
        }
    }
}

#[test]
fn test_table_dimensions_stay_consistent() {
    let mut table = new_table(2, 3, true);
    let script = "rcRCrrcCCRrc";
    for op in script.chars() {
        let next = match op {
            'r' => add_table_row(&table),
            'c' => add_table_column(&table),
            'R' => remove_table_row(&table),
            _ => remove_table_column(&table),
        };
        if let Some(next) = next {
            table = next;
        }
        let props = table.as_table().unwrap();
        assert_eq!(props.rows, props.cells.len());
        assert_eq!(props.columns, props.cells[0].len());
    }
}

#[test]
fn test_partial_batch_from_agent_json() {
    let p = Presentation::new();
    let valid_id = p.slides()[0].elements[0].id.clone();
    let json = format!(
        r##"{{"operations":[
            {{"type":"updateElement","elementId":"{}","element":{{"content":"Hello"}}}},
            {{"type":"updateElement","elementId":"missing-id","element":{{"content":"Lost"}}}},
            {{"type":"setSlideBackground","background":"#ff0000"}}
        ]}}"##,
        valid_id
    );
    let event = AgentEvent::from_json(&json).unwrap();
    let outcome = apply(&p, 0, event.operations.as_deref().unwrap());

    assert!(outcome.results[0].is_applied());
    assert!(matches!(outcome.results[1], OpOutcome::Skipped(_)));
    assert!(outcome.results[2].is_applied());
    let slide = &outcome.presentation.slides()[0];
    assert_eq!(slide.background.as_deref(), Some("#ff0000"));
    match &slide.elements[0].kind {
        ElementKind::Text(text) => assert_eq!(text.content, "Hello"),
        _ => panic!("expected text"),
    }
}

#[test]
fn test_theme_keeps_custom_fill() {
    let mut slide = Slide::new(0);
    let custom = SlideElement::new(
        ElementKind::Shape(ShapeProps {
            fill: "#123456".to_string(),
            ..ShapeProps::default()
        }),
        0.0,
        0.0,
        10.0,
        10.0,
    );
    let stock = SlideElement::shape(ShapeType::Rect, 20.0, 0.0, 10.0, 10.0);
    slide.elements = vec![custom, stock];

    let applied = apply_theme(&slide, ThemeType::Dark);
    let fills: Vec<&str> = applied
        .elements
        .iter()
        .map(|e| match &e.kind {
            ElementKind::Shape(s) => s.fill.as_str(),
            _ => "",
        })
        .collect();
    assert_eq!(fills[0], "#123456");
    assert_ne!(fills[1], DEFAULT_SHAPE_FILL);
    assert_eq!(fills[1], deck_core::theme::palette(ThemeType::Dark).accent);
}

#[test]
fn test_title_layout_stamp() {
    let mut slide = Slide::new(0);
    for i in 0..5 {
        slide
            .elements
            .push(SlideElement::text(format!("old {}", i), 0.0, i as f64 * 10.0, 20.0, 5.0));
    }
    assert_eq!(apply_layout(&slide, LayoutType::Title).len(), 2);
}

#[test]
fn test_cross_variant_update_is_rejected_in_batch() {
    let mut editor = Editor::new(Presentation::new());
    let id = editor.presentation().slides()[0].elements[0].id.clone();
    let results = editor.apply_operations(&[Operation::UpdateElement {
        slide_index: Some(0),
        element_id: id.clone(),
        element: ElementPatch {
            image_url: Some("https://example.com/x.png".to_string()),
            ..Default::default()
        },
    }]);
    assert!(matches!(results[0], OpOutcome::Skipped(_)));
    let element = editor.presentation().slides()[0].element(&id).unwrap();
    assert!(matches!(element.kind, ElementKind::Text(_)));
}

#[test]
fn test_dragged_then_resized_element_stays_editable() {
    let mut editor = Editor::new(Presentation::new());
    let id = editor.presentation().slides()[0].elements[0].id.clone();
    let canvas = CanvasSize::new(1000.0, 1000.0);

    editor
        .begin_gesture(0, &id, GestureMode::Drag, (0.0, 0.0))
        .unwrap();
    editor.update_gesture((2000.0, 0.0), canvas);
    assert!(editor.end_gesture());

    editor
        .begin_gesture(0, &id, GestureMode::Resize(ResizeHandle::Left), (0.0, 0.0))
        .unwrap();
    editor.update_gesture((-2000.0, 0.0), canvas);
    assert!(editor.end_gesture());

    let element = editor.presentation().slides()[0].element(&id).unwrap();
    assert!(element.x >= 0.0);
    assert!(element.x + element.width <= 100.0 + 1e-9);
    element.validate_geometry().unwrap();

    let results = editor.apply_operations(&[Operation::UpdateElement {
        slide_index: Some(0),
        element_id: id.clone(),
        element: ElementPatch {
            content: Some("hi".to_string()),
            ..Default::default()
        },
    }]);
    assert!(results[0].is_applied());
}

#[test]
fn test_agent_event_during_drag_commits_no_partial_geometry() {
    let mut editor = Editor::new(Presentation::new());
    let id = editor.presentation().slides()[0].elements[0].id.clone();
    let start_x = editor.presentation().slides()[0].elements[0].x;
    let sender = editor.agent_sender();

    editor
        .begin_gesture(0, &id, GestureMode::Drag, (0.0, 0.0))
        .unwrap();
    editor.update_gesture((500.0, 0.0), CanvasSize::new(1000.0, 1000.0));
    sender.send(AgentEvent::operations(vec![Operation::SetSlideBackground {
        slide_index: Some(0),
        background: "#00ff00".to_string(),
    }]));
    assert_eq!(editor.drain_agent_events(), 1);
    assert!(!editor.end_gesture());

    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.history().current().unwrap().presentation, *editor.presentation());
    let element = editor.presentation().slides()[0].element(&id).unwrap();
    assert_eq!(element.x, start_x);
}
