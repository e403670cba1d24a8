//! An editing session over one open presentation.
//!
//! The editor is the single place where state changes. Each logical action
//! (a toolbar command, an operation batch, a finished drag) replaces the
//! presentation and records exactly one history entry.

use crate::agent::{agent_channel, AgentEvent, AgentReceiver, AgentSender};
use crate::collab::Exporter;
use crate::error::{Error, Result};
use crate::geometry::{CanvasSize, Gesture, GestureMode, GeometryLimits, Rect};
use crate::history::{HistoryManager, DEFAULT_HISTORY_LIMIT};
use crate::layout::LayoutType;
use crate::operations::{self, OpOutcome, Operation};
use crate::theme::ThemeType;
use crate::transition::TransitionType;
use crate::types::{Presentation, Slide, SlideElement};

/// Tunables for an [`Editor`].
#[derive(Debug, Clone)]
pub struct EditorConfig {
    history_limit: usize,
    geometry: GeometryLimits,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            geometry: GeometryLimits::default(),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` undo entries (at least 1).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn with_geometry(mut self, geometry: GeometryLimits) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn geometry(&self) -> &GeometryLimits {
        &self.geometry
    }
}

/// Editing session for one document.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    presentation: Presentation,
    active_slide: usize,
    history: HistoryManager,
    dirty: bool,
    gesture: Option<Gesture>,
    agent_tx: AgentSender,
    agent_rx: AgentReceiver,
}

impl Editor {
    pub fn new(presentation: Presentation) -> Self {
        Self::with_config(presentation, EditorConfig::default())
    }

    pub fn with_config(presentation: Presentation, config: EditorConfig) -> Self {
        let (agent_tx, agent_rx) = agent_channel();
        let mut editor = Self {
            history: HistoryManager::with_limit(config.history_limit),
            config,
            presentation,
            active_slide: 0,
            dirty: false,
            gesture: None,
            agent_tx,
            agent_rx,
        };
        editor.history.push(&editor.presentation, 0);
        editor
    }

    /// Switch to a different document, dropping the old one's history.
    pub fn open(&mut self, presentation: Presentation) {
        self.presentation = presentation;
        self.active_slide = 0;
        self.dirty = false;
        self.gesture = None;
        self.history.clear();
        self.history.push(&self.presentation, 0);
        log::debug!("Opened document with {} slides", self.presentation.len());
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn active_slide(&self) -> usize {
        self.active_slide
    }

    /// Select a slide; out-of-range indices clamp to the last slide.
    pub fn set_active_slide(&mut self, index: usize) {
        self.active_slide = index.min(self.presentation.len() - 1);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// A handle agents can use to post edits to this editor.
    pub fn agent_sender(&self) -> AgentSender {
        self.agent_tx.clone()
    }

    /// Install `next` as the live presentation and record it.
    fn commit(&mut self, next: Presentation) {
        self.presentation = next;
        self.active_slide = self.active_slide.min(self.presentation.len() - 1);
        self.history.push(&self.presentation, self.active_slide);
        self.dirty = true;
    }

    /// Run `edit` against a copy of the presentation as one undo step.
    ///
    /// A gesture in flight is cancelled first. If `edit` fails nothing else
    /// changes and nothing is recorded.
    pub fn mutate<T, F>(&mut self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Presentation) -> Result<T>,
    {
        self.cancel_gesture();
        let mut next = self.presentation.clone();
        let value = edit(&mut next)?;
        self.commit(next);
        Ok(value)
    }

    /// Apply an operation batch as one undo step.
    ///
    /// A requested theme is applied to every slide after the batch.
    pub fn apply_operations(&mut self, ops: &[Operation]) -> Vec<OpOutcome> {
        self.cancel_gesture();
        let outcome = operations::apply(&self.presentation, self.active_slide, ops);
        let mut next = outcome.presentation;
        if let Some(theme) = outcome.theme {
            next.apply_theme_all(theme);
        }
        self.commit(next);
        outcome.results
    }

    /// Replace every slide as one undo step.
    pub fn replace_slides(&mut self, slides: Vec<Slide>) -> Result<()> {
        self.cancel_gesture();
        let next = operations::replace(slides)?;
        self.commit(next);
        Ok(())
    }

    /// Handle one agent event: one apply or replacement, one history entry.
    pub fn handle_event(&mut self, event: AgentEvent) -> Result<Vec<OpOutcome>> {
        if let Some(slides) = event.slides_data {
            self.replace_slides(slides)?;
            return Ok(Vec::new());
        }
        match event.operations {
            Some(ops) if !ops.is_empty() => Ok(self.apply_operations(&ops)),
            _ => Ok(Vec::new()),
        }
    }

    /// Process every queued agent event in arrival order.
    ///
    /// Returns the number of events handled. A rejected event is logged and
    /// does not stop the rest.
    pub fn drain_agent_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.agent_rx.try_next() {
            match self.handle_event(event) {
                Ok(results) => {
                    let skipped = results.iter().filter(|r| !r.is_applied()).count();
                    if skipped > 0 {
                        log::warn!("Agent batch applied with {} skipped operations", skipped);
                    }
                }
                Err(e) => log::warn!("Rejected agent event: {}", e),
            }
            handled += 1;
        }
        handled
    }

    pub fn add_slide(&mut self) -> usize {
        let at = self.active_slide + 1;
        let pos = self
            .mutate(|p| Ok(p.add_slide(Some(at))))
            .unwrap_or(at);
        self.active_slide = pos;
        pos
    }

    pub fn duplicate_slide(&mut self, index: usize) -> Result<usize> {
        let pos = self.mutate(|p| p.duplicate_slide(index))?;
        self.active_slide = pos;
        Ok(pos)
    }

    /// Delete a slide. Deleting the only slide fails with [`Error::LastSlide`].
    pub fn delete_slide(&mut self, index: usize) -> Result<()> {
        self.mutate(|p| p.remove_slide(index).map(|_| ()))
    }

    pub fn move_slide(&mut self, from: usize, to: usize) -> Result<()> {
        self.mutate(|p| p.move_slide(from, to))?;
        self.active_slide = to;
        Ok(())
    }

    pub fn set_layout(&mut self, index: usize, layout: LayoutType) -> Result<()> {
        self.mutate(|p| {
            p.slide_mut_checked(index)?.set_layout(layout);
            Ok(())
        })
    }

    pub fn set_theme(&mut self, index: usize, theme: ThemeType) -> Result<()> {
        self.mutate(|p| {
            p.slide_mut_checked(index)?.set_theme(theme);
            Ok(())
        })
    }

    pub fn set_theme_all(&mut self, theme: ThemeType) {
        // Infallible edit.
        let _ = self.mutate(|p| {
            p.apply_theme_all(theme);
            Ok(())
        });
    }

    pub fn set_transition(&mut self, index: usize, transition: TransitionType) -> Result<()> {
        self.mutate(|p| {
            p.slide_mut_checked(index)?.set_transition(transition);
            Ok(())
        })
    }

    pub fn set_notes(&mut self, index: usize, notes: Option<String>) -> Result<()> {
        self.mutate(|p| {
            p.slide_mut_checked(index)?.notes = notes;
            Ok(())
        })
    }

    /// Run a table helper on one element.
    ///
    /// Returns `Ok(false)` when the helper rejects the edit; nothing is
    /// recorded in that case.
    pub fn edit_table<F>(&mut self, slide_index: usize, element_id: &str, edit: F) -> Result<bool>
    where
        F: FnOnce(&SlideElement) -> Option<SlideElement>,
    {
        self.cancel_gesture();
        let slide = self
            .presentation
            .slide(slide_index)
            .ok_or(Error::SlideOutOfRange {
                index: slide_index,
                len: self.presentation.len(),
            })?;
        let element = slide
            .element(element_id)
            .ok_or_else(|| Error::ElementNotFound(element_id.to_string()))?;
        let Some(edited) = edit(element) else {
            return Ok(false);
        };
        self.mutate(|p| {
            let slot = p
                .slide_mut_checked(slide_index)?
                .element_mut(element_id)
                .ok_or_else(|| Error::ElementNotFound(element_id.to_string()))?;
            *slot = edited;
            Ok(true)
        })
    }

    /// Step back one history entry. Any gesture in flight is dropped.
    pub fn undo(&mut self) -> bool {
        self.gesture = None;
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot.presentation, snapshot.active_slide);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Any gesture in flight is dropped.
    pub fn redo(&mut self) -> bool {
        self.gesture = None;
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot.presentation, snapshot.active_slide);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, presentation: Presentation, active_slide: usize) {
        self.presentation = presentation;
        self.active_slide = active_slide.min(self.presentation.len() - 1);
        self.dirty = true;
    }

    /// Start dragging or resizing an element, capturing its geometry once.
    pub fn begin_gesture(
        &mut self,
        slide_index: usize,
        element_id: &str,
        mode: GestureMode,
        pointer: (f64, f64),
    ) -> Result<()> {
        let len = self.presentation.len();
        let element = self
            .presentation
            .slide(slide_index)
            .ok_or(Error::SlideOutOfRange {
                index: slide_index,
                len,
            })?
            .element(element_id)
            .ok_or_else(|| Error::ElementNotFound(element_id.to_string()))?;
        self.gesture = Some(Gesture {
            slide_index,
            element_id: element_id.to_string(),
            mode,
            start: Rect::of(element),
            pointer_origin: pointer,
        });
        Ok(())
    }

    /// Move the gesture's element to follow the pointer. Not recorded.
    ///
    /// A pointer with a non-finite coordinate is ignored.
    pub fn update_gesture(&mut self, pointer: (f64, f64), canvas: CanvasSize) -> Option<Rect> {
        if !pointer.0.is_finite() || !pointer.1.is_finite() {
            return None;
        }
        let gesture = self.gesture.as_ref()?;
        let rect = gesture.geometry_at(&self.config.geometry, pointer, canvas);
        let element = self
            .presentation
            .slide_mut(gesture.slide_index)?
            .element_mut(&gesture.element_id)?;
        rect.write_to(element);
        Some(rect)
    }

    /// Finish the gesture, recording one history entry if anything moved.
    pub fn end_gesture(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        let moved = self
            .presentation
            .slide(gesture.slide_index)
            .and_then(|s| s.element(&gesture.element_id))
            .map_or(false, |e| Rect::of(e) != gesture.start);
        if moved {
            let next = self.presentation.clone();
            self.commit(next);
        }
        moved
    }

    /// Abandon the gesture and put the element back where it started.
    ///
    /// Every other edit calls this first, so a half-finished gesture never
    /// reaches history.
    pub fn cancel_gesture(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        log::debug!("Cancelling gesture on element {}", gesture.element_id);
        if let Some(element) = self
            .presentation
            .slide_mut(gesture.slide_index)
            .and_then(|s| s.element_mut(&gesture.element_id))
        {
            gesture.start.write_to(element);
        }
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Hand the slides to `exporter`. The model is never rolled back.
    pub fn save(&mut self, exporter: &dyn Exporter) -> Result<()> {
        exporter.export(self.presentation.slides())?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ResizeHandle;
    use crate::patch::ElementPatch;
    use crate::table;
    use std::cell::RefCell;

    struct Recorder {
        saved: RefCell<Vec<usize>>,
        fail: bool,
    }

    impl Exporter for Recorder {
        fn export(&self, slides: &[Slide]) -> Result<()> {
            if self.fail {
                return Err(Error::ExportFailed("disk full".to_string()));
            }
            self.saved.borrow_mut().push(slides.len());
            Ok(())
        }
    }

    fn first_element_id(editor: &Editor) -> String {
        editor.presentation().slides()[0].elements[0].id.clone()
    }

    #[test]
    fn test_each_action_is_one_undo_step() {
        let mut editor = Editor::new(Presentation::new());
        editor.add_slide();
        editor.add_slide();
        assert_eq!(editor.presentation().len(), 3);
        assert_eq!(editor.history().len(), 3);

        assert!(editor.undo());
        assert_eq!(editor.presentation().len(), 2);
        assert!(editor.undo());
        assert_eq!(editor.presentation().len(), 1);
        assert!(!editor.undo());
        assert!(editor.redo());
        assert_eq!(editor.presentation().len(), 2);
    }

    #[test]
    fn test_failed_mutation_records_nothing() {
        let mut editor = Editor::new(Presentation::new());
        assert!(matches!(editor.delete_slide(0), Err(Error::LastSlide)));
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_agent_event_is_one_step() {
        let mut editor = Editor::new(Presentation::new());
        let sender = editor.agent_sender();
        sender.send(AgentEvent::operations(vec![
            Operation::CreateSlide {
                slide_index: None,
                layout: None,
                background: None,
            },
            Operation::CreateSlide {
                slide_index: None,
                layout: None,
                background: None,
            },
        ]));
        sender.send(AgentEvent::replacement(vec![Slide::blank(0)]));
        sender.send(AgentEvent::replacement(Vec::new()));

        assert_eq!(editor.drain_agent_events(), 3);
        // Two accepted events, the empty replacement was refused.
        assert_eq!(editor.history().len(), 3);
        assert_eq!(editor.presentation().len(), 1);
        assert!(editor.is_dirty());

        editor.undo();
        assert_eq!(editor.presentation().len(), 3);
    }

    #[test]
    fn test_replacement_wins_over_operations() {
        let mut editor = Editor::new(Presentation::new());
        let event = AgentEvent {
            operations: Some(vec![Operation::DeleteSlide { slide_index: 0 }]),
            slides_data: Some(vec![Slide::blank(0), Slide::blank(0)]),
        };
        editor.handle_event(event).unwrap();
        assert_eq!(editor.presentation().len(), 2);
    }

    #[test]
    fn test_apply_theme_operation_recolors() {
        let mut editor = Editor::new(Presentation::new());
        editor.apply_operations(&[Operation::ApplyTheme {
            theme: ThemeType::Dark,
        }]);
        let slide = &editor.presentation().slides()[0];
        assert_eq!(slide.theme, Some(ThemeType::Dark));
        assert!(slide.background.is_some());
    }

    #[test]
    fn test_drag_gesture_records_once() {
        let mut editor = Editor::new(Presentation::new());
        let id = first_element_id(&editor);
        let canvas = CanvasSize::new(1000.0, 500.0);

        editor
            .begin_gesture(0, &id, GestureMode::Drag, (0.0, 0.0))
            .unwrap();
        for step in 1..=10 {
            editor.update_gesture((step as f64 * 5.0, 0.0), canvas);
        }
        assert_eq!(editor.history().len(), 1);
        assert!(editor.end_gesture());
        assert_eq!(editor.history().len(), 2);

        let moved = &editor.presentation().slides()[0].elements[0];
        assert!((moved.x - 15.0).abs() < 1e-9);

        editor.undo();
        assert_eq!(editor.presentation().slides()[0].elements[0].x, 10.0);
    }

    #[test]
    fn test_cancelled_gesture_leaves_no_trace() {
        let mut editor = Editor::new(Presentation::new());
        let id = first_element_id(&editor);
        let before = editor.presentation().clone();

        editor
            .begin_gesture(
                0,
                &id,
                GestureMode::Resize(ResizeHandle::BottomRight),
                (100.0, 100.0),
            )
            .unwrap();
        editor.update_gesture((300.0, 260.0), CanvasSize::new(800.0, 600.0));
        assert_ne!(editor.presentation(), &before);
        editor.cancel_gesture();

        assert_eq!(editor.presentation(), &before);
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.end_gesture());
    }

    fn drag_first_element(editor: &mut Editor, dx_px: f64) -> String {
        let id = first_element_id(editor);
        editor
            .begin_gesture(0, &id, GestureMode::Drag, (0.0, 0.0))
            .unwrap();
        editor.update_gesture((dx_px, 0.0), CanvasSize::new(1000.0, 1000.0));
        id
    }

    #[test]
    fn test_agent_batch_mid_drag_discards_drag() {
        let mut editor = Editor::new(Presentation::new());
        let id = drag_first_element(&mut editor, 500.0);
        assert_eq!(editor.presentation().slides()[0].element(&id).unwrap().x, 60.0);

        editor.apply_operations(&[Operation::SetSlideBackground {
            slide_index: Some(0),
            background: "#ff0000".to_string(),
        }]);
        assert!(editor.gesture().is_none());
        assert_eq!(editor.history().len(), 2);
        let slide = &editor.presentation().slides()[0];
        assert_eq!(slide.element(&id).unwrap().x, 10.0);
        assert_eq!(slide.background.as_deref(), Some("#ff0000"));

        editor.undo();
        editor.redo();
        assert_eq!(editor.presentation().slides()[0].element(&id).unwrap().x, 10.0);
    }

    #[test]
    fn test_command_mid_drag_then_end_records_nothing_extra() {
        let mut editor = Editor::new(Presentation::new());
        let id = drag_first_element(&mut editor, 300.0);

        editor.set_notes(0, Some("n".to_string())).unwrap();
        assert!(!editor.end_gesture());
        assert_eq!(editor.history().len(), 2);

        let slide = &editor.presentation().slides()[0];
        assert_eq!(slide.notes.as_deref(), Some("n"));
        assert_eq!(slide.element(&id).unwrap().x, 10.0);

        assert!(editor.undo());
        assert_eq!(editor.presentation().slides()[0].notes, None);
    }

    #[test]
    fn test_replacement_mid_drag_discards_drag() {
        let mut editor = Editor::new(Presentation::new());
        drag_first_element(&mut editor, 200.0);
        editor.replace_slides(vec![Slide::blank(0)]).unwrap();
        assert!(editor.gesture().is_none());
        assert!(!editor.end_gesture());
        assert_eq!(editor.history().len(), 2);
        editor.undo();
        assert_eq!(editor.presentation().slides()[0].elements[0].x, 10.0);
    }

    #[test]
    fn test_undo_mid_drag_drops_gesture() {
        let mut editor = Editor::new(Presentation::new());
        editor.add_slide();
        editor.set_active_slide(0);
        drag_first_element(&mut editor, 400.0);
        assert!(editor.undo());
        assert!(editor.gesture().is_none());
        assert_eq!(editor.presentation().slides()[0].elements[0].x, 10.0);
        assert!(!editor.end_gesture());
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut editor = Editor::new(Presentation::new());
        let id = drag_first_element(&mut editor, 100.0);
        let canvas = CanvasSize::new(1000.0, 1000.0);
        assert!(editor.update_gesture((f64::NAN, 0.0), canvas).is_none());
        assert!(editor.update_gesture((0.0, f64::INFINITY), canvas).is_none());
        let element = editor.presentation().slides()[0].element(&id).unwrap();
        assert_eq!(element.x, 20.0);

        let rect = editor
            .update_gesture((50.0, 0.0), CanvasSize::new(f64::NAN, -5.0))
            .unwrap();
        assert_eq!(rect.x, 10.0);
        assert!(rect.y.is_finite());
        assert!(!editor.end_gesture());
    }

    #[test]
    fn test_gesture_on_missing_element() {
        let mut editor = Editor::new(Presentation::new());
        assert!(matches!(
            editor.begin_gesture(0, "nope", GestureMode::Drag, (0.0, 0.0)),
            Err(Error::ElementNotFound(_))
        ));
        assert!(editor.update_gesture((1.0, 1.0), CanvasSize::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_edit_table_rejection_not_recorded() {
        let mut editor = Editor::new(Presentation::new());
        let table = table::new_table(1, 1, false);
        let table_id = table.id.clone();
        editor
            .mutate(|p| {
                p.slide_mut_checked(0)?.elements.push(table);
                Ok(())
            })
            .unwrap();
        let steps = editor.history().len();

        assert!(!editor
            .edit_table(0, &table_id, table::remove_table_row)
            .unwrap());
        assert_eq!(editor.history().len(), steps);

        assert!(editor.edit_table(0, &table_id, table::add_table_row).unwrap());
        assert_eq!(editor.history().len(), steps + 1);
        let rows = editor.presentation().slides()[0]
            .element(&table_id)
            .and_then(SlideElement::as_table)
            .map(|t| t.rows);
        assert_eq!(rows, Some(2));
    }

    #[test]
    fn test_save_clears_dirty_and_failure_keeps_state() {
        let mut editor = Editor::new(Presentation::new());
        editor.add_slide();
        let ok = Recorder {
            saved: RefCell::new(Vec::new()),
            fail: false,
        };
        editor.save(&ok).unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(ok.saved.borrow().as_slice(), &[2]);

        editor.add_slide();
        let broken = Recorder {
            saved: RefCell::new(Vec::new()),
            fail: true,
        };
        assert!(matches!(editor.save(&broken), Err(Error::ExportFailed(_))));
        assert!(editor.is_dirty());
        assert_eq!(editor.presentation().len(), 3);
    }

    #[test]
    fn test_open_clears_history() {
        let mut editor = Editor::new(Presentation::new());
        editor.add_slide();
        editor.open(Presentation::blank());
        assert!(!editor.undo());
        assert_eq!(editor.presentation().len(), 1);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_update_via_operations_respects_active_slide() {
        let mut editor = Editor::with_config(
            Presentation::new(),
            EditorConfig::new().with_history_limit(5),
        );
        editor.add_slide();
        assert_eq!(editor.active_slide(), 1);
        let results = editor.apply_operations(&[Operation::AddText {
            slide_index: None,
            element: ElementPatch {
                content: Some("Active".to_string()),
                ..Default::default()
            },
        }]);
        assert!(results[0].is_applied());
        assert_eq!(editor.presentation().slides()[1].elements.len(), 2);
        assert_eq!(editor.presentation().slides()[0].elements.len(), 1);
    }

    #[test]
    fn test_history_limit_from_config() {
        let mut editor = Editor::with_config(
            Presentation::new(),
            EditorConfig::new().with_history_limit(3),
        );
        for _ in 0..6 {
            editor.add_slide();
        }
        assert_eq!(editor.history().len(), 3);
    }
}
