//! WASM bindings for the slide-deck editor.
//!
//! Exposes one editing session per open document to the web frontend.
//! Slides and agent events cross the boundary as plain JavaScript objects.

use deck_core::{
    import_or_blank, AgentEvent, CanvasSize, Editor, Error, Exporter, GestureMode, Importer,
    OpOutcome, Presentation, ResizeHandle, Slide,
};
use serde::de::{self, value::StrDeserializer, IntoDeserializer};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Outcome of applying one agent event.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySummary {
    /// Number of operations that took effect.
    pub applied: usize,
    /// Operations that were skipped, with the reason.
    pub skipped: Vec<SkippedOperation>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedOperation {
    pub index: usize,
    pub reason: String,
}

fn summarize(results: &[OpOutcome]) -> ApplySummary {
    let mut summary = ApplySummary {
        applied: 0,
        skipped: Vec::new(),
    };
    for (index, result) in results.iter().enumerate() {
        match result {
            OpOutcome::Applied => summary.applied += 1,
            OpOutcome::Skipped(e) => summary.skipped.push(SkippedOperation {
                index,
                reason: e.to_string(),
            }),
        }
    }
    summary
}

/// Slides handed over by the JavaScript loader.
struct JsSlides(JsValue);

impl Importer for JsSlides {
    fn import(&self) -> deck_core::Result<Vec<Slide>> {
        serde_wasm_bindgen::from_value(self.0.clone())
            .map_err(|e| Error::ImportFailed(format!("Invalid slides: {}", e)))
    }
}

/// Hands slides to a JavaScript persistence callback.
struct JsCallback<'a>(&'a js_sys::Function);

impl Exporter for JsCallback<'_> {
    fn export(&self, slides: &[Slide]) -> deck_core::Result<()> {
        let value = serde_wasm_bindgen::to_value(&slides)
            .map_err(|e| Error::ExportFailed(format!("Serialization error: {}", e)))?;
        self.0
            .call1(&JsValue::NULL, &value)
            .map(|_| ())
            .map_err(|e| Error::ExportFailed(format!("{:?}", e)))
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Read a handle name such as `top-left` using the handle's own serde names.
fn parse_handle(name: &str) -> Result<ResizeHandle, String> {
    let de: StrDeserializer<'_, de::value::Error> = name.into_deserializer();
    ResizeHandle::deserialize(de).map_err(|e| format!("Unknown resize handle: {}", e))
}

/// Editing session for one open deck.
#[wasm_bindgen]
pub struct DeckEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl DeckEditor {
    /// Open a deck from an array of slides.
    ///
    /// `null` or `undefined` starts a fresh deck; anything unreadable
    /// starts from a single blank slide.
    #[wasm_bindgen(constructor)]
    pub fn new(slides: JsValue) -> DeckEditor {
        Self {
            editor: Editor::new(load(slides)),
        }
    }

    /// Switch to another document. Undo history does not carry over.
    pub fn open(&mut self, slides: JsValue) {
        self.editor.open(load(slides));
    }

    pub fn slides(&self) -> Result<JsValue, JsValue> {
        to_js(&self.editor.presentation().slides())
    }

    #[wasm_bindgen(getter = activeSlide)]
    pub fn active_slide(&self) -> usize {
        self.editor.active_slide()
    }

    #[wasm_bindgen(setter = activeSlide)]
    pub fn set_active_slide(&mut self, index: usize) {
        self.editor.set_active_slide(index);
    }

    #[wasm_bindgen(getter = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.editor.is_dirty()
    }

    /// Apply an `{ operations?, slidesData? }` event as one undo step.
    pub fn apply(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: AgentEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsValue::from_str(&format!("Invalid event: {}", e)))?;
        let summary = self.apply_event(event).map_err(|e| JsValue::from_str(&e))?;
        to_js(&summary)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.editor.history().can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.editor.history().can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    #[wasm_bindgen(js_name = addSlide)]
    pub fn add_slide(&mut self) -> usize {
        self.editor.add_slide()
    }

    #[wasm_bindgen(js_name = deleteSlide)]
    pub fn delete_slide(&mut self, index: usize) -> Result<(), JsValue> {
        self.editor
            .delete_slide(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(
        &mut self,
        slide_index: usize,
        element_id: &str,
        x: f64,
        y: f64,
    ) -> Result<(), JsValue> {
        self.begin(slide_index, element_id, GestureMode::Drag, (x, y))
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(
        &mut self,
        slide_index: usize,
        element_id: &str,
        handle: &str,
        x: f64,
        y: f64,
    ) -> Result<(), JsValue> {
        let handle = parse_handle(handle).map_err(|e| JsValue::from_str(&e))?;
        self.begin(slide_index, element_id, GestureMode::Resize(handle), (x, y))
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Follow the pointer. Returns the new geometry, or `null` when idle or
    /// when a coordinate is not a finite number.
    #[wasm_bindgen(js_name = updateGesture)]
    pub fn update_gesture(
        &mut self,
        x: f64,
        y: f64,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<JsValue, JsValue> {
        match self
            .editor
            .update_gesture((x, y), CanvasSize::new(canvas_width, canvas_height))
        {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = endGesture)]
    pub fn end_gesture(&mut self) -> bool {
        self.editor.end_gesture()
    }

    #[wasm_bindgen(js_name = cancelGesture)]
    pub fn cancel_gesture(&mut self) {
        self.editor.cancel_gesture();
    }

    /// Pass the slides to `persist`; clears the dirty flag on success.
    pub fn save(&mut self, persist: &js_sys::Function) -> Result<(), JsValue> {
        self.editor
            .save(&JsCallback(persist))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl DeckEditor {
    fn from_presentation(presentation: Presentation) -> Self {
        Self {
            editor: Editor::new(presentation),
        }
    }

    fn apply_event(&mut self, event: AgentEvent) -> Result<ApplySummary, String> {
        let results = self
            .editor
            .handle_event(event)
            .map_err(|e| e.to_string())?;
        Ok(summarize(&results))
    }

    fn begin(
        &mut self,
        slide_index: usize,
        element_id: &str,
        mode: GestureMode,
        pointer: (f64, f64),
    ) -> Result<(), String> {
        self.editor
            .begin_gesture(slide_index, element_id, mode, pointer)
            .map_err(|e| e.to_string())
    }
}

fn load(slides: JsValue) -> Presentation {
    if slides.is_null() || slides.is_undefined() {
        Presentation::new()
    } else {
        import_or_blank(&JsSlides(slides))
    }
}
