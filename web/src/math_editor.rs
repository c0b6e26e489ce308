use caret::{commands::InsertCommand, math_editor::MathEditor, settings::EditorSettings};
use formula_tree::{direction::Direction, geometry::Point, measure::MonospaceMeasure};
use serde::Serialize;
use serialization::SerializedDataType;
use wasm_bindgen::prelude::*;

use crate::{caret_host::BrowserCaret, draw_list::DrawList};

// TODO: Measure with the canvas font, through a callback into JavaScript
type WebMathEditor = MathEditor<BrowserCaret, MonospaceMeasure>;

#[wasm_bindgen]
pub struct MathEditorBindings {
    editor: WebMathEditor,
    serializer: serde_wasm_bindgen::Serializer,
}

#[wasm_bindgen]
impl MathEditorBindings {
    pub fn new() -> Self {
        Self::from_settings(EditorSettings::default())
    }

    /// Missing settings get their default values
    pub fn with_settings(settings: JsValue) -> Result<MathEditorBindings, JsValue> {
        let settings: EditorSettings = serde_wasm_bindgen::from_value(settings)?;
        Ok(Self::from_settings(settings))
    }

    pub fn focus(&mut self) {
        self.editor.focus();
    }

    pub fn unfocus(&mut self) {
        self.editor.unfocus();
    }

    pub fn move_caret(&mut self, direction: Direction) {
        self.editor.move_caret(direction);
    }

    pub fn add_character(&mut self, value: char) -> bool {
        self.editor.add_character(value)
    }

    pub fn add_command(&mut self, command: InsertCommand) {
        self.editor.add_command(command);
    }

    pub fn remove_character_before_caret(&mut self) {
        self.editor.remove_character_before_caret();
    }

    pub fn insert_line_break_at_caret(&mut self) {
        self.editor.insert_line_break_at_caret();
    }

    pub fn set_selection_anchor(&mut self, x: i32, y: i32) {
        self.editor.set_selection_anchor(Point::new(x, y));
    }

    pub fn update_selection_anchor(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let selection = self.editor.update_selection_anchor(Point::new(x, y));
        Ok(selection.serialize(&self.serializer)?)
    }

    pub fn finish_selection(&mut self) {
        self.editor.finish_selection();
    }

    pub fn select_all(&mut self) {
        self.editor.select_all();
    }

    pub fn get_caret(&self) -> BrowserCaret {
        self.editor.caret_visual().host().clone()
    }

    pub fn get_document(&self) -> Result<JsValue, JsValue> {
        let lines = self.editor.document().to_formula();
        Ok(lines.serialize(&self.serializer)?)
    }

    /// Lays out and paints the document
    pub fn render(&mut self) -> DrawList {
        let mut draw_list = DrawList::default();
        self.editor.repaint(&mut draw_list);
        draw_list
    }

    pub fn copy(&self) -> Result<String, JsValue> {
        self.editor
            .copy(SerializedDataType::JsonFormula)
            .map_err(|error| JsValue::from_str(&error.to_string()))
    }

    pub fn paste(&mut self, data: String) -> Result<(), JsValue> {
        self.editor
            .paste(&data, None)
            .map_err(|error| JsValue::from_str(&error.to_string()))
    }

    /// Plain text for the formula evaluator, one string per line
    pub fn flatten(&self) -> Result<JsValue, JsValue> {
        Ok(self.editor.flatten().serialize(&self.serializer)?)
    }
}

impl MathEditorBindings {
    fn from_settings(settings: EditorSettings) -> Self {
        Self {
            editor: MathEditor::new(
                settings,
                BrowserCaret::default(),
                MonospaceMeasure::default(),
            ),
            // Do note that large numbers won't be serialized correctly, because JS doesn't have 64 bit integers.
            serializer: serde_wasm_bindgen::Serializer::new(),
        }
    }
}
