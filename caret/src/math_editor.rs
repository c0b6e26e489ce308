use formula_tree::{
    direction::Direction,
    document::Document,
    formula::{FormulaLine, FormulaSymbol},
    geometry::Point,
    measure::Measure,
    paint::Canvas,
};
use log::{debug, trace};
use serialization::{deserialize_lines, flatten_document, serialize_lines};

use crate::{
    caret::{Caret, CaretPlacement},
    caret_visual::{CaretHost, CaretVisual},
    commands::InsertCommand,
    hit_test::hit_test,
    movement::move_caret,
    selection::Selection,
    settings::EditorSettings,
};

pub use formula_tree::formula::is_allowed_character;
pub use serialization::{SerializationError, SerializedDataType};

/// Handles the input events of a host: typing, caret movement, mouse selection and repainting
pub struct MathEditor<H: CaretHost, M: Measure> {
    pub(crate) document: Document,
    /// Main caret
    pub(crate) caret: Caret,
    pub(crate) selection: Selection,
    /// Where the mouse selection started
    pub(crate) selection_anchor: Option<Caret>,
    pub(crate) caret_visual: CaretVisual<H>,
    pub(crate) measure: M,
    pub(crate) settings: EditorSettings,
    /// Top left corner of the document
    pub(crate) origin: Point,
}

impl<H: CaretHost, M: Measure> MathEditor<H, M> {
    pub fn new(settings: EditorSettings, host: H, measure: M) -> Self {
        let document = Document::new(settings.layout.clone());
        Self::with_document(settings, document, host, measure)
    }

    pub fn with_document(settings: EditorSettings, document: Document, host: H, measure: M) -> Self {
        let caret = Caret::document_start(&document);
        let mut editor = Self {
            document,
            caret,
            selection: Selection::None,
            selection_anchor: None,
            caret_visual: CaretVisual::new(host, settings.caret_width),
            measure,
            settings,
            origin: Point::default(),
        };
        editor.refresh();
        editor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn caret_placement(&self) -> CaretPlacement {
        self.caret.placement(&self.document)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn caret_visual(&self) -> &CaretVisual<H> {
        &self.caret_visual
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Moves the whole document, for example when the host scrolls
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
        self.refresh();
    }
}

impl<H: CaretHost, M: Measure> MathEditor<H, M> {
    /// Creates the caret, when the editor window gets the keyboard focus
    pub fn focus(&mut self) {
        let placement = self.caret_placement();
        self.caret_visual.acquire(placement);
    }

    pub fn unfocus(&mut self) {
        self.caret_visual.release();
    }

    /// Inserts a symbol at the caret and moves the caret behind it. Replaces the selection.
    pub fn add_symbol(&mut self, symbol: &FormulaSymbol) {
        self.delete_selection();
        self.document
            .insert(self.caret.line, self.caret.index, symbol);
        self.caret.index += 1;
        self.refresh();
    }

    /// Returns false if the character is not allowed. The selection is deleted either way.
    pub fn add_character(&mut self, value: char) -> bool {
        if !is_allowed_character(value) {
            trace!("Dropping character {:?}", value);
            if self.delete_selection() {
                self.refresh();
            }
            return false;
        }
        self.add_symbol(&FormulaSymbol::Simple(value));
        true
    }

    pub fn add_command(&mut self, command: InsertCommand) {
        self.add_symbol(&command.to_symbol());
    }

    /// Backspace. Deletes the selection if there is one.
    /// At the start of a base line, the line gets merged into the previous one.
    pub fn remove_character_before_caret(&mut self) {
        if self.delete_selection() {
            self.refresh();
            return;
        }

        if self.caret.index > 0 {
            self.caret.index -= 1;
            self.document.delete(self.caret.line, self.caret.index);
        } else if let Some(base_index) = self.document.base_line_index(self.caret.line) {
            if base_index == 0 {
                return;
            }
            let (line, join_index) = self.document.merge_with_previous(base_index);
            self.caret = Caret::new(line, join_index);
        } else {
            return;
        }
        self.refresh();
    }

    /// Enter. Only base lines can be split, in nested lines this does nothing.
    pub fn insert_line_break_at_caret(&mut self) {
        let deleted = self.delete_selection();
        if let Some(base_index) = self.document.base_line_index(self.caret.line) {
            let new_index = self.document.split_base_line(base_index, self.caret.index);
            self.caret = Caret::new(self.document.base_line(new_index), 0);
        } else if !deleted {
            return;
        }
        self.refresh();
    }

    /// Moving with a selection collapses it in the direction of the movement
    pub fn move_caret(&mut self, direction: Direction) {
        if !self.selection.is_none() {
            let collapsed = if direction.is_forwards() {
                self.selection.end_caret(&self.document)
            } else {
                self.selection.start_caret(&self.document)
            };
            self.clear_selection();
            if let Some(caret) = collapsed {
                self.caret = caret;
            }
            self.refresh();
            return;
        }

        if let Some(caret) = move_caret(&self.document, self.caret, direction) {
            self.caret = caret;
            self.refresh();
        }
    }

    /// Mouse down. Places the caret under the point and starts a selection there.
    pub fn set_selection_anchor(&mut self, point: Point) {
        let caret = hit_test(&self.document, point);
        self.selection = Selection::None;
        self.selection_anchor = Some(caret);
        self.caret = caret;
        self.refresh();
    }

    /// Mouse move with a pressed button. Does nothing without an anchor.
    pub fn update_selection_anchor(&mut self, point: Point) -> Selection {
        let Some(anchor) = self.selection_anchor else {
            return self.selection;
        };
        let caret = hit_test(&self.document, point);
        self.selection = Selection::resolve(&self.document, anchor, caret);
        self.caret = caret;
        self.refresh();
        self.selection
    }

    /// Mouse up. The selection stays, but further mouse movement doesn't change it.
    pub fn finish_selection(&mut self) {
        self.selection_anchor = None;
    }

    pub fn select_all(&mut self) {
        let start = Caret::document_start(&self.document);
        let end = Caret::document_end(&self.document);
        self.selection = if start.line == end.line {
            Selection::resolve(&self.document, start, end)
        } else {
            Selection::Global {
                start_line: 0,
                start_index: 0,
                end_line: self.document.base_line_count() - 1,
                end_index: end.index,
            }
        };
        self.selection_anchor = None;
        self.caret = end;
        self.refresh();
    }

    /// Paints the document. The caret is hidden while painting and shown again afterwards.
    pub fn repaint(&mut self, canvas: &mut impl Canvas) {
        let _guard = self.caret_visual.hide_for_repaint();
        self.document.render(canvas, &self.measure, self.origin);
    }

    pub fn copy(&self, data_type: SerializedDataType) -> Result<String, SerializationError> {
        serialize_lines(&self.selection.to_formula(&self.document), data_type)
    }

    /// Inserts the lines at the caret. Further lines become new base lines, if the caret is in a base line.
    pub fn paste(
        &mut self,
        data: &str,
        data_type: Option<SerializedDataType>,
    ) -> Result<(), SerializationError> {
        let lines = deserialize_lines(data, data_type)?;
        self.insert_lines(&lines);
        Ok(())
    }

    pub fn insert_lines(&mut self, lines: &[FormulaLine]) {
        self.delete_selection();
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                if let Some(base_index) = self.document.base_line_index(self.caret.line) {
                    let new_index = self.document.split_base_line(base_index, self.caret.index);
                    self.caret = Caret::new(self.document.base_line(new_index), 0);
                }
            }
            self.document
                .insert_all(self.caret.line, self.caret.index, &line.symbols);
            self.caret.index += line.len();
        }
        self.refresh();
    }

    /// The document as plain text, one string per base line
    pub fn flatten(&self) -> Vec<String> {
        flatten_document(&self.document.to_formula())
    }

    /// Returns true if something was deleted
    fn delete_selection(&mut self) -> bool {
        let selection = self.selection;
        self.clear_selection();
        match selection.delete(&mut self.document) {
            Some(caret) => {
                debug!("Deleted selection, caret is now at {:?}", caret);
                self.caret = caret;
                true
            }
            None => false,
        }
    }

    fn clear_selection(&mut self) {
        self.selection = Selection::None;
        self.selection_anchor = None;
    }

    /// Lays the document out again, then moves the caret to where its symbols ended up
    fn refresh(&mut self) {
        self.document.arrange(&self.measure, self.origin);
        debug_assert!(self.caret.is_valid(&self.document));
        let placement = self.caret.placement(&self.document);
        self.caret_visual.update(placement);
    }
}
