use formula_tree::{arena::LineId, document::Document, geometry::Point};
use serde::{Deserialize, Serialize};

/// A position in a line. The index is in `0..=line.len()` and means "before the symbol at this index".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caret {
    pub line: LineId,
    pub index: usize,
}

/// Where the caret is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct CaretPlacement {
    /// Top of the caret
    pub position: Point,
    pub height: i32,
}

impl Caret {
    pub fn new(line: LineId, index: usize) -> Self {
        Self { line, index }
    }

    pub fn document_start(document: &Document) -> Self {
        Self::new(document.base_line(0), 0)
    }

    pub fn document_end(document: &Document) -> Self {
        let line = document.base_line(document.base_line_count() - 1);
        Self::new(line, document.line(line).len())
    }

    /// Whether the caret still points into the document
    pub fn is_valid(&self, document: &Document) -> bool {
        document.contains_line(self.line) && self.index <= document.line(self.line).len()
    }

    /// The caret takes its position and height from the symbol before it, or the one after it at the start of a line.
    /// Uses the positions of the last [`Document::arrange`] call.
    pub fn placement(&self, document: &Document) -> CaretPlacement {
        let line = document.line(self.line);
        if self.index > 0 {
            let bounds = line[self.index - 1].bounds();
            CaretPlacement {
                position: Point::new(bounds.right(), bounds.y),
                height: bounds.height,
            }
        } else {
            let bounds = line
                .get(0)
                .map(|symbol| symbol.bounds())
                .unwrap_or_else(|| line.bounds());
            CaretPlacement {
                position: bounds.origin(),
                height: bounds.height,
            }
        }
    }
}
