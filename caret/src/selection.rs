use formula_tree::{arena::LineId, document::Document, formula::FormulaLine};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::caret::Caret;

/// A selection between two anchors.
///
/// A local selection stays in a single line, and `end` is the last selected symbol.
/// A global selection goes from one base line to another, and `end_index` is exclusive.
/// Its indices are base line indices and symbol indices in those base lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    None,
    Local {
        line: LineId,
        start: usize,
        end: usize,
    },
    Global {
        start_line: usize,
        start_index: usize,
        end_line: usize,
        end_index: usize,
    },
}

/// Where an anchor is in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct AnchorOrder {
    base_line: usize,
    /// `index * 2` for a caret in the base line, `index * 2 + 1` for anything nested in the symbol at `index`.
    /// Orders a caret before the symbol, then the inside of the symbol.
    offset: usize,
}

struct LiftedAnchor {
    order: AnchorOrder,
    caret_index: Option<usize>,
    symbol_index: Option<usize>,
}

impl LiftedAnchor {
    fn new(document: &Document, anchor: Caret) -> Self {
        let (base, symbol_index) = document.base_ancestor(anchor.line);
        let base_line = document
            .base_line_index(base)
            .expect("Base ancestor is not a base line");
        let offset = match symbol_index {
            Some(index) => index * 2 + 1,
            None => anchor.index * 2,
        };
        Self {
            order: AnchorOrder { base_line, offset },
            caret_index: symbol_index.is_none().then_some(anchor.index),
            symbol_index,
        }
    }

    /// A nested anchor at the start includes its base line symbol
    fn start_index(&self) -> usize {
        self.symbol_index.or(self.caret_index).unwrap_or(0)
    }

    /// A nested anchor at the end includes its base line symbol as well
    fn end_index(&self) -> usize {
        match self.symbol_index {
            Some(index) => index + 1,
            None => self.caret_index.unwrap_or(0),
        }
    }
}

impl Selection {
    /// Classifies the range between two anchors. The anchors can be in any order.
    pub fn resolve(document: &Document, start: Caret, end: Caret) -> Self {
        if start.line == end.line {
            if start.index == end.index {
                return Selection::None;
            }
            return Selection::Local {
                line: start.line,
                start: start.index.min(end.index),
                end: start.index.max(end.index),
            };
        }

        let mut first = LiftedAnchor::new(document, start);
        let mut second = LiftedAnchor::new(document, end);
        if second.order < first.order {
            std::mem::swap(&mut first, &mut second);
        }
        Selection::Global {
            start_line: first.order.base_line,
            start_index: first.start_index(),
            end_line: second.order.base_line,
            end_index: second.end_index(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Where the caret goes when the selection collapses towards the start of the document
    pub fn start_caret(&self, document: &Document) -> Option<Caret> {
        match *self {
            Selection::None => None,
            Selection::Local { line, start, .. } => Some(Caret::new(line, start)),
            Selection::Global {
                start_line,
                start_index,
                ..
            } => Some(Caret::new(document.base_line(start_line), start_index)),
        }
    }

    /// Where the caret goes when the selection collapses towards the end of the document
    pub fn end_caret(&self, document: &Document) -> Option<Caret> {
        match *self {
            Selection::None => None,
            Selection::Local { line, end, .. } => {
                let length = document.line(line).len();
                Some(Caret::new(line, (end + 1).min(length)))
            }
            Selection::Global {
                end_line, end_index, ..
            } => Some(Caret::new(document.base_line(end_line), end_index)),
        }
    }

    /// A detached copy of the selected symbols, one entry per touched base line
    pub fn to_formula(&self, document: &Document) -> Vec<FormulaLine> {
        match *self {
            Selection::None => vec![],
            Selection::Local { line, start, end } => {
                let length = document.line(line).len();
                if start >= length {
                    return vec![FormulaLine::default()];
                }
                vec![document.range_to_formula(line, start..(end.min(length - 1) + 1))]
            }
            Selection::Global {
                start_line,
                start_index,
                end_line,
                end_index,
            } => (start_line..=end_line)
                .map(|base_index| {
                    let line = document.base_line(base_index);
                    let length = document.line(line).len();
                    let from = if base_index == start_line { start_index } else { 0 };
                    let to = if base_index == end_line { end_index } else { length };
                    document.range_to_formula(line, from.min(to)..to)
                })
                .collect(),
        }
    }

    /// Deletes the selected symbols. Returns where the caret ends up, or None if nothing was selected.
    pub fn delete(&self, document: &mut Document) -> Option<Caret> {
        match *self {
            Selection::None => None,
            Selection::Local { line, start, end } => {
                let length = document.line(line).len();
                if start < length {
                    document.delete_inclusive(line, start..=end.min(length - 1));
                }
                debug!("Deleted local selection {}..={} in {}", start, end, line);
                Some(Caret::new(line, start.min(length)))
            }
            Selection::Global {
                start_line,
                start_index,
                end_line,
                end_index,
            } => {
                let start = document.base_line(start_line);
                if start_line == end_line {
                    document.delete_range(start, start_index..end_index);
                } else {
                    let end = document.base_line(end_line);
                    let start_length = document.line(start).len();
                    document.delete_range(start, start_index..start_length);
                    let end_length = document.line(end).len();
                    document.splice(end, end_index..end_length, start, start_index);
                    document.remove_base_lines((start_line + 1)..(end_line + 1));
                }
                debug!(
                    "Deleted global selection from {}:{} to {}:{}",
                    start_line, start_index, end_line, end_index
                );
                Some(Caret::new(start, start_index))
            }
        }
    }
}
