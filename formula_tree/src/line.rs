use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{arena::LineId, geometry::Rect, symbol::Symbol};

/// Cached vertical metrics of a line. Only depend on the structure, never on the font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMetrics {
    pub height: i32,
    /// Distance from the top of the line to its text axis
    pub baseline_offset: i32,
}

impl LineMetrics {
    /// An empty line is as tall as a single simple glyph
    pub fn empty(reference_size: i32) -> Self {
        Self {
            height: reference_size,
            baseline_offset: reference_size / 2,
        }
    }

    pub fn descent(&self) -> i32 {
        self.height - self.baseline_offset
    }
}

/// An ordered sequence of symbols.
/// Invariants:
/// - A line has at most one owner, the line that contains the symbol owning it. No owner means that it's a base line.
/// - The metrics are up to date after every mutation that went through the document.
#[derive(Debug)]
pub struct Line {
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) parent: Option<LineId>,
    pub(crate) reference_size: i32,
    pub(crate) metrics: LineMetrics,
    /// Last known position, written by [`crate::document::Document::arrange`]
    pub(crate) bounds: Rect,
}

impl Line {
    pub(crate) fn new(reference_size: i32, parent: Option<LineId>) -> Self {
        Self {
            symbols: Vec::new(),
            parent,
            reference_size,
            metrics: LineMetrics::empty(reference_size),
            bounds: Rect::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The line that contains the symbol which owns this line
    pub fn parent(&self) -> Option<LineId> {
        self.parent
    }

    /// Base lines are owned by the document itself. Empty nested lines get drawn as placeholders, empty base lines don't.
    pub fn is_base(&self) -> bool {
        self.parent.is_none()
    }

    /// Height of a simple glyph on this line
    pub fn reference_size(&self) -> i32 {
        self.reference_size
    }

    pub fn metrics(&self) -> LineMetrics {
        self.metrics
    }

    pub fn height(&self) -> i32 {
        self.metrics.height
    }

    pub fn baseline_offset(&self) -> i32 {
        self.metrics.baseline_offset
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Index<usize> for Line {
    type Output = Symbol;

    fn index(&self, index: usize) -> &Self::Output {
        self.symbols.get(index).expect("Invalid symbol index")
    }
}
