use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{arena::LineId, geometry::Rect};

/// The big operator that a [`SymbolKind::Sigma`] draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BigOperator {
    Sum,
    Product,
}

impl BigOperator {
    pub fn glyph(&self) -> &'static str {
        match self {
            BigOperator::Sum => "\u{2211}",
            BigOperator::Product => "\u{220F}",
        }
    }
}

/// Whether an [`SymbolKind::Index`] is drawn below or above the text axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexPlacement {
    Subscript,
    Superscript,
}

/// A symbol in a line. Atomic from the perspective of the caret, but it may own further lines.
///
/// Symbols are deliberately not `Clone`: copying the line handles would make two symbols own the same lines.
/// Use [`crate::document::Document::clone_symbol`] instead.
#[derive(Debug)]
pub struct Symbol {
    pub(crate) kind: SymbolKind,
    /// Last known position, written by [`crate::document::Document::arrange`]
    pub(crate) bounds: Rect,
}

/// The closed set of symbol variants. Container variants carry the handles of the lines they own.
#[derive(Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// A single character
    Simple(char),
    /// A fraction, like $\frac{1}{2}$
    Fraction {
        numerator: LineId,
        denominator: LineId,
    },
    /// A sum or a product, with bounds to the right of the operator
    Sigma {
        operator: BigOperator,
        upper: LineId,
        lower: LineId,
    },
    /// Subscript or superscript
    Index {
        placement: IndexPlacement,
        line: LineId,
    },
    /// Root, like $\sqrt[3]{x}$
    Root { exponent: LineId, radicand: LineId },
    /// A named function with brackets around its argument, like $\sin(x)$
    Function { name: String, argument: LineId },
}

impl Symbol {
    pub(crate) fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            bounds: Rect::default(),
        }
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The owned lines, in their fixed order
    pub fn owned_lines(&self) -> OwnedLines<'_> {
        self.kind.owned_lines()
    }

    pub fn is_atomic(&self) -> bool {
        self.owned_lines().len() == 0
    }
}

impl SymbolKind {
    pub fn owned_lines(&self) -> OwnedLines<'_> {
        OwnedLines {
            kind: self,
            index: 0,
        }
    }

    pub fn owned_line_count(&self) -> usize {
        match self {
            SymbolKind::Simple(_) => 0,
            SymbolKind::Index { .. } | SymbolKind::Function { .. } => 1,
            SymbolKind::Fraction { .. } | SymbolKind::Sigma { .. } | SymbolKind::Root { .. } => 2,
        }
    }

    pub fn owned_line(&self, index: usize) -> Option<LineId> {
        match (self, index) {
            (SymbolKind::Fraction { numerator, .. }, 0) => Some(*numerator),
            (SymbolKind::Fraction { denominator, .. }, 1) => Some(*denominator),
            (SymbolKind::Sigma { upper, .. }, 0) => Some(*upper),
            (SymbolKind::Sigma { lower, .. }, 1) => Some(*lower),
            (SymbolKind::Index { line, .. }, 0) => Some(*line),
            (SymbolKind::Root { exponent, .. }, 0) => Some(*exponent),
            (SymbolKind::Root { radicand, .. }, 1) => Some(*radicand),
            (SymbolKind::Function { argument, .. }, 0) => Some(*argument),
            _ => None,
        }
    }

    /// The same variant, with every owned line handle replaced.
    /// Lines are mapped in enumeration order.
    pub(crate) fn map_lines(&self, mut f: impl FnMut(LineId) -> LineId) -> SymbolKind {
        match self {
            SymbolKind::Simple(value) => SymbolKind::Simple(*value),
            SymbolKind::Fraction {
                numerator,
                denominator,
            } => {
                let numerator = f(*numerator);
                let denominator = f(*denominator);
                SymbolKind::Fraction {
                    numerator,
                    denominator,
                }
            }
            SymbolKind::Sigma {
                operator,
                upper,
                lower,
            } => {
                let upper = f(*upper);
                let lower = f(*lower);
                SymbolKind::Sigma {
                    operator: *operator,
                    upper,
                    lower,
                }
            }
            SymbolKind::Index { placement, line } => SymbolKind::Index {
                placement: *placement,
                line: f(*line),
            },
            SymbolKind::Root { exponent, radicand } => {
                let exponent = f(*exponent);
                let radicand = f(*radicand);
                SymbolKind::Root { exponent, radicand }
            }
            SymbolKind::Function { name, argument } => SymbolKind::Function {
                name: name.clone(),
                argument: f(*argument),
            },
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Simple(value) => write!(f, "{:?}", value),
            SymbolKind::Fraction { .. } => write!(f, "frac"),
            SymbolKind::Sigma {
                operator: BigOperator::Sum,
                ..
            } => write!(f, "sum"),
            SymbolKind::Sigma {
                operator: BigOperator::Product,
                ..
            } => write!(f, "prod"),
            SymbolKind::Index {
                placement: IndexPlacement::Subscript,
                ..
            } => write!(f, "sub"),
            SymbolKind::Index {
                placement: IndexPlacement::Superscript,
                ..
            } => write!(f, "sup"),
            SymbolKind::Root { .. } => write!(f, "root"),
            SymbolKind::Function { name, .. } => write!(f, "func {:?}", name),
        }
    }
}

pub struct OwnedLines<'a> {
    kind: &'a SymbolKind,
    index: usize,
}

impl<'a> Iterator for OwnedLines<'a> {
    type Item = LineId;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.kind.owned_line(self.index)?;
        self.index += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.kind.owned_line_count() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for OwnedLines<'a> {}
