use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    print_helpers::{write_lines, write_quoted},
    symbol::{BigOperator, IndexPlacement},
};

/// A detached line: plain owned data that is not part of any document.
/// Used to describe content before it gets inserted, and to copy content out of a document.
/// Invariants:
/// - The parent-child order is always Line -> Symbol -> Line -> Symbol -> ....
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaLine {
    pub symbols: Vec<FormulaSymbol>,
}

/// A detached symbol, see [`crate::symbol::SymbolKind`] for the attached version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaSymbol {
    Simple(char),
    Fraction {
        numerator: FormulaLine,
        denominator: FormulaLine,
    },
    Sigma {
        operator: BigOperator,
        upper: FormulaLine,
        lower: FormulaLine,
    },
    Index {
        placement: IndexPlacement,
        line: FormulaLine,
    },
    Root {
        exponent: FormulaLine,
        radicand: FormulaLine,
    },
    Function {
        name: String,
        argument: FormulaLine,
    },
}

/// Characters that can appear in a simple symbol
pub fn is_allowed_character(value: char) -> bool {
    value.is_ascii_alphanumeric() || value == ' ' || "+-/*=^~()[]{}".contains(value)
}

/// Content that must not end up in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidContent {
    Character(char),
    EmptyFunctionName,
}

impl FormulaLine {
    pub fn new(symbols: Vec<FormulaSymbol>) -> Self {
        FormulaLine { symbols }
    }

    /// Every character becomes a simple symbol
    pub fn from_text(text: &str) -> Self {
        FormulaLine::new(text.chars().map(FormulaSymbol::Simple).collect())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Finds the first symbol, depth first, that could not have been typed or inserted by a command
    pub fn find_invalid(&self) -> Option<InvalidContent> {
        self.symbols.iter().find_map(|symbol| match symbol {
            FormulaSymbol::Simple(value) if !is_allowed_character(*value) => {
                Some(InvalidContent::Character(*value))
            }
            FormulaSymbol::Function { name, .. } if name.is_empty() => {
                Some(InvalidContent::EmptyFunctionName)
            }
            symbol => symbol.lines().into_iter().find_map(FormulaLine::find_invalid),
        })
    }
}

impl FormulaSymbol {
    pub fn simple(value: char) -> Self {
        FormulaSymbol::Simple(value)
    }

    pub fn fraction(numerator: FormulaLine, denominator: FormulaLine) -> Self {
        FormulaSymbol::Fraction {
            numerator,
            denominator,
        }
    }

    pub fn sum(upper: FormulaLine, lower: FormulaLine) -> Self {
        FormulaSymbol::Sigma {
            operator: BigOperator::Sum,
            upper,
            lower,
        }
    }

    pub fn product(upper: FormulaLine, lower: FormulaLine) -> Self {
        FormulaSymbol::Sigma {
            operator: BigOperator::Product,
            upper,
            lower,
        }
    }

    pub fn subscript(line: FormulaLine) -> Self {
        FormulaSymbol::Index {
            placement: IndexPlacement::Subscript,
            line,
        }
    }

    pub fn superscript(line: FormulaLine) -> Self {
        FormulaSymbol::Index {
            placement: IndexPlacement::Superscript,
            line,
        }
    }

    pub fn root(exponent: FormulaLine, radicand: FormulaLine) -> Self {
        FormulaSymbol::Root { exponent, radicand }
    }

    pub fn function<T: Into<String>>(name: T, argument: FormulaLine) -> Self {
        FormulaSymbol::Function {
            name: name.into(),
            argument,
        }
    }

    /// The nested lines, in the same order as [`crate::symbol::Symbol::owned_lines`]
    pub fn lines(&self) -> Vec<&FormulaLine> {
        match self {
            FormulaSymbol::Simple(_) => vec![],
            FormulaSymbol::Fraction {
                numerator,
                denominator,
            } => vec![numerator, denominator],
            FormulaSymbol::Sigma { upper, lower, .. } => vec![upper, lower],
            FormulaSymbol::Index { line, .. } => vec![line],
            FormulaSymbol::Root { exponent, radicand } => vec![exponent, radicand],
            FormulaSymbol::Function { argument, .. } => vec![argument],
        }
    }
}

impl fmt::Display for FormulaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(line")?;
        for symbol in &self.symbols {
            write!(f, " {}", symbol)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for FormulaSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FormulaSymbol::Simple(value) => return write_quoted(&value.to_string(), f),
            FormulaSymbol::Fraction { .. } => "frac".to_string(),
            FormulaSymbol::Sigma {
                operator: BigOperator::Sum,
                ..
            } => "sum".to_string(),
            FormulaSymbol::Sigma {
                operator: BigOperator::Product,
                ..
            } => "prod".to_string(),
            FormulaSymbol::Index {
                placement: IndexPlacement::Subscript,
                ..
            } => "sub".to_string(),
            FormulaSymbol::Index {
                placement: IndexPlacement::Superscript,
                ..
            } => "sup".to_string(),
            FormulaSymbol::Root { .. } => "root".to_string(),
            FormulaSymbol::Function { name, .. } => {
                write!(f, "(func ")?;
                write_quoted(name, f)?;
                write!(f, " ")?;
                write_lines(&self.lines(), f)?;
                return write!(f, ")");
            }
        };
        write!(f, "({} ", tag)?;
        write_lines(&self.lines(), f)?;
        write!(f, ")")
    }
}
