//! The editable document model: lines of symbols, where some symbols own further lines.
//!
//! Lines live in an arena owned by the [`document::Document`] and are addressed by [`arena::LineId`] handles.
//! Content that is not (yet) part of a document is described with the detached [`formula::FormulaLine`] tree.

pub mod arena;
pub mod direction;
pub mod document;
pub mod formula;
pub mod formula_macros;
pub mod geometry;
pub mod layout;
pub mod line;
pub mod measure;
pub mod metrics;
pub mod paint;
pub mod print_helpers;
pub mod settings;
pub mod symbol;
