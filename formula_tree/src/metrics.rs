use serde::{Deserialize, Serialize};

use crate::{
    arena::LineId,
    document::Document,
    line::{Line, LineMetrics},
    measure::Measure,
    symbol::{IndexPlacement, Symbol, SymbolKind},
};

/// Vertical metrics of a single symbol, relative to the text axis of the line it's in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMetrics {
    /// Distance from the top of the symbol to the text axis
    pub baseline_offset: i32,
    /// Distance from the text axis to the bottom of the symbol
    pub descent: i32,
}

impl SymbolMetrics {
    pub fn height(&self) -> i32 {
        self.baseline_offset + self.descent
    }
}

/// Sum and product glyphs are drawn larger than the text around them
pub(crate) fn big_operator_size(reference_size: i32) -> i32 {
    reference_size * 3 / 2
}

/// Space between the radicand and the line on top of it
pub(crate) fn root_overline_gap(reference_size: i32) -> i32 {
    (reference_size / 10).max(2)
}

/// How far an index is moved away from the text axis. Negative moves it up.
pub(crate) fn index_shift(placement: IndexPlacement, reference_size: i32) -> i32 {
    match placement {
        IndexPlacement::Subscript => reference_size / 2,
        IndexPlacement::Superscript => -(reference_size / 2),
    }
}

/// Vertical offset of the radicand inside a root symbol
pub(crate) fn radicand_top(exponent: LineMetrics, radicand: LineMetrics, reference_size: i32) -> i32 {
    root_overline_gap(reference_size).max(exponent.height - radicand.height / 2)
}

impl Document {
    /// Measures a symbol that sits on a line with the given reference size.
    /// Nested lines must already have up to date metrics.
    pub fn symbol_metrics(&self, symbol: &Symbol, reference_size: i32) -> SymbolMetrics {
        let h = reference_size;
        match &symbol.kind {
            SymbolKind::Simple(_) => SymbolMetrics {
                baseline_offset: h / 2,
                descent: h - h / 2,
            },
            SymbolKind::Fraction {
                numerator,
                denominator,
            } => {
                let gap = self.settings().fraction_gap;
                SymbolMetrics {
                    baseline_offset: self.line(*numerator).height() + gap / 2,
                    descent: self.line(*denominator).height() + gap - gap / 2,
                }
            }
            SymbolKind::Sigma { upper, lower, .. } => {
                let bounds_height = self.line(*upper).height() + self.line(*lower).height();
                let height = big_operator_size(h).max(bounds_height);
                SymbolMetrics {
                    baseline_offset: height / 2,
                    descent: height - height / 2,
                }
            }
            SymbolKind::Index { placement, line } => {
                let line = self.line(*line).metrics();
                let shift = index_shift(*placement, h);
                SymbolMetrics {
                    baseline_offset: (line.baseline_offset - shift).max(0),
                    descent: (line.descent() + shift).max(0),
                }
            }
            SymbolKind::Root { exponent, radicand } => {
                let exponent = self.line(*exponent).metrics();
                let radicand = self.line(*radicand).metrics();
                SymbolMetrics {
                    baseline_offset: radicand_top(exponent, radicand, h) + radicand.baseline_offset,
                    descent: radicand.descent(),
                }
            }
            SymbolKind::Function { argument, .. } => {
                let argument = self.line(*argument).metrics();
                SymbolMetrics {
                    baseline_offset: (h / 2).max(argument.baseline_offset),
                    descent: (h - h / 2).max(argument.descent()),
                }
            }
        }
    }

    /// Aligns every symbol on the text axis of the tallest one.
    /// An empty line gets the metrics of one simple glyph.
    pub(crate) fn compute_line_metrics(&self, line: &Line) -> LineMetrics {
        let empty = LineMetrics::empty(line.reference_size);
        let mut baseline_offset = empty.baseline_offset;
        let mut descent = empty.descent();
        for symbol in &line.symbols {
            let metrics = self.symbol_metrics(symbol, line.reference_size);
            baseline_offset = baseline_offset.max(metrics.baseline_offset);
            descent = descent.max(metrics.descent);
        }
        LineMetrics {
            height: descent + baseline_offset,
            baseline_offset,
        }
    }

    /// Width of a line in pixels. Computed on demand, since it depends on the font.
    pub fn line_width(&self, id: LineId, measure: &impl Measure) -> i32 {
        let line = self.line(id);
        if line.is_empty() {
            return if line.is_base() {
                measure.average_char_width(line.reference_size)
            } else {
                // Placeholder box
                line.reference_size / 3
            };
        }
        line.symbols
            .iter()
            .map(|symbol| self.symbol_width(symbol, line.reference_size, measure))
            .sum()
    }

    pub fn symbol_width(&self, symbol: &Symbol, reference_size: i32, measure: &impl Measure) -> i32 {
        let h = reference_size;
        match &symbol.kind {
            SymbolKind::Simple(value) => measure.glyph_width(&value.to_string(), h),
            SymbolKind::Fraction {
                numerator,
                denominator,
            } => self
                .line_width(*numerator, measure)
                .max(self.line_width(*denominator, measure)),
            SymbolKind::Sigma {
                operator,
                upper,
                lower,
            } => {
                measure.glyph_width(operator.glyph(), big_operator_size(h))
                    + self
                        .line_width(*upper, measure)
                        .max(self.line_width(*lower, measure))
            }
            SymbolKind::Index { line, .. } => self.line_width(*line, measure),
            SymbolKind::Root { exponent, radicand } => {
                let radical = measure.glyph_width(RADICAL_GLYPH, h);
                exponent_overhang(self.line_width(*exponent, measure), radical)
                    + radical
                    + self.line_width(*radicand, measure)
            }
            SymbolKind::Function { name, argument } => {
                measure.glyph_width(name, h)
                    + measure.glyph_width("(", h)
                    + self.line_width(*argument, measure)
                    + measure.glyph_width(")", h)
            }
        }
    }
}

pub(crate) const RADICAL_GLYPH: &str = "\u{221A}";

/// The exponent overlaps the left half of the radical glyph, anything wider sticks out to the left
pub(crate) fn exponent_overhang(exponent_width: i32, radical_width: i32) -> i32 {
    (exponent_width - radical_width / 2).max(0)
}
