use crate::{
    arena::LineId,
    document::Document,
    geometry::{Point, Rect},
    measure::Measure,
    metrics::{
        big_operator_size, exponent_overhang, index_shift, radicand_top, root_overline_gap,
        RADICAL_GLYPH,
    },
    symbol::{Symbol, SymbolKind},
};

/// A piece of text that a symbol draws by itself, like the fraction bar's neighbours or a function name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub text: String,
    /// Top left corner
    pub position: Point,
    pub size: i32,
}

/// Where a symbol and everything it draws ends up, for a given top left corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLayout {
    pub bounds: Rect,
    /// Owned lines and their top left corners, in enumeration order
    pub lines: Vec<(LineId, Point)>,
    pub glyphs: Vec<Glyph>,
    /// Straight lines, like a fraction bar
    pub strokes: Vec<(Point, Point)>,
}

impl Document {
    /// Positions every line and symbol, starting at the origin, base lines stacked from top to bottom.
    /// The positions are stored in the tree and used for hit testing and caret placement until the next call.
    pub fn arrange(&mut self, measure: &impl Measure, origin: Point) {
        let mut y = origin.y;
        for index in 0..self.base_line_count() {
            let line = self.base_line(index);
            self.arrange_line(line, Point::new(origin.x, y), measure);
            y += self.line(line).height();
        }
    }

    /// Returns the consumed width
    fn arrange_line(&mut self, id: LineId, origin: Point, measure: &impl Measure) -> i32 {
        let width = self.line_width(id, measure);
        let height = self.line(id).height();
        self.line_mut(id).bounds = Rect::at(origin, width, height);

        let mut x = origin.x;
        for index in 0..self.line(id).len() {
            let layout = {
                let line = self.line(id);
                let symbol = &line[index];
                let metrics = self.symbol_metrics(symbol, line.reference_size());
                let top = origin.y + line.baseline_offset() - metrics.baseline_offset;
                self.symbol_layout(symbol, line.reference_size(), Point::new(x, top), measure)
            };
            self.line_mut(id).symbols[index].bounds = layout.bounds;
            for (child, child_origin) in layout.lines {
                self.arrange_line(child, child_origin, measure);
            }
            x += layout.bounds.width;
        }
        width
    }

    /// Lays out a single symbol with its top left corner at the origin.
    pub fn symbol_layout(
        &self,
        symbol: &Symbol,
        reference_size: i32,
        origin: Point,
        measure: &impl Measure,
    ) -> SymbolLayout {
        let h = reference_size;
        let metrics = self.symbol_metrics(symbol, h);
        let width = self.symbol_width(symbol, h, measure);
        let bounds = Rect::at(origin, width, metrics.height());
        let Point { x, y } = origin;
        let mut layout = SymbolLayout {
            bounds,
            lines: Vec::new(),
            glyphs: Vec::new(),
            strokes: Vec::new(),
        };

        match &symbol.kind {
            SymbolKind::Simple(value) => {
                layout.glyphs.push(Glyph {
                    text: value.to_string(),
                    position: Point::new(x, y + metrics.baseline_offset - h / 2),
                    size: h,
                });
            }
            SymbolKind::Fraction {
                numerator,
                denominator,
            } => {
                let gap = self.settings().fraction_gap;
                let numerator_height = self.line(*numerator).height();
                let numerator_width = self.line_width(*numerator, measure);
                let denominator_width = self.line_width(*denominator, measure);
                layout.lines.push((
                    *numerator,
                    Point::new(x + (width - numerator_width) / 2, y),
                ));
                layout.lines.push((
                    *denominator,
                    Point::new(
                        x + (width - denominator_width) / 2,
                        y + numerator_height + gap,
                    ),
                ));
                let bar_y = y + metrics.baseline_offset;
                layout
                    .strokes
                    .push((Point::new(x, bar_y), Point::new(x + width, bar_y)));
            }
            SymbolKind::Sigma {
                operator,
                upper,
                lower,
            } => {
                let glyph_size = big_operator_size(h);
                let glyph_width = measure.glyph_width(operator.glyph(), glyph_size);
                layout.glyphs.push(Glyph {
                    text: operator.glyph().to_string(),
                    position: Point::new(x, y + metrics.baseline_offset - glyph_size / 2),
                    size: glyph_size,
                });
                let lower_height = self.line(*lower).height();
                layout.lines.push((*upper, Point::new(x + glyph_width, y)));
                layout.lines.push((
                    *lower,
                    Point::new(x + glyph_width, y + metrics.height() - lower_height),
                ));
            }
            SymbolKind::Index { placement, line } => {
                let line_baseline = self.line(*line).baseline_offset();
                let shift = index_shift(*placement, h);
                layout.lines.push((
                    *line,
                    Point::new(x, y + metrics.baseline_offset - line_baseline + shift),
                ));
            }
            SymbolKind::Root { exponent, radicand } => {
                let exponent_metrics = self.line(*exponent).metrics();
                let radicand_metrics = self.line(*radicand).metrics();
                let radical_width = measure.glyph_width(RADICAL_GLYPH, h);
                let exponent_width = self.line_width(*exponent, measure);
                let radical_x = x + exponent_overhang(exponent_width, radical_width);
                let radicand_x = radical_x + radical_width;
                let radicand_y = y + radicand_top(exponent_metrics, radicand_metrics, h);
                layout.lines.push((
                    *exponent,
                    Point::new(
                        radical_x + radical_width / 2 - exponent_width,
                        radicand_y + radicand_metrics.height / 2 - exponent_metrics.height,
                    ),
                ));
                layout
                    .lines
                    .push((*radicand, Point::new(radicand_x, radicand_y)));
                layout.glyphs.push(Glyph {
                    text: RADICAL_GLYPH.to_string(),
                    position: Point::new(radical_x, radicand_y),
                    size: radicand_metrics.height,
                });
                let overline_y = radicand_y - root_overline_gap(h) / 2;
                layout.strokes.push((
                    Point::new(radicand_x, overline_y),
                    Point::new(x + width, overline_y),
                ));
            }
            SymbolKind::Function { name, argument } => {
                let name_width = measure.glyph_width(name, h);
                let open_width = measure.glyph_width("(", h);
                let argument_width = self.line_width(*argument, measure);
                let argument_baseline = self.line(*argument).baseline_offset();
                let text_y = y + metrics.baseline_offset - h / 2;
                layout.glyphs.push(Glyph {
                    text: name.clone(),
                    position: Point::new(x, text_y),
                    size: h,
                });
                layout.glyphs.push(Glyph {
                    text: "(".to_string(),
                    position: Point::new(x + name_width, y),
                    size: metrics.height(),
                });
                layout.lines.push((
                    *argument,
                    Point::new(
                        x + name_width + open_width,
                        y + metrics.baseline_offset - argument_baseline,
                    ),
                ));
                layout.glyphs.push(Glyph {
                    text: ")".to_string(),
                    position: Point::new(x + name_width + open_width + argument_width, y),
                    size: metrics.height(),
                });
            }
        }
        layout
    }
}
