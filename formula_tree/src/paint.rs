use crate::{
    arena::LineId,
    document::Document,
    geometry::{Point, Rect},
    measure::Measure,
};

/// The drawing primitives a host has to provide. Everything else about painting happens here.
pub trait Canvas {
    /// Draws text with its top left corner at the position
    fn draw_glyph(&mut self, text: &str, position: Point, size: i32);
    fn draw_stroke(&mut self, from: Point, to: Point);
    /// Marks an empty nested line, so that the user can see where to type
    fn fill_placeholder(&mut self, bounds: Rect);
}

impl Document {
    /// Arranges the document at the origin, then paints it
    pub fn render(&mut self, canvas: &mut impl Canvas, measure: &impl Measure, origin: Point) {
        self.arrange(measure, origin);
        self.paint(canvas, measure);
    }

    /// Paints every base line, top to bottom.
    /// Uses the positions of the last [`Document::arrange`] call.
    pub fn paint(&self, canvas: &mut impl Canvas, measure: &impl Measure) {
        for line in self.base_lines() {
            self.paint_line(*line, canvas, measure);
        }
    }

    /// Paints the symbols of a line from left to right. Returns the consumed width.
    pub fn paint_line(&self, id: LineId, canvas: &mut impl Canvas, measure: &impl Measure) -> i32 {
        let line = self.line(id);
        let bounds = line.bounds();
        if line.is_empty() {
            if !line.is_base() {
                canvas.fill_placeholder(bounds);
            }
            return bounds.width;
        }

        let mut consumed = 0;
        for symbol in line.symbols() {
            let layout =
                self.symbol_layout(symbol, line.reference_size(), symbol.bounds().origin(), measure);
            for glyph in &layout.glyphs {
                canvas.draw_glyph(&glyph.text, glyph.position, glyph.size);
            }
            for (from, to) in &layout.strokes {
                canvas.draw_stroke(*from, *to);
            }
            for (child, _) in &layout.lines {
                self.paint_line(*child, canvas, measure);
            }
            consumed += layout.bounds.width;
        }
        consumed
    }
}
