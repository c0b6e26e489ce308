use formula_tree::{
    geometry::{Point, Rect},
    paint::Canvas,
};
use serde::Serialize;
use tsify::Tsify;

/// One drawing call for the browser canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tsify)]
#[serde(tag = "type")]
pub enum DrawCommand {
    Glyph {
        text: String,
        x: i32,
        y: i32,
        size: i32,
    },
    Stroke {
        from: Point,
        to: Point,
    },
    Placeholder {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

/// Collects the drawing calls of a repaint, so that JavaScript can replay them on a canvas
#[derive(Debug, Default, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl Canvas for DrawList {
    fn draw_glyph(&mut self, text: &str, position: Point, size: i32) {
        self.commands.push(DrawCommand::Glyph {
            text: text.to_string(),
            x: position.x,
            y: position.y,
            size,
        });
    }

    fn draw_stroke(&mut self, from: Point, to: Point) {
        self.commands.push(DrawCommand::Stroke { from, to });
    }

    fn fill_placeholder(&mut self, bounds: Rect) {
        self.commands.push(DrawCommand::Placeholder {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        });
    }
}
