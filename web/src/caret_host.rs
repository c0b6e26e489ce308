use caret::caret_visual::CaretHost;
use formula_tree::geometry::Point;
use serde::Serialize;
use tsify::Tsify;

/// The caret as the browser should draw it. Read after every event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct BrowserCaret {
    pub exists: bool,
    pub visible: bool,
    pub width: i32,
    pub height: i32,
    pub position: Point,
}

impl CaretHost for BrowserCaret {
    fn create_caret(&mut self, width: i32, height: i32) {
        self.exists = true;
        self.visible = false;
        self.width = width;
        self.height = height;
    }

    fn destroy_caret(&mut self) {
        *self = Self::default();
    }

    fn set_caret_position(&mut self, position: Point) {
        self.position = position;
    }

    fn show_caret(&mut self) {
        self.visible = self.exists;
    }

    fn hide_caret(&mut self) {
        self.visible = false;
    }
}
