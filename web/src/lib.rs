mod caret_host;
mod draw_list;
mod math_editor;
mod utils;

use utils::{init_logging, set_panic_hook};
use wasm_bindgen::prelude::*;

pub use caret_host::BrowserCaret;
pub use draw_list::{DrawCommand, DrawList};
pub use math_editor::MathEditorBindings;

#[wasm_bindgen(start)]
fn main() {
    set_panic_hook();
    init_logging();
}
