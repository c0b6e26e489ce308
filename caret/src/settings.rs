use formula_tree::settings::LayoutSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub layout: LayoutSettings,
    /// Width of the blinking caret in pixels
    pub caret_width: i32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            caret_width: 2,
        }
    }
}
