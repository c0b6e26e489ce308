use serde::{Deserialize, Serialize};

/// Sizes that decide how the document is laid out.
/// All values are in pixels, except for the percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Height of a simple glyph on a base line
    pub reference_size: i32,
    /// Vertical space between a numerator and a denominator
    pub fraction_gap: i32,
    /// Indices, bounds and root exponents are drawn at this percentage of their parent's size
    pub nested_scale_percent: i32,
    /// Nested lines never get smaller than this
    pub min_reference_size: i32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            reference_size: 50,
            fraction_gap: 6,
            nested_scale_percent: 66,
            min_reference_size: 8,
        }
    }
}

impl LayoutSettings {
    /// The reference size of a line that is drawn smaller than its parent
    pub fn scaled(&self, reference_size: i32) -> i32 {
        (reference_size * self.nested_scale_percent / 100).max(self.min_reference_size)
    }
}
