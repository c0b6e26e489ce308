/// Resolves pixel widths against a concrete rendering context.
/// Widths are never cached in the tree, because they depend on the font that the host picked.
pub trait Measure {
    /// Width of the given text, drawn at the given glyph height
    fn glyph_width(&self, text: &str, size: i32) -> i32;

    /// Used for empty base lines, so that the caret still has somewhere to go
    fn average_char_width(&self, size: i32) -> i32 {
        self.glyph_width("x", size)
    }
}

impl<T: Measure + ?Sized> Measure for &T {
    fn glyph_width(&self, text: &str, size: i32) -> i32 {
        (**self).glyph_width(text, size)
    }

    fn average_char_width(&self, size: i32) -> i32 {
        (**self).average_char_width(size)
    }
}

/// Every character is equally wide. Deterministic, so it's used for tests and headless hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasure {
    /// Character width in percent of the glyph height
    pub width_percent: i32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { width_percent: 50 }
    }
}

impl Measure for MonospaceMeasure {
    fn glyph_width(&self, text: &str, size: i32) -> i32 {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul((size * self.width_percent / 100).max(1))
    }
}
