use formula_tree::{arena::LineId, document::Document, geometry::Point, line::Line};

use crate::caret::Caret;

/// Finds the base line under the point by stacking the base line heights, then resolves the point in that line.
/// A point below everything ends up at the end of the last base line.
pub fn hit_test(document: &Document, point: Point) -> Caret {
    let mut bottom = document.line(document.base_line(0)).bounds().y;
    for line in document.base_lines() {
        bottom += document.line(*line).height();
        if point.y < bottom {
            return hit_test_line(document, *line, point);
        }
    }
    Caret::document_end(document)
}

/// Resolves a point to a position in the line or in one of its nested lines.
/// Uses the positions of the last [`Document::arrange`] call. Always terminates, the nesting depth is finite.
pub fn hit_test_line(document: &Document, line: LineId, point: Point) -> Caret {
    let mut current = line;
    loop {
        let line = document.line(current);
        let Some(index) = symbol_at(line, point.x) else {
            return Caret::new(current, line.len());
        };

        // Atomic symbols have no lines, so they always end up here
        let nested = line[index]
            .owned_lines()
            .find(|owned| document.line(*owned).bounds().contains(point));
        match nested {
            Some(owned) => current = owned,
            None => return Caret::new(current, index),
        }
    }
}

/// The first symbol whose right edge is at or beyond x
fn symbol_at(line: &Line, x: i32) -> Option<usize> {
    let mut right = line.bounds().x;
    line.symbols().iter().position(|symbol| {
        right += symbol.bounds().width;
        right >= x
    })
}
