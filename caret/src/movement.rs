use formula_tree::{
    arena::LineId,
    direction::{Direction, HorizontalDirection, VerticalDirection},
    document::Document,
};

use crate::caret::Caret;

/// Returns a caret that has been moved in a given direction. Returns None if the caret cannot be moved in that direction.
///
/// Horizontal movement stays in the current line, except that base lines wrap around to their neighbours.
/// It never enters or leaves a nested line.
pub fn move_caret(document: &Document, caret: Caret, direction: Direction) -> Option<Caret> {
    match direction {
        Direction::Left => move_horizontal(document, caret, HorizontalDirection::Left),
        Direction::Right => move_horizontal(document, caret, HorizontalDirection::Right),
        Direction::Up => move_vertical(document, caret, VerticalDirection::Up),
        Direction::Down => move_vertical(document, caret, VerticalDirection::Down),
    }
}

fn move_horizontal(
    document: &Document,
    caret: Caret,
    direction: HorizontalDirection,
) -> Option<Caret> {
    let length = document.line(caret.line).len();
    match direction {
        HorizontalDirection::Left if caret.index > 0 => {
            return Some(Caret::new(caret.line, caret.index - 1))
        }
        HorizontalDirection::Right if caret.index < length => {
            return Some(Caret::new(caret.line, caret.index + 1))
        }
        _ => {}
    }

    // Beyond the edge of a base line
    let base_index = document.base_line_index(caret.line)?;
    match direction {
        HorizontalDirection::Left => {
            let previous = document.base_line(base_index.checked_sub(1)?);
            Some(Caret::new(previous, document.line(previous).len()))
        }
        HorizontalDirection::Right => {
            if base_index + 1 >= document.base_line_count() {
                return None;
            }
            Some(Caret::new(document.base_line(base_index + 1), 0))
        }
    }
}

fn move_vertical(document: &Document, caret: Caret, direction: VerticalDirection) -> Option<Caret> {
    let target = vertical_target(document, caret.line, direction)?;
    let x = caret.placement(document).position.x;
    Some(Caret::new(target, nearest_boundary(document, target, x)))
}

/// Nested lines go to a sibling line of the same symbol, like from the numerator to the denominator.
/// Base lines go to the previous or next base line.
fn vertical_target(
    document: &Document,
    line: LineId,
    direction: VerticalDirection,
) -> Option<LineId> {
    let Some((parent, symbol_index)) = document.owner_of(line) else {
        let base_index = document.base_line_index(line)?;
        return match direction {
            VerticalDirection::Up => base_index.checked_sub(1).map(|i| document.base_line(i)),
            VerticalDirection::Down => (base_index + 1 < document.base_line_count())
                .then(|| document.base_line(base_index + 1)),
        };
    };

    let current = document.line(line).bounds();
    document.line(parent)[symbol_index]
        .owned_lines()
        .filter(|sibling| *sibling != line)
        .filter_map(|sibling| {
            let bounds = document.line(sibling).bounds();
            let distance = match direction {
                VerticalDirection::Up => current.y - bounds.bottom(),
                VerticalDirection::Down => bounds.y - current.bottom(),
            };
            (distance >= 0).then_some((distance, sibling))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, sibling)| sibling)
}

/// The caret index whose x coordinate is closest. Ties go to the leftmost index.
fn nearest_boundary(document: &Document, line: LineId, x: i32) -> usize {
    let line = document.line(line);
    std::iter::once(line.bounds().x)
        .chain(line.symbols().iter().map(|symbol| symbol.bounds().right()))
        .enumerate()
        .min_by_key(|(_, boundary)| (boundary - x).abs())
        .map(|(index, _)| index)
        .unwrap_or(0)
}
