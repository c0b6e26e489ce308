use formula_tree::document::*;
use formula_tree::formula::*;
use formula_tree::formula_line;
use formula_tree::geometry::{Point, Rect};
use formula_tree::measure::MonospaceMeasure;
use formula_tree::paint::Canvas;
use formula_tree::settings::LayoutSettings;

#[derive(Default)]
struct RecordingCanvas {
    glyphs: Vec<(String, Point, i32)>,
    strokes: Vec<(Point, Point)>,
    placeholders: Vec<Rect>,
}

impl Canvas for RecordingCanvas {
    fn draw_glyph(&mut self, text: &str, position: Point, size: i32) {
        self.glyphs.push((text.to_string(), position, size));
    }

    fn draw_stroke(&mut self, from: Point, to: Point) {
        self.strokes.push((from, to));
    }

    fn fill_placeholder(&mut self, bounds: Rect) {
        self.placeholders.push(bounds);
    }
}

fn document_from(lines: Vec<FormulaLine>) -> Document {
    Document::from_formula(LayoutSettings::default(), &lines)
}

#[test]
fn simple_symbols_are_placed_left_to_right() {
    let mut document = document_from(vec![FormulaLine::from_text("ab")]);
    document.arrange(&MonospaceMeasure::default(), Point::new(10, 20));

    let line = document.line(document.base_line(0));
    assert_eq!(line.bounds(), Rect::new(10, 20, 50, 50));
    assert_eq!(line[0].bounds(), Rect::new(10, 20, 25, 50));
    assert_eq!(line[1].bounds(), Rect::new(35, 20, 25, 50));
}

#[test]
fn base_lines_are_stacked() {
    let mut document = document_from(vec![
        formula_line!((line (frac (line '1'), (line '2')))),
        FormulaLine::default(),
    ]);
    document.arrange(&MonospaceMeasure::default(), Point::new(0, 0));

    let second = document.line(document.base_line(1));
    assert_eq!(second.bounds().y, 106);
    // Empty base lines get the width of an average character
    assert_eq!(second.bounds().width, 25);
}

#[test]
fn fraction_layout() {
    let mut document = document_from(vec![formula_line!((line (frac (line '1'), (line '2'))))]);
    let mut canvas = RecordingCanvas::default();
    document.render(&mut canvas, &MonospaceMeasure::default(), Point::new(0, 0));

    let line = document.base_line(0);
    let owned: Vec<_> = document.line(line)[0].owned_lines().collect();
    assert_eq!(document.line(owned[0]).bounds(), Rect::new(0, 0, 25, 50));
    assert_eq!(document.line(owned[1]).bounds(), Rect::new(0, 56, 25, 50));

    assert_eq!(
        canvas.glyphs,
        vec![
            ("1".to_string(), Point::new(0, 0), 50),
            ("2".to_string(), Point::new(0, 56), 50)
        ]
    );
    assert_eq!(canvas.strokes, vec![(Point::new(0, 53), Point::new(25, 53))]);
    assert!(canvas.placeholders.is_empty());
}

#[test]
fn empty_nested_lines_are_placeholders() {
    let mut document = document_from(vec![formula_line!((line (sup (line))))]);
    let mut canvas = RecordingCanvas::default();
    document.render(&mut canvas, &MonospaceMeasure::default(), Point::new(0, 0));

    // A third of the smaller reference size
    assert_eq!(canvas.placeholders, vec![Rect::new(0, 0, 11, 33)]);
    assert_eq!(
        document.line(document.base_line(0)).bounds(),
        Rect::new(0, 0, 11, 66)
    );
}

#[test]
fn empty_base_lines_draw_nothing() {
    let mut document = Document::default();
    let mut canvas = RecordingCanvas::default();
    document.render(&mut canvas, &MonospaceMeasure::default(), Point::new(0, 0));
    assert!(canvas.glyphs.is_empty());
    assert!(canvas.placeholders.is_empty());
}

#[test]
fn nested_symbols_are_inside_their_owner() {
    let mut document = document_from(vec![formula_line!((line
        'x',
        (root (line '3'), (line 'y', (sup (line '2')))),
        (sum (line 'n'), (line (frac (line 'i'), (line '1')))),
        (func "sin", (line 'z'))
    ))]);
    let mut canvas = RecordingCanvas::default();
    document.render(&mut canvas, &MonospaceMeasure::default(), Point::new(0, 0));

    let base = document.base_line(0);
    let line_bounds = document.line(base).bounds();
    for symbol in document.line(base).symbols() {
        let bounds = symbol.bounds();
        assert!(bounds.x >= line_bounds.x && bounds.right() <= line_bounds.right());
        assert!(bounds.y >= line_bounds.y && bounds.bottom() <= line_bounds.bottom());
        for owned in symbol.owned_lines() {
            let owned_bounds = document.line(owned).bounds();
            assert!(owned_bounds.x >= bounds.x && owned_bounds.right() <= bounds.right());
        }
    }

    let texts: Vec<_> = canvas.glyphs.iter().map(|(text, ..)| text.as_str()).collect();
    assert!(texts.contains(&"\u{221A}"));
    assert!(texts.contains(&"\u{2211}"));
    assert!(texts.contains(&"sin"));
    assert!(texts.contains(&"("));
    assert!(texts.contains(&")"));
}
