use caret::caret::Caret;
use caret::caret_visual::{CaretEvent, CaretVisualState, HeadlessCaretHost};
use caret::commands::InsertCommand;
use caret::math_editor::{is_allowed_character, MathEditor, SerializationError, SerializedDataType};
use caret::selection::Selection;
use caret::settings::EditorSettings;
use formula_tree::direction::Direction;
use formula_tree::document::Document;
use formula_tree::formula::FormulaLine;
use formula_tree::formula_line;
use formula_tree::geometry::{Point, Rect};
use formula_tree::measure::MonospaceMeasure;
use formula_tree::paint::Canvas;

type TestEditor = MathEditor<HeadlessCaretHost, MonospaceMeasure>;

fn editor_with(lines: &[&str]) -> TestEditor {
    let settings = EditorSettings::default();
    let lines: Vec<_> = lines.iter().map(|line| FormulaLine::from_text(line)).collect();
    let document = Document::from_formula(settings.layout.clone(), &lines);
    MathEditor::with_document(
        settings,
        document,
        HeadlessCaretHost::new(),
        MonospaceMeasure::default(),
    )
}

fn text_of(editor: &TestEditor) -> Vec<FormulaLine> {
    editor.document().to_formula()
}

fn lines(lines: &[&str]) -> Vec<FormulaLine> {
    lines.iter().map(|line| FormulaLine::from_text(line)).collect()
}

#[derive(Default)]
struct CountingCanvas {
    glyphs: usize,
}

impl Canvas for CountingCanvas {
    fn draw_glyph(&mut self, _text: &str, _position: Point, _size: i32) {
        self.glyphs += 1;
    }

    fn draw_stroke(&mut self, _from: Point, _to: Point) {}

    fn fill_placeholder(&mut self, _bounds: Rect) {}
}

#[test]
fn typing_only_accepts_allowed_characters() {
    let mut editor = editor_with(&[""]);
    for value in ['a', '1', '+', ' ', '(', '\u{e9}', '\n', '$', '\u{3c0}'] {
        editor.add_character(value);
    }
    assert_eq!(text_of(&editor), lines(&["a1+ ("]));
    assert_eq!(editor.caret().index, 5);

    assert!(is_allowed_character('{'));
    assert!(is_allowed_character('~'));
    assert!(!is_allowed_character('\t'));
    assert!(!is_allowed_character('\u{c4}'));
}

#[test]
fn dropped_character_still_replaces_selection() {
    let mut editor = editor_with(&["abcd"]);
    editor.select_all();
    assert!(!editor.add_character('\u{e9}'));
    assert_eq!(text_of(&editor), lines(&[""]));
    assert_eq!(editor.selection(), Selection::None);
    assert_eq!(editor.caret(), Caret::document_start(editor.document()));
}

#[test]
fn commands_insert_prefilled_symbols() {
    let mut editor = editor_with(&[""]);
    editor.add_command(InsertCommand::Sin);
    editor.add_character('+');
    editor.add_command(InsertCommand::Fraction);
    editor.add_command(InsertCommand::SquareRoot);
    editor.add_command(InsertCommand::Sum);
    assert_eq!(
        editor.flatten(),
        vec!["sin(x)+((1)/(2))root(2,x)sum(1,9)".to_string()]
    );
    assert_eq!(editor.caret().index, 5);

    let mut editor = editor_with(&[""]);
    editor.add_command(InsertCommand::Superscript);
    assert_eq!(
        text_of(&editor),
        vec![formula_line!((line (sup (line 't', 'm', 'p'))))]
    );
}

#[test]
fn line_break_splits_base_line() {
    let mut editor = editor_with(&["abcde"]);
    for _ in 0..3 {
        editor.move_caret(Direction::Right);
    }
    editor.insert_line_break_at_caret();
    assert_eq!(text_of(&editor), lines(&["abc", "de"]));
    assert_eq!(
        editor.caret(),
        Caret::new(editor.document().base_line(1), 0)
    );
}

#[test]
fn line_break_in_nested_line_does_nothing() {
    let mut editor = editor_with(&[""]);
    editor.add_command(InsertCommand::Fraction);
    // Into the numerator
    editor.set_selection_anchor(Point::new(10, 10));
    let numerator = editor.caret().line;
    assert!(!editor.document().line(numerator).is_base());

    editor.insert_line_break_at_caret();
    assert_eq!(editor.document().base_line_count(), 1);
    assert_eq!(editor.caret(), Caret::new(numerator, 0));
}

#[test]
fn backspace_removes_and_merges() {
    let mut editor = editor_with(&["abc", "de"]);
    editor.move_caret(Direction::Down);
    assert_eq!(editor.caret(), Caret::new(editor.document().base_line(1), 0));

    editor.remove_character_before_caret();
    assert_eq!(text_of(&editor), lines(&["abcde"]));
    assert_eq!(editor.caret(), Caret::new(editor.document().base_line(0), 3));

    editor.remove_character_before_caret();
    assert_eq!(text_of(&editor), lines(&["abde"]));
    assert_eq!(editor.caret().index, 2);
}

#[test]
fn backspace_at_document_start_does_nothing() {
    let mut editor = editor_with(&["ab"]);
    editor.remove_character_before_caret();
    assert_eq!(text_of(&editor), lines(&["ab"]));
    assert_eq!(editor.caret().index, 0);
}

#[test]
fn mouse_selection_is_replaced_by_typing() {
    let mut editor = editor_with(&["abcde"]);
    let line = editor.document().base_line(0);
    editor.set_selection_anchor(Point::new(30, 25));
    assert_eq!(editor.caret(), Caret::new(line, 1));

    let selection = editor.update_selection_anchor(Point::new(80, 25));
    assert_eq!(
        selection,
        Selection::Local {
            line,
            start: 1,
            end: 3
        }
    );
    editor.finish_selection();

    editor.add_character('z');
    assert_eq!(text_of(&editor), lines(&["aze"]));
    assert_eq!(editor.caret(), Caret::new(line, 2));
    assert_eq!(editor.selection(), Selection::None);
}

#[test]
fn moving_collapses_selection() {
    let mut editor = editor_with(&["abcde"]);
    let line = editor.document().base_line(0);
    editor.set_selection_anchor(Point::new(30, 25));
    editor.update_selection_anchor(Point::new(80, 25));
    editor.move_caret(Direction::Right);
    assert_eq!(editor.caret(), Caret::new(line, 4));
    assert_eq!(editor.selection(), Selection::None);

    editor.set_selection_anchor(Point::new(30, 25));
    editor.update_selection_anchor(Point::new(80, 25));
    editor.move_caret(Direction::Up);
    assert_eq!(editor.caret(), Caret::new(line, 1));
}

#[test]
fn update_without_anchor_does_nothing() {
    let mut editor = editor_with(&["abc"]);
    assert_eq!(
        editor.update_selection_anchor(Point::new(60, 25)),
        Selection::None
    );
}

#[test]
fn global_selection_deleted_with_backspace() {
    let mut editor = editor_with(&["abcd", "xy", "pqr"]);
    editor.set_selection_anchor(Point::new(60, 25));
    let selection = editor.update_selection_anchor(Point::new(30, 125));
    assert_eq!(
        selection,
        Selection::Global {
            start_line: 0,
            start_index: 2,
            end_line: 2,
            end_index: 1
        }
    );

    editor.remove_character_before_caret();
    assert_eq!(text_of(&editor), lines(&["abqr"]));
    assert_eq!(editor.caret(), Caret::new(editor.document().base_line(0), 2));
}

#[test]
fn select_all_and_delete() {
    let mut editor = editor_with(&["ab", "cd"]);
    editor.select_all();
    editor.remove_character_before_caret();
    assert_eq!(text_of(&editor), lines(&[""]));
    assert_eq!(editor.caret(), Caret::document_start(editor.document()));
}

#[test]
fn copy_and_paste() {
    let mut source = editor_with(&["ab", "cd"]);
    source.select_all();
    let data = source.copy(SerializedDataType::JsonFormula).unwrap();

    let mut target = editor_with(&["xy"]);
    target.move_caret(Direction::Right);
    target.paste(&data, None).unwrap();
    assert_eq!(text_of(&target), lines(&["xab", "cdy"]));
    assert_eq!(target.caret(), Caret::new(target.document().base_line(1), 2));

    assert!(target.paste("garbage", None).is_err());
    assert_eq!(text_of(&target), lines(&["xab", "cdy"]));
}

#[test]
fn paste_rejects_characters_that_cannot_be_typed() {
    let mut editor = editor_with(&["a"]);
    let data = r#"{"version":1,"data":[{"symbols":[{"Simple":"\n"},{"Simple":"\u00e9"}]}]}"#;
    assert!(matches!(
        editor.paste(data, Some(SerializedDataType::JsonFormula)),
        Err(SerializationError::InvalidSymbol('\n'))
    ));

    let data = r#"{"version":1,"data":[{"symbols":[{"Function":{"name":"","argument":{"symbols":[]}}}]}]}"#;
    assert!(matches!(
        editor.paste(data, None),
        Err(SerializationError::EmptyFunctionName)
    ));
    assert_eq!(text_of(&editor), lines(&["a"]));
    assert_eq!(editor.caret().index, 0);
}

#[test]
fn caret_is_recreated_when_its_height_changes() {
    let mut editor = editor_with(&[""]);
    editor.focus();
    assert_eq!(
        editor.caret_visual().state(),
        CaretVisualState::Shown { height: 50 }
    );

    let created = |editor: &TestEditor| {
        editor
            .caret_visual()
            .host()
            .events
            .iter()
            .filter(|event| matches!(event, CaretEvent::Created { .. }))
            .count()
    };
    assert_eq!(created(&editor), 1);

    editor.add_character('a');
    assert_eq!(created(&editor), 1);

    editor.add_command(InsertCommand::Fraction);
    assert_eq!(created(&editor), 2);
    assert_eq!(
        editor.caret_visual().state(),
        CaretVisualState::Shown { height: 106 }
    );

    editor.move_caret(Direction::Left);
    assert_eq!(created(&editor), 3);
    assert_eq!(editor.caret_placement().height, 50);

    editor.unfocus();
    assert_eq!(editor.caret_visual().state(), CaretVisualState::Destroyed);
}

#[test]
fn repaint_hides_caret_while_painting() {
    let mut editor = editor_with(&["ab"]);
    editor.focus();
    let mut canvas = CountingCanvas::default();
    editor.repaint(&mut canvas);

    assert_eq!(canvas.glyphs, 2);
    let events = &editor.caret_visual().host().events;
    assert_eq!(
        &events[events.len() - 2..],
        &[CaretEvent::Hidden, CaretEvent::Shown]
    );
    assert!(matches!(
        editor.caret_visual().state(),
        CaretVisualState::Shown { .. }
    ));
}
