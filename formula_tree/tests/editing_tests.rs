use formula_tree::document::*;
use formula_tree::formula::*;
use formula_tree::formula_line;
use formula_tree::symbol::*;

fn assert_metrics_cover_symbols(document: &Document, line: formula_tree::arena::LineId) {
    let line = document.line(line);
    for symbol in line.symbols() {
        let metrics = document.symbol_metrics(symbol, line.reference_size());
        assert!(line.baseline_offset() >= metrics.baseline_offset);
        assert!(line.height() >= metrics.baseline_offset + metrics.descent);
        assert!(line.height() - line.baseline_offset() >= metrics.descent);
    }
}

#[test]
fn empty_line_has_glyph_metrics() {
    let document = Document::default();
    let line = document.line(document.base_line(0));
    assert_eq!(document.base_line_count(), 1);
    assert!(line.is_base());
    assert!(line.is_empty());
    assert_eq!(line.height(), 50);
    assert_eq!(line.baseline_offset(), 25);
}

#[test]
fn insert_fraction_into_empty_line() {
    let mut document = Document::default();
    let line = document.base_line(0);
    document.insert(
        line,
        0,
        &FormulaSymbol::fraction(FormulaLine::from_text("1"), FormulaLine::from_text("2")),
    );

    assert_eq!(document.line(line).len(), 1);
    let owned: Vec<_> = document.line(line)[0].owned_lines().collect();
    assert_eq!(owned.len(), 2);
    assert_eq!(
        document.line_to_formula(owned[0]),
        FormulaLine::from_text("1")
    );
    assert_eq!(
        document.line_to_formula(owned[1]),
        FormulaLine::from_text("2")
    );
    for nested in owned {
        assert_eq!(document.line(nested).parent(), Some(line));
        assert!(!document.line(nested).is_base());
    }
}

#[test]
fn length_tracks_inserts_and_deletes() {
    let mut document = Document::default();
    let line = document.base_line(0);
    let mut expected = 0;
    let symbols = vec![
        formula_tree::formula_symbol!('a'),
        formula_tree::formula_symbol!((frac (line '1'), (line '2'))),
        formula_tree::formula_symbol!((sup (line 'n'))),
        formula_tree::formula_symbol!((sub (line 'i'))),
        formula_tree::formula_symbol!((root (line '3'), (line 'x'))),
        formula_tree::formula_symbol!((sum (line '9'), (line '1'))),
        formula_tree::formula_symbol!((func "sin", (line 'x'))),
    ];
    for (index, symbol) in symbols.iter().enumerate() {
        document.insert(line, index / 2, symbol);
        expected += 1;
        assert_eq!(document.line(line).len(), expected);
        assert_metrics_cover_symbols(&document, line);
    }
    for index in [3, 0, 2, 0] {
        document.delete(line, index);
        expected -= 1;
        assert_eq!(document.line(line).len(), expected);
        assert_metrics_cover_symbols(&document, line);
    }
}

#[test]
fn delete_frees_owned_lines() {
    let mut document = Document::default();
    let line = document.base_line(0);
    document.insert(
        line,
        0,
        &formula_tree::formula_symbol!((frac (line (sup (line '2'))), (line 'b'))),
    );
    // base + numerator + superscript + denominator
    assert_eq!(document.line_count(), 4);
    let numerator = document.line(line)[0].owned_lines().next().unwrap();

    document.delete(line, 0);
    assert_eq!(document.line_count(), 1);
    assert!(!document.contains_line(numerator));
    assert_eq!(document.line(line).height(), 50);
}

#[test]
fn nested_insert_bubbles_metrics_up() {
    let mut document = Document::default();
    let line = document.base_line(0);
    document.insert(
        line,
        0,
        &FormulaSymbol::fraction(FormulaLine::from_text("1"), FormulaLine::from_text("2")),
    );
    // 50 + 6/2 above the axis, 50 + 6 - 3 below it
    assert_eq!(document.line(line).baseline_offset(), 53);
    assert_eq!(document.line(line).height(), 106);

    let numerator = document.line(line)[0].owned_lines().next().unwrap();
    document.insert(
        numerator,
        1,
        &FormulaSymbol::fraction(FormulaLine::from_text("x"), FormulaLine::from_text("y")),
    );
    assert_eq!(document.line(numerator).height(), 106);
    assert_eq!(document.line(line).baseline_offset(), 109);
    assert_eq!(document.line(line).height(), 162);

    document.delete(numerator, 1);
    assert_eq!(document.line(line).height(), 106);
}

#[test]
fn indices_use_smaller_lines() {
    let mut document = Document::default();
    let line = document.base_line(0);
    document.insert(line, 0, &formula_tree::formula_symbol!((sup (line 'n'))));
    let index_line = document.line(line)[0].owned_lines().next().unwrap();
    assert_eq!(document.line(index_line).reference_size(), 33);

    let symbol = &document.line(line)[0];
    let metrics = document.symbol_metrics(symbol, 50);
    // A superscript sticks out above the axis
    assert!(metrics.baseline_offset > 25);
    assert_eq!(
        metrics.baseline_offset,
        document.line(index_line).baseline_offset() + 25
    );
}

#[test]
fn clone_is_independent() {
    let mut document = Document::default();
    let line = document.base_line(0);
    document.insert(
        line,
        0,
        &formula_tree::formula_symbol!((frac (line 'a', (sub (line 'i'))), (line 'b'))),
    );
    document.clone_symbol(line, 0, line, 1);

    let formula = document.line_to_formula(line);
    assert_eq!(formula.symbols[0], formula.symbols[1]);

    let original: Vec<_> = document.line(line)[0].owned_lines().collect();
    let copy: Vec<_> = document.line(line)[1].owned_lines().collect();
    for line_id in &copy {
        assert!(!original.contains(line_id));
        assert_eq!(document.line(*line_id).parent(), Some(line));
    }

    document.insert(copy[0], 0, &FormulaSymbol::Simple('z'));
    assert_eq!(
        document.line_to_formula(original[0]),
        formula_line!((line 'a', (sub (line 'i'))))
    );
    assert_eq!(
        document.line_to_formula(copy[0]),
        formula_line!((line 'z', 'a', (sub (line 'i'))))
    );
}

#[test]
fn base_ancestor_of_nested_line() {
    let mut document = Document::default();
    let line = document.base_line(0);
    document.insert_all(
        line,
        0,
        &formula_line!((line 'x', '+', (frac (line (sup (line '2'))), (line 'b')))).symbols,
    );
    let numerator = document.line(line)[2].owned_lines().next().unwrap();
    let superscript = document.line(numerator)[0].owned_lines().next().unwrap();

    assert_eq!(document.owner_of(superscript), Some((numerator, 0)));
    assert_eq!(document.base_ancestor(superscript), (line, Some(2)));
    assert_eq!(document.base_ancestor(line), (line, None));
}

#[test]
fn sigma_kinds() {
    let mut document = Document::default();
    let line = document.base_line(0);
    document.insert(line, 0, &formula_tree::formula_symbol!((prod (line '9'), (line '1'))));
    document.push_back(line, &FormulaSymbol::simple('n'));
    assert!(!document.line(line)[0].is_atomic());
    assert!(document.line(line)[1].is_atomic());
    match document.line(line)[0].kind() {
        SymbolKind::Sigma { operator, .. } => assert_eq!(*operator, BigOperator::Product),
        other => panic!("Expected a product, got {}", other),
    }
}
