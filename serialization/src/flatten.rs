use formula_tree::{
    formula::{FormulaLine, FormulaSymbol},
    symbol::{BigOperator, IndexPlacement},
};

/// Writes a line as plain text for a formula evaluator, like `sin(x)+((1)/(2))`.
/// Nested lines are always bracketed, so the evaluator never has to guess the precedence.
pub fn flatten_line(line: &FormulaLine) -> String {
    let mut output = String::new();
    write_line(line, &mut output);
    output
}

/// One string per base line
pub fn flatten_document(lines: &[FormulaLine]) -> Vec<String> {
    lines.iter().map(flatten_line).collect()
}

fn write_line(line: &FormulaLine, output: &mut String) {
    for symbol in &line.symbols {
        write_symbol(symbol, output);
    }
}

fn write_symbol(symbol: &FormulaSymbol, output: &mut String) {
    match symbol {
        FormulaSymbol::Simple(value) => output.push(*value),
        FormulaSymbol::Fraction {
            numerator,
            denominator,
        } => {
            output.push_str("((");
            write_line(numerator, output);
            output.push_str(")/(");
            write_line(denominator, output);
            output.push_str("))");
        }
        FormulaSymbol::Sigma {
            operator,
            upper,
            lower,
        } => {
            output.push_str(match operator {
                BigOperator::Sum => "sum(",
                BigOperator::Product => "prod(",
            });
            write_line(lower, output);
            output.push(',');
            write_line(upper, output);
            output.push(')');
        }
        FormulaSymbol::Index { placement, line } => {
            output.push_str(match placement {
                IndexPlacement::Subscript => "_(",
                IndexPlacement::Superscript => "^(",
            });
            write_line(line, output);
            output.push(')');
        }
        FormulaSymbol::Root { exponent, radicand } => {
            output.push_str("root(");
            write_line(exponent, output);
            output.push(',');
            write_line(radicand, output);
            output.push(')');
        }
        FormulaSymbol::Function { name, argument } => {
            output.push_str(name);
            output.push('(');
            write_line(argument, output);
            output.push(')');
        }
    }
}
