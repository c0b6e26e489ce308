use formula_tree::formula::{FormulaLine, FormulaSymbol};
use serde::{Deserialize, Serialize};

/// The insert buttons of the editor. Every command inserts a symbol with some example content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub enum InsertCommand {
    Sum,
    Product,
    Fraction,
    Subscript,
    Superscript,
    SquareRoot,
    Sin,
    Cos,
    Tan,
    Ctg,
}

impl InsertCommand {
    pub fn to_symbol(self) -> FormulaSymbol {
        let text = FormulaLine::from_text;
        match self {
            InsertCommand::Sum => FormulaSymbol::sum(text("9"), text("1")),
            InsertCommand::Product => FormulaSymbol::product(text("9"), text("1")),
            InsertCommand::Fraction => FormulaSymbol::fraction(text("1"), text("2")),
            InsertCommand::Subscript => FormulaSymbol::subscript(text("tmp")),
            InsertCommand::Superscript => FormulaSymbol::superscript(text("tmp")),
            InsertCommand::SquareRoot => FormulaSymbol::root(text("2"), text("x")),
            InsertCommand::Sin => FormulaSymbol::function("sin", text("x")),
            InsertCommand::Cos => FormulaSymbol::function("cos", text("x")),
            InsertCommand::Tan => FormulaSymbol::function("tan", text("x")),
            InsertCommand::Ctg => FormulaSymbol::function("ctg", text("x")),
        }
    }
}
