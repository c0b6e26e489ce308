use std::fmt;

use crate::formula::FormulaLine;

/// Writes a leaf in double quotes, escaping quotes and backslashes inside it
pub fn write_quoted(value: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\"")?;
    for c in value.chars() {
        match c {
            '"' | '\\' => write!(f, "\\{}", c)?,
            _ => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

/// Writes the nested lines of a symbol, separated by spaces
pub fn write_lines(lines: &[&FormulaLine], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", line)?;
    }
    Ok(())
}
