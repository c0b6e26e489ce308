use std::ops::{Range, RangeInclusive};

use log::{debug, trace};

use crate::{
    arena::{LineArena, LineId},
    formula::{FormulaLine, FormulaSymbol},
    line::Line,
    settings::LayoutSettings,
    symbol::{Symbol, SymbolKind},
};

/// Owns every line. The base lines are the top level lines, in order.
///
/// Invariants:
/// - There is always at least one base line.
/// - Lines form a forest: every nested line is owned by exactly one symbol, and its `parent` is the line containing that symbol.
/// - Cached line metrics are up to date after every public mutation.
pub struct Document {
    lines: LineArena,
    base_lines: Vec<LineId>,
    settings: LayoutSettings,
}

impl Document {
    pub fn new(settings: LayoutSettings) -> Self {
        let mut document = Self {
            lines: LineArena::default(),
            base_lines: Vec::new(),
            settings,
        };
        let line = document.new_base_line();
        document.base_lines.push(line);
        document
    }

    /// Builds a document from detached lines. No lines means one empty base line.
    pub fn from_formula(settings: LayoutSettings, lines: &[FormulaLine]) -> Self {
        let mut document = Self::new(settings);
        for (index, formula_line) in lines.iter().enumerate() {
            let line = if index == 0 {
                document.base_lines[0]
            } else {
                let line = document.new_base_line();
                document.base_lines.push(line);
                line
            };
            document.insert_all(line, 0, &formula_line.symbols);
        }
        document
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn base_lines(&self) -> &[LineId] {
        &self.base_lines
    }

    pub fn base_line(&self, index: usize) -> LineId {
        *self
            .base_lines
            .get(index)
            .expect("Invalid base line index")
    }

    pub fn base_line_count(&self) -> usize {
        self.base_lines.len()
    }

    /// Returns the index of the line in the document, if it is a base line
    pub fn base_line_index(&self, id: LineId) -> Option<usize> {
        self.base_lines.iter().position(|line| *line == id)
    }

    pub fn line(&self, id: LineId) -> &Line {
        self.lines.get(id).expect("Invalid line handle")
    }

    pub(crate) fn line_mut(&mut self, id: LineId) -> &mut Line {
        self.lines.get_mut(id).expect("Invalid line handle")
    }

    pub fn contains_line(&self, id: LineId) -> bool {
        self.lines.get(id).is_some()
    }

    /// Number of lines in the document, nested ones included
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Finds the line which contains the symbol that owns the given line, and the index of that symbol.
    /// Returns `None` for base lines.
    pub fn owner_of(&self, id: LineId) -> Option<(LineId, usize)> {
        let parent = self.line(id).parent?;
        let index = self
            .line(parent)
            .symbols
            .iter()
            .position(|symbol| symbol.owned_lines().any(|line| line == id))
            .expect("Nested line is not owned by any symbol of its parent");
        Some((parent, index))
    }

    /// Walks up to the base line. Also returns the index of the base line symbol that contains the given line,
    /// or `None` if the given line already is a base line.
    pub fn base_ancestor(&self, id: LineId) -> (LineId, Option<usize>) {
        let mut current = id;
        let mut symbol_index = None;
        while let Some((parent, index)) = self.owner_of(current) {
            current = parent;
            symbol_index = Some(index);
        }
        (current, symbol_index)
    }

    /// Whether the line is owned, directly or further down, by a symbol of `ancestor` in the range
    fn is_nested_in(&self, id: LineId, ancestor: LineId, range: &Range<usize>) -> bool {
        let mut current = id;
        while let Some((parent, index)) = self.owner_of(current) {
            if parent == ancestor {
                return range.contains(&index);
            }
            current = parent;
        }
        false
    }

    /// Inserts a symbol and recalculates the metrics of the line and its ancestors
    pub fn insert(&mut self, line: LineId, index: usize, symbol: &FormulaSymbol) {
        self.insert_all(line, index, std::slice::from_ref(symbol));
    }

    pub fn push_back(&mut self, line: LineId, symbol: &FormulaSymbol) {
        let index = self.line(line).len();
        self.insert(line, index, symbol);
    }

    /// Inserts the symbols in order, starting at the index
    pub fn insert_all(&mut self, line: LineId, index: usize, symbols: &[FormulaSymbol]) {
        assert!(index <= self.line(line).len(), "Invalid symbol index");
        let materialized: Vec<Symbol> = symbols
            .iter()
            .map(|symbol| self.materialize(line, symbol))
            .collect();
        self.line_mut(line)
            .symbols
            .splice(index..index, materialized);
        self.recalculate(line);
    }

    /// Destroys the symbol and every line it owns
    pub fn delete(&mut self, line: LineId, index: usize) {
        self.delete_range(line, index..(index + 1));
    }

    /// Destroys a range of symbols, with a single recalculation at the end
    pub fn delete_range(&mut self, line: LineId, range: Range<usize>) {
        assert!(
            range.start <= range.end && range.end <= self.line(line).len(),
            "Invalid symbol range"
        );
        let removed: Vec<Symbol> = self.line_mut(line).symbols.drain(range).collect();
        for symbol in removed {
            self.free_symbol(symbol);
        }
        self.recalculate(line);
    }

    pub fn delete_inclusive(&mut self, line: LineId, range: RangeInclusive<usize>) {
        let (start, end) = range.into_inner();
        self.delete_range(line, start..(end + 1));
    }

    /// Recomputes the metrics of the line, then of every ancestor up to the base line.
    /// A nested line changing size changes the size of its owner, so this has to go all the way up.
    pub fn recalculate(&mut self, id: LineId) {
        let mut current = Some(id);
        while let Some(line_id) = current {
            let metrics = self.compute_line_metrics(self.line(line_id));
            let line = self.line_mut(line_id);
            line.metrics = metrics;
            current = line.parent;
        }
    }

    /// Deep copy of a symbol into another line. The copy shares no lines with the source.
    pub fn clone_symbol(
        &mut self,
        source_line: LineId,
        source_index: usize,
        target_line: LineId,
        target_index: usize,
    ) {
        let copy = self.clone_symbol_into(source_line, source_index, target_line);
        assert!(
            target_index <= self.line(target_line).len(),
            "Invalid symbol index"
        );
        self.line_mut(target_line)
            .symbols
            .insert(target_index, copy);
        self.recalculate(target_line);
    }

    /// Clones the symbols in the range onto the target line, then destroys the source range.
    /// Source and target must be different lines, and the target must not be nested in the range.
    pub fn splice(
        &mut self,
        source_line: LineId,
        range: Range<usize>,
        target_line: LineId,
        target_index: usize,
    ) {
        assert_ne!(source_line, target_line, "Cannot splice a line into itself");
        assert!(
            !self.is_nested_in(target_line, source_line, &range),
            "Cannot splice symbols into a line that they own"
        );
        assert!(
            target_index <= self.line(target_line).len(),
            "Invalid symbol index"
        );
        let copies: Vec<Symbol> = range
            .clone()
            .map(|index| self.clone_symbol_into(source_line, index, target_line))
            .collect();
        self.line_mut(target_line)
            .symbols
            .splice(target_index..target_index, copies);
        self.recalculate(target_line);
        self.delete_range(source_line, range);
    }

    /// Splits a base line in two. Everything from the index onwards ends up on a new base line right after it.
    /// Returns the index of the new base line.
    pub fn split_base_line(&mut self, base_index: usize, at: usize) -> usize {
        let line = self.base_line(base_index);
        let length = self.line(line).len();
        assert!(at <= length, "Invalid symbol index");
        let new_line = self.new_base_line();
        self.base_lines.insert(base_index + 1, new_line);
        self.splice(line, at..length, new_line, 0);
        debug!(
            "Split base line {} at {}, moved {} symbols",
            base_index,
            at,
            length - at
        );
        base_index + 1
    }

    /// Appends a base line to the one before it and removes it.
    /// Returns the previous base line and the index where the appended symbols start.
    pub fn merge_with_previous(&mut self, base_index: usize) -> (LineId, usize) {
        assert!(base_index > 0, "The first base line has no predecessor");
        let previous = self.base_line(base_index - 1);
        let line = self.base_line(base_index);
        let join_index = self.line(previous).len();
        let length = self.line(line).len();
        self.splice(line, 0..length, previous, join_index);
        self.remove_base_lines(base_index..(base_index + 1));
        debug!("Merged base line {} into its predecessor", base_index);
        (previous, join_index)
    }

    /// Removes base lines and everything they contain. At least one base line has to stay.
    pub fn remove_base_lines(&mut self, range: Range<usize>) {
        assert!(range.end <= self.base_lines.len(), "Invalid base line range");
        assert!(
            range.len() < self.base_lines.len(),
            "A document needs at least one base line"
        );
        let removed: Vec<LineId> = self.base_lines.drain(range).collect();
        for line in removed {
            self.free_line(line);
        }
    }

    /// Detached copy of the whole document, one entry per base line
    pub fn to_formula(&self) -> Vec<FormulaLine> {
        self.base_lines
            .iter()
            .map(|line| self.line_to_formula(*line))
            .collect()
    }

    pub fn line_to_formula(&self, id: LineId) -> FormulaLine {
        let length = self.line(id).len();
        self.range_to_formula(id, 0..length)
    }

    pub fn range_to_formula(&self, id: LineId, range: Range<usize>) -> FormulaLine {
        FormulaLine::new(
            self.line(id).symbols[range]
                .iter()
                .map(|symbol| self.symbol_to_formula(symbol))
                .collect(),
        )
    }

    pub fn symbol_to_formula(&self, symbol: &Symbol) -> FormulaSymbol {
        match &symbol.kind {
            SymbolKind::Simple(value) => FormulaSymbol::Simple(*value),
            SymbolKind::Fraction {
                numerator,
                denominator,
            } => FormulaSymbol::Fraction {
                numerator: self.line_to_formula(*numerator),
                denominator: self.line_to_formula(*denominator),
            },
            SymbolKind::Sigma {
                operator,
                upper,
                lower,
            } => FormulaSymbol::Sigma {
                operator: *operator,
                upper: self.line_to_formula(*upper),
                lower: self.line_to_formula(*lower),
            },
            SymbolKind::Index { placement, line } => FormulaSymbol::Index {
                placement: *placement,
                line: self.line_to_formula(*line),
            },
            SymbolKind::Root { exponent, radicand } => FormulaSymbol::Root {
                exponent: self.line_to_formula(*exponent),
                radicand: self.line_to_formula(*radicand),
            },
            SymbolKind::Function { name, argument } => FormulaSymbol::Function {
                name: name.clone(),
                argument: self.line_to_formula(*argument),
            },
        }
    }

    fn new_base_line(&mut self) -> LineId {
        let reference_size = self.settings.reference_size;
        self.lines.insert(Line::new(reference_size, None))
    }

    /// Allocates a nested line and fills it. Its metrics are computed, but not bubbled up,
    /// because the owner symbol isn't part of the parent line yet.
    fn new_nested_line(
        &mut self,
        parent: LineId,
        reference_size: i32,
        content: &FormulaLine,
    ) -> LineId {
        let id = self.lines.insert(Line::new(reference_size, Some(parent)));
        let symbols: Vec<Symbol> = content
            .symbols
            .iter()
            .map(|symbol| self.materialize(id, symbol))
            .collect();
        let line = self.line_mut(id);
        line.symbols = symbols;
        let metrics = self.compute_line_metrics(self.line(id));
        self.line_mut(id).metrics = metrics;
        id
    }

    /// Turns a detached symbol into one that lives on the given line.
    /// Every nested line gets the owner line as its parent, so a container can't exist without its back reference.
    fn materialize(&mut self, owner: LineId, symbol: &FormulaSymbol) -> Symbol {
        let h = self.line(owner).reference_size;
        let small = self.settings.scaled(h);
        let kind = match symbol {
            FormulaSymbol::Simple(value) => SymbolKind::Simple(*value),
            FormulaSymbol::Fraction {
                numerator,
                denominator,
            } => SymbolKind::Fraction {
                numerator: self.new_nested_line(owner, h, numerator),
                denominator: self.new_nested_line(owner, h, denominator),
            },
            FormulaSymbol::Sigma {
                operator,
                upper,
                lower,
            } => SymbolKind::Sigma {
                operator: *operator,
                upper: self.new_nested_line(owner, small, upper),
                lower: self.new_nested_line(owner, small, lower),
            },
            FormulaSymbol::Index { placement, line } => SymbolKind::Index {
                placement: *placement,
                line: self.new_nested_line(owner, small, line),
            },
            FormulaSymbol::Root { exponent, radicand } => SymbolKind::Root {
                exponent: self.new_nested_line(owner, small, exponent),
                radicand: self.new_nested_line(owner, h, radicand),
            },
            FormulaSymbol::Function { name, argument } => SymbolKind::Function {
                name: name.clone(),
                argument: self.new_nested_line(owner, h, argument),
            },
        };
        Symbol::new(kind)
    }

    /// Copies a symbol for a new owner line, recursively copying every owned line
    fn clone_symbol_into(&mut self, source_line: LineId, source_index: usize, owner: LineId) -> Symbol {
        let owned: Vec<LineId> = self.line(source_line)[source_index].owned_lines().collect();
        let copies: Vec<LineId> = owned
            .into_iter()
            .map(|line| self.clone_line(line, owner))
            .collect();
        let mut copies = copies.into_iter();
        let symbol = &self.line(source_line)[source_index];
        let kind = symbol
            .kind
            .map_lines(|_| copies.next().expect("Owned line count changed while cloning"));
        Symbol {
            kind,
            bounds: symbol.bounds,
        }
    }

    fn clone_line(&mut self, source: LineId, parent: LineId) -> LineId {
        let (reference_size, metrics, bounds, length) = {
            let line = self.line(source);
            (line.reference_size, line.metrics, line.bounds, line.len())
        };
        let id = self.lines.insert(Line::new(reference_size, Some(parent)));
        let symbols: Vec<Symbol> = (0..length)
            .map(|index| self.clone_symbol_into(source, index, id))
            .collect();
        let line = self.line_mut(id);
        line.symbols = symbols;
        line.metrics = metrics;
        line.bounds = bounds;
        trace!("Cloned line {} into {}", source, id);
        id
    }

    fn free_line(&mut self, id: LineId) {
        let line = self.lines.remove(id);
        for symbol in line.symbols {
            self.free_symbol(symbol);
        }
    }

    fn free_symbol(&mut self, symbol: Symbol) {
        for line in symbol.owned_lines() {
            self.free_line(line);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}
