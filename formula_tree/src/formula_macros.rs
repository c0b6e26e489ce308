/// Builds a [`crate::formula::FormulaSymbol`] from an s-expression.
/// Simple symbols are char literals, containers are `(frac a, b)`, `(sum a, b)`, `(prod a, b)`,
/// `(sub a)`, `(sup a)`, `(root a, b)` and `(func "name", a)`.
#[macro_export]
macro_rules! formula_symbol {
  ((frac $a:tt, $b:tt)) => {
      $crate::formula::FormulaSymbol::fraction($crate::formula_line!($a), $crate::formula_line!($b))
  };
  ((sum $a:tt, $b:tt)) => {
      $crate::formula::FormulaSymbol::sum($crate::formula_line!($a), $crate::formula_line!($b))
  };
  ((prod $a:tt, $b:tt)) => {
      $crate::formula::FormulaSymbol::product($crate::formula_line!($a), $crate::formula_line!($b))
  };
  ((sub $a:tt)) => {
      $crate::formula::FormulaSymbol::subscript($crate::formula_line!($a))
  };
  ((sup $a:tt)) => {
      $crate::formula::FormulaSymbol::superscript($crate::formula_line!($a))
  };
  ((root $a:tt, $b:tt)) => {
      $crate::formula::FormulaSymbol::root($crate::formula_line!($a), $crate::formula_line!($b))
  };
  ((func $name:literal, $a:tt)) => {
      $crate::formula::FormulaSymbol::function($name, $crate::formula_line!($a))
  };
  ($s:literal) => {
    $crate::formula::FormulaSymbol::simple($s)
  };
  ($s:expr) => {
    $s
  };
}

/// Builds a [`crate::formula::FormulaLine`], like `formula_line!((line 'a', (frac (line '1'), (line '2'))))`
#[macro_export]
macro_rules! formula_line {
  ((line $($e:tt),* $(,)?)) => {
    $crate::formula::FormulaLine::new(vec![$($crate::formula_symbol!($e)),*])
  };
  ($e:expr) => {
      $e
  };
}
