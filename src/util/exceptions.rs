use crate::formulas::{EncodedFormula, FormulaFactory};

/// Aborts the current computation because `formula` has a type the caller
/// cannot handle, e.g. an implication where a CNF was required.
pub fn panic_unexpected_formula_type(formula: EncodedFormula, f: Option<&FormulaFactory>) -> ! {
    match f {
        Some(f) => panic!("Unexpected formula type {:?}: {}", formula.formula_type(), formula.to_string(f)),
        None => panic!("Unexpected formula type {:?}: {formula:?}", formula.formula_type()),
    }
}
