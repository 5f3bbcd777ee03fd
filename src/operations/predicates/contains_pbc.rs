use std::collections::HashSet;

use crate::formulas::{EncodedFormula, FormulaFactory, FormulaType};

/// Returns `true` if the formula contains a pseudo-boolean constraint.
///
/// # Example
///
/// ```
/// # use logicng_compile::formulas::{CType, FormulaFactory};
/// # use logicng_compile::operations::predicates::contains_pbc;
/// let f = FormulaFactory::new();
///
/// let pbc = f.pbc(CType::LE, 1, vec![f.lit("a", true), f.lit("b", true)], vec![1, 1]);
///
/// assert!(contains_pbc(f.or([f.variable("c"), pbc]), &f));
/// assert!(!contains_pbc(f.or([f.variable("c"), f.variable("a")]), &f));
/// ```
pub fn contains_pbc(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![formula];
    seen.insert(formula);
    while let Some(current) = stack.pop() {
        match current.formula_type() {
            FormulaType::Pbc => return true,
            FormulaType::Lit(_) | FormulaType::True | FormulaType::False => {}
            _ => {
                for op in current.operands(f) {
                    if seen.insert(op) {
                        stack.push(op);
                    }
                }
            }
        }
    }
    false
}
