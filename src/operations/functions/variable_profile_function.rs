use std::collections::HashMap;

use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Variable};

/// A function that computes the variable profile for a given formula, i.e. it
/// counts the number of occurrences for each variable and returns it as a
/// mapping from variable to number of occurrences.
///
/// The profile is used by the BDD variable orderings which sort by occurrence.
///
/// # Example
///
/// Basic usage:
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::functions::variable_profile;
/// # let f = FormulaFactory::new();
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let formula = f.implication(f.and([a, f.literal("b", false)]), f.or([a, b, f.variable("c")]));
///
/// let profile = variable_profile(formula, &f);
///
/// assert_eq!(profile[&f.var("a")], 2);
/// assert_eq!(profile[&f.var("b")], 2);
/// assert_eq!(profile[&f.var("c")], 1);
/// ```
pub fn variable_profile(formula: EncodedFormula, f: &FormulaFactory) -> HashMap<Variable, usize> {
    let mut result = HashMap::new();
    variable_profile_rec(formula, f, &mut result);
    result
}

fn variable_profile_rec(formula: EncodedFormula, f: &FormulaFactory, result: &mut HashMap<Variable, usize>) {
    match formula.unpack(f) {
        Formula::Lit(lit) => {
            *result.entry(lit.variable()).or_insert(0) += 1;
        }
        Formula::Pbc(pbc) => {
            pbc.literals.iter().for_each(|lit| *result.entry(lit.variable()).or_insert(0) += 1);
        }
        _ => formula.operands(f).iter().for_each(|op| variable_profile_rec(*op, f, result)),
    }
}

#[cfg(test)]
mod tests {
    use crate::formulas::{CType, FormulaFactory};

    use super::variable_profile;

    #[test]
    fn test_variable_profile_simple() {
        let f = FormulaFactory::new();
        let va = f.var("a");
        let vb = f.var("b");
        let vc = f.var("c");
        let a = f.variable("a");
        let b = f.variable("b");
        let nc = f.literal("c", false);

        assert!(variable_profile(f.verum(), &f).is_empty());
        assert!(variable_profile(f.falsum(), &f).is_empty());

        let prof_lit = variable_profile(f.literal("a", false), &f);
        assert_eq!(prof_lit.len(), 1);
        assert_eq!(prof_lit[&va], 1);

        let prof_equiv = variable_profile(f.equivalence(a, nc), &f);
        assert_eq!(prof_equiv.len(), 2);
        assert_eq!(prof_equiv[&va], 1);
        assert_eq!(prof_equiv[&vc], 1);

        let prof_and = variable_profile(f.and([a, b, nc]), &f);
        assert_eq!(prof_and.len(), 3);
        assert_eq!(prof_and[&vb], 1);

        let prof_pbc = variable_profile(f.pbc(CType::LT, 3, vec![va.pos_lit(), vb.pos_lit(), vc.pos_lit()], vec![3, 1, -4]), &f);
        assert_eq!(prof_pbc.len(), 3);
        assert_eq!(prof_pbc[&va], 1);
        assert_eq!(prof_pbc[&vc], 1);
    }

    #[test]
    fn test_variable_profile_complex() {
        let f = FormulaFactory::new();
        let a = f.variable("a");
        let b = f.variable("b");
        let c = f.variable("c");
        let formula =
            f.implication(f.and([a, f.or([b, c]), f.or([f.literal("b", false), f.literal("c", false)])]), c);
        let profile = variable_profile(formula, &f);
        assert_eq!(profile.len(), 3);
        assert_eq!(profile[&f.var("a")], 1);
        assert_eq!(profile[&f.var("b")], 2);
        assert_eq!(profile[&f.var("c")], 3);
    }
}
