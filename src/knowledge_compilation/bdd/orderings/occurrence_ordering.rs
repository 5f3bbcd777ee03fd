use std::cmp::Reverse;

use crate::formulas::{EncodedFormula, FormulaFactory, Variable};
use crate::operations::functions::variable_profile;

use super::dfs_ordering::dfs_ordering;

/// A BDD variable ordering sorting the variables from minimal to maximal
/// occurrence in the input formula. If two variables have the same number of
/// occurrences, their DFS ordering decides.
pub fn min_to_max_ordering(formula: EncodedFormula, f: &FormulaFactory) -> Vec<Variable> {
    let profile = variable_profile(formula, f);
    let mut ordering = dfs_ordering(formula, f);
    ordering.sort_by_key(|var| profile[var]);
    ordering
}

/// A BDD variable ordering sorting the variables from maximal to minimal
/// occurrence in the input formula. If two variables have the same number of
/// occurrences, their DFS ordering decides.
pub fn max_to_min_ordering(formula: EncodedFormula, f: &FormulaFactory) -> Vec<Variable> {
    let profile = variable_profile(formula, f);
    let mut ordering = dfs_ordering(formula, f);
    ordering.sort_by_key(|var| Reverse(profile[var]));
    ordering
}

#[cfg(test)]
mod tests {
    use crate::formulas::FormulaFactory;

    use super::{max_to_min_ordering, min_to_max_ordering};

    #[test]
    fn test_simple_formulas() {
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));

        assert!(min_to_max_ordering(f.verum(), f).is_empty());
        assert!(max_to_min_ordering(f.falsum(), f).is_empty());
        assert_eq!(min_to_max_ordering(f.literal("a", false), f), f.vars(["a"]));
        assert_eq!(min_to_max_ordering(f.implication(b, a), f), f.vars(["b", "a"]));
        assert_eq!(max_to_min_ordering(f.implication(b, a), f), f.vars(["b", "a"]));
        assert_eq!(min_to_max_ordering(f.and([a, f.literal("b", false), c]), f), f.vars(["a", "b", "c"]));
    }

    #[test]
    fn test_occurrences_decide() {
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
        // a: 1, b: 2, c: 3
        let formula = f.implication(a, f.and([f.or([b, c]), f.or([f.literal("b", false), f.literal("c", false)]), f.implication(c, f.verum())]));
        let formula = f.and([formula, f.or([c, f.variable("d")])]);
        let min_to_max = min_to_max_ordering(formula, f);
        assert!(min_to_max[..2].contains(&f.var("a")));
        assert!(min_to_max[..2].contains(&f.var("d")));
        assert_eq!(min_to_max[2..], f.vars(["b", "c"]));
        assert_eq!(max_to_min_ordering(formula, f)[0], f.var("c"));
        assert_eq!(max_to_min_ordering(formula, f)[1], f.var("b"));
    }
}
