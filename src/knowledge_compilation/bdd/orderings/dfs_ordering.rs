use std::collections::HashSet;

use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Variable};

/// A depth-first-search BDD variable ordering. Traverses the formula in a DFS
/// manner and gathers all variables in the order of their first occurrence.
pub fn dfs_ordering(formula: EncodedFormula, f: &FormulaFactory) -> Vec<Variable> {
    let mut variables = Vec::new();
    let mut added = HashSet::new();
    dfs_rec(formula, f, &mut variables, &mut added);
    variables
}

fn dfs_rec(formula: EncodedFormula, f: &FormulaFactory, variables: &mut Vec<Variable>, added: &mut HashSet<Variable>) {
    let mut add = |var| {
        if added.insert(var) {
            variables.push(var);
        }
    };
    match formula.unpack(f) {
        Formula::Lit(lit) => add(lit.variable()),
        Formula::Pbc(pbc) => pbc.literals.iter().for_each(|lit| add(lit.variable())),
        Formula::True | Formula::False => {}
        _ => formula.operands(f).into_iter().for_each(|op| dfs_rec(op, f, variables, added)),
    }
}

#[cfg(test)]
mod tests {
    use crate::formulas::{CType, FormulaFactory};
    use crate::util::test_util::lits_list;

    use super::dfs_ordering;

    #[test]
    fn test_simple_formulas() {
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
        let (nb, nc) = (f.literal("b", false), f.literal("c", false));

        assert!(dfs_ordering(f.verum(), f).is_empty());
        assert!(dfs_ordering(f.falsum(), f).is_empty());
        assert_eq!(dfs_ordering(a, f), f.vars(["a"]));
        assert_eq!(dfs_ordering(f.literal("a", false), f), f.vars(["a"]));
        assert_eq!(dfs_ordering(f.implication(a, nb), f), f.vars(["a", "b"]));
        assert_eq!(dfs_ordering(f.implication(b, a), f), f.vars(["b", "a"]));
        assert_eq!(dfs_ordering(f.not(f.equivalence(a, nb)), f), f.vars(["a", "b"]));
        assert_eq!(dfs_ordering(f.or([c, nb, a]), f), f.vars(["a", "b", "c"]));
        assert_eq!(dfs_ordering(f.and([a, nb, nc]), f), f.vars(["a", "b", "c"]));
        let pbc = f.pbc(CType::LT, 7, lits_list("c b a", f), vec![3, 1, 4]);
        assert_eq!(dfs_ordering(pbc, f), f.vars(["c", "b", "a"]));
    }

    #[test]
    fn test_complex_formula() {
        let f = &FormulaFactory::new();
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        let formula = f.implication(f.and([d, f.literal("a", false)]), f.or([c, f.equivalence(b, a)]));
        let ordering = dfs_ordering(formula, f);
        assert_eq!(ordering[..2], f.vars(["a", "d"]));
        assert_eq!(ordering[2], f.var("c"));
        assert_eq!(ordering.len(), 4);
    }
}
