use std::collections::{HashSet, VecDeque};

use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Variable};

/// A breadth-first-search BDD variable ordering. Traverses the formula in a
/// BFS manner and gathers all variables in the order of their first
/// occurrence. Negative literals are treated as a negation of a variable and
/// are therefore visited one level deeper than positive literals.
pub fn bfs_ordering(formula: EncodedFormula, f: &FormulaFactory) -> Vec<Variable> {
    let mut queue = VecDeque::from([formula]);
    let mut added = HashSet::new();
    let mut variables = Vec::new();
    let mut add = |var| {
        if added.insert(var) {
            variables.push(var);
        }
    };

    while let Some(current) = queue.pop_front() {
        match current.unpack(f) {
            Formula::Lit(lit) if lit.phase() => add(lit.variable()),
            Formula::Lit(lit) => queue.push_back(lit.variable().into()),
            Formula::Pbc(pbc) => pbc.literals.iter().for_each(|lit| add(lit.variable())),
            Formula::True | Formula::False => {}
            _ => queue.extend(current.operands(f)),
        }
    }
    variables
}

#[cfg(test)]
mod tests {
    use crate::formulas::{CType, FormulaFactory};
    use crate::util::test_util::lits_list;

    use super::bfs_ordering;

    #[test]
    fn test_simple_formulas() {
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
        let nb = f.literal("b", false);

        assert!(bfs_ordering(f.verum(), f).is_empty());
        assert!(bfs_ordering(f.falsum(), f).is_empty());
        assert_eq!(bfs_ordering(a, f), f.vars(["a"]));
        assert_eq!(bfs_ordering(f.literal("a", false), f), f.vars(["a"]));
        assert_eq!(bfs_ordering(f.implication(a, nb), f), f.vars(["a", "b"]));
        assert_eq!(bfs_ordering(f.or([a, f.literal("c", false), b]), f), f.vars(["a", "b", "c"]));
        assert_eq!(bfs_ordering(f.and([a, nb, c]), f), f.vars(["a", "c", "b"]));
        let pbc = f.pbc(CType::LT, 2, lits_list("a c b", f), vec![1, 1, 1]);
        assert_eq!(bfs_ordering(pbc, f), f.vars(["a", "c", "b"]));
    }

    #[test]
    fn test_levels() {
        let f = &FormulaFactory::new();
        let deep = f.and([f.variable("x"), f.or([f.variable("y"), f.variable("z")])]);
        let formula = f.implication(deep, f.variable("a"));
        assert_eq!(bfs_ordering(formula, f), f.vars(["a", "x", "y", "z"]));
    }
}
