use std::collections::HashSet;

use crate::formulas::{EncodedFormula, FormulaFactory, Variable};
use crate::graphs::{hypergraph_from_cnf, Hypergraph};

use super::dfs_ordering::dfs_ordering;

const MAX_ITERATIONS: usize = 1000;

/// Simple implementation of the FORCE BDD variable ordering due to Aloul,
/// Markov, and Sakallah.
///
/// The formula is converted into CNF, whose clauses form the edges of a
/// hypergraph over the variables. Starting from the DFS ordering, every
/// variable is moved to the average center of gravity of its clauses until
/// the ordering does not change anymore. Auxiliary variables of the CNF
/// conversion are removed from the result.
pub fn force_ordering(formula: EncodedFormula, f: &FormulaFactory) -> Vec<Variable> {
    let original_variables = formula.variables(f);
    let cnf = f.cnf(formula);
    let hypergraph = hypergraph_from_cnf(cnf, f);

    let mut ordering: Vec<Variable> =
        force(cnf, f, &hypergraph).into_iter().filter(|var| original_variables.contains(var)).collect();
    let ordered: HashSet<Variable> = ordering.iter().copied().collect();
    ordering.extend(original_variables.iter().filter(|var| !ordered.contains(var)));
    ordering
}

fn force(cnf: EncodedFormula, f: &FormulaFactory, hypergraph: &Hypergraph<Variable>) -> Vec<Variable> {
    let node_count = hypergraph.number_of_nodes();
    let dfs = dfs_ordering(cnf, f);
    let mut positions = vec![0; node_count];
    for node in 0..node_count {
        let content = hypergraph.node(node).map(|n| n.content);
        positions[node] = dfs.iter().position(|var| Some(*var) == content).unwrap_or(node);
    }

    for _ in 0..MAX_ITERATIONS {
        let tentative: Vec<f64> = (0..node_count).map(|node| hypergraph.tentative_position(node, &positions)).collect();
        let mut sorted: Vec<usize> = (0..node_count).collect();
        sorted.sort_by(|&n1, &n2| tentative[n1].total_cmp(&tentative[n2]).then(positions[n1].cmp(&positions[n2])));
        let mut new_positions = vec![0; node_count];
        for (position, &node) in sorted.iter().enumerate() {
            new_positions[node] = position;
        }
        if new_positions == positions {
            break;
        }
        positions = new_positions;
    }

    let mut nodes: Vec<usize> = (0..node_count).collect();
    nodes.sort_by_key(|&node| positions[node]);
    nodes.into_iter().filter_map(|node| hypergraph.node(node).map(|n| n.content)).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::formulas::FormulaFactory;
    use crate::util::test_util::lits_list;

    use super::force_ordering;

    #[test]
    fn test_simple_formulas() {
        let f = &FormulaFactory::new();
        let (a, b) = (f.variable("a"), f.variable("b"));
        assert!(force_ordering(f.verum(), f).is_empty());
        assert!(force_ordering(f.falsum(), f).is_empty());
        assert_eq!(force_ordering(a, f), f.vars(["a"]));
        assert_eq!(force_ordering(f.literal("a", false), f), f.vars(["a"]));
        assert_eq!(force_ordering(f.implication(a, f.literal("b", false)), f), f.vars(["a", "b"]));
        let equiv = force_ordering(f.not(f.equivalence(a, b)), f);
        assert_eq!(equiv.iter().copied().collect::<BTreeSet<_>>(), f.vars(["a", "b"]).into_iter().collect());
    }

    #[test]
    fn test_connected_variables_are_neighbours() {
        let f = &FormulaFactory::new();
        // two independent chains a-b-c and x-y-z
        let cnf = f.and([
            f.clause(&lits_list("a b", f)),
            f.clause(&lits_list("~b c", f)),
            f.clause(&lits_list("x y", f)),
            f.clause(&lits_list("~y z", f)),
            f.clause(&lits_list("~a ~c", f)),
            f.clause(&lits_list("~x ~z", f)),
        ]);
        let ordering = force_ordering(cnf, f);
        assert_eq!(ordering.len(), 6);
        let chain1: BTreeSet<_> = f.vars(["a", "b", "c"]).into_iter().collect();
        let first: BTreeSet<_> = ordering[..3].iter().copied().collect();
        let second: BTreeSet<_> = ordering[3..].iter().copied().collect();
        assert!(first == chain1 || second == chain1);
    }
}
