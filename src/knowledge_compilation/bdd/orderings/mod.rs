mod bfs_ordering;
mod dfs_ordering;
mod force_ordering;
mod occurrence_ordering;

pub use bfs_ordering::*;
pub use dfs_ordering::*;
pub use force_ordering::*;
pub use occurrence_ordering::*;

use crate::formulas::{EncodedFormula, FormulaFactory, Variable};

/// Strategies for computing a variable ordering of a BDD kernel from a
/// formula. The ordering is fixed before the BDD is built.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::knowledge_compilation::bdd::{Bdd, BddKernel};
/// # use logicng_compile::knowledge_compilation::bdd::orderings::VariableOrdering;
/// let f = FormulaFactory::new();
/// let formula = f.and([f.variable("b"), f.or([f.variable("a"), f.variable("b")])]);
///
/// let ordering = VariableOrdering::MaxToMin.ordering(formula, &f);
/// assert_eq!(ordering, f.vars(["b", "a"]));
///
/// let mut kernel = BddKernel::new_with_var_ordering(ordering);
/// let bdd = Bdd::from_formula(formula, &f, &mut kernel);
/// assert_eq!(bdd.node_count(&kernel), 1);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VariableOrdering {
    /// Variables in the order of a depth-first traversal.
    Dfs,
    /// Variables in the order of a breadth-first traversal.
    Bfs,
    /// Variables sorted from least to most occurrences.
    MinToMax,
    /// Variables sorted from most to least occurrences.
    MaxToMin,
    /// The FORCE heuristic on the hypergraph of the formula's CNF.
    Force,
}

impl VariableOrdering {
    /// Computes the ordering for the variables of `formula`.
    pub fn ordering(self, formula: EncodedFormula, f: &FormulaFactory) -> Vec<Variable> {
        match self {
            Self::Dfs => dfs_ordering(formula, f),
            Self::Bfs => bfs_ordering(formula, f),
            Self::MinToMax => min_to_max_ordering(formula, f),
            Self::MaxToMin => max_to_min_ordering(formula, f),
            Self::Force => force_ordering(formula, f),
        }
    }
}
