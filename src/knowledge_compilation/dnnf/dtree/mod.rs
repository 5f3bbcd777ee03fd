mod min_fill;

use std::ops::BitOr;

use bitvec::bitvec;
use bitvec::vec::BitVec;

use super::dnnf_propagator::{DnnfLit, DnnfPropagator};

pub use min_fill::MinFillDTreeGenerator;

pub type DTreeIndex = u32;

/// A decomposition tree over the clauses of a CNF. Leaves hold one clause,
/// inner nodes split the clauses into two parts.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug)]
pub enum DTree {
    Leaf(DTreeIndex),
    Node(DTreeIndex),
}

/// Arena of the leaves and nodes of a [`DTree`].
///
/// Besides the structure, the factory stores for every tree its static
/// variable set and the clauses below it, which are needed to compute the
/// dynamic separators and cache keys during the compilation.
pub struct DTreeFactory {
    number_of_variables: usize,
    leaves: Vec<Vec<DnnfLit>>,
    nodes: Vec<(DTree, DTree)>,
    leaf_var_sets: Vec<BitVec>,
    node_var_sets: Vec<BitVec>,
    node_leaves: Vec<Vec<DTreeIndex>>,
}

impl DTreeFactory {
    pub const fn new(number_of_variables: usize) -> Self {
        Self { number_of_variables, leaves: vec![], nodes: vec![], leaf_var_sets: vec![], node_var_sets: vec![], node_leaves: vec![] }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn leaf(&mut self, clause: Vec<DnnfLit>) -> DTree {
        let mut var_set = bitvec![0; self.number_of_variables];
        clause.iter().for_each(|lit| var_set.set(lit.var().0, true));
        self.leaf_var_sets.push(var_set);
        self.leaves.push(clause);
        DTree::Leaf(self.leaves.len() as DTreeIndex - 1)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn node(&mut self, left: DTree, right: DTree) -> DTree {
        let var_set = self.static_var_set(left).clone().bitor(self.static_var_set(right).clone());
        let mut leaves = self.leaf_indices(left);
        leaves.extend(self.leaf_indices(right));
        self.node_var_sets.push(var_set);
        self.node_leaves.push(leaves);
        self.nodes.push((left, right));
        DTree::Node(self.nodes.len() as DTreeIndex - 1)
    }

    pub fn children(&self, node: DTreeIndex) -> (DTree, DTree) {
        self.nodes[node as usize]
    }

    pub fn clause(&self, leaf: DTreeIndex) -> &[DnnfLit] {
        &self.leaves[leaf as usize]
    }

    pub fn number_of_leaves(&self) -> usize {
        self.leaves.len()
    }

    /// Returns all variables occurring in the clauses of the tree.
    pub fn static_var_set(&self, tree: DTree) -> &BitVec {
        match tree {
            DTree::Leaf(n) => &self.leaf_var_sets[n as usize],
            DTree::Node(n) => &self.node_var_sets[n as usize],
        }
    }

    pub fn leaf_indices(&self, tree: DTree) -> Vec<DTreeIndex> {
        match tree {
            DTree::Leaf(n) => vec![n],
            DTree::Node(n) => self.node_leaves[n as usize].clone(),
        }
    }

    /// Returns the unassigned variables which occur in unsubsumed clauses of
    /// both children of the tree. A leaf has no separator.
    pub fn dynamic_separator(&self, tree: DTree, propagator: &DnnfPropagator) -> BitVec {
        match tree {
            DTree::Leaf(_) => bitvec![0; self.number_of_variables],
            DTree::Node(n) => {
                let (left, right) = self.children(n);
                let mut separator = self.dynamic_var_set(left, propagator);
                separator &= self.dynamic_var_set(right, propagator);
                separator
            }
        }
    }

    fn dynamic_var_set(&self, tree: DTree, propagator: &DnnfPropagator) -> BitVec {
        let mut var_set = bitvec![0; self.number_of_variables];
        self.for_each_unsubsumed(tree, propagator, |_, clause| {
            for &lit in clause {
                if propagator.value_of(lit).is_none() {
                    var_set.set(lit.var().0, true);
                }
            }
        });
        var_set
    }

    /// Writes the cache key of the tree into `key`: one bit for every
    /// unsubsumed clause and one bit for every unassigned variable in these
    /// clauses.
    pub fn cache_key(&self, tree: DTree, propagator: &DnnfPropagator, key: &mut BitVec) {
        self.for_each_unsubsumed(tree, propagator, |leaf, clause| {
            key.set(self.number_of_variables + leaf as usize, true);
            for &lit in clause {
                if propagator.value_of(lit).is_none() {
                    key.set(lit.var().0, true);
                }
            }
        });
    }

    /// Counts the occurrences of the variables in unsubsumed clauses of the
    /// tree. Only entries which are not negative are counted.
    pub fn count_unsubsumed_occurrences(&self, tree: DTree, occurrences: &mut [isize], propagator: &DnnfPropagator) {
        self.for_each_unsubsumed(tree, propagator, |_, clause| {
            for lit in clause {
                let occ = &mut occurrences[lit.var().0];
                if *occ >= 0 {
                    *occ += 1;
                }
            }
        });
    }

    fn for_each_unsubsumed(&self, tree: DTree, propagator: &DnnfPropagator, mut action: impl FnMut(DTreeIndex, &[DnnfLit])) {
        let mut visit = |leaf: DTreeIndex| {
            let clause = self.clause(leaf);
            if !clause.iter().any(|&lit| propagator.value_of(lit) == Some(true)) {
                action(leaf, clause);
            }
        };
        match tree {
            DTree::Leaf(n) => visit(n),
            DTree::Node(n) => self.node_leaves[n as usize].iter().for_each(|&leaf| visit(leaf)),
        }
    }

    #[cfg(test)]
    pub fn to_string(&self, tree: DTree, propagator: &DnnfPropagator, f: &crate::formulas::FormulaFactory) -> String {
        match tree {
            DTree::Leaf(n) => {
                let literals: Vec<String> = self.clause(n).iter().map(|&lit| propagator.literal(lit).to_string(f)).collect();
                format!("Leaf{{{}}}", literals.join(", "))
            }
            DTree::Node(n) => {
                let (left, right) = self.children(n);
                format!("Node[{}, {}]", self.to_string(left, propagator, f), self.to_string(right, propagator, f))
            }
        }
    }
}
