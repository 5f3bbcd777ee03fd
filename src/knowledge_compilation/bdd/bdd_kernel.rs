use std::collections::{BTreeMap, HashMap};

use crate::formulas::Variable;
use crate::handlers::{ComputationHandler, LngEvent};

pub(super) const BDD_TRUE: usize = 1;
pub(super) const BDD_FALSE: usize = 0;

/// Level of the two terminal nodes. Terminals are below every variable.
pub(super) const TERMINAL_LEVEL: usize = usize::MAX;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct BddNode {
    level: usize,
    low: usize,
    high: usize,
}

/// Statistics for a BDD kernel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BddStatistics {
    /// Number of nodes in the arena, including the two terminals.
    pub nodes: usize,
    /// Number of registered variables.
    pub variables: usize,
    /// Number of nodes ever produced by `make_node`, including lookups which
    /// found an existing node.
    pub produced: usize,
}

/// The kernel which owns all nodes of a set of BDDs.
///
/// Nodes are stored in an arena and referenced by their index. The indices `0`
/// and `1` are the terminals `false` and `true`. Every inner node is a triple
/// `(level, low, high)` which is globally unique in the kernel, so two BDDs of
/// the same kernel represent the same function if and only if their indices
/// are equal.
///
/// The level of a node is the position of its variable in the variable
/// ordering. The ordering is fixed at creation time; variables which are not
/// part of the initial ordering are appended when they are first seen. Nodes
/// are never freed, the arena lives as long as the kernel.
#[derive(Debug)]
pub struct BddKernel {
    pub(crate) var2idx: BTreeMap<Variable, usize>,
    pub(crate) idx2var: BTreeMap<usize, Variable>,
    nodes: Vec<BddNode>,
    unique: HashMap<BddNode, usize>,
    produced: usize,
}

impl Default for BddKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl BddKernel {
    /// Constructs a new BDD kernel without any initial variable ordering.
    /// Variables are ordered by their first occurrence.
    pub fn new() -> Self {
        let terminal = |value| BddNode { level: TERMINAL_LEVEL, low: value, high: value };
        Self {
            var2idx: BTreeMap::new(),
            idx2var: BTreeMap::new(),
            nodes: vec![terminal(BDD_FALSE), terminal(BDD_TRUE)],
            unique: HashMap::new(),
            produced: 0,
        }
    }

    /// Constructs a new BDD kernel with the given variable ordering. The first
    /// variable of the ordering is the top-most variable of every BDD.
    ///
    /// Orderings can be computed with
    /// [`VariableOrdering`](crate::knowledge_compilation::bdd::orderings::VariableOrdering).
    pub fn new_with_var_ordering(ordering: Vec<Variable>) -> Self {
        let mut kernel = Self::new();
        for var in ordering {
            kernel.get_or_add_var_index(var);
        }
        kernel
    }

    /// Returns statistics of this kernel.
    pub fn statistics(&self) -> BddStatistics {
        BddStatistics { nodes: self.nodes.len(), variables: self.var2idx.len(), produced: self.produced }
    }

    /// Returns the number of variables known to this kernel.
    pub fn number_of_variables(&self) -> usize {
        self.var2idx.len()
    }

    pub(super) fn get_or_add_var_index(&mut self, variable: Variable) -> usize {
        if let Some(&index) = self.var2idx.get(&variable) {
            return index;
        }
        let index = self.var2idx.len();
        self.var2idx.insert(variable, index);
        self.idx2var.insert(index, variable);
        index
    }

    pub(super) fn get_variable_for_index(&self, idx: usize) -> Option<Variable> {
        self.idx2var.get(&idx).copied()
    }

    pub(super) fn is_terminal(node: usize) -> bool {
        node < 2
    }

    pub(super) fn level(&self, node: usize) -> usize {
        self.nodes[node].level
    }

    /// Returns the level of a node, where terminals are at the level just
    /// below the last variable.
    pub(super) fn counting_level(&self, node: usize) -> usize {
        if Self::is_terminal(node) { self.number_of_variables() } else { self.level(node) }
    }

    pub(super) fn low(&self, node: usize) -> usize {
        self.nodes[node].low
    }

    pub(super) fn high(&self, node: usize) -> usize {
        self.nodes[node].high
    }

    pub(super) fn assert_valid(&self, node: usize) {
        assert!(node < self.nodes.len(), "Node {node} does not belong to this BDD kernel");
    }

    /// Returns the node `(level, low, high)`. A redundant node (`low == high`)
    /// is replaced by its child, an existing node is looked up in the unique
    /// table. The handler is asked before a new node is allocated.
    pub(super) fn make_node(
        &mut self,
        level: usize,
        low: usize,
        high: usize,
        handler: &mut dyn ComputationHandler,
    ) -> Result<usize, LngEvent> {
        self.produced += 1;
        if low == high {
            return Ok(low);
        }
        let node = BddNode { level, low, high };
        if let Some(&existing) = self.unique.get(&node) {
            return Ok(existing);
        }
        if !handler.should_resume(LngEvent::BddNewNodeAllocated) {
            return Err(LngEvent::BddNewNodeAllocated);
        }
        let index = self.nodes.len();
        self.nodes.push(node);
        self.unique.insert(node, index);
        Ok(index)
    }

    /// Returns all inner nodes reachable from `root` in depth-first order.
    pub(super) fn reachable_nodes(&self, root: usize) -> Vec<usize> {
        let mut visited = std::collections::HashSet::new();
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if Self::is_terminal(node) || !visited.insert(node) {
                continue;
            }
            result.push(node);
            stack.push(self.high(node));
            stack.push(self.low(node));
        }
        result
    }
}
