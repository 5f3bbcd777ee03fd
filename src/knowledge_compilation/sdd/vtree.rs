use std::collections::HashMap;

use crate::formulas::{FormulaFactory, Variable};

pub type VTreeIndex = usize;

/// A node of a [`VTree`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VTreeNode {
    Leaf(Variable),
    Internal { left: VTreeIndex, right: VTreeIndex },
}

/// A _variable tree_: a full binary tree whose leaves are the variables of an
/// SDD kernel, each variable exactly once.
///
/// The nodes are stored in an arena. For every node the tree stores its
/// in-order position and the range of positions of its subtree, so ancestor
/// tests and the lowest common ancestor are cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VTree {
    nodes: Vec<VTreeNode>,
    root: VTreeIndex,
    parents: Vec<Option<VTreeIndex>>,
    positions: Vec<usize>,
    ranges: Vec<(usize, usize)>,
    depths: Vec<usize>,
    variable_counts: Vec<usize>,
    leaves: HashMap<Variable, VTreeIndex>,
}

impl VTree {
    /// Creates a vtree from its nodes and root.
    ///
    /// Panics if a node is reachable twice from the root, if an index is out
    /// of range or if a variable occurs in more than one leaf.
    pub fn new(nodes: Vec<VTreeNode>, root: VTreeIndex) -> Self {
        let n = nodes.len();
        assert!(root < n, "VTree root {root} is not a node");
        let mut tree = Self {
            nodes,
            root,
            parents: vec![None; n],
            positions: vec![usize::MAX; n],
            ranges: vec![(0, 0); n],
            depths: vec![0; n],
            variable_counts: vec![0; n],
            leaves: HashMap::new(),
        };
        let mut next_position = 0;
        tree.initialize(root, 0, &mut next_position);
        tree
    }

    fn initialize(&mut self, node: VTreeIndex, depth: usize, next_position: &mut usize) {
        assert!(self.positions[node] == usize::MAX, "VTree node {node} is reachable twice");
        self.depths[node] = depth;
        match self.nodes[node] {
            VTreeNode::Leaf(var) => {
                assert!(self.leaves.insert(var, node).is_none(), "Variable occurs twice in the VTree");
                self.positions[node] = *next_position;
                self.ranges[node] = (*next_position, *next_position);
                self.variable_counts[node] = 1;
                *next_position += 1;
            }
            VTreeNode::Internal { left, right } => {
                assert!(left < self.nodes.len() && right < self.nodes.len(), "VTree node {node} has an unknown child");
                self.parents[left] = Some(node);
                self.parents[right] = Some(node);
                self.initialize(left, depth + 1, next_position);
                self.positions[node] = *next_position;
                *next_position += 1;
                self.initialize(right, depth + 1, next_position);
                self.ranges[node] = (self.ranges[left].0, self.ranges[right].1);
                self.variable_counts[node] = self.variable_counts[left] + self.variable_counts[right];
            }
        }
    }

    pub const fn root(&self) -> VTreeIndex {
        self.root
    }

    pub fn node(&self, index: VTreeIndex) -> VTreeNode {
        self.nodes[index]
    }

    /// Returns the children of an internal node, `None` for a leaf.
    pub fn children(&self, index: VTreeIndex) -> Option<(VTreeIndex, VTreeIndex)> {
        match self.nodes[index] {
            VTreeNode::Internal { left, right } => Some((left, right)),
            VTreeNode::Leaf(_) => None,
        }
    }

    /// Returns the leaf of the variable.
    pub fn leaf(&self, variable: Variable) -> Option<VTreeIndex> {
        self.leaves.get(&variable).copied()
    }

    /// Returns the number of variables below the node.
    pub fn number_of_variables(&self, index: VTreeIndex) -> usize {
        self.variable_counts[index]
    }

    /// Returns the variables below the node from left to right.
    pub fn variables(&self, index: VTreeIndex) -> Vec<Variable> {
        match self.nodes[index] {
            VTreeNode::Leaf(var) => vec![var],
            VTreeNode::Internal { left, right } => {
                let mut vars = self.variables(left);
                vars.extend(self.variables(right));
                vars
            }
        }
    }

    /// Returns whether `node` is in the subtree of `ancestor`, including
    /// `ancestor` itself.
    pub fn is_descendant(&self, node: VTreeIndex, ancestor: VTreeIndex) -> bool {
        let (from, to) = self.ranges[ancestor];
        (from..=to).contains(&self.positions[node])
    }

    /// Returns whether `node` is in the left subtree of `ancestor`.
    pub fn is_left_descendant(&self, node: VTreeIndex, ancestor: VTreeIndex) -> bool {
        self.is_descendant(node, ancestor) && self.positions[node] < self.positions[ancestor]
    }

    /// Returns whether `node` is in the right subtree of `ancestor`.
    pub fn is_right_descendant(&self, node: VTreeIndex, ancestor: VTreeIndex) -> bool {
        self.is_descendant(node, ancestor) && self.positions[node] > self.positions[ancestor]
    }

    /// Returns the lowest common ancestor of two nodes.
    pub fn lca(&self, mut a: VTreeIndex, mut b: VTreeIndex) -> VTreeIndex {
        while self.depths[a] > self.depths[b] {
            a = self.parent_of(a);
        }
        while self.depths[b] > self.depths[a] {
            b = self.parent_of(b);
        }
        while a != b {
            a = self.parent_of(a);
            b = self.parent_of(b);
        }
        a
    }

    fn parent_of(&self, node: VTreeIndex) -> VTreeIndex {
        self.parents[node].unwrap_or(self.root)
    }

    /// Returns a textual representation with variable names, e.g.
    /// `(a (b c))`.
    pub fn to_string(&self, f: &FormulaFactory) -> String {
        self.to_string_rec(self.root, f)
    }

    fn to_string_rec(&self, index: VTreeIndex, f: &FormulaFactory) -> String {
        match self.nodes[index] {
            VTreeNode::Leaf(var) => var.name(f).to_string(),
            VTreeNode::Internal { left, right } => format!("({} {})", self.to_string_rec(left, f), self.to_string_rec(right, f)),
        }
    }
}

/// Generates a [`VTree`] over a list of variables.
pub trait VTreeGenerator {
    /// Generates a vtree over the given variables. The variables must not be
    /// empty and must not contain duplicates.
    fn generate(&self, variables: &[Variable]) -> VTree;
}

/// Generates a right-linear vtree: the left child of every internal node is a
/// leaf. An SDD over a right-linear vtree behaves like an OBDD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VerticalVTreeGenerator;

impl VTreeGenerator for VerticalVTreeGenerator {
    fn generate(&self, variables: &[Variable]) -> VTree {
        assert!(!variables.is_empty(), "Cannot generate a VTree without variables");
        let mut nodes: Vec<VTreeNode> = variables.iter().map(|&var| VTreeNode::Leaf(var)).collect();
        let mut root = nodes.len() - 1;
        for left in (0..variables.len() - 1).rev() {
            nodes.push(VTreeNode::Internal { left, right: root });
            root = nodes.len() - 1;
        }
        VTree::new(nodes, root)
    }
}

/// Generates a balanced vtree by splitting the variables in halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BalancedVTreeGenerator;

impl VTreeGenerator for BalancedVTreeGenerator {
    fn generate(&self, variables: &[Variable]) -> VTree {
        assert!(!variables.is_empty(), "Cannot generate a VTree without variables");
        let mut nodes = Vec::with_capacity(2 * variables.len() - 1);
        let root = balanced_rec(variables, &mut nodes);
        VTree::new(nodes, root)
    }
}

fn balanced_rec(variables: &[Variable], nodes: &mut Vec<VTreeNode>) -> VTreeIndex {
    if let [var] = variables {
        nodes.push(VTreeNode::Leaf(*var));
    } else {
        let (left, right) = variables.split_at(variables.len() / 2);
        let left = balanced_rec(left, nodes);
        let right = balanced_rec(right, nodes);
        nodes.push(VTreeNode::Internal { left, right });
    }
    nodes.len() - 1
}
