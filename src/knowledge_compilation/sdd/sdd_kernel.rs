use std::collections::HashMap;

use crate::formulas::{Literal, Variable};
use crate::handlers::{ComputationHandler, LngEvent, NopHandler};

use super::sdd_main::Sdd;
use super::vtree::{VTree, VTreeIndex};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) enum SddNode {
    False,
    True,
    Literal { vtree: VTreeIndex, literal: Literal },
    Decision { vtree: VTreeIndex, elements: Box<[(Sdd, Sdd)]> },
}

/// Statistics for an SDD kernel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SddStatistics {
    /// Number of nodes in the arena, including the two terminals.
    pub nodes: usize,
    /// Number of decision nodes in the arena.
    pub decisions: usize,
}

/// The kernel which owns all nodes of a set of SDDs over one [`VTree`].
///
/// Nodes are stored in an arena and referenced by [`Sdd`] handles, the
/// indices `0` and `1` are the terminals `false` and `true`. A decision node
/// is identified by its vtree node and its sorted list of `(prime, sub)`
/// elements. Only compressed and trimmed decision nodes are stored, so two
/// SDDs of the same kernel represent the same function if and only if their
/// handles are equal.
#[derive(Debug)]
pub struct SddKernel {
    pub(super) vtree: VTree,
    nodes: Vec<SddNode>,
    unique: HashMap<SddNode, Sdd>,
    negations: HashMap<Sdd, Sdd>,
}

impl SddKernel {
    /// Creates a new kernel for the given vtree.
    ///
    /// Vtrees can be generated by a
    /// [`VTreeGenerator`](super::VTreeGenerator).
    pub fn new(vtree: VTree) -> Self {
        Self { vtree, nodes: vec![SddNode::False, SddNode::True], unique: HashMap::new(), negations: HashMap::new() }
    }

    pub const fn vtree(&self) -> &VTree {
        &self.vtree
    }

    /// Returns statistics of this kernel.
    pub fn statistics(&self) -> SddStatistics {
        let decisions = self.nodes.iter().filter(|node| matches!(node, SddNode::Decision { .. })).count();
        SddStatistics { nodes: self.nodes.len(), decisions }
    }

    /// Returns the SDD of a literal.
    ///
    /// Panics if the variable of the literal is not part of the vtree.
    pub fn literal(&mut self, literal: Literal) -> Sdd {
        self.literal_node(literal, &mut NopHandler::new()).expect("Nop Handler never aborts.")
    }

    /// Returns the negation of an SDD.
    pub fn negate(&mut self, sdd: Sdd) -> Sdd {
        self.assert_valid(sdd);
        self.negate_node(sdd, &mut NopHandler::new()).expect("Nop Handler never aborts.")
    }

    pub(super) fn assert_valid(&self, sdd: Sdd) {
        assert!(sdd.index() < self.nodes.len(), "Node {} does not belong to this SDD kernel", sdd.index());
    }

    pub(super) fn node(&self, sdd: Sdd) -> &SddNode {
        &self.nodes[sdd.index()]
    }

    /// Returns the vtree node of a literal or decision.
    ///
    /// Panics for the terminals, which are normalized for every vtree node.
    pub(super) fn vtree_of(&self, sdd: Sdd) -> VTreeIndex {
        match self.node(sdd) {
            SddNode::Literal { vtree, .. } | SddNode::Decision { vtree, .. } => *vtree,
            SddNode::False | SddNode::True => panic!("Terminal SDD nodes have no vtree node"),
        }
    }

    /// Returns the elements of a decision node, an empty list for other
    /// nodes.
    pub(super) fn elements(&self, sdd: Sdd) -> Vec<(Sdd, Sdd)> {
        match self.node(sdd) {
            SddNode::Decision { elements, .. } => elements.to_vec(),
            _ => vec![],
        }
    }

    pub(super) fn variable_leaf(&self, variable: Variable) -> Option<VTreeIndex> {
        self.vtree.leaf(variable)
    }

    /// Looks up the node in the unique table. The handler is asked before a
    /// new node is allocated.
    fn make_node(&mut self, node: SddNode, handler: &mut dyn ComputationHandler) -> Result<Sdd, LngEvent> {
        if let Some(&existing) = self.unique.get(&node) {
            return Ok(existing);
        }
        if !handler.should_resume(LngEvent::SddNewNodeAllocated) {
            return Err(LngEvent::SddNewNodeAllocated);
        }
        let sdd = Sdd::new(self.nodes.len());
        self.nodes.push(node.clone());
        self.unique.insert(node, sdd);
        Ok(sdd)
    }

    /// Returns the decision node with the given elements. The elements must
    /// already be compressed and trimmed.
    pub(super) fn make_decision(
        &mut self,
        vtree: VTreeIndex,
        mut elements: Vec<(Sdd, Sdd)>,
        handler: &mut dyn ComputationHandler,
    ) -> Result<Sdd, LngEvent> {
        elements.sort_unstable();
        self.make_node(SddNode::Decision { vtree, elements: elements.into_boxed_slice() }, handler)
    }

    pub(super) fn literal_node(&mut self, literal: Literal, handler: &mut dyn ComputationHandler) -> Result<Sdd, LngEvent> {
        let leaf = self.variable_leaf(literal.variable()).unwrap_or_else(|| panic!("Variable is not part of the VTree of this SDD kernel"));
        self.make_node(SddNode::Literal { vtree: leaf, literal }, handler)
    }

    /// Negates by negating the subs of a decision. The result is compressed
    /// and trimmed if the input is.
    pub(super) fn negate_node(&mut self, sdd: Sdd, handler: &mut dyn ComputationHandler) -> Result<Sdd, LngEvent> {
        if sdd.is_constant() {
            return Ok(Sdd::constant(sdd.is_falsum()));
        }
        if let Some(&negation) = self.negations.get(&sdd) {
            return Ok(negation);
        }
        let negation = match self.node(sdd).clone() {
            SddNode::Literal { literal, .. } => self.literal_node(literal.negate(), handler)?,
            SddNode::Decision { vtree, elements } => {
                let mut negated = Vec::with_capacity(elements.len());
                for &(prime, sub) in &*elements {
                    negated.push((prime, self.negate_node(sub, handler)?));
                }
                self.make_decision(vtree, negated, handler)?
            }
            SddNode::False | SddNode::True => unreachable!(),
        };
        self.negations.insert(sdd, negation);
        self.negations.insert(negation, sdd);
        Ok(negation)
    }
}
