use std::collections::HashMap;

use crate::handlers::{ComputationHandler, LngEvent, LngResult, NopHandler};

use super::sdd_kernel::SddKernel;
use super::sdd_main::Sdd;
use super::vtree::VTreeIndex;

pub(super) type ApplyMemo = HashMap<(SddOperation, Sdd, Sdd), Sdd>;

/// A binary operation which can be applied on two SDDs.
///
/// Each operation has a _zero_, which absorbs the other operand, and a
/// _one_, which is neutral.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SddOperation {
    /// Conjunction with zero `false` and one `true`
    Conjunction,
    /// Disjunction with zero `true` and one `false`
    Disjunction,
}

impl SddOperation {
    pub const fn zero(self) -> Sdd {
        match self {
            Self::Conjunction => Sdd::constant(false),
            Self::Disjunction => Sdd::constant(true),
        }
    }

    pub const fn one(self) -> Sdd {
        match self {
            Self::Conjunction => Sdd::constant(true),
            Self::Disjunction => Sdd::constant(false),
        }
    }

    pub fn is_zero(self, node: Sdd) -> bool {
        node == self.zero()
    }

    pub fn is_one(self, node: Sdd) -> bool {
        node == self.one()
    }
}

impl SddKernel {
    /// Applies the operation on two SDDs of this kernel.
    ///
    /// ```
    /// # use logicng_compile::formulas::FormulaFactory;
    /// # use logicng_compile::knowledge_compilation::sdd::{SddKernel, SddOperation, VTreeGenerator, BalancedVTreeGenerator};
    /// let f = FormulaFactory::new();
    /// let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&f.vars(["a", "b"])));
    /// let a = kernel.literal(f.lit("a", true));
    /// let na = kernel.literal(f.lit("a", false));
    ///
    /// assert!(kernel.apply(SddOperation::Conjunction, a, na).is_falsum());
    /// assert!(kernel.apply(SddOperation::Disjunction, a, na).is_verum());
    /// ```
    pub fn apply(&mut self, op: SddOperation, left: Sdd, right: Sdd) -> Sdd {
        self.apply_with_handler(op, left, right, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
    }

    /// Applies the operation on two SDDs of this kernel. The handler is asked
    /// before each new node is allocated. Nodes allocated before a
    /// cancellation stay in the kernel, but they are canonical.
    pub fn apply_with_handler(&mut self, op: SddOperation, left: Sdd, right: Sdd, handler: &mut dyn ComputationHandler) -> LngResult<Sdd> {
        self.assert_valid(left);
        self.assert_valid(right);
        self.apply_rec(op, left, right, &mut ApplyMemo::new(), handler).into()
    }

    pub(super) fn apply_rec(
        &mut self,
        op: SddOperation,
        left: Sdd,
        right: Sdd,
        memo: &mut ApplyMemo,
        handler: &mut dyn ComputationHandler,
    ) -> Result<Sdd, LngEvent> {
        if op.is_zero(left) || op.is_zero(right) {
            return Ok(op.zero());
        }
        if op.is_one(left) {
            return Ok(right);
        }
        if op.is_one(right) || left == right {
            return Ok(left);
        }
        let (left, right) = if left < right { (left, right) } else { (right, left) };
        if let Some(&result) = memo.get(&(op, left, right)) {
            return Ok(result);
        }
        let left_vtree = self.vtree_of(left);
        let right_vtree = self.vtree_of(right);
        let result = if left_vtree == right_vtree && self.vtree.children(left_vtree).is_none() {
            // complementary literals of one variable
            op.zero()
        } else {
            let lca = self.vtree.lca(left_vtree, right_vtree);
            let left_elements = self.elements_at(left, lca, handler)?;
            let right_elements = self.elements_at(right, lca, handler)?;
            let mut elements = Vec::with_capacity(left_elements.len() * right_elements.len());
            for &(left_prime, left_sub) in &left_elements {
                for &(right_prime, right_sub) in &right_elements {
                    let prime = self.apply_rec(SddOperation::Conjunction, left_prime, right_prime, memo, handler)?;
                    if prime.is_falsum() {
                        continue;
                    }
                    let sub = self.apply_rec(op, left_sub, right_sub, memo, handler)?;
                    elements.push((prime, sub));
                }
            }
            self.canonicalize(lca, elements, memo, handler)?
        };
        memo.insert((op, left, right), result);
        Ok(result)
    }

    /// Returns the elements of `sdd` as a partition for the internal vtree
    /// node `vtree`, which is `sdd`'s own vtree node or one of its ancestors.
    fn elements_at(&mut self, sdd: Sdd, vtree: VTreeIndex, handler: &mut dyn ComputationHandler) -> Result<Vec<(Sdd, Sdd)>, LngEvent> {
        let own = self.vtree_of(sdd);
        if own == vtree {
            Ok(self.elements(sdd))
        } else if self.vtree.is_left_descendant(own, vtree) {
            let negation = self.negate_node(sdd, handler)?;
            Ok(vec![(sdd, Sdd::constant(true)), (negation, Sdd::constant(false))])
        } else {
            Ok(vec![(Sdd::constant(true), sdd)])
        }
    }

    /// Compresses and trims the elements and returns the unique node.
    ///
    /// Elements with equal subs are merged by disjoining their primes. A
    /// single element `(true, s)` is replaced by `s`, the elements
    /// `(p, true), (~p, false)` are replaced by `p`.
    pub(super) fn canonicalize(
        &mut self,
        vtree: VTreeIndex,
        elements: Vec<(Sdd, Sdd)>,
        memo: &mut ApplyMemo,
        handler: &mut dyn ComputationHandler,
    ) -> Result<Sdd, LngEvent> {
        let mut compressed: Vec<(Sdd, Sdd)> = Vec::with_capacity(elements.len());
        for (prime, sub) in elements {
            if let Some(index) = compressed.iter().position(|&(_, other)| other == sub) {
                compressed[index].0 = self.apply_rec(SddOperation::Disjunction, compressed[index].0, prime, memo, handler)?;
            } else {
                compressed.push((prime, sub));
            }
        }
        match compressed.as_slice() {
            [] => Ok(Sdd::constant(false)),
            [(_, sub)] => Ok(*sub),
            [(prime, first), (_, second)] | [(_, second), (prime, first)] if first.is_verum() && second.is_falsum() => Ok(*prime),
            _ => self.make_decision(vtree, compressed, handler),
        }
    }

    /// Returns the decision node with the given elements at an internal vtree
    /// node.
    ///
    /// The primes must be normalized for the left subtree of `vtree`, the
    /// subs for the right subtree, and the primes must form a partition:
    /// they are not `false`, pairwise inconsistent and their disjunction is
    /// `true`. Otherwise this method panics. The result is compressed and
    /// trimmed, so it is not necessarily a decision node.
    pub fn decision(&mut self, vtree: VTreeIndex, elements: &[(Sdd, Sdd)]) -> Sdd {
        assert!(self.vtree.children(vtree).is_some(), "SDD decisions must belong to an internal vtree node");
        assert!(!elements.is_empty(), "SDD decisions must have at least one element");
        let handler = &mut NopHandler::new();
        let memo = &mut ApplyMemo::new();
        let mut covered = Sdd::constant(false);
        for &(prime, sub) in elements {
            self.assert_valid(prime);
            self.assert_valid(sub);
            assert!(!prime.is_falsum(), "Primes of an SDD decision must not be false");
            assert!(prime.is_verum() || self.vtree.is_left_descendant(self.vtree_of(prime), vtree), "Primes must be normalized for the left subtree");
            assert!(sub.is_constant() || self.vtree.is_right_descendant(self.vtree_of(sub), vtree), "Subs must be normalized for the right subtree");
            let overlap = self.apply_rec(SddOperation::Conjunction, covered, prime, memo, handler).expect("Nop Handler never aborts.");
            assert!(overlap.is_falsum(), "Primes of an SDD decision must be mutually exclusive");
            covered = self.apply_rec(SddOperation::Disjunction, covered, prime, memo, handler).expect("Nop Handler never aborts.");
        }
        assert!(covered.is_verum(), "Primes of an SDD decision must be exhaustive");
        self.canonicalize(vtree, elements.to_vec(), memo, handler).expect("Nop Handler never aborts.")
    }
}
