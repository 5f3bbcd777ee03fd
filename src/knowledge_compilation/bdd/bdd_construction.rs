use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::handlers::{ComputationHandler, LngEvent};

use super::bdd_kernel::{BddKernel, BDD_FALSE, BDD_TRUE};

/// A binary operation which can be applied on two BDDs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BddOperation {
    /// Conjunction
    And,
    /// Disjunction
    Or,
    /// Implication from the first to the second operand
    Impl,
    /// Equivalence
    Equiv,
}

impl BddOperation {
    const fn evaluate(self, left: bool, right: bool) -> bool {
        match self {
            Self::And => left && right,
            Self::Or => left || right,
            Self::Impl => !left || right,
            Self::Equiv => left == right,
        }
    }

    /// Returns the result of the operation if it is determined without
    /// descending into the operands.
    fn shortcut(self, left: usize, right: usize) -> Option<usize> {
        if BddKernel::is_terminal(left) && BddKernel::is_terminal(right) {
            let result = self.evaluate(left == BDD_TRUE, right == BDD_TRUE);
            return Some(if result { BDD_TRUE } else { BDD_FALSE });
        }
        match self {
            Self::And => match (left, right) {
                (BDD_FALSE, _) | (_, BDD_FALSE) => Some(BDD_FALSE),
                (BDD_TRUE, other) | (other, BDD_TRUE) => Some(other),
                _ if left == right => Some(left),
                _ => None,
            },
            Self::Or => match (left, right) {
                (BDD_TRUE, _) | (_, BDD_TRUE) => Some(BDD_TRUE),
                (BDD_FALSE, other) | (other, BDD_FALSE) => Some(other),
                _ if left == right => Some(left),
                _ => None,
            },
            Self::Impl => match (left, right) {
                (BDD_FALSE, _) | (_, BDD_TRUE) => Some(BDD_TRUE),
                (BDD_TRUE, other) => Some(other),
                _ if left == right => Some(BDD_TRUE),
                _ => None,
            },
            Self::Equiv => match (left, right) {
                (BDD_TRUE, other) | (other, BDD_TRUE) => Some(other),
                _ if left == right => Some(BDD_TRUE),
                _ => None,
            },
        }
    }
}

impl BddKernel {
    /// Returns the BDD of the positive or negative literal of the variable
    /// with the given index.
    pub(super) fn ith_var(&mut self, index: usize, phase: bool, handler: &mut dyn ComputationHandler) -> Result<usize, LngEvent> {
        if phase { self.make_node(index, BDD_FALSE, BDD_TRUE, handler) } else { self.make_node(index, BDD_TRUE, BDD_FALSE, handler) }
    }

    /// Applies the binary operation `op` on the BDDs `left` and `right`.
    ///
    /// The computed results are memoized for the duration of this call only.
    pub(super) fn apply(
        &mut self,
        op: BddOperation,
        left: usize,
        right: usize,
        handler: &mut dyn ComputationHandler,
    ) -> Result<usize, LngEvent> {
        self.assert_valid(left);
        self.assert_valid(right);
        let mut memo = HashMap::new();
        self.apply_rec(op, left, right, &mut memo, handler)
    }

    fn apply_rec(
        &mut self,
        op: BddOperation,
        left: usize,
        right: usize,
        memo: &mut HashMap<(usize, usize), usize>,
        handler: &mut dyn ComputationHandler,
    ) -> Result<usize, LngEvent> {
        if let Some(result) = op.shortcut(left, right) {
            return Ok(result);
        }
        if let Some(&result) = memo.get(&(left, right)) {
            return Ok(result);
        }
        let left_level = self.level(left);
        let right_level = self.level(right);
        let level = left_level.min(right_level);
        let (left_low, left_high) = if left_level == level { (self.low(left), self.high(left)) } else { (left, left) };
        let (right_low, right_high) = if right_level == level { (self.low(right), self.high(right)) } else { (right, right) };
        let low = self.apply_rec(op, left_low, right_low, memo, handler)?;
        let high = self.apply_rec(op, left_high, right_high, memo, handler)?;
        let result = self.make_node(level, low, high, handler)?;
        memo.insert((left, right), result);
        Ok(result)
    }

    /// Returns the negation of a BDD.
    pub(super) fn not(&mut self, root: usize, handler: &mut dyn ComputationHandler) -> Result<usize, LngEvent> {
        self.assert_valid(root);
        let mut memo = HashMap::new();
        self.not_rec(root, &mut memo, handler)
    }

    fn not_rec(&mut self, root: usize, memo: &mut HashMap<usize, usize>, handler: &mut dyn ComputationHandler) -> Result<usize, LngEvent> {
        match root {
            BDD_FALSE => return Ok(BDD_TRUE),
            BDD_TRUE => return Ok(BDD_FALSE),
            _ => {}
        }
        if let Some(&result) = memo.get(&root) {
            return Ok(result);
        }
        let low = self.not_rec(self.low(root), memo, handler)?;
        let high = self.not_rec(self.high(root), memo, handler)?;
        let result = self.make_node(self.level(root), low, high, handler)?;
        memo.insert(root, result);
        Ok(result)
    }

    /// Restricts the levels in `restriction` to the given values.
    pub(super) fn restrict(
        &mut self,
        root: usize,
        restriction: &BTreeMap<usize, bool>,
        handler: &mut dyn ComputationHandler,
    ) -> Result<usize, LngEvent> {
        self.assert_valid(root);
        let last = restriction.keys().next_back().copied();
        match last {
            None => Ok(root),
            Some(last) => {
                let mut memo = HashMap::new();
                self.restrict_rec(root, restriction, last, &mut memo, handler)
            }
        }
    }

    fn restrict_rec(
        &mut self,
        root: usize,
        restriction: &BTreeMap<usize, bool>,
        last: usize,
        memo: &mut HashMap<usize, usize>,
        handler: &mut dyn ComputationHandler,
    ) -> Result<usize, LngEvent> {
        if Self::is_terminal(root) || self.level(root) > last {
            return Ok(root);
        }
        if let Some(&result) = memo.get(&root) {
            return Ok(result);
        }
        let level = self.level(root);
        let result = match restriction.get(&level) {
            Some(true) => self.restrict_rec(self.high(root), restriction, last, memo, handler)?,
            Some(false) => self.restrict_rec(self.low(root), restriction, last, memo, handler)?,
            None => {
                let low = self.restrict_rec(self.low(root), restriction, last, memo, handler)?;
                let high = self.restrict_rec(self.high(root), restriction, last, memo, handler)?;
                self.make_node(level, low, high, handler)?
            }
        };
        memo.insert(root, result);
        Ok(result)
    }

    /// Existential quantifier elimination of the given levels.
    pub(super) fn exists(&mut self, root: usize, levels: &BTreeSet<usize>, handler: &mut dyn ComputationHandler) -> Result<usize, LngEvent> {
        self.quantify(root, levels, BddOperation::Or, handler)
    }

    /// Universal quantifier elimination of the given levels.
    pub(super) fn for_all(&mut self, root: usize, levels: &BTreeSet<usize>, handler: &mut dyn ComputationHandler) -> Result<usize, LngEvent> {
        self.quantify(root, levels, BddOperation::And, handler)
    }

    fn quantify(
        &mut self,
        root: usize,
        levels: &BTreeSet<usize>,
        op: BddOperation,
        handler: &mut dyn ComputationHandler,
    ) -> Result<usize, LngEvent> {
        self.assert_valid(root);
        match levels.iter().next_back().copied() {
            None => Ok(root),
            Some(last) => {
                let mut memo = HashMap::new();
                self.quant_rec(root, levels, last, op, &mut memo, handler)
            }
        }
    }

    fn quant_rec(
        &mut self,
        root: usize,
        levels: &BTreeSet<usize>,
        last: usize,
        op: BddOperation,
        memo: &mut HashMap<usize, usize>,
        handler: &mut dyn ComputationHandler,
    ) -> Result<usize, LngEvent> {
        if Self::is_terminal(root) || self.level(root) > last {
            return Ok(root);
        }
        if let Some(&result) = memo.get(&root) {
            return Ok(result);
        }
        let level = self.level(root);
        let low = self.quant_rec(self.low(root), levels, last, op, memo, handler)?;
        let high = self.quant_rec(self.high(root), levels, last, op, memo, handler)?;
        let result = if levels.contains(&level) { self.apply(op, low, high, handler)? } else { self.make_node(level, low, high, handler)? };
        memo.insert(root, result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use crate::handlers::NopHandler;
    use crate::knowledge_compilation::bdd::bdd_kernel::{BddKernel, BDD_FALSE, BDD_TRUE};

    use super::BddOperation;

    #[test]
    fn test_apply_identities() {
        let mut kernel = BddKernel::new();
        let h = &mut NopHandler::new();
        let a = kernel.ith_var(0, true, h).unwrap();
        let b = kernel.ith_var(1, true, h).unwrap();
        let na = kernel.ith_var(0, false, h).unwrap();
        assert_eq!(kernel.not(a, h), Ok(na));
        assert_eq!(kernel.apply(BddOperation::And, a, na, h), Ok(BDD_FALSE));
        assert_eq!(kernel.apply(BddOperation::Or, a, na, h), Ok(BDD_TRUE));
        assert_eq!(kernel.apply(BddOperation::Impl, a, a, h), Ok(BDD_TRUE));
        assert_eq!(kernel.apply(BddOperation::Equiv, a, na, h), Ok(BDD_FALSE));
        let ab = kernel.apply(BddOperation::And, a, b, h).unwrap();
        let ba = kernel.apply(BddOperation::And, b, a, h).unwrap();
        assert_eq!(ab, ba);
        let not_ab = kernel.not(ab, h).unwrap();
        let nb = kernel.not(b, h).unwrap();
        let de_morgan = kernel.apply(BddOperation::Or, na, nb, h).unwrap();
        assert_eq!(not_ab, de_morgan);
        let imp = kernel.apply(BddOperation::Impl, a, b, h).unwrap();
        let or = kernel.apply(BddOperation::Or, na, b, h).unwrap();
        assert_eq!(imp, or);
    }

    #[test]
    fn test_restrict_and_quantify() {
        let mut kernel = BddKernel::new();
        let h = &mut NopHandler::new();
        let a = kernel.ith_var(0, true, h).unwrap();
        let b = kernel.ith_var(1, true, h).unwrap();
        let ab = kernel.apply(BddOperation::And, a, b, h).unwrap();
        assert_eq!(kernel.restrict(ab, &BTreeMap::from([(0, true)]), h), Ok(b));
        assert_eq!(kernel.restrict(ab, &BTreeMap::from([(1, false)]), h), Ok(BDD_FALSE));
        assert_eq!(kernel.restrict(ab, &BTreeMap::new(), h), Ok(ab));
        assert_eq!(kernel.exists(ab, &BTreeSet::from([0]), h), Ok(b));
        assert_eq!(kernel.for_all(ab, &BTreeSet::from([0]), h), Ok(BDD_FALSE));
        let or = kernel.apply(BddOperation::Or, a, b, h).unwrap();
        assert_eq!(kernel.for_all(or, &BTreeSet::from([1]), h), Ok(a));
        assert_eq!(kernel.exists(or, &BTreeSet::from([0, 1]), h), Ok(BDD_TRUE));
    }
}
