use std::collections::{BTreeSet, HashMap};

use num_bigint::BigUint;

use super::bdd_kernel::{BddKernel, BDD_FALSE, BDD_TRUE};

/// A path from the root to a terminal. For each level the value is `Some`
/// when the level is tested on the path, `None` otherwise.
pub(super) type BddPath = Vec<Option<bool>>;

impl BddKernel {
    /// Returns the number of inner nodes of the given BDD.
    pub(super) fn node_count(&self, root: usize) -> usize {
        self.reachable_nodes(root).len()
    }

    /// Returns the model count of the BDD over all variables of this kernel.
    pub(super) fn sat_count(&self, root: usize) -> BigUint {
        let mut memo = HashMap::new();
        self.sat_count_rec(root, &mut memo) << self.counting_level(root)
    }

    fn sat_count_rec(&self, root: usize, memo: &mut HashMap<usize, BigUint>) -> BigUint {
        match root {
            BDD_FALSE => return BigUint::from(0_u8),
            BDD_TRUE => return BigUint::from(1_u8),
            _ => {}
        }
        if let Some(count) = memo.get(&root) {
            return count.clone();
        }
        let level = self.level(root);
        let (low, high) = (self.low(root), self.high(root));
        let low_count = self.sat_count_rec(low, memo) << (self.counting_level(low) - level - 1);
        let high_count = self.sat_count_rec(high, memo) << (self.counting_level(high) - level - 1);
        let count = low_count + high_count;
        memo.insert(root, count.clone());
        count
    }

    /// Returns the number of paths to the given terminal.
    pub(super) fn path_count(&self, root: usize, terminal: usize) -> BigUint {
        let mut memo = HashMap::new();
        self.path_count_rec(root, terminal, &mut memo)
    }

    fn path_count_rec(&self, root: usize, terminal: usize, memo: &mut HashMap<usize, BigUint>) -> BigUint {
        if Self::is_terminal(root) {
            return BigUint::from(u8::from(root == terminal));
        }
        if let Some(count) = memo.get(&root) {
            return count.clone();
        }
        let count = self.path_count_rec(self.low(root), terminal, memo) + self.path_count_rec(self.high(root), terminal, memo);
        memo.insert(root, count.clone());
        count
    }

    /// Returns for each level how many nodes of the BDD are labeled with it.
    pub(super) fn var_profile(&self, root: usize) -> Vec<usize> {
        let mut profile = vec![0; self.number_of_variables()];
        for node in self.reachable_nodes(root) {
            profile[self.level(node)] += 1;
        }
        profile
    }

    /// Returns the levels the BDD depends on.
    pub(super) fn support(&self, root: usize) -> BTreeSet<usize> {
        self.reachable_nodes(root).into_iter().map(|node| self.level(node)).collect()
    }

    /// Returns one path to the true terminal, or `None` if the BDD is the
    /// false terminal.
    pub(super) fn sat_one(&self, root: usize) -> Option<BddPath> {
        if root == BDD_FALSE {
            return None;
        }
        let mut path = vec![None; self.number_of_variables()];
        let mut node = root;
        while !Self::is_terminal(node) {
            let level = self.level(node);
            if self.low(node) == BDD_FALSE {
                path[level] = Some(true);
                node = self.high(node);
            } else {
                path[level] = Some(false);
                node = self.low(node);
            }
        }
        Some(path)
    }

    /// Returns all paths to the given terminal.
    pub(super) fn all_paths(&self, root: usize, terminal: usize) -> Vec<BddPath> {
        let mut paths = Vec::new();
        let mut current = vec![None; self.number_of_variables()];
        self.all_paths_rec(root, terminal, &mut current, &mut paths);
        paths
    }

    fn all_paths_rec(&self, root: usize, terminal: usize, current: &mut BddPath, paths: &mut Vec<BddPath>) {
        if Self::is_terminal(root) {
            if root == terminal {
                paths.push(current.clone());
            }
            return;
        }
        let level = self.level(root);
        current[level] = Some(false);
        self.all_paths_rec(self.low(root), terminal, current, paths);
        current[level] = Some(true);
        self.all_paths_rec(self.high(root), terminal, current, paths);
        current[level] = None;
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use crate::formulas::FormulaFactory;
    use crate::handlers::NopHandler;
    use crate::knowledge_compilation::bdd::bdd_construction::BddOperation;
    use crate::knowledge_compilation::bdd::bdd_kernel::{BddKernel, BDD_FALSE, BDD_TRUE};

    #[test]
    fn test_counting() {
        let f = FormulaFactory::new();
        let mut kernel = BddKernel::new_with_var_ordering(f.vars(["a", "b", "c"]));
        let h = &mut NopHandler::new();
        let a = kernel.ith_var(0, true, h).unwrap();
        let b = kernel.ith_var(1, true, h).unwrap();
        let or = kernel.apply(BddOperation::Or, a, b, h).unwrap();
        assert_eq!(kernel.node_count(or), 2);
        assert_eq!(kernel.sat_count(or), BigUint::from(6_u8));
        assert_eq!(kernel.sat_count(BDD_TRUE), BigUint::from(8_u8));
        assert_eq!(kernel.sat_count(BDD_FALSE), BigUint::from(0_u8));
        assert_eq!(kernel.path_count(or, BDD_TRUE), BigUint::from(2_u8));
        assert_eq!(kernel.path_count(or, BDD_FALSE), BigUint::from(1_u8));
        assert_eq!(kernel.support(or).into_iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(kernel.var_profile(or), vec![1, 1, 0]);
    }

    #[test]
    fn test_paths() {
        let f = FormulaFactory::new();
        let mut kernel = BddKernel::new_with_var_ordering(f.vars(["a", "b"]));
        let h = &mut NopHandler::new();
        let a = kernel.ith_var(0, true, h).unwrap();
        let nb = kernel.ith_var(1, false, h).unwrap();
        let and = kernel.apply(BddOperation::And, a, nb, h).unwrap();
        assert_eq!(kernel.sat_one(and), Some(vec![Some(true), Some(false)]));
        assert_eq!(kernel.sat_one(BDD_FALSE), None);
        assert_eq!(kernel.sat_one(BDD_TRUE), Some(vec![None, None]));
        assert_eq!(kernel.all_paths(and, BDD_TRUE), vec![vec![Some(true), Some(false)]]);
        assert_eq!(kernel.all_paths(and, BDD_FALSE), vec![vec![Some(false), None], vec![Some(true), Some(true)]]);
    }
}
