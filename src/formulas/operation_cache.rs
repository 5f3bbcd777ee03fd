use dashmap::DashMap;

use crate::formulas::EncodedFormula;

use super::formula_cache::formula_encoding::FormulaEncoding;

/// Memoization table for one operation, keyed by formula node.
///
/// Entries are never evicted. If two computations for the same formula race,
/// the first inserted value is kept.
pub struct OperationCache<V> {
    cache: DashMap<FormulaEncoding, V>,
}

impl<V> OperationCache<V> {
    pub fn new() -> Self {
        Self { cache: DashMap::new() }
    }

    pub fn insert(&self, formula: EncodedFormula, value: V) {
        self.cache.entry(formula.encoding).or_insert(value);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

impl<V: Clone> OperationCache<V> {
    pub fn get(&self, formula: EncodedFormula) -> Option<V> {
        self.cache.get(&formula.encoding).map(|v| v.clone())
    }
}

impl<V> Default for OperationCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
