use std::collections::BTreeSet;
use std::sync::Arc;

use crate::formulas::operation_cache::OperationCache;
use crate::formulas::{CacheEntry, EncodedFormula, Literal, Variable};

/// All operation caches of one formula factory.
pub(crate) struct FormulaFactoryCaches {
    pub nnf: OperationCache<EncodedFormula>,
    pub factorization_cnf: OperationCache<EncodedFormula>,
    pub factorization_dnf: OperationCache<EncodedFormula>,
    pub pbc_expansion: OperationCache<EncodedFormula>,
    pub variables: OperationCache<Arc<BTreeSet<Variable>>>,
    pub literals: OperationCache<Arc<BTreeSet<Literal>>>,
    pub sub_nodes: OperationCache<Arc<[EncodedFormula]>>,
    pub number_of_atoms: OperationCache<u64>,
    pub number_of_nodes: OperationCache<u64>,
    pub formula_depth: OperationCache<u64>,
    pub is_nnf: OperationCache<bool>,
    pub is_cnf: OperationCache<bool>,
    pub is_dnf: OperationCache<bool>,
    pub sat: OperationCache<bool>,
}

impl FormulaFactoryCaches {
    pub fn new() -> Self {
        Self {
            nnf: OperationCache::new(),
            factorization_cnf: OperationCache::new(),
            factorization_dnf: OperationCache::new(),
            pbc_expansion: OperationCache::new(),
            variables: OperationCache::new(),
            literals: OperationCache::new(),
            sub_nodes: OperationCache::new(),
            number_of_atoms: OperationCache::new(),
            number_of_nodes: OperationCache::new(),
            formula_depth: OperationCache::new(),
            is_nnf: OperationCache::new(),
            is_cnf: OperationCache::new(),
            is_dnf: OperationCache::new(),
            sat: OperationCache::new(),
        }
    }

    pub fn size(&self, entry: CacheEntry) -> usize {
        match entry {
            CacheEntry::Nnf => self.nnf.len(),
            CacheEntry::FactorizedCnf => self.factorization_cnf.len(),
            CacheEntry::FactorizedDnf => self.factorization_dnf.len(),
            CacheEntry::PbcExpansion => self.pbc_expansion.len(),
            CacheEntry::Variables => self.variables.len(),
            CacheEntry::Literals => self.literals.len(),
            CacheEntry::SubNodes => self.sub_nodes.len(),
            CacheEntry::NumberOfAtoms => self.number_of_atoms.len(),
            CacheEntry::NumberOfNodes => self.number_of_nodes.len(),
            CacheEntry::FormulaDepth => self.formula_depth.len(),
            CacheEntry::IsNnf => self.is_nnf.len(),
            CacheEntry::IsCnf => self.is_cnf.len(),
            CacheEntry::IsDnf => self.is_dnf.len(),
            CacheEntry::Sat => self.sat.len(),
        }
    }
}
