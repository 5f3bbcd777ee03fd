use crate::operations::transformations::CnfAlgorithm;

use super::CacheConfig;

/// `FormulaFactoryConfig` is a configuration for a [`FormulaFactory`].
///
/// It defines whether the factory hash-conses its nodes, which algorithm is
/// used for [`FormulaFactory::cnf`], and which operation results are cached.
///
/// [`FormulaFactory`]: super::FormulaFactory
/// [`FormulaFactory::cnf`]: super::FormulaFactory::cnf
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaFactoryConfig {
    /// If `true` (the default), every constructed node is looked up in the
    /// uniqueness tables first, such that equal formulas are represented by the
    /// identical [`EncodedFormula`](super::EncodedFormula). If `false`, each
    /// construction creates a fresh node and equality has to be checked with
    /// [`FormulaFactory::structurally_equal`](super::FormulaFactory::structurally_equal).
    pub hash_consing: bool,
    /// Specifies the algorithm that is used to calculate the _CNF_ of a
    /// formula.
    pub cnf_config: CnfAlgorithm,
    /// A `FormulaFactory` is able to cache results and intermediate results of
    /// operations. The `CacheConfig` allows you to enable or disable the cache
    /// for specific operations.
    pub caches: CacheConfig,
}

impl FormulaFactoryConfig {
    /// Creates a new `FormulaFactoryConfig` with a default configuration.
    ///
    /// The default configuration hash-conses all nodes, enables the default
    /// caches and computes CNFs by factorization, which yields an equivalent
    /// _CNF_ without auxiliary variables.
    pub fn new() -> Self {
        Self { hash_consing: true, cnf_config: CnfAlgorithm::Factorization, caches: CacheConfig::default() }
    }

    /// Creates a configuration for a factory without hash-consing and without
    /// any caches.
    pub fn non_caching() -> Self {
        Self { hash_consing: false, cnf_config: CnfAlgorithm::Factorization, caches: CacheConfig::all_disabled() }
    }

    /// Sets the algorithm used for CNF transformations.
    #[must_use]
    pub fn with_cnf_algorithm(mut self, algorithm: CnfAlgorithm) -> Self {
        self.cnf_config = algorithm;
        self
    }

    /// Sets the cache configuration.
    #[must_use]
    pub fn with_caches(mut self, caches: CacheConfig) -> Self {
        self.caches = caches;
        self
    }
}

impl Default for FormulaFactoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
