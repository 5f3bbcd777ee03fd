use std::fmt::Display;

/// Identifies one kind of result a [`FormulaFactory`] is able to cache.
///
/// A cache entry is a pure key: it describes what is stored (the result of a
/// function, of a predicate or of a transformation), but it holds no data. The
/// cached values themselves live in the factory and can be inspected with
/// [`FormulaFactory::cache_size`].
///
/// [`FormulaFactory`]: super::FormulaFactory
/// [`FormulaFactory::cache_size`]: super::FormulaFactory::cache_size
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum CacheEntry {
    /// Negation normal form of a formula.
    Nnf,
    /// Factorized conjunctive normal form of a formula.
    FactorizedCnf,
    /// Factorized disjunctive normal form of a formula.
    FactorizedDnf,
    /// Expansion of a pseudo-boolean constraint into a formula without
    /// pseudo-boolean constraints.
    PbcExpansion,
    /// Set of variables of a formula.
    Variables,
    /// Set of literals of a formula.
    Literals,
    /// All sub-nodes of a formula.
    SubNodes,
    /// Number of atoms in a formula.
    NumberOfAtoms,
    /// Number of nodes in a formula.
    NumberOfNodes,
    /// Depth of a formula.
    FormulaDepth,
    /// Whether a formula is in negation normal form.
    IsNnf,
    /// Whether a formula is in conjunctive normal form.
    IsCnf,
    /// Whether a formula is in disjunctive normal form.
    IsDnf,
    /// Whether a formula is satisfiable.
    Sat,
}

impl CacheEntry {
    /// Returns an iterator over all cache entries.
    pub fn iter() -> impl Iterator<Item = Self> {
        use CacheEntry::{
            FactorizedCnf, FactorizedDnf, FormulaDepth, IsCnf, IsDnf, IsNnf, Literals, Nnf, NumberOfAtoms, NumberOfNodes, PbcExpansion,
            Sat, SubNodes, Variables,
        };
        [
            Nnf,
            FactorizedCnf,
            FactorizedDnf,
            PbcExpansion,
            Variables,
            Literals,
            SubNodes,
            NumberOfAtoms,
            NumberOfNodes,
            FormulaDepth,
            IsNnf,
            IsCnf,
            IsDnf,
            Sat,
        ]
        .into_iter()
    }

    /// Returns a human readable description of what is cached for this entry.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Nnf => "transformation result: negation normal form",
            Self::FactorizedCnf => "transformation result: factorized conjunctive normal form",
            Self::FactorizedDnf => "transformation result: factorized disjunctive normal form",
            Self::PbcExpansion => "transformation result: expansion of a pseudo-boolean constraint",
            Self::Variables => "function result: variables",
            Self::Literals => "function result: literals",
            Self::SubNodes => "function result: sub-nodes",
            Self::NumberOfAtoms => "function result: number of atoms",
            Self::NumberOfNodes => "function result: number of nodes",
            Self::FormulaDepth => "function result: formula depth",
            Self::IsNnf => "predicate result: negation normal form",
            Self::IsCnf => "predicate result: conjunctive normal form",
            Self::IsDnf => "predicate result: disjunctive normal form",
            Self::Sat => "predicate result: satisfiability",
        }
    }
}

impl Display for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Specifies which type of operations are allowed to cache their results.
///
/// A `FormulaFactory` can make use of caches to store already calculated
/// results of operations. Whether to use caches for a operations, depends on
/// the application and is a trade-off between write/read operations and
/// recalculating already known results. With larger and more complex formulas,
/// it becomes more likely that a cache improves the performance.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CacheConfig {
    /// Used by [`transformations::nnf`](crate::operations::transformations::nnf).
    pub nnf: bool,
    /// Used by [`transformations::factorization_cnf`](crate::operations::transformations::factorization_cnf).
    pub factorization_cnf: bool,
    /// Used by [`transformations::factorization_dnf`](crate::operations::transformations::factorization_dnf).
    pub factorization_dnf: bool,
    /// Used by [`PbConstraint::expand`](crate::formulas::PbConstraint::expand).
    pub pbc_expansion: bool,
    /// Used by [`functions::variables`](crate::operations::functions::variables).
    pub variables: bool,
    /// Used by [`functions::literals`](crate::operations::functions::literals).
    pub literals: bool,
    /// Used by [`functions::sub_nodes`](crate::operations::functions::sub_nodes).
    pub sub_nodes: bool,
    /// Used by [`functions::number_of_atoms`](crate::operations::functions::number_of_atoms).
    pub number_of_atoms: bool,
    /// Used by [`functions::number_of_nodes`](crate::operations::functions::number_of_nodes).
    pub number_of_nodes: bool,
    /// Used by [`functions::formula_depth`](crate::operations::functions::formula_depth).
    pub formula_depth: bool,
    /// Used by [`predicates::is_nnf`](crate::operations::predicates::is_nnf).
    pub is_nnf: bool,
    /// Used by [`predicates::is_cnf`](crate::operations::predicates::is_cnf).
    pub is_cnf: bool,
    /// Used by [`predicates::is_dnf`](crate::operations::predicates::is_dnf).
    pub is_dnf: bool,
    /// Used by [`predicates::is_sat`](crate::operations::predicates::is_sat).
    pub sat: bool,
}

impl CacheConfig {
    /// Creates a configuration with all caches disabled.
    ///
    /// # Example
    ///
    /// Basic usage:
    ///
    /// ```
    /// # use logicng_compile::formulas::{CacheConfig, CacheEntry};
    /// let config = CacheConfig::all_disabled();
    ///
    /// assert!(CacheEntry::iter().all(|entry| !config.is_enabled(entry)));
    /// ```
    pub const fn all_disabled() -> Self {
        Self {
            nnf: false,
            factorization_cnf: false,
            factorization_dnf: false,
            pbc_expansion: false,
            variables: false,
            literals: false,
            sub_nodes: false,
            number_of_atoms: false,
            number_of_nodes: false,
            formula_depth: false,
            is_nnf: false,
            is_cnf: false,
            is_dnf: false,
            sat: false,
        }
    }

    /// Returns whether the cache for the given entry is enabled.
    pub const fn is_enabled(&self, entry: CacheEntry) -> bool {
        match entry {
            CacheEntry::Nnf => self.nnf,
            CacheEntry::FactorizedCnf => self.factorization_cnf,
            CacheEntry::FactorizedDnf => self.factorization_dnf,
            CacheEntry::PbcExpansion => self.pbc_expansion,
            CacheEntry::Variables => self.variables,
            CacheEntry::Literals => self.literals,
            CacheEntry::SubNodes => self.sub_nodes,
            CacheEntry::NumberOfAtoms => self.number_of_atoms,
            CacheEntry::NumberOfNodes => self.number_of_nodes,
            CacheEntry::FormulaDepth => self.formula_depth,
            CacheEntry::IsNnf => self.is_nnf,
            CacheEntry::IsCnf => self.is_cnf,
            CacheEntry::IsDnf => self.is_dnf,
            CacheEntry::Sat => self.sat,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            nnf: true,
            factorization_cnf: true,
            factorization_dnf: true,
            pbc_expansion: true,
            variables: true,
            literals: true,
            sub_nodes: true,
            number_of_atoms: true,
            number_of_nodes: true,
            formula_depth: true,
            is_nnf: true,
            is_cnf: true,
            is_dnf: true,
            sat: false,
        }
    }
}
