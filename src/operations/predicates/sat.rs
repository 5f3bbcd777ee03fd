use log::trace;

use crate::formulas::{EncodedFormula, FormulaFactory};
use crate::knowledge_compilation::bdd::orderings::VariableOrdering;
use crate::knowledge_compilation::bdd::{Bdd, BddKernel};

/// Decides the satisfiability of formulas.
///
/// This crate does not contain a search based SAT solver. Every predicate in
/// this module can be used with an external solver by implementing this trait
/// for it. The default oracle is the [`BddSatOracle`].
pub trait SatOracle {
    /// Returns `true` if the formula has at least one model.
    fn is_satisfiable(&mut self, formula: EncodedFormula, f: &FormulaFactory) -> bool;
}

/// A [`SatOracle`] which compiles the formula into a BDD with a DFS variable
/// ordering. The formula is satisfiable iff the BDD is not the false terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BddSatOracle;

impl SatOracle for BddSatOracle {
    fn is_satisfiable(&mut self, formula: EncodedFormula, f: &FormulaFactory) -> bool {
        if formula.is_constant() {
            return formula.is_verum();
        }
        let mut kernel = BddKernel::new_with_var_ordering(VariableOrdering::Dfs.ordering(formula, f));
        let bdd = Bdd::from_formula(formula, f, &mut kernel);
        trace!("Satisfiability check compiled {} BDD nodes", kernel.statistics().nodes);
        !bdd.is_contradiction()
    }
}

/// A predicate which tests whether a formula is satisfiable. A formula is
/// satisfiable if there exists at least one assignment such that the formula
/// evaluates to `true` with this assignment.
///
/// The check is performed by the [`BddSatOracle`], results are cached in the
/// factory if [`CacheConfig::sat`](crate::formulas::CacheConfig::sat) is
/// enabled.
///
/// # Example
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::predicates::is_sat;
/// let f = FormulaFactory::new();
///
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let c = f.variable("c");
/// let formula = f.or([f.and([a, b]), c]);
///
/// assert!(is_sat(formula, &f));
/// assert!(!is_sat(f.and([formula, f.not(formula)]), &f));
/// ```
pub fn is_sat(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    f.caches.sat.get(formula).unwrap_or_else(|| {
        let sat = BddSatOracle.is_satisfiable(formula, f);
        if f.config.caches.sat {
            f.caches.sat.insert(formula, sat);
        }
        sat
    })
}

/// Tests whether a formula is satisfiable with the given oracle. The result is
/// not cached.
pub fn is_sat_with_oracle(formula: EncodedFormula, f: &FormulaFactory, oracle: &mut dyn SatOracle) -> bool {
    oracle.is_satisfiable(formula, f)
}

/// A predicate indicating whether a given formula is a tautology, that is,
/// always holds, regardless of the assignment.
///
/// A tautology check can also be used to check whether two formulas are
/// equivalent, see [`equivalent`].
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::predicates::is_tautology;
/// let f = FormulaFactory::new();
///
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let na = f.literal("a", false);
/// let nb = f.literal("b", false);
/// let formula = f.or([f.and([a, b]), f.and([na, b]), f.and([a, nb]), f.and([na, nb])]);
///
/// assert!(is_tautology(formula, &f));
/// ```
pub fn is_tautology(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    !is_sat(f.not(formula), f)
}

/// A predicate indicating whether a given formula is a contradiction, that is,
/// has no model.
pub fn is_contradiction(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    !is_sat(formula, f)
}

/// A predicate indicating whether a given formula is contingent, that is,
/// neither a tautology nor a contradiction.
pub fn is_contingent(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    is_sat(formula, f) && !is_tautology(formula, f)
}

/// Returns `true` if every model of `left` is also a model of `right`.
pub fn implies(left: EncodedFormula, right: EncodedFormula, f: &FormulaFactory) -> bool {
    is_tautology(f.implication(left, right), f)
}

/// Returns `true` if `left` and `right` have exactly the same models.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::predicates::equivalent;
/// let f = FormulaFactory::new();
///
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let c = f.variable("c");
/// let left = f.and([f.or([a, b]), f.or([a, c])]);
/// let right = f.or([a, f.and([b, c])]);
///
/// assert!(equivalent(left, right, &f));
/// ```
pub fn equivalent(left: EncodedFormula, right: EncodedFormula, f: &FormulaFactory) -> bool {
    is_tautology(f.equivalence(left, right), f)
}
