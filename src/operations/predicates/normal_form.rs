use crate::formulas::{EncodedFormula, Formula, FormulaFactory};
use crate::formulas::operation_cache::OperationCache;

/// Returns `true` if the formula is in negation normal form, i.e. it only
/// consists of constants, literals, conjunctions and disjunctions.
///
/// [`EncodedFormula`] also provides this predicate as method, so instead of
/// `is_nnf(formula, &f)`, you can also call `formula.is_nnf(&f)`.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::predicates::is_nnf;
/// # let f = FormulaFactory::new();
/// let a = f.variable("a");
/// let nb = f.literal("b", false);
///
/// assert!(is_nnf(f.and([a, nb]), &f));
/// assert!(!is_nnf(f.implication(a, nb), &f));
/// assert!(!is_nnf(f.not(f.or([a, nb])), &f));
/// ```
pub fn is_nnf(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    match formula.unpack(f) {
        Formula::Lit(_) | Formula::True | Formula::False => true,
        Formula::Pbc(_) | Formula::Equiv(_) | Formula::Impl(_) | Formula::Not(_) => false,
        Formula::Or(ops) | Formula::And(ops) => {
            cached(formula, &f.caches.is_nnf, f.config.caches.is_nnf, || ops.iter().all(|op| is_nnf(*op, f)))
        }
    }
}

/// Returns `true` if the formula is in conjunctive normal form, i.e. it is a
/// constant, a clause or a conjunction of clauses.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::predicates::is_cnf;
/// # let f = FormulaFactory::new();
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let nc = f.literal("c", false);
///
/// assert!(is_cnf(f.and([f.or([a, b]), nc]), &f));
/// assert!(!is_cnf(f.or([f.and([a, b]), nc]), &f));
/// ```
pub fn is_cnf(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    match formula.unpack(f) {
        Formula::And(ops) => cached(formula, &f.caches.is_cnf, f.config.caches.is_cnf, || ops.iter().all(|op| is_clause(*op, f))),
        _ => is_clause(formula, f),
    }
}

/// Returns `true` if the formula is in disjunctive normal form, i.e. it is a
/// constant, a term or a disjunction of terms.
pub fn is_dnf(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    match formula.unpack(f) {
        Formula::Or(ops) => cached(formula, &f.caches.is_dnf, f.config.caches.is_dnf, || ops.iter().all(|op| is_term(*op, f))),
        _ => is_term(formula, f),
    }
}

/// Returns `true` if the formula is a clause, i.e. a constant, a literal or a
/// disjunction of literals.
pub fn is_clause(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    match formula.unpack(f) {
        Formula::False | Formula::True | Formula::Lit(_) => true,
        Formula::Or(ops) => ops.iter().all(|op| op.is_literal()),
        _ => false,
    }
}

/// Returns `true` if the formula is a term, i.e. a constant, a literal or a
/// conjunction of literals.
pub fn is_term(formula: EncodedFormula, f: &FormulaFactory) -> bool {
    match formula.unpack(f) {
        Formula::False | Formula::True | Formula::Lit(_) => true,
        Formula::And(ops) => ops.iter().all(|op| op.is_literal()),
        _ => false,
    }
}

fn cached(formula: EncodedFormula, cache: &OperationCache<bool>, enabled: bool, compute: impl FnOnce() -> bool) -> bool {
    cache.get(formula).unwrap_or_else(|| {
        let result = compute();
        if enabled {
            cache.insert(formula, result);
        }
        result
    })
}
