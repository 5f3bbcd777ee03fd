use std::collections::HashMap;

use log::trace;

use crate::formulas::operation_cache::OperationCache;
use crate::formulas::{EncodedFormula, Formula, FormulaFactory};
use crate::handlers::{ComputationHandler, LngComputation, LngEvent, LngResult, NopHandler};

use super::nnf;

/// Constructs the _CNF_ of the given formula by factorization, i.e. by
/// distributing disjunctions over conjunctions.
///
/// The result is equivalent to the input and contains no auxiliary
/// variables, but its size can be exponential in the size of the input. Use
/// [`factorization_cnf_with_handler`] to bound the computation.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::transformations::factorization_cnf;
/// let f = FormulaFactory::new();
/// let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
///
/// let cnf = factorization_cnf(f.or([a, f.and([b, c])]), &f);
/// assert_eq!(cnf, f.and([f.or([a, b]), f.or([a, c])]));
/// ```
pub fn factorization_cnf(formula: EncodedFormula, f: &FormulaFactory) -> EncodedFormula {
    factorization_cnf_with_handler(formula, f, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
}

/// Constructs the _CNF_ of the given formula by factorization and reports
/// every distribution and every created clause to `handler`.
///
/// If the handler cancels the computation, the result is
/// [`LngResult::Canceled`] with the event which caused the cancellation.
pub fn factorization_cnf_with_handler(
    formula: EncodedFormula,
    f: &FormulaFactory,
    handler: &mut dyn ComputationHandler,
) -> LngResult<EncodedFormula> {
    Factorization::new(Target::Cnf, f).run(formula, handler)
}

/// Constructs the _DNF_ of the given formula by factorization, i.e. by
/// distributing conjunctions over disjunctions.
pub fn factorization_dnf(formula: EncodedFormula, f: &FormulaFactory) -> EncodedFormula {
    factorization_dnf_with_handler(formula, f, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
}

/// Constructs the _DNF_ of the given formula by factorization with a handler.
/// The created terms are reported as [`LngEvent::FactorizationCreatedClause`].
pub fn factorization_dnf_with_handler(
    formula: EncodedFormula,
    f: &FormulaFactory,
    handler: &mut dyn ComputationHandler,
) -> LngResult<EncodedFormula> {
    Factorization::new(Target::Dnf, f).run(formula, handler)
}

/// The normal form a factorization produces. For a _CNF_ the outer operator is
/// the conjunction, for a _DNF_ it is the disjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Cnf,
    Dnf,
}

impl Target {
    fn is_outer(self, formula: EncodedFormula) -> bool {
        match self {
            Self::Cnf => formula.is_and(),
            Self::Dnf => formula.is_or(),
        }
    }

    fn outer(self, operands: &[EncodedFormula], f: &FormulaFactory) -> EncodedFormula {
        match self {
            Self::Cnf => f.and(operands),
            Self::Dnf => f.or(operands),
        }
    }

    fn inner(self, operands: &[EncodedFormula], f: &FormulaFactory) -> EncodedFormula {
        match self {
            Self::Cnf => f.or(operands),
            Self::Dnf => f.and(operands),
        }
    }
}

struct Factorization<'a> {
    target: Target,
    f: &'a FormulaFactory,
    global: Option<&'a OperationCache<EncodedFormula>>,
    local: HashMap<EncodedFormula, EncodedFormula>,
}

impl<'a> Factorization<'a> {
    fn new(target: Target, f: &'a FormulaFactory) -> Self {
        let global = match target {
            Target::Cnf if f.config.caches.factorization_cnf => Some(&f.caches.factorization_cnf),
            Target::Dnf if f.config.caches.factorization_dnf => Some(&f.caches.factorization_dnf),
            _ => None,
        };
        Self { target, f, global, local: HashMap::new() }
    }

    fn run(mut self, formula: EncodedFormula, handler: &mut dyn ComputationHandler) -> LngResult<EncodedFormula> {
        let started = LngEvent::ComputationStarted(LngComputation::Factorization);
        if !handler.should_resume(started.clone()) {
            return LngResult::Canceled(started);
        }
        let result = self.apply_rec(formula, handler);
        if let Err(event) = &result {
            trace!("Factorization canceled by {event}");
        } else {
            handler.should_resume(LngEvent::ComputationFinished(LngComputation::Factorization));
        }
        result.into()
    }

    fn lookup(&self, formula: EncodedFormula) -> Option<EncodedFormula> {
        self.global.map_or_else(|| self.local.get(&formula).copied(), |cache| cache.get(formula))
    }

    fn store(&mut self, formula: EncodedFormula, result: EncodedFormula) {
        match self.global {
            Some(cache) => cache.insert(formula, result),
            None => {
                self.local.insert(formula, result);
            }
        }
    }

    fn apply_rec(&mut self, formula: EncodedFormula, handler: &mut dyn ComputationHandler) -> Result<EncodedFormula, LngEvent> {
        if formula.is_atomic() && !formula.is_pbc() {
            return Ok(formula);
        }
        if let Some(cached) = self.lookup(formula) {
            return Ok(cached);
        }
        let result = match formula.unpack(self.f) {
            Formula::True | Formula::False | Formula::Lit(_) => formula,
            Formula::Pbc(_) | Formula::Equiv(_) | Formula::Impl(_) | Formula::Not(_) => self.apply_rec(nnf(formula, self.f), handler)?,
            Formula::And(ops) | Formula::Or(ops) => {
                let mut new_ops = Vec::with_capacity(ops.len());
                for &op in ops.iter() {
                    new_ops.push(self.apply_rec(op, handler)?);
                }
                if self.target.is_outer(formula) {
                    self.target.outer(&new_ops, self.f)
                } else {
                    let mut result = new_ops[0];
                    for &op in &new_ops[1..] {
                        result = self.distribute(result, op, handler)?;
                    }
                    result
                }
            }
        };
        self.store(formula, result);
        Ok(result)
    }

    /// Distributes the inner operator of the target over the outer one.
    /// Both operands are already in the target normal form.
    fn distribute(
        &mut self,
        left: EncodedFormula,
        right: EncodedFormula,
        handler: &mut dyn ComputationHandler,
    ) -> Result<EncodedFormula, LngEvent> {
        if !handler.should_resume(LngEvent::DistributionPerformed) {
            return Err(LngEvent::DistributionPerformed);
        }
        if self.target.is_outer(left) || self.target.is_outer(right) {
            let (outer, other) = if self.target.is_outer(left) { (left, right) } else { (right, left) };
            let mut new_ops = Vec::new();
            for op in outer.operands(self.f) {
                new_ops.push(self.distribute(op, other, handler)?);
            }
            Ok(self.target.outer(&new_ops, self.f))
        } else {
            let result = self.target.inner(&[left, right], self.f);
            let event = LngEvent::FactorizationCreatedClause(result);
            if handler.should_resume(event.clone()) { Ok(result) } else { Err(event) }
        }
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use crate::formulas::{FormulaFactory, FormulaFactoryConfig};
    use crate::handlers::{ClauseLimitFactorizationHandler, LngEvent, LngResult};
    use crate::util::formula_randomizer::{FormulaRandomizer, FormulaRandomizerConfig};
    use crate::util::test_util::{F, brute_force_equivalent};

    use super::*;

    #[test]
    fn test_constants_and_literals() {
        let F = F::new();
        let f = &F.f;
        for formula in [F.TRUE, F.FALSE, F.A, F.NA] {
            assert_eq!(factorization_cnf(formula, f), formula);
            assert_eq!(factorization_dnf(formula, f), formula);
        }
    }

    #[test]
    fn test_cnf_of_operators() {
        let F = F::new();
        let f = &F.f;
        assert_eq!(factorization_cnf(F.IMP1, f), f.or([F.NA, F.B]));
        assert_eq!(factorization_cnf(F.IMP3, f), f.or([F.NA, F.NB, F.X, F.Y]));
        assert_eq!(factorization_cnf(F.EQ1, f), f.and([f.or([F.NA, F.B]), f.or([F.A, F.NB])]));
        assert_eq!(factorization_cnf(F.OR3, f), f.and([f.or([F.A, F.NB]), f.or([F.NA, F.B])]));
        assert_eq!(factorization_cnf(F.AND3, f), F.AND3);
        let nested = f.or([F.A, F.B, f.and([F.NX, F.NY])]);
        assert_eq!(factorization_cnf(nested, f), f.and([f.or([F.A, F.B, F.NX]), f.or([F.A, F.B, F.NY])]));
    }

    #[test]
    fn test_dnf_of_operators() {
        let F = F::new();
        let f = &F.f;
        assert_eq!(factorization_dnf(F.IMP1, f), f.or([F.NA, F.B]));
        assert_eq!(factorization_dnf(F.AND3, f), f.or([f.and([F.X, F.NY]), f.and([F.Y, F.NX])]));
        assert_eq!(factorization_dnf(F.OR3, f), F.OR3);
        assert_eq!(factorization_dnf(F.NOT2, f), f.and([F.NX, F.NY]));
    }

    #[test]
    fn test_random_formulas() {
        let f = &FormulaFactory::new();
        let mut randomizer = FormulaRandomizer::new(FormulaRandomizerConfig::default_with_num_vars(6).seed(13).weight_pbc(1.0).maximum_operands(3));
        for _ in 0..100 {
            let formula = randomizer.formula(f, 3);
            let cnf = factorization_cnf(formula, f);
            let dnf = factorization_dnf(formula, f);
            assert!(cnf.is_cnf(f));
            assert!(dnf.is_dnf(f));
            assert!(brute_force_equivalent(formula, cnf, f));
            assert!(brute_force_equivalent(formula, dnf, f));
            let negated_dnf = factorization_dnf(f.not(formula), f);
            assert!(brute_force_equivalent(negated_dnf, f.not(cnf), f));
        }
    }

    #[test]
    fn test_with_handler() {
        let f = &FormulaFactory::new();
        let (a, b, x, y) = (f.variable("a"), f.variable("b"), f.variable("x"), f.variable("y"));
        let formula = f.not(f.equivalence(f.or([a, b]), f.or([x, y])));

        let mut handler = ClauseLimitFactorizationHandler::new(100, 2);
        let result = factorization_cnf_with_handler(formula, f, &mut handler);
        assert!(matches!(result, LngResult::Canceled(LngEvent::FactorizationCreatedClause(_))));

        let mut handler = ClauseLimitFactorizationHandler::new(0, 100);
        let result = factorization_cnf_with_handler(formula, f, &mut handler);
        assert_eq!(result, LngResult::Canceled(LngEvent::DistributionPerformed));

        let mut handler = ClauseLimitFactorizationHandler::new(100, 100);
        let result = factorization_cnf_with_handler(formula, f, &mut handler);
        assert!(result.is_success());
        assert!(handler.dists > 0);
        assert!(handler.clauses > 0);
    }

    #[test]
    fn test_cache_usage() {
        let F = F::new();
        let f = &F.f;
        let cnf = factorization_cnf(F.EQ3, f);
        assert_eq!(f.caches.factorization_cnf.get(F.EQ3), Some(cnf));
        assert_eq!(f.caches.factorization_dnf.get(F.EQ3), None);

        let g = FormulaFactory::with_config(FormulaFactoryConfig::non_caching());
        let eq = g.equivalence(g.variable("a"), g.variable("b"));
        let cnf = factorization_cnf(eq, &g);
        assert!(cnf.is_cnf(&g));
        assert_eq!(g.caches.factorization_cnf.len(), 0);
    }
}
