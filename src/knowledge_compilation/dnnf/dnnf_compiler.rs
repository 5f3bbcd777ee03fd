use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use bitvec::bitvec;
use bitvec::vec::BitVec;
use itertools::Itertools;
use log::debug;
use num_bigint::BigUint;

use crate::formulas::{EncodedFormula, FormulaFactory, FormulaType, Variable};
use crate::handlers::{ComputationHandler, LngComputation, LngEvent, LngResult, NopHandler};
use crate::operations::transformations::factorization_cnf_with_handler;

use super::dnnf_model_counting::count;
use super::dnnf_propagator::{DnnfPropagator, DnnfVar};
use super::dtree::{DTree, DTreeFactory, DTreeIndex, MinFillDTreeGenerator};

/// A function on a compiled DNNF, see [`Dnnf::apply`].
///
/// Every closure of type `FnMut(&BTreeSet<Variable>, EncodedFormula, &FormulaFactory) -> R`
/// is a `DnnfFunction`.
pub trait DnnfFunction<R> {
    /// Computes the result for the original variables and the formula of a
    /// DNNF.
    fn apply(&mut self, original_variables: &BTreeSet<Variable>, formula: EncodedFormula, f: &FormulaFactory) -> R;
}

impl<R, F: FnMut(&BTreeSet<Variable>, EncodedFormula, &FormulaFactory) -> R> DnnfFunction<R> for F {
    fn apply(&mut self, original_variables: &BTreeSet<Variable>, formula: EncodedFormula, f: &FormulaFactory) -> R {
        self(original_variables, formula, f)
    }
}

/// Represents a formula in DNNF.
///
/// A formula in NNF is in _decomposable negation normal form_ (DNNF) if the
/// operands of every conjunction do not share variables. The formulas
/// compiled by [`compile_dnnf`] are also _deterministic_: the operands of
/// every disjunction are mutually exclusive.
///
/// Variables of the original formula can vanish during the compilation, so a
/// DNNF keeps the variables of the original formula.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::knowledge_compilation::dnnf::compile_dnnf;
/// # use num_bigint::BigUint;
/// let f = FormulaFactory::new();
/// let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
/// let formula = f.and([f.or([a, b]), f.or([f.literal("a", false), c])]);
///
/// let dnnf = compile_dnnf(formula, &f);
/// assert_eq!(dnnf.model_count(&f), BigUint::from(4_u8));
/// ```
#[derive(Clone, Hash, Eq, PartialEq, Debug)]
pub struct Dnnf {
    /// Formula stored in the [`FormulaFactory`].
    pub formula: EncodedFormula,
    /// All variables contained in the original formula.
    pub original_variables: Arc<BTreeSet<Variable>>,
}

impl Dnnf {
    /// Applies the given function on the original variables and the formula
    /// of this DNNF.
    pub fn apply<R>(&self, mut function: impl DnnfFunction<R>, f: &FormulaFactory) -> R {
        function.apply(&self.original_variables, self.formula, f)
    }

    /// Counts the models of this DNNF over its original variables.
    pub fn model_count(&self, f: &FormulaFactory) -> BigUint {
        self.apply(count, f)
    }
}

/// Compiles the given formula to a DNNF.
pub fn compile_dnnf(formula: EncodedFormula, f: &FormulaFactory) -> Dnnf {
    compile_dnnf_with_handler(formula, f, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
}

/// Compiles the given formula to a DNNF with a handler.
///
/// The formula is first transformed into a _CNF_ by factorization. The
/// handler receives the events of this factorization, of the generation of
/// the decomposition tree, and an [`LngEvent::DnnfShannonExpansion`] before
/// every case split of the compilation.
pub fn compile_dnnf_with_handler(formula: EncodedFormula, f: &FormulaFactory, handler: &mut dyn ComputationHandler) -> LngResult<Dnnf> {
    if !handler.should_resume(LngEvent::ComputationStarted(LngComputation::Dnnf)) {
        return LngResult::Canceled(LngEvent::ComputationStarted(LngComputation::Dnnf));
    }
    let original_variables = formula.variables(f);
    let compiled = Result::from(factorization_cnf_with_handler(formula, f, handler)).and_then(|cnf| DnnfCompiler::new(cnf, f).compile(handler));
    match compiled {
        Ok(compiled) => {
            debug!("Compiled DNNF with {} nodes over {} variables", compiled.number_of_nodes(f), original_variables.len());
            handler.should_resume(LngEvent::ComputationFinished(LngComputation::Dnnf));
            LngResult::Ok(Dnnf { formula: compiled, original_variables })
        }
        Err(event) => {
            debug!("DNNF compilation canceled by {event}");
            LngResult::Canceled(event)
        }
    }
}

struct DnnfCompiler<'a> {
    cnf: EncodedFormula,
    non_unit_clauses: EncodedFormula,
    propagator: DnnfPropagator,
    cache: HashMap<BitVec, EncodedFormula>,
    f: &'a FormulaFactory,
    df: DTreeFactory,
}

impl<'a> DnnfCompiler<'a> {
    fn new(cnf: EncodedFormula, f: &'a FormulaFactory) -> Self {
        let propagator = DnnfPropagator::new(cnf, f);
        let df = DTreeFactory::new(propagator.number_of_variables());
        Self { cnf, non_unit_clauses: non_unit_clauses(cnf, f), propagator, cache: HashMap::new(), f, df }
    }

    fn compile(&mut self, handler: &mut dyn ComputationHandler) -> Result<EncodedFormula, LngEvent> {
        if self.non_unit_clauses.is_verum() {
            return Ok(self.cnf);
        }
        if !self.propagator.start() {
            return Ok(self.f.falsum());
        }
        let tree = MinFillDTreeGenerator::generate(&self.propagator, &mut self.df, handler)?;
        let result = self.cnf2ddnnf(tree, handler)?;
        debug!("DNNF compilation cached {} sub-results", self.cache.len());
        Ok(self.f.and([self.propagator.level_zero_literals(self.f), result]))
    }

    fn cnf2ddnnf(&mut self, tree: DTree, handler: &mut dyn ComputationHandler) -> Result<EncodedFormula, LngEvent> {
        let implied = self.propagator.newly_implied(self.df.static_var_set(tree), self.f);
        let separator = self.df.dynamic_separator(tree, &self.propagator);

        if separator.not_any() {
            return Ok(match tree {
                DTree::Leaf(n) => self.f.and([implied, self.leaf2ddnnf(n)]),
                DTree::Node(n) => {
                    let children = self.df.children(n);
                    self.conjoin(implied, children, handler)?
                }
            });
        }
        if !handler.should_resume(LngEvent::DnnfShannonExpansion) {
            return Err(LngEvent::DnnfShannonExpansion);
        }
        let var = self.choose_shannon_variable(tree, &separator);
        let positive = self.branch(tree, var, true, handler)?;
        let negative = self.branch(tree, var, false, handler)?;
        let lit = self.propagator.variable(var).pos_lit();
        let shannon = self.f.or([self.f.and([lit.into(), positive]), self.f.and([lit.negate().into(), negative])]);
        Ok(self.f.and([implied, shannon]))
    }

    fn branch(&mut self, tree: DTree, var: DnnfVar, phase: bool, handler: &mut dyn ComputationHandler) -> Result<EncodedFormula, LngEvent> {
        let result = if self.propagator.decide(var, phase) { self.cnf2ddnnf(tree, handler) } else { Ok(self.f.falsum()) };
        self.propagator.undo_decide();
        result
    }

    /// Compiles a clause under the current assignment into the deterministic
    /// disjunction `l1 | (~l1 & l2) | (~l1 & ~l2 & l3) | ...` of its
    /// unassigned literals.
    fn leaf2ddnnf(&self, leaf: DTreeIndex) -> EncodedFormula {
        let clause = self.df.clause(leaf);
        let mut operands = Vec::with_capacity(clause.len());
        let mut prefix = Vec::with_capacity(clause.len());
        for &lit in clause {
            match self.propagator.value_of(lit) {
                Some(true) => return self.f.verum(),
                Some(false) => {}
                None => {
                    let literal = self.propagator.literal(lit);
                    prefix.push(EncodedFormula::from(literal));
                    operands.push(self.f.and(&prefix));
                    if let Some(last) = prefix.last_mut() {
                        *last = literal.negate().into();
                    }
                }
            }
        }
        self.f.or(operands)
    }

    fn conjoin(&mut self, implied: EncodedFormula, (left, right): (DTree, DTree), handler: &mut dyn ComputationHandler) -> Result<EncodedFormula, LngEvent> {
        if implied.is_falsum() {
            return Ok(implied);
        }
        let left = self.cnf_aux(left, handler)?;
        if left.is_falsum() {
            return Ok(left);
        }
        let right = self.cnf_aux(right, handler)?;
        if right.is_falsum() {
            return Ok(right);
        }
        Ok(self.f.and([implied, left, right]))
    }

    fn cnf_aux(&mut self, tree: DTree, handler: &mut dyn ComputationHandler) -> Result<EncodedFormula, LngEvent> {
        match tree {
            DTree::Leaf(n) => Ok(self.leaf2ddnnf(n)),
            DTree::Node(_) => {
                let key = self.compute_cache_key(tree);
                if let Some(&cached) = self.cache.get(&key) {
                    return Ok(cached);
                }
                let dnnf = self.cnf2ddnnf(tree, handler)?;
                if !dnnf.is_falsum() {
                    self.cache.insert(key, dnnf);
                }
                Ok(dnnf)
            }
        }
    }

    fn compute_cache_key(&self, tree: DTree) -> BitVec {
        let mut key = bitvec![0; self.propagator.number_of_variables() + self.df.number_of_leaves()];
        self.df.cache_key(tree, &self.propagator, &mut key);
        key
    }

    /// Returns the separator variable with the most occurrences in
    /// unsubsumed clauses of the tree, the lowest index on ties.
    #[allow(clippy::cast_possible_wrap)]
    fn choose_shannon_variable(&self, tree: DTree, separator: &BitVec) -> DnnfVar {
        let mut occurrences = vec![-1; self.propagator.number_of_variables()];
        separator.iter_ones().for_each(|n| occurrences[n] = 0);
        self.df.count_unsubsumed_occurrences(tree, &mut occurrences, &self.propagator);
        let best = occurrences.iter().enumerate().rev().max_by_key(|(_, occ)| **occ).map_or(0, |(index, _)| index);
        DnnfVar(best)
    }
}

/// Returns the conjunction of all clauses with more than one literal.
fn non_unit_clauses(cnf: EncodedFormula, f: &FormulaFactory) -> EncodedFormula {
    match cnf.formula_type() {
        FormulaType::And => f.and(cnf.operands(f).into_iter().filter(|op| !op.is_atomic()).collect_vec()),
        FormulaType::Or => cnf,
        _ => f.verum(),
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use crate::formulas::{CType, EncodedFormula, FormulaFactory, Variable};
    use crate::handlers::{ComputationHandler, LngComputation, LngEvent, LngResult};
    use crate::knowledge_compilation::bdd::{Bdd, BddKernel};
    use crate::knowledge_compilation::bdd::orderings::VariableOrdering;
    use crate::util::formula_randomizer::{FormulaRandomizer, FormulaRandomizerConfig};
    use crate::util::test_util::{brute_force_equivalent, brute_force_model_count};

    use super::{compile_dnnf, compile_dnnf_with_handler};

    #[test]
    fn test_trivial_formulas() {
        let f = &FormulaFactory::new();
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        let (na, nb, nc) = (f.literal("a", false), f.literal("b", false), f.literal("c", false));
        let lits = [f.lit("a", true), f.lit("b", true), f.lit("c", true), f.lit("d", true)];
        test_formula(f.verum(), f);
        test_formula(f.falsum(), f);
        test_formula(a, f);
        test_formula(na, f);
        test_formula(f.and([a, b]), f);
        test_formula(f.or([a, b]), f);
        test_formula(f.implication(a, b), f);
        test_formula(f.equivalence(a, b), f);
        test_formula(f.or([a, b, c]), f);
        test_formula(f.and([a, b, c]), f);
        test_formula(f.and([f.variable("f"), f.equivalence(f.or([nb, c]), f.and([na, nc]))]), f);
        test_formula(f.or([a, f.and([f.or([f.and([b, nc]), f.and([c, f.or([f.literal("d", false), f.and([na, b])])])]), f.variable("e")])]), f);
        test_formula(f.pbc(CType::LE, 1, lits.to_vec(), vec![1, 1, 1, 1]), f);
        test_formula(f.pbc(CType::LE, 3, lits.to_vec(), vec![1, 1, 1, 1]), f);
        test_formula(f.pbc(CType::LT, 5, lits.to_vec(), vec![2, 3, -2, 1]), f);
        test_formula(f.pbc(CType::GE, 5, lits.to_vec(), vec![2, 3, -2, 1]), f);
        test_formula(f.and([na, f.or([na, b, c, d])]), f);
    }

    #[test]
    fn test_model_count_of_example() {
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
        let formula = f.and([f.or([a, b]), f.or([f.literal("a", false), c])]);
        let dnnf = compile_dnnf(formula, f);
        assert_eq!(dnnf.model_count(f), BigUint::from(4_u8));
        assert_eq!(dnnf.original_variables.len(), 3);
    }

    #[test]
    fn test_backbone_literals_are_kept() {
        let f = &FormulaFactory::new();
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        let formula = f.and([a, f.or([f.literal("a", false), b]), f.or([b, c, d]), f.or([c, f.literal("d", false)])]);
        let dnnf = compile_dnnf(formula, f);
        assert!(brute_force_equivalent(formula, dnnf.formula, f));
        assert_eq!(dnnf.model_count(f), BigUint::from(3_u8));
    }

    #[test]
    fn test_apply() {
        let f = &FormulaFactory::new();
        let formula = f.or([f.variable("a"), f.and([f.variable("b"), f.variable("c")])]);
        let dnnf = compile_dnnf(formula, f);
        let vars = dnnf.apply(|vars: &std::collections::BTreeSet<Variable>, _: EncodedFormula, _: &FormulaFactory| vars.len(), f);
        assert_eq!(vars, 3);
    }

    #[test]
    fn test_random_formulas() {
        let f = &FormulaFactory::new();
        let mut randomizer = FormulaRandomizer::new(FormulaRandomizerConfig::default_with_num_vars(7).seed(42).weight_pbc(1.0).maximum_operands(3));
        for _ in 0..100 {
            let formula = randomizer.formula(f, 3);
            let dnnf = compile_dnnf(formula, f);
            let variables: Vec<Variable> = formula.variables(f).iter().copied().collect();
            assert!(dnnf.formula.is_nnf(f));
            assert_eq!(dnnf.model_count(f), count_with_bdd(formula, f));
            assert_eq!(dnnf.model_count(f), BigUint::from(brute_force_model_count(formula, &variables, f)));
            assert!(brute_force_equivalent(formula, dnnf.formula, f));
        }
    }

    #[test]
    fn test_handler_cancels_compilation() {
        struct ShannonLimit(usize);
        impl ComputationHandler for ShannonLimit {
            fn should_resume(&mut self, event: LngEvent) -> bool {
                if event == LngEvent::DnnfShannonExpansion {
                    if self.0 == 0 {
                        return false;
                    }
                    self.0 -= 1;
                }
                true
            }
        }
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
        let formula = f.and([f.or([a, b]), f.or([f.literal("a", false), c]), f.or([b, f.literal("c", false)])]);
        assert_eq!(compile_dnnf_with_handler(formula, f, &mut ShannonLimit(0)), LngResult::Canceled(LngEvent::DnnfShannonExpansion));
        assert!(compile_dnnf_with_handler(formula, f, &mut ShannonLimit(100)).is_success());

        struct CancelOnStart;
        impl ComputationHandler for CancelOnStart {
            fn should_resume(&mut self, event: LngEvent) -> bool {
                event != LngEvent::ComputationStarted(LngComputation::Dnnf)
            }
        }
        assert_eq!(compile_dnnf_with_handler(formula, f, &mut CancelOnStart), LngResult::Canceled(LngEvent::ComputationStarted(LngComputation::Dnnf)));
    }

    fn test_formula(formula: EncodedFormula, f: &FormulaFactory) {
        let dnnf = compile_dnnf(formula, f);
        assert_eq!(dnnf.model_count(f), count_with_bdd(formula, f));
        assert!(brute_force_equivalent(formula, dnnf.formula, f));
    }

    fn count_with_bdd(formula: EncodedFormula, f: &FormulaFactory) -> BigUint {
        let mut kernel = BddKernel::new_with_var_ordering(VariableOrdering::Force.ordering(formula, f));
        Bdd::from_formula(formula, f, &mut kernel).model_count(&kernel)
    }
}
