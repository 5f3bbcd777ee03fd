use std::collections::HashMap;

use log::debug;
use num_bigint::BigUint;

use crate::formulas::{EncodedFormula, Formula, FormulaFactory};
use crate::handlers::{ComputationHandler, LngComputation, LngEvent, LngResult, NopHandler};

use super::sdd_apply::{ApplyMemo, SddOperation};
use super::sdd_kernel::SddKernel;

const SDD_FALSE: usize = 0;
const SDD_TRUE: usize = 1;

/// A function on an SDD, see [`Sdd::apply`].
///
/// Every closure of type `FnMut(Sdd, &mut SddKernel) -> R` is an `SddFunction`.
pub trait SddFunction<R> {
    /// Computes the result of the function for the given SDD.
    fn apply(&mut self, sdd: Sdd, kernel: &mut SddKernel) -> R;
}

impl<R, F: FnMut(Sdd, &mut SddKernel) -> R> SddFunction<R> for F {
    fn apply(&mut self, sdd: Sdd, kernel: &mut SddKernel) -> R {
        self(sdd, kernel)
    }
}

/// A handle to a _Sentential Decision Diagram_ in an [`SddKernel`].
///
/// Like a [`Bdd`](crate::knowledge_compilation::bdd::Bdd), an `Sdd` is only
/// an index into its kernel, and two SDDs of the same kernel are equal if and
/// only if they represent the same Boolean function.
///
/// # Example
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::knowledge_compilation::sdd::{SddKernel, VTreeGenerator, BalancedVTreeGenerator};
/// # use num_bigint::BigUint;
/// let f = FormulaFactory::new();
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let c = f.variable("c");
/// let formula = f.and([f.or([a, b]), f.or([f.literal("a", false), c])]);
///
/// let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&f.vars(["a", "b", "c"])));
/// let sdd = kernel.compile(formula, &f);
///
/// assert_eq!(sdd.model_count(&kernel), BigUint::from(4_u8));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Sdd {
    index: usize,
}

impl Sdd {
    pub(super) const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the SDD which represents the constant `value`.
    pub const fn constant(value: bool) -> Self {
        Self { index: if value { SDD_TRUE } else { SDD_FALSE } }
    }

    /// Returns the index of the node in its kernel.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn is_verum(&self) -> bool {
        self.index == SDD_TRUE
    }

    pub const fn is_falsum(&self) -> bool {
        self.index == SDD_FALSE
    }

    pub const fn is_constant(&self) -> bool {
        self.index <= SDD_TRUE
    }

    /// Applies the given function on this SDD.
    pub fn apply<R>(&self, mut function: impl SddFunction<R>, kernel: &mut SddKernel) -> R {
        kernel.assert_valid(*self);
        function.apply(*self, kernel)
    }

    /// Counts the models of this SDD over all variables of the kernel's
    /// vtree.
    pub fn model_count(&self, kernel: &SddKernel) -> BigUint {
        kernel.model_count(*self)
    }

    /// Returns a formula equivalent to this SDD.
    pub fn to_formula(&self, kernel: &SddKernel, f: &FormulaFactory) -> EncodedFormula {
        kernel.to_formula(*self, f)
    }

    /// Returns the number of elements of all decision nodes of this SDD.
    pub fn size(&self, kernel: &SddKernel) -> usize {
        kernel.size(*self)
    }
}

impl SddKernel {
    /// Compiles a formula into an SDD of this kernel.
    ///
    /// Panics if the formula contains a variable which is not part of the
    /// kernel's vtree.
    pub fn compile(&mut self, formula: EncodedFormula, f: &FormulaFactory) -> Sdd {
        self.compile_with_handler(formula, f, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
    }

    /// Compiles a formula into an SDD of this kernel.
    ///
    /// The handler is asked before each new node is allocated. If it aborts,
    /// the nodes built so far stay in the kernel and the result is
    /// [`LngResult::Canceled`].
    pub fn compile_with_handler(&mut self, formula: EncodedFormula, f: &FormulaFactory, handler: &mut dyn ComputationHandler) -> LngResult<Sdd> {
        if !handler.should_resume(LngEvent::ComputationStarted(LngComputation::Sdd)) {
            return LngResult::Canceled(LngEvent::ComputationStarted(LngComputation::Sdd));
        }
        let nodes_before = self.statistics().nodes;
        let mut compiler = SddCompiler { f, memo: HashMap::new(), apply_memo: ApplyMemo::new() };
        match compiler.compile(formula, self, handler) {
            Ok(sdd) => {
                debug!("Compiled SDD of size {}, {} new nodes in the kernel", self.size(sdd), self.statistics().nodes - nodes_before);
                handler.should_resume(LngEvent::ComputationFinished(LngComputation::Sdd));
                LngResult::Ok(sdd)
            }
            Err(event) => {
                debug!("SDD compilation canceled by {event}");
                LngResult::Canceled(event)
            }
        }
    }
}

/// Bottom-up compilation of a formula. The memos live as long as one call of
/// [`SddKernel::compile_with_handler`].
struct SddCompiler<'a> {
    f: &'a FormulaFactory,
    memo: HashMap<EncodedFormula, Sdd>,
    apply_memo: ApplyMemo,
}

impl SddCompiler<'_> {
    fn compile(&mut self, formula: EncodedFormula, kernel: &mut SddKernel, handler: &mut dyn ComputationHandler) -> Result<Sdd, LngEvent> {
        if let Some(&sdd) = self.memo.get(&formula) {
            return Ok(sdd);
        }
        let result = match formula.unpack(self.f) {
            Formula::False => Sdd::constant(false),
            Formula::True => Sdd::constant(true),
            Formula::Lit(lit) => kernel.literal_node(lit, handler)?,
            Formula::Not(op) => {
                let operand = self.compile(op, kernel, handler)?;
                kernel.negate_node(operand, handler)?
            }
            Formula::Impl((left, right)) => {
                let left = self.compile(left, kernel, handler)?;
                let right = self.compile(right, kernel, handler)?;
                let negated = kernel.negate_node(left, handler)?;
                self.apply(SddOperation::Disjunction, negated, right, kernel, handler)?
            }
            Formula::Equiv((left, right)) => {
                let left = self.compile(left, kernel, handler)?;
                let right = self.compile(right, kernel, handler)?;
                let both = self.apply(SddOperation::Conjunction, left, right, kernel, handler)?;
                let negated_left = kernel.negate_node(left, handler)?;
                let negated_right = kernel.negate_node(right, handler)?;
                let neither = self.apply(SddOperation::Conjunction, negated_left, negated_right, kernel, handler)?;
                self.apply(SddOperation::Disjunction, both, neither, kernel, handler)?
            }
            Formula::And(ops) | Formula::Or(ops) => {
                let op = if formula.is_and() { SddOperation::Conjunction } else { SddOperation::Disjunction };
                let mut result = op.one();
                for &operand in &*ops {
                    let operand = self.compile(operand, kernel, handler)?;
                    result = self.apply(op, result, operand, kernel, handler)?;
                    if op.is_zero(result) {
                        break;
                    }
                }
                result
            }
            Formula::Pbc(pbc) => self.compile(pbc.expand(self.f), kernel, handler)?,
        };
        self.memo.insert(formula, result);
        Ok(result)
    }

    fn apply(&mut self, op: SddOperation, left: Sdd, right: Sdd, kernel: &mut SddKernel, handler: &mut dyn ComputationHandler) -> Result<Sdd, LngEvent> {
        kernel.apply_rec(op, left, right, &mut self.apply_memo, handler)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use crate::formulas::{CType, EncodedFormula, FormulaFactory, Variable};
    use crate::handlers::{LngComputation, LngEvent, LngResult, NumberOfNodesHandler};
    use crate::knowledge_compilation::sdd::{BalancedVTreeGenerator, Sdd, SddKernel, SddOperation, VTreeGenerator, VerticalVTreeGenerator};
    use crate::util::formula_randomizer::{FormulaRandomizer, FormulaRandomizerConfig};
    use crate::util::test_util::{brute_force_equivalent, brute_force_model_count};

    #[test]
    fn test_model_count_of_example() {
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
        let formula = f.and([f.or([a, b]), f.or([f.literal("a", false), c])]);
        for vtree in [VerticalVTreeGenerator.generate(&f.vars(["a", "b", "c"])), BalancedVTreeGenerator.generate(&f.vars(["c", "a", "b"]))] {
            let mut kernel = SddKernel::new(vtree);
            let sdd = kernel.compile(formula, f);
            assert_eq!(sdd.model_count(&kernel), BigUint::from(4_u8));
            assert!(brute_force_equivalent(formula, sdd.to_formula(&kernel, f), f));
        }
    }

    #[test]
    fn test_constants_and_literals() {
        let f = &FormulaFactory::new();
        let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&f.vars(["a", "b"])));
        assert!(kernel.compile(f.verum(), f).is_verum());
        assert!(kernel.compile(f.falsum(), f).is_falsum());
        let a = f.variable("a");
        assert!(kernel.compile(f.and([a, f.literal("a", false)]), f).is_falsum());
        assert!(kernel.compile(f.or([a, f.literal("a", false)]), f).is_verum());
        let literal = kernel.compile(f.literal("b", false), f);
        assert_eq!(literal, kernel.literal(f.lit("b", false)));
        assert!(!literal.is_constant());
    }

    #[test]
    fn test_canonicity() {
        let f = &FormulaFactory::new();
        let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&f.vars(["a", "b", "c", "d"])));
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        let left = kernel.compile(f.implication(f.and([a, b]), f.or([c, d])), f);
        let right = kernel.compile(f.or([f.literal("a", false), f.literal("b", false), c, d]), f);
        assert_eq!(left, right);
        let equiv = kernel.compile(f.equivalence(a, c), f);
        let expanded = kernel.compile(f.and([f.implication(a, c), f.implication(c, a)]), f);
        assert_eq!(equiv, expanded);
    }

    #[test]
    fn test_pbc() {
        let f = &FormulaFactory::new();
        let lits = vec![f.lit("a", true), f.lit("b", false), f.lit("c", true), f.lit("d", true)];
        let vars = f.vars(["a", "b", "c", "d"]);
        let mut kernel = SddKernel::new(VerticalVTreeGenerator.generate(&vars));
        let pbc = f.pbc(CType::GE, 2, lits, vec![2, -1, 1, 1]);
        let sdd = kernel.compile(pbc, f);
        assert_eq!(sdd.model_count(&kernel), BigUint::from(brute_force_model_count(pbc, &vars, f)));
    }

    #[test]
    fn test_random_formulas() {
        let f = &FormulaFactory::new();
        let variables: Vec<Variable> = (0..6).map(|n| f.var(&format!("v{n}"))).collect();
        let mut randomizer = FormulaRandomizer::new(FormulaRandomizerConfig::default_with_num_vars(6).seed(17).weight_pbc(1.0).maximum_operands(3));
        let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&variables));
        for _ in 0..100 {
            let formula = randomizer.formula(f, 3);
            let sdd = kernel.compile(formula, f);
            assert_eq!(sdd.model_count(&kernel), BigUint::from(brute_force_model_count(formula, &variables, f)));
            assert!(brute_force_equivalent(formula, sdd.to_formula(&kernel, f), f));
        }
    }

    #[test]
    fn test_random_apply() {
        let f = &FormulaFactory::new();
        let variables: Vec<Variable> = (0..5).map(|n| f.var(&format!("v{n}"))).collect();
        let mut randomizer = FormulaRandomizer::new(FormulaRandomizerConfig::default_with_num_vars(5).seed(23).maximum_operands(3));
        let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&variables));
        for _ in 0..50 {
            let (left, right) = (randomizer.formula(f, 3), randomizer.formula(f, 3));
            let left_sdd = kernel.compile(left, f);
            let right_sdd = kernel.compile(right, f);
            let conjunction = kernel.apply(SddOperation::Conjunction, left_sdd, right_sdd);
            let disjunction = kernel.apply(SddOperation::Disjunction, left_sdd, right_sdd);
            assert!(brute_force_equivalent(f.and([left, right]), conjunction.to_formula(&kernel, f), f));
            assert!(brute_force_equivalent(f.or([left, right]), disjunction.to_formula(&kernel, f), f));
            assert_eq!(conjunction, kernel.compile(f.and([left, right]), f));
        }
    }

    #[test]
    fn test_apply_function() {
        let f = &FormulaFactory::new();
        let mut kernel = SddKernel::new(VerticalVTreeGenerator.generate(&f.vars(["a", "b"])));
        let sdd = kernel.compile(f.or([f.variable("a"), f.variable("b")]), f);
        let negated = sdd.apply(|node: Sdd, kernel: &mut SddKernel| kernel.negate(node), &mut kernel);
        let expected = kernel.compile(f.and([f.literal("a", false), f.literal("b", false)]), f);
        assert_eq!(negated, expected);
        let count = Sdd::constant(true).apply(|node: Sdd, kernel: &mut SddKernel| node.model_count(kernel), &mut kernel);
        assert_eq!(count, BigUint::from(4_u8));
    }

    #[test]
    fn test_handler_cancels_compilation() {
        let f = &FormulaFactory::new();
        let vars = f.vars(["a", "b", "c", "d"]);
        let formula: EncodedFormula = f.and([f.or([f.variable("a"), f.variable("b")]), f.or([f.variable("c"), f.variable("d")])]);
        let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&vars));
        assert_eq!(kernel.compile_with_handler(formula, f, &mut NumberOfNodesHandler::new(2)), LngResult::Canceled(LngEvent::SddNewNodeAllocated));
        let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&vars));
        assert!(kernel.compile_with_handler(formula, f, &mut NumberOfNodesHandler::new(100)).is_success());

        struct CancelOnStart;
        impl crate::handlers::ComputationHandler for CancelOnStart {
            fn should_resume(&mut self, event: LngEvent) -> bool {
                event != LngEvent::ComputationStarted(LngComputation::Sdd)
            }
        }
        assert_eq!(kernel.compile_with_handler(formula, f, &mut CancelOnStart), LngResult::Canceled(LngEvent::ComputationStarted(LngComputation::Sdd)));
    }
}
