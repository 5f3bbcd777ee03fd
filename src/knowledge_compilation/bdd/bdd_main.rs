use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;
use num_bigint::BigUint;

use crate::datastructures::Model;
use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Literal, Variable};
use crate::handlers::{ComputationHandler, LngComputation, LngEvent, LngResult, NopHandler};

use super::bdd_construction::BddOperation;
use super::bdd_kernel::{BddKernel, BDD_FALSE, BDD_TRUE};
use super::bdd_model_enumeration::enumerate_all_models;
use super::bdd_normalform::normal_form;
use super::bdd_operations::BddPath;

/// A function on a BDD, see [`Bdd::apply`].
///
/// Every closure of type `FnMut(Bdd, &mut BddKernel) -> R` is a `BddFunction`.
pub trait BddFunction<R> {
    /// Computes the result of the function for the given BDD.
    fn apply(&mut self, bdd: Bdd, kernel: &mut BddKernel) -> R;
}

impl<R, F: FnMut(Bdd, &mut BddKernel) -> R> BddFunction<R> for F {
    fn apply(&mut self, bdd: Bdd, kernel: &mut BddKernel) -> R {
        self(bdd, kernel)
    }
}

/// A handle to a BDD in a [`BddKernel`].
///
/// A `Bdd` is only an index into its kernel. Two BDDs of the same kernel are
/// equal if and only if they represent the same Boolean function.
///
/// # Example
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::knowledge_compilation::bdd::{Bdd, BddKernel};
/// # use num_bigint::BigUint;
/// let f = FormulaFactory::new();
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let c = f.variable("c");
/// let formula = f.and([f.or([a, b]), f.or([f.literal("a", false), c])]);
///
/// let mut kernel = BddKernel::new_with_var_ordering(f.vars(["a", "b", "c"]));
/// let bdd = Bdd::from_formula(formula, &f, &mut kernel);
///
/// assert_eq!(bdd.model_count(&kernel), BigUint::from(4_u8));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Bdd {
    index: usize,
}

impl Bdd {
    /// Generates a new BDD for the given formula with the given kernel.
    pub fn from_formula(formula: EncodedFormula, f: &FormulaFactory, kernel: &mut BddKernel) -> Self {
        Self::from_formula_with_handler(formula, f, kernel, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
    }

    /// Generates a new BDD for the given formula with the given kernel.
    ///
    /// The handler is asked before each new node is allocated in the kernel.
    /// If it aborts, the nodes built so far stay in the kernel and the result is
    /// [`LngResult::Canceled`].
    pub fn from_formula_with_handler(
        formula: EncodedFormula,
        f: &FormulaFactory,
        kernel: &mut BddKernel,
        handler: &mut dyn ComputationHandler,
    ) -> LngResult<Self> {
        if !handler.should_resume(LngEvent::ComputationStarted(LngComputation::Bdd)) {
            return LngResult::Canceled(LngEvent::ComputationStarted(LngComputation::Bdd));
        }
        let nodes_before = kernel.statistics().nodes;
        let mut memo = HashMap::new();
        match build_rec(formula, f, kernel, &mut memo, handler) {
            Ok(index) => {
                debug!(
                    "Compiled BDD with {} nodes, {} new nodes in the kernel",
                    kernel.node_count(index),
                    kernel.statistics().nodes - nodes_before
                );
                handler.should_resume(LngEvent::ComputationFinished(LngComputation::Bdd));
                LngResult::Ok(Self { index })
            }
            Err(event) => {
                debug!("BDD compilation canceled by {event}");
                LngResult::Canceled(event)
            }
        }
    }

    /// Returns the BDD which represents the constant `value`.
    pub const fn constant(value: bool) -> Self {
        Self { index: if value { BDD_TRUE } else { BDD_FALSE } }
    }

    /// Returns the index of the root node in the kernel.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns whether this BDD represents a tautology.
    pub const fn is_tautology(&self) -> bool {
        self.index == BDD_TRUE
    }

    /// Returns whether this BDD represents a contradiction.
    pub const fn is_contradiction(&self) -> bool {
        self.index == BDD_FALSE
    }

    /// Returns the variable of the root node, or `None` for a constant.
    pub fn variable(&self, kernel: &BddKernel) -> Option<Variable> {
        kernel.assert_valid(self.index);
        if BddKernel::is_terminal(self.index) { None } else { kernel.get_variable_for_index(kernel.level(self.index)) }
    }

    /// Returns the BDD of the low branch (variable is `false`) of the root.
    /// A constant is its own low branch.
    #[must_use]
    pub fn low(&self, kernel: &BddKernel) -> Self {
        kernel.assert_valid(self.index);
        Self { index: kernel.low(self.index) }
    }

    /// Returns the BDD of the high branch (variable is `true`) of the root.
    /// A constant is its own high branch.
    #[must_use]
    pub fn high(&self, kernel: &BddKernel) -> Self {
        kernel.assert_valid(self.index);
        Self { index: kernel.high(self.index) }
    }

    /// Applies the given function on this BDD.
    pub fn apply<R>(&self, mut function: impl BddFunction<R>, kernel: &mut BddKernel) -> R {
        function.apply(*self, kernel)
    }

    /// Returns the conjunction of this BDD and `other`.
    #[must_use]
    pub fn and(&self, other: &Self, kernel: &mut BddKernel) -> Self {
        self.binary(BddOperation::And, other, kernel)
    }

    /// Returns the disjunction of this BDD and `other`.
    #[must_use]
    pub fn or(&self, other: &Self, kernel: &mut BddKernel) -> Self {
        self.binary(BddOperation::Or, other, kernel)
    }

    /// Returns the implication from this BDD to `other`.
    #[must_use]
    pub fn implies(&self, other: &Self, kernel: &mut BddKernel) -> Self {
        self.binary(BddOperation::Impl, other, kernel)
    }

    /// Returns the equivalence of this BDD and `other`.
    #[must_use]
    pub fn equivalence(&self, other: &Self, kernel: &mut BddKernel) -> Self {
        self.binary(BddOperation::Equiv, other, kernel)
    }

    /// Returns the negation of this BDD.
    #[must_use]
    pub fn negate(&self, kernel: &mut BddKernel) -> Self {
        Self { index: kernel.not(self.index, &mut NopHandler::new()).expect("Nop Handler never aborts.") }
    }

    fn binary(&self, op: BddOperation, other: &Self, kernel: &mut BddKernel) -> Self {
        Self { index: kernel.apply(op, self.index, other.index, &mut NopHandler::new()).expect("Nop Handler never aborts.") }
    }

    /// Returns an arbitrary model for this BDD. This model does not have to
    /// contain all variables of the BDD.
    pub fn model(&self, kernel: &BddKernel) -> Option<Model> {
        kernel.sat_one(self.index).map(|path| create_model(&path, None, kernel))
    }

    /// Returns an arbitrary model of this BDD which contains at least the
    /// given variables or `None` if there is none. If a variable is a don't
    /// care variable, it is assigned with the given default value.
    pub fn model_for_variables(&self, default: bool, variables: &[Variable], kernel: &BddKernel) -> Option<Model> {
        let path = kernel.sat_one(self.index)?;
        let model = create_model(&path, None, kernel);
        let (mut pos, mut neg) = (model.pos().to_vec(), model.neg().to_vec());
        for var in variables {
            let tested = kernel.var2idx.get(var).is_some_and(|&idx| path[idx].is_some());
            if !tested {
                if default { pos.push(*var) } else { neg.push(*var) }
            }
        }
        Some(Model::new(pos, neg))
    }

    /// Returns a model of this BDD over all variables of the kernel or `None`
    /// if there is none. Don't care variables are assigned to `false`.
    pub fn full_model(&self, kernel: &BddKernel) -> Option<Model> {
        kernel.sat_one(self.index).map(|path| create_model(&path, Some(false), kernel))
    }

    /// Enumerates all models of this BDD over all variables of the kernel.
    pub fn enumerate_all_models(&self, kernel: &BddKernel) -> Vec<Model> {
        enumerate_all_models(self.index, None, kernel)
    }

    /// Enumerates all models of this BDD projected to the given variables.
    pub fn enumerate_all_models_projected(&self, variables: &[Variable], kernel: &mut BddKernel) -> Vec<Model> {
        let relevant: BTreeSet<Variable> = variables.iter().copied().collect();
        let others: Vec<Variable> = kernel.var2idx.keys().filter(|v| !relevant.contains(v)).copied().collect();
        let projected = self.exists(&others, kernel);
        enumerate_all_models(projected.index, Some(variables), kernel)
    }

    /// Returns the number of inner nodes of this BDD.
    pub fn node_count(&self, kernel: &BddKernel) -> usize {
        kernel.node_count(self.index)
    }

    /// Returns the model count of this BDD over all variables of the kernel.
    pub fn model_count(&self, kernel: &BddKernel) -> BigUint {
        kernel.sat_count(self.index)
    }

    /// Returns the number of clauses of the CNF of this BDD.
    pub fn number_of_clauses_cnf(&self, kernel: &BddKernel) -> BigUint {
        kernel.path_count(self.index, BDD_FALSE)
    }

    /// Returns the number of terms of the DNF of this BDD.
    pub fn number_of_terms_dnf(&self, kernel: &BddKernel) -> BigUint {
        kernel.path_count(self.index, BDD_TRUE)
    }

    /// Returns a CNF formula for this BDD.
    pub fn cnf(&self, f: &FormulaFactory, kernel: &BddKernel) -> EncodedFormula {
        normal_form(self.index, true, f, kernel)
    }

    /// Returns a DNF formula for this BDD.
    pub fn dnf(&self, f: &FormulaFactory, kernel: &BddKernel) -> EncodedFormula {
        normal_form(self.index, false, f, kernel)
    }

    /// Returns how often each variable of the kernel occurs in this BDD.
    pub fn variable_profile(&self, kernel: &BddKernel) -> BTreeMap<Variable, usize> {
        kernel
            .var_profile(self.index)
            .into_iter()
            .enumerate()
            .filter_map(|(idx, count)| kernel.get_variable_for_index(idx).map(|var| (var, count)))
            .collect()
    }

    /// Returns a formula representation of this BDD. This is done by using the
    /// Shannon expansion `(v & high) | (~v & low)` at every node.
    pub fn to_formula(&self, f: &FormulaFactory, kernel: &BddKernel) -> EncodedFormula {
        to_formula_rec(self.index, f, kernel, &mut HashMap::new())
    }

    /// Restricts the BDD with the given literals.
    #[must_use]
    pub fn restrict(&self, restriction: &[Literal], kernel: &mut BddKernel) -> Self {
        let levels: BTreeMap<usize, bool> =
            restriction.iter().filter_map(|lit| kernel.var2idx.get(&lit.variable()).map(|&idx| (idx, lit.phase()))).collect();
        Self { index: kernel.restrict(self.index, &levels, &mut NopHandler::new()).expect("Nop Handler never aborts.") }
    }

    /// Existential quantifier elimination for a given set of variables.
    #[must_use]
    pub fn exists(&self, variables: &[Variable], kernel: &mut BddKernel) -> Self {
        let levels = levels_of(variables, kernel);
        Self { index: kernel.exists(self.index, &levels, &mut NopHandler::new()).expect("Nop Handler never aborts.") }
    }

    /// Universal quantifier elimination for a given set of variables.
    #[must_use]
    pub fn for_all(&self, variables: &[Variable], kernel: &mut BddKernel) -> Self {
        let levels = levels_of(variables, kernel);
        Self { index: kernel.for_all(self.index, &levels, &mut NopHandler::new()).expect("Nop Handler never aborts.") }
    }

    /// Returns all the variables this BDD depends on.
    pub fn support(&self, kernel: &BddKernel) -> BTreeSet<Variable> {
        kernel.support(self.index).into_iter().filter_map(|idx| kernel.get_variable_for_index(idx)).collect()
    }
}

fn build_rec(
    formula: EncodedFormula,
    f: &FormulaFactory,
    kernel: &mut BddKernel,
    memo: &mut HashMap<EncodedFormula, usize>,
    handler: &mut dyn ComputationHandler,
) -> Result<usize, LngEvent> {
    if let Some(&index) = memo.get(&formula) {
        return Ok(index);
    }
    let result = match formula.unpack(f) {
        Formula::False => BDD_FALSE,
        Formula::True => BDD_TRUE,
        Formula::Lit(lit) => {
            let idx = kernel.get_or_add_var_index(lit.variable());
            kernel.ith_var(idx, lit.phase(), handler)?
        }
        Formula::Not(op) => {
            let operand = build_rec(op, f, kernel, memo, handler)?;
            kernel.not(operand, handler)?
        }
        Formula::Impl((left, right)) | Formula::Equiv((left, right)) => {
            let left_bdd = build_rec(left, f, kernel, memo, handler)?;
            let right_bdd = build_rec(right, f, kernel, memo, handler)?;
            let op = if formula.is_impl() { BddOperation::Impl } else { BddOperation::Equiv };
            kernel.apply(op, left_bdd, right_bdd, handler)?
        }
        Formula::And(ops) | Formula::Or(ops) => {
            let op = if formula.is_and() { BddOperation::And } else { BddOperation::Or };
            let mut res = build_rec(ops[0], f, kernel, memo, handler)?;
            for operand in &ops[1..] {
                let operand_bdd = build_rec(*operand, f, kernel, memo, handler)?;
                res = kernel.apply(op, res, operand_bdd, handler)?;
            }
            res
        }
        Formula::Pbc(pbc) => build_rec(pbc.expand(f), f, kernel, memo, handler)?,
    };
    memo.insert(formula, result);
    Ok(result)
}

fn levels_of(variables: &[Variable], kernel: &BddKernel) -> BTreeSet<usize> {
    variables.iter().filter_map(|var| kernel.var2idx.get(var).copied()).collect()
}

fn create_model(path: &BddPath, default: Option<bool>, kernel: &BddKernel) -> Model {
    let mut pos = Vec::new();
    let mut neg = Vec::new();
    for (idx, value) in path.iter().enumerate() {
        if let (Some(value), Some(var)) = (value.or(default), kernel.get_variable_for_index(idx)) {
            if value { pos.push(var) } else { neg.push(var) }
        }
    }
    Model::new(pos, neg)
}

fn to_formula_rec(index: usize, f: &FormulaFactory, kernel: &BddKernel, memo: &mut HashMap<usize, EncodedFormula>) -> EncodedFormula {
    match index {
        BDD_FALSE => return f.falsum(),
        BDD_TRUE => return f.verum(),
        _ => {}
    }
    if let Some(&formula) = memo.get(&index) {
        return formula;
    }
    let var = kernel.get_variable_for_index(kernel.level(index)).expect("BDD node without registered variable");
    let high = to_formula_rec(kernel.high(index), f, kernel, memo);
    let low = to_formula_rec(kernel.low(index), f, kernel, memo);
    let formula = f.or([f.and([var.pos_lit().into(), high]), f.and([var.neg_lit().into(), low])]);
    memo.insert(index, formula);
    formula
}
