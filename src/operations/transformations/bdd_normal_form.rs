use crate::formulas::{EncodedFormula, FormulaFactory};
use crate::handlers::{ComputationHandler, LngResult, NopHandler};
use crate::knowledge_compilation::bdd::{Bdd, BddKernel};

/// Computes an equivalent _CNF_ of `formula` by compiling it into a BDD.
/// Every path to the `false` terminal becomes one clause.
pub fn bdd_cnf(formula: EncodedFormula, f: &FormulaFactory) -> EncodedFormula {
    bdd_cnf_with_handler(formula, f, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
}

/// Computes an equivalent _CNF_ of `formula` by compiling it into a BDD. The
/// handler is asked before each new BDD node.
pub fn bdd_cnf_with_handler(formula: EncodedFormula, f: &FormulaFactory, handler: &mut dyn ComputationHandler) -> LngResult<EncodedFormula> {
    let mut kernel = BddKernel::new();
    Bdd::from_formula_with_handler(formula, f, &mut kernel, handler).map(|bdd| bdd.cnf(f, &kernel))
}

/// Computes an equivalent _DNF_ of `formula` by compiling it into a BDD.
/// Every path to the `true` terminal becomes one term.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::transformations::bdd_dnf;
/// let f = FormulaFactory::new();
/// let (a, b) = (f.variable("a"), f.variable("b"));
///
/// let dnf = bdd_dnf(f.equivalence(a, b), &f);
/// assert_eq!(dnf, f.or([f.and([a, b]), f.and([f.literal("a", false), f.literal("b", false)])]));
/// ```
pub fn bdd_dnf(formula: EncodedFormula, f: &FormulaFactory) -> EncodedFormula {
    bdd_dnf_with_handler(formula, f, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
}

/// Computes an equivalent _DNF_ of `formula` by compiling it into a BDD with
/// a handler.
pub fn bdd_dnf_with_handler(formula: EncodedFormula, f: &FormulaFactory, handler: &mut dyn ComputationHandler) -> LngResult<EncodedFormula> {
    let mut kernel = BddKernel::new();
    Bdd::from_formula_with_handler(formula, f, &mut kernel, handler).map(|bdd| bdd.dnf(f, &kernel))
}
