use std::collections::BTreeSet;

use num_bigint::BigUint;

use crate::formulas::{EncodedFormula, FormulaFactory, Variable};
use crate::knowledge_compilation::bdd::orderings::VariableOrdering;
use crate::knowledge_compilation::bdd::{Bdd, BddKernel};
use crate::knowledge_compilation::dnnf::compile_dnnf;
use crate::knowledge_compilation::sdd::{BalancedVTreeGenerator, SddKernel, VTreeGenerator};

/// Algorithms available for model counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelCountAlgorithm {
    /// BDD based model counting with the given variable ordering.
    Bdd(VariableOrdering),
    /// DNNF based model counting.
    Dnnf,
    /// SDD based model counting on a balanced vtree over the FORCE ordering.
    Sdd,
}

impl Default for ModelCountAlgorithm {
    fn default() -> Self {
        Self::Bdd(VariableOrdering::Force)
    }
}

/// Computes the model count for a given formula over its variables.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::functions::{count_models, ModelCountAlgorithm};
/// # use num_bigint::BigUint;
/// let f = FormulaFactory::new();
/// let formula = f.or([f.variable("a"), f.variable("b")]);
///
/// assert_eq!(count_models(formula, ModelCountAlgorithm::Dnnf, &f), BigUint::from(3_u8));
/// ```
pub fn count_models(formula: EncodedFormula, algorithm: ModelCountAlgorithm, f: &FormulaFactory) -> BigUint {
    count_models_with_vars(formula, algorithm, &formula.variables(f), f)
}

/// Computes the model count for a given formula and a set of relevant
/// variables. This set must be a superset of the formula's variables.
pub fn count_models_with_vars(
    formula: EncodedFormula,
    algorithm: ModelCountAlgorithm,
    relevant_vars: &BTreeSet<Variable>,
    f: &FormulaFactory,
) -> BigUint {
    let vars = formula.variables(f);
    assert!(vars.is_subset(relevant_vars), "Expected variables to contain all of the formula's variables");
    let dont_cares = relevant_vars.len() - vars.len();
    if vars.is_empty() {
        return if formula.is_verum() { BigUint::from(1_u8) << dont_cares } else { BigUint::from(0_u8) };
    }
    count_formula(formula, algorithm, f) << dont_cares
}

/// Computes the model count for a given set of formulas, interpreted as
/// conjunction, over the variables of the formulas.
pub fn count_models_conjunction(formulas: &[EncodedFormula], algorithm: ModelCountAlgorithm, f: &FormulaFactory) -> BigUint {
    let vars = formulas.iter().fold(BTreeSet::new(), |mut akk, formula| {
        akk.extend(formula.variables(f).iter().copied());
        akk
    });
    count_models_with_vars(f.and(formulas), algorithm, &vars, f)
}

/// Counts the models over exactly the variables of `formula`.
fn count_formula(formula: EncodedFormula, algorithm: ModelCountAlgorithm, f: &FormulaFactory) -> BigUint {
    match algorithm {
        ModelCountAlgorithm::Bdd(ordering) => {
            let mut kernel = BddKernel::new_with_var_ordering(ordering.ordering(formula, f));
            Bdd::from_formula(formula, f, &mut kernel).model_count(&kernel)
        }
        ModelCountAlgorithm::Dnnf => compile_dnnf(formula, f).model_count(f),
        ModelCountAlgorithm::Sdd => {
            let ordering = VariableOrdering::Force.ordering(formula, f);
            let mut kernel = SddKernel::new(BalancedVTreeGenerator.generate(&ordering));
            kernel.compile(formula, f).model_count(&kernel)
        }
    }
}
