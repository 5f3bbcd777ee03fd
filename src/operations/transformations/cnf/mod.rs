mod tseitin;

use crate::formulas::{EncodedFormula, FormulaFactory};
use crate::handlers::{ComputationHandler, LngResult, NopHandler};
use tseitin::{TseitinState, tseitin_cnf_with_boundary};

use super::{bdd_cnf_with_handler, factorization_cnf_with_handler};

/// Formulas with less atoms than this boundary are factorized by the Tseitin
/// transformation instead of being encoded with auxiliary variables.
pub const DEFAULT_BOUNDARY_FOR_FACTORIZATION: u64 = 12;

/// Types of _CNF_ algorithms.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CnfAlgorithm {
    /// Transformation of a formula in _CNF_ by factorization. The result is
    /// equivalent but possibly exponentially larger.
    Factorization,
    /// Transformation of a formula into _CNF_ due to Tseitin. The result is
    /// equisatisfiable and contains auxiliary variables.
    Tseitin,
    /// Transformation of a formula into _CNF_ due to Tseitin with a custom
    /// factorization boundary.
    TseitinWithBoundary(u64),
    /// Transformation of a formula in _CNF_ by compiling it into a BDD and
    /// reading the paths to the `false` terminal.
    Bdd,
}

/// An encoder for conjunctive normal form (CNF).
///
/// An encoder keeps the auxiliary variables of the _Tseitin_ transformation
/// over multiple calls, so equal sub-formulas of different inputs share their
/// auxiliary variables. Use [`CnfEncoder::stateless`] if the encoded formulas
/// should not influence each other.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::transformations::{CnfAlgorithm, CnfEncoder};
/// let f = FormulaFactory::new();
/// let formula = f.equivalence(f.variable("a"), f.and([f.variable("b"), f.variable("c")]));
///
/// let mut encoder = CnfEncoder::new(CnfAlgorithm::TseitinWithBoundary(0));
/// let cnf = encoder.transform(formula, &f);
///
/// assert!(cnf.is_cnf(&f));
/// assert!(cnf.variables(&f).iter().any(|v| v.is_auxiliary(&f)));
/// ```
#[derive(Clone, Debug)]
pub struct CnfEncoder {
    /// Algorithm used by this encoder.
    pub algorithm: CnfAlgorithm,
    tseitin_state: Option<TseitinState>,
}

impl CnfEncoder {
    /// Returns a new encoder which keeps its state over multiple calls.
    pub fn new(algorithm: CnfAlgorithm) -> Self {
        Self { algorithm, tseitin_state: Some(TseitinState::default()) }
    }

    /// Returns a new stateless encoder.
    pub const fn stateless(algorithm: CnfAlgorithm) -> Self {
        Self { algorithm, tseitin_state: None }
    }

    /// Transforms a formula with the algorithm of this encoder.
    pub fn transform(&mut self, formula: EncodedFormula, f: &FormulaFactory) -> EncodedFormula {
        self.transform_with_handler(formula, f, &mut NopHandler::new()).result().expect("Nop Handler never aborts.")
    }

    /// Transforms a formula with the algorithm of this encoder. The handler
    /// is used by the factorization and by the BDD compilation. Formulas
    /// which are already in _CNF_ are returned unchanged.
    pub fn transform_with_handler(
        &mut self,
        formula: EncodedFormula,
        f: &FormulaFactory,
        handler: &mut dyn ComputationHandler,
    ) -> LngResult<EncodedFormula> {
        if formula.is_cnf(f) {
            return LngResult::Ok(formula);
        }
        match self.algorithm {
            CnfAlgorithm::Factorization => factorization_cnf_with_handler(formula, f, handler),
            CnfAlgorithm::Tseitin => LngResult::Ok(self.tseitin(formula, f, DEFAULT_BOUNDARY_FOR_FACTORIZATION)),
            CnfAlgorithm::TseitinWithBoundary(boundary) => LngResult::Ok(self.tseitin(formula, f, boundary)),
            CnfAlgorithm::Bdd => bdd_cnf_with_handler(formula, f, handler),
        }
    }

    fn tseitin(&mut self, formula: EncodedFormula, f: &FormulaFactory, boundary: u64) -> EncodedFormula {
        match self.tseitin_state.as_mut() {
            Some(state) => tseitin_cnf_with_boundary(formula, f, boundary, state),
            None => tseitin_cnf_with_boundary(formula, f, boundary, &mut TseitinState::default()),
        }
    }
}

/// Computes a _CNF_ of `formula` with the _Tseitin_ transformation without
/// keeping any state.
pub fn tseitin_cnf(formula: EncodedFormula, f: &FormulaFactory, boundary: u64) -> EncodedFormula {
    CnfEncoder::stateless(CnfAlgorithm::TseitinWithBoundary(boundary)).transform(formula, f)
}
