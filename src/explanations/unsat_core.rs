use log::debug;

use crate::formulas::{EncodedFormula, FormulaFactory};
use crate::operations::predicates::SatOracle;
use crate::propositions::Proposition;

/// An unsatisfiable core, an ordered list of propositions whose conjunction is
/// unsatisfiable.
///
/// A core is either known to be a _minimal unsatisfiable subset_ (MUS) or it
/// is unknown whether it is minimal. A core is only marked as MUS by
/// [`UnsatCore::verify_mus`], which checks minimality with a [`SatOracle`].
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::explanations::UnsatCore;
/// # use logicng_compile::operations::predicates::BddSatOracle;
/// # use logicng_compile::propositions::Proposition;
/// let f = FormulaFactory::new();
/// let core = UnsatCore::new(vec![
///     Proposition::new(f.variable("a")),
///     Proposition::new(f.literal("a", false)),
/// ]);
/// assert!(!core.is_mus());
///
/// let core = core.verify_mus(&f, &mut BddSatOracle);
/// assert!(core.is_mus());
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UnsatCore<B = ()> {
    propositions: Vec<Proposition<B>>,
    is_mus: bool,
}

impl<B> UnsatCore<B> {
    /// Constructs a new unsatisfiable core whose minimality is unknown.
    pub const fn new(propositions: Vec<Proposition<B>>) -> Self {
        Self { propositions, is_mus: false }
    }

    pub fn propositions(&self) -> &[Proposition<B>] {
        &self.propositions
    }

    /// Returns `true` if the core was verified to be a MUS. `false` means
    /// that minimality is unknown, not that the core is not minimal.
    pub const fn is_mus(&self) -> bool {
        self.is_mus
    }

    /// Returns the conjunction of the formulas of all propositions.
    pub fn formula(&self, f: &FormulaFactory) -> EncodedFormula {
        f.and(self.propositions.iter().map(Proposition::formula))
    }

    /// Checks with the oracle whether the conjunction of the propositions is
    /// unsatisfiable.
    pub fn is_unsatisfiable(&self, f: &FormulaFactory, oracle: &mut dyn SatOracle) -> bool {
        !oracle.is_satisfiable(self.formula(f), f)
    }

    /// Verifies with the oracle whether this core is a MUS: the conjunction
    /// of all propositions must be unsatisfiable and the conjunction of every
    /// proper subset which leaves out one proposition must be satisfiable.
    ///
    /// Returns the core marked as MUS if the verification succeeds, otherwise
    /// the core is returned unchanged.
    #[must_use]
    pub fn verify_mus(mut self, f: &FormulaFactory, oracle: &mut dyn SatOracle) -> Self {
        if self.is_mus {
            return self;
        }
        if !self.is_unsatisfiable(f, oracle) {
            debug!("Core with {} propositions is satisfiable", self.propositions.len());
            return self;
        }
        let formulas: Vec<EncodedFormula> = self.propositions.iter().map(Proposition::formula).collect();
        let minimal = (0..formulas.len()).all(|skip| {
            let rest = formulas.iter().enumerate().filter(|&(i, _)| i != skip).map(|(_, &formula)| formula);
            oracle.is_satisfiable(f.and(rest), f)
        });
        debug!("Core with {} propositions is {}a MUS", self.propositions.len(), if minimal { "" } else { "not " });
        self.is_mus = minimal;
        self
    }
}
