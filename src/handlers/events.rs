use std::fmt::Display;

use crate::formulas::EncodedFormula;

/// Events which are reported to a [`ComputationHandler`](super::ComputationHandler)
/// during a computation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LngEvent {
    /// A factorization distributed a conjunction over a disjunction or vice
    /// versa.
    DistributionPerformed,
    /// A factorization created a new clause or term.
    FactorizationCreatedClause(EncodedFormula),
    /// A new node is about to be allocated in a BDD kernel.
    BddNewNodeAllocated,
    /// A new node is about to be allocated in an SDD kernel.
    SddNewNodeAllocated,
    DnnfDtreeMinFillGraphInitialized,
    DnnfDtreeMinFillNewIteration,
    /// The DNNF compiler is about to branch on a variable.
    DnnfShannonExpansion,
    ComputationStarted(LngComputation),
    ComputationFinished(LngComputation),
}

impl Display for LngEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Event: ")?;
        match self {
            Self::DistributionPerformed => f.write_str("Distribution performed"),
            Self::FactorizationCreatedClause(_) => f.write_str("Created clause during factorization"),
            Self::BddNewNodeAllocated => f.write_str("New node allocated in BDD"),
            Self::SddNewNodeAllocated => f.write_str("New node allocated in SDD"),
            Self::DnnfDtreeMinFillGraphInitialized => f.write_str("DNNF DTree MinFill Graph initialized"),
            Self::DnnfDtreeMinFillNewIteration => f.write_str("DNNF DTree MinFill new iteration"),
            Self::DnnfShannonExpansion => f.write_str("DNNF Shannon Expansion"),
            Self::ComputationStarted(lng_computation) => f.write_fmt(format_args!("Started computation: {lng_computation}")),
            Self::ComputationFinished(lng_computation) => f.write_fmt(format_args!("Finished computation: {lng_computation}")),
        }
    }
}

/// Computations which report their start and end to a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LngComputation {
    Factorization,
    Bdd,
    Dnnf,
    Sdd,
}

impl Display for LngComputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Factorization => "Factorization",
            Self::Bdd => "BDD Computation",
            Self::Dnnf => "DNNF Computation",
            Self::Sdd => "SDD Computation",
        })
    }
}
