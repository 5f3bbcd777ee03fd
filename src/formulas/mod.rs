mod cache_config;
mod formula;
pub(crate) mod formula_cache;
mod formula_factory;
mod formula_factory_config;
mod literal;
pub(crate) mod operation_cache;
mod pbc;
mod variable;

/// The unit tests of the constructors live in their own files, one per
/// operator.
#[cfg(test)]
mod tests;

pub use cache_config::*;
pub use formula::*;
pub use formula_factory::*;
pub use formula_factory_config::*;
pub use literal::*;
pub use pbc::{CType, PbConstraint, evaluate_comparator};
pub use variable::*;
