pub(crate) mod exceptions;
/// Module for generating random formulas.
pub mod formula_randomizer;
#[cfg(test)]
pub(crate) mod test_util;
