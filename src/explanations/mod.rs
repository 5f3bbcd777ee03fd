mod unsat_core;

pub use unsat_core::*;
