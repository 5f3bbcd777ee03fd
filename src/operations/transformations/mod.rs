mod bdd_normal_form;
mod cnf;
mod factorization;
mod nnf;
mod quantifier_elimination;
mod restriction;

pub use bdd_normal_form::*;
pub use cnf::*;
pub use factorization::*;
pub use nnf::*;
pub use quantifier_elimination::*;
pub use restriction::*;
