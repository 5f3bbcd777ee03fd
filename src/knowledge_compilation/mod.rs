/// Knowledge compilation with _Binary Decision Diagrams_.
pub mod bdd;
/// Knowledge compilation with _Decomposable Negation Normal Form_.
pub mod dnnf;
/// Knowledge compilation with _Sentential Decision Diagrams_.
pub mod sdd;
