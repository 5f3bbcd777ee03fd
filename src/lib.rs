#![doc = include_str!("../README.md")]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, missing_docs)]
#![allow(
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

/// Various datastructures.
pub mod datastructures;
/// Tools for analyzing unsatisfiable results.
pub mod explanations;
/// Types and datastructures to represent and manage formulas effectively.
pub mod formulas;
/// Graphs and Hypergraphs.
pub mod graphs;
/// Handlers for more control during some calculations.
pub mod handlers;
/// Offline compilation of formulas for faster online queries.
pub mod knowledge_compilation;
/// Functions, Predicates, and Transformations for formulas.
pub mod operations;
/// Tool for assigning additional information to a formula.
pub mod propositions;
/// Additional utility.
pub mod util;
