mod hypergraph;
mod hypergraph_generator;

pub use hypergraph::*;
pub use hypergraph_generator::*;
