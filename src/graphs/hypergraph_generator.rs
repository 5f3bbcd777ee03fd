use std::collections::HashMap;

use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Variable};
use crate::util::exceptions::panic_unexpected_formula_type;

use super::hypergraph::{Hypergraph, NodeIndex};

/// Builds a hypergraph from a formula in _CNF_. Every variable becomes a node
/// and every clause an edge over its variables.
pub fn hypergraph_from_cnf(cnf: EncodedFormula, f: &FormulaFactory) -> Hypergraph<Variable> {
    let mut hypergraph = Hypergraph::new();
    let mut node_map = HashMap::new();
    match cnf.unpack(f) {
        Formula::True | Formula::False => {}
        Formula::Lit(_) | Formula::Or(_) => add_clause(cnf, f, &mut hypergraph, &mut node_map),
        Formula::And(ops) => ops.iter().for_each(|op| add_clause(*op, f, &mut hypergraph, &mut node_map)),
        _ => panic_unexpected_formula_type(cnf, Some(f)),
    }
    hypergraph
}

fn add_clause(clause: EncodedFormula, f: &FormulaFactory, graph: &mut Hypergraph<Variable>, node_map: &mut HashMap<Variable, NodeIndex>) {
    let edge_nodes = clause.variables(f).iter().map(|&variable| *node_map.entry(variable).or_insert_with(|| graph.add_node(variable))).collect();
    graph.add_edge(edge_nodes);
}
