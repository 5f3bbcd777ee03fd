use std::collections::BTreeSet;

use log::trace;

use crate::handlers::{ComputationHandler, LngEvent};
use crate::knowledge_compilation::dnnf::dnnf_propagator::{DnnfPropagator, DnnfVar};

use super::{DTree, DTreeFactory};

/// Generates a [`DTree`] from the elimination ordering of the min-fill
/// heuristic.
///
/// The primal graph of the CNF has the variables as vertices and an edge
/// between two variables occurring in the same clause. In each iteration the
/// vertex whose elimination adds the fewest fill edges between its remaining
/// neighbors is eliminated next. Ties are broken by the lowest variable index.
///
/// The tree is built bottom-up along the ordering: all trees containing the
/// eliminated variable are composed into a balanced tree.
pub struct MinFillDTreeGenerator;

impl MinFillDTreeGenerator {
    /// Generates the tree over the clauses of the propagator. Returns the
    /// event of the handler if it cancels the generation.
    pub fn generate(propagator: &DnnfPropagator, df: &mut DTreeFactory, handler: &mut dyn ComputationHandler) -> Result<DTree, LngEvent> {
        let clauses = propagator.clauses();
        assert!(!clauses.is_empty(), "Cannot generate a DTree without clauses");
        let graph = Graph::new(propagator);
        if !handler.should_resume(LngEvent::DnnfDtreeMinFillGraphInitialized) {
            return Err(LngEvent::DnnfDtreeMinFillGraphInitialized);
        }
        let ordering = graph.min_fill_ordering(handler)?;
        trace!("Min-fill ordering of {} variables computed", ordering.len());

        let mut sigma: Vec<DTree> = clauses.iter().map(|clause| df.leaf(clause.clone())).collect();
        for var in ordering {
            let (gamma, rest): (Vec<DTree>, Vec<DTree>) = sigma.into_iter().partition(|&tree| df.static_var_set(tree)[var.0]);
            sigma = rest;
            if !gamma.is_empty() {
                sigma.push(compose(&gamma, df));
            }
        }
        Ok(compose(&sigma, df))
    }
}

fn compose(trees: &[DTree], df: &mut DTreeFactory) -> DTree {
    if trees.len() == 1 {
        trees[0]
    } else {
        let (left, right) = trees.split_at(trees.len() / 2);
        let left = compose(left, df);
        let right = compose(right, df);
        df.node(left, right)
    }
}

/// Primal graph with an adjacency matrix for the edge tests and adjacency
/// lists for the iteration over neighbors.
struct Graph {
    adj_matrix: Vec<Vec<bool>>,
    edge_list: Vec<BTreeSet<usize>>,
}

impl Graph {
    fn new(propagator: &DnnfPropagator) -> Self {
        let n = propagator.number_of_variables();
        let mut adj_matrix = vec![vec![false; n]; n];
        let mut edge_list = vec![BTreeSet::new(); n];
        for clause in propagator.clauses() {
            for (i, first) in clause.iter().enumerate() {
                for second in &clause[i + 1..] {
                    let (u, v) = (first.var().0, second.var().0);
                    if u != v {
                        adj_matrix[u][v] = true;
                        adj_matrix[v][u] = true;
                        edge_list[u].insert(v);
                        edge_list[v].insert(u);
                    }
                }
            }
        }
        Self { adj_matrix, edge_list }
    }

    fn fill_edges(&self, vertex: usize, processed: &[bool]) -> Vec<(usize, usize)> {
        let neighbors: Vec<usize> = self.edge_list[vertex].iter().copied().filter(|&v| !processed[v]).collect();
        let mut fill = Vec::new();
        for (i, &first) in neighbors.iter().enumerate() {
            for &second in &neighbors[i + 1..] {
                if !self.adj_matrix[first][second] {
                    fill.push((first, second));
                }
            }
        }
        fill
    }

    fn min_fill_ordering(mut self, handler: &mut dyn ComputationHandler) -> Result<Vec<DnnfVar>, LngEvent> {
        let n = self.adj_matrix.len();
        let mut processed = vec![false; n];
        let mut ordering = Vec::with_capacity(n);
        let mut tree_width = 0;
        for _ in 0..n {
            if !handler.should_resume(LngEvent::DnnfDtreeMinFillNewIteration) {
                return Err(LngEvent::DnnfDtreeMinFillNewIteration);
            }
            // strict comparison keeps the lowest index among equal fills
            let mut best: Option<(usize, usize)> = None;
            for vertex in (0..n).filter(|&v| !processed[v]) {
                let fill = self.fill_edges(vertex, &processed).len();
                if best.is_none_or(|(_, min)| fill < min) {
                    best = Some((vertex, fill));
                }
            }
            let Some((vertex, _)) = best else { break };
            for (u, v) in self.fill_edges(vertex, &processed) {
                self.adj_matrix[u][v] = true;
                self.adj_matrix[v][u] = true;
                self.edge_list[u].insert(v);
                self.edge_list[v].insert(u);
            }
            tree_width = tree_width.max(self.edge_list[vertex].iter().filter(|&&v| !processed[v]).count());
            processed[vertex] = true;
            ordering.push(DnnfVar(vertex));
        }
        trace!("Min-fill elimination has a tree width of {tree_width}");
        Ok(ordering)
    }
}

#[cfg(test)]
mod tests {
    use crate::formulas::FormulaFactory;
    use crate::handlers::{ComputationHandler, LngEvent, NopHandler};
    use crate::knowledge_compilation::dnnf::dnnf_propagator::{DnnfPropagator, DnnfVar};

    use super::{DTreeFactory, Graph, MinFillDTreeGenerator};

    #[test]
    fn test_ordering_breaks_ties_by_index() {
        let f = &FormulaFactory::new();
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        // a path a - b - c - d: both ends have no fill edges, a has the lower index
        let cnf = f.and([f.or([a, b]), f.or([b, c]), f.or([c, d])]);
        let propagator = DnnfPropagator::new(cnf, f);
        let ordering = Graph::new(&propagator).min_fill_ordering(&mut NopHandler::new()).unwrap();
        assert_eq!(ordering, vec![DnnfVar(0), DnnfVar(1), DnnfVar(2), DnnfVar(3)]);
    }

    #[test]
    fn test_ordering_prefers_fewer_fill_edges() {
        let f = &FormulaFactory::new();
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        // a star with center a: eliminating a first would add three fill edges
        let cnf = f.and([f.or([a, b]), f.or([a, c]), f.or([a, d])]);
        let propagator = DnnfPropagator::new(cnf, f);
        let ordering = Graph::new(&propagator).min_fill_ordering(&mut NopHandler::new()).unwrap();
        assert_eq!(ordering[0], DnnfVar(1));
    }

    #[test]
    fn test_generated_tree() {
        let f = &FormulaFactory::new();
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        let cnf = f.and([f.or([a, b]), f.or([b, c]), f.or([c, d])]);
        let propagator = DnnfPropagator::new(cnf, f);
        let mut df = DTreeFactory::new(propagator.number_of_variables());
        let tree = MinFillDTreeGenerator::generate(&propagator, &mut df, &mut NopHandler::new()).unwrap();
        assert_eq!(df.number_of_leaves(), 3);
        assert_eq!(df.leaf_indices(tree).len(), 3);
        assert_eq!(df.static_var_set(tree).count_ones(), 4);
        assert!(df.to_string(tree, &propagator, f).starts_with("Node["));
    }

    #[test]
    fn test_handler_cancels_generation() {
        struct CancelOnIteration;
        impl ComputationHandler for CancelOnIteration {
            fn should_resume(&mut self, event: LngEvent) -> bool {
                event != LngEvent::DnnfDtreeMinFillNewIteration
            }
        }
        let f = &FormulaFactory::new();
        let cnf = f.and([f.or([f.variable("a"), f.variable("b")]), f.or([f.variable("b"), f.variable("c")])]);
        let propagator = DnnfPropagator::new(cnf, f);
        let mut df = DTreeFactory::new(propagator.number_of_variables());
        let result = MinFillDTreeGenerator::generate(&propagator, &mut df, &mut CancelOnIteration);
        assert_eq!(result, Err(LngEvent::DnnfDtreeMinFillNewIteration));
    }
}
