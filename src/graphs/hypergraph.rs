/// Index for nodes of the hypergraph.
pub type NodeIndex = usize;
/// Index for edges of the hypergraph.
pub type EdgeIndex = usize;

/// A hypergraph with a generic node content type. Nodes and edges are
/// identified by their insertion index.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Hypergraph<T> {
    nodes: Vec<HypergraphNode<T>>,
    edges: Vec<Vec<NodeIndex>>,
}

/// A node in the hypergraph with a content of type `T`.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct HypergraphNode<T> {
    /// Content of the node.
    pub content: T,
    /// Edges which are connected with this node.
    pub edges: Vec<EdgeIndex>,
}

impl<T> Hypergraph<T> {
    /// Creates an empty hypergraph.
    pub const fn new() -> Self {
        Self { nodes: Vec::new(), edges: Vec::new() }
    }

    /// Adds a node to the hypergraph and returns the node index.
    pub fn add_node(&mut self, content: T) -> NodeIndex {
        self.nodes.push(HypergraphNode { content, edges: Vec::new() });
        self.nodes.len() - 1
    }

    /// Adds an edge connecting the given nodes and returns the edge index.
    pub fn add_edge(&mut self, nodes: Vec<NodeIndex>) -> EdgeIndex {
        let index = self.edges.len();
        for &node in &nodes {
            assert!(node < self.nodes.len(), "Cannot find node with index {node}.");
            self.nodes[node].edges.push(index);
        }
        self.edges.push(nodes);
        index
    }

    /// Returns the node for the given index.
    pub fn node(&self, index: NodeIndex) -> Option<&HypergraphNode<T>> {
        self.nodes.get(index)
    }

    /// Returns the nodes connected by the edge with the given index.
    pub fn edge(&self, index: EdgeIndex) -> Option<&[NodeIndex]> {
        self.edges.get(index).map(Vec::as_slice)
    }

    /// Returns the number of nodes of the graph.
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges of the graph.
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the center of gravity of an edge, i.e. the average position of
    /// its nodes in `positions`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn center_of_gravity(&self, edge: EdgeIndex, positions: &[usize]) -> f64 {
        let nodes = &self.edges[edge];
        nodes.iter().map(|&node| positions[node]).sum::<usize>() as f64 / nodes.len() as f64
    }

    /// Computes the tentative new position of a node as the average center of
    /// gravity of its edges. A node without edges keeps its position.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn tentative_position(&self, node: NodeIndex, positions: &[usize]) -> f64 {
        let edges = &self.nodes[node].edges;
        if edges.is_empty() {
            return positions[node] as f64;
        }
        edges.iter().map(|&edge| self.center_of_gravity(edge, positions)).sum::<f64>() / edges.len() as f64
    }
}

impl<T> Default for Hypergraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Hypergraph;

    #[test]
    fn test_hypergraph() {
        let mut graph = Hypergraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        let d = graph.add_node("d");
        let e1 = graph.add_edge(vec![a, b]);
        let e2 = graph.add_edge(vec![b, c, d]);
        let e3 = graph.add_edge(vec![c, d]);

        assert!(graph.node(27).is_none());
        assert_eq!(graph.node(c).unwrap().content, "c");
        assert_eq!(graph.edge(e2).unwrap(), &[b, c, d]);
        assert_eq!(graph.node(a).unwrap().edges, vec![e1]);
        assert_eq!(graph.node(b).unwrap().edges, vec![e1, e2]);
        assert_eq!(graph.node(d).unwrap().edges, vec![e2, e3]);
        assert_eq!(graph.number_of_edges(), 3);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_center_of_gravity() {
        let mut graph = Hypergraph::new();
        let nodes: Vec<usize> = ["a", "b", "c", "d"].into_iter().map(|n| graph.add_node(n)).collect();
        let edge = graph.add_edge(nodes.clone());
        let small = graph.add_edge(vec![nodes[0], nodes[1]]);

        assert_eq!(graph.center_of_gravity(edge, &[1, 2, 3, 4]), 2.5);
        assert_eq!(graph.center_of_gravity(edge, &[2, 4, 6, 8]), 5.0);
        assert_eq!(graph.center_of_gravity(small, &[2, 4, 6, 8]), 3.0);
        assert_eq!(graph.tentative_position(nodes[0], &[2, 4, 6, 8]), 4.0);
        assert_eq!(graph.tentative_position(nodes[3], &[2, 4, 6, 8]), 5.0);
    }
}
