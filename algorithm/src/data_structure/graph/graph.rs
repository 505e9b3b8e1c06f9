use std::slice::Iter;
use data_structure::graph::node::{Node, NodeType};
use data_structure::graph::edge::{Edge, EdgeType};
use data_structure::graph::graph_iter::IterNode;


/// A labeled directed graph. Nodes and edges are only appended, ids are their positions
/// so they stay valid for the whole life of the graph.
#[derive(Debug, Clone)]
pub struct Graph {
    pub id: String,
    pub n_nodes: usize,
    pub n_edges: usize,
    pub(super) nodes: Vec<Node>,
    pub(super) edges: Vec<Edge>,
    node_index_type: Vec<Vec<usize>>,
}

impl Graph {

    pub fn with_capacity(id: String, estimated_n_nodes: usize, estimated_n_edges: usize) -> Graph {
        Graph {
            id,
            n_nodes: 0,
            n_edges: 0,
            nodes: Vec::with_capacity(estimated_n_nodes),
            edges: Vec::with_capacity(estimated_n_edges),
            node_index_type: vec![Vec::new(), Vec::new()],
        }
    }

    /// Add new node to graph and return its id
    pub fn add_node(&mut self, mut node: Node) -> usize {
        node.id = self.n_nodes;
        self.n_nodes += 1;
        self.node_index_type[node.kind as usize].push(node.id);

        self.nodes.push(node);
        self.n_nodes - 1
    }

    /// Add new edge to graph and return its id. The kind of the edge follows the kind of its target.
    pub fn add_edge(&mut self, mut edge: Edge) -> usize {
        edge.id = self.n_edges;
        edge.kind = if self.nodes[edge.target_id].is_literal() {
            EdgeType::Attribute
        } else {
            EdgeType::Relation
        };
        self.n_edges += 1;
        self.nodes[edge.source_id].add_outgoing_edge(&edge);

        self.edges.push(edge);
        self.n_edges - 1
    }

    pub fn get_n_variable_nodes(&self) -> usize {
        self.node_index_type[NodeType::Variable as usize].len()
    }

    pub fn get_n_literal_nodes(&self) -> usize {
        self.node_index_type[NodeType::Literal as usize].len()
    }

    #[inline]
    pub fn get_node_by_id(&self, idx: usize) -> &Node { &self.nodes[idx] }

    #[inline]
    pub fn get_edge_by_id(&self, idx: usize) -> &Edge { &self.edges[idx] }

    #[inline]
    pub fn iter_edges(&self) -> Iter<Edge> { self.edges.iter() }

    pub fn iter_variable_nodes(&self) -> IterNode {
        IterNode::new(&self.node_index_type[NodeType::Variable as usize], self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tombstone_graph() -> Graph {
        let mut g = Graph::with_capacity("t00004".to_owned(), 3, 2);
        let t = g.add_node(Node::new(NodeType::Variable, "tombstone.n.01".to_owned()));
        let x1 = g.add_node(Node::new(NodeType::Variable, "male.n.02".to_owned()));
        let name = g.add_node(Node::new(NodeType::Literal, "JAN".to_owned()));
        g.add_edge(Edge::new(EdgeType::Relation, "ent".to_owned(), t, x1));
        g.add_edge(Edge::new(EdgeType::Relation, "nam".to_owned(), x1, name));
        g
    }

    #[test]
    fn test_add_edge_infers_kind() {
        let g = tombstone_graph();
        assert_eq!(g.get_edge_by_id(0).kind, EdgeType::Relation);
        assert_eq!(g.get_edge_by_id(1).kind, EdgeType::Attribute);
        assert_eq!(g.get_n_variable_nodes(), 2);
        assert_eq!(g.get_n_literal_nodes(), 1);
    }

    #[test]
    fn test_indexes() {
        let g = tombstone_graph();
        assert_eq!(g.iter_edges().map(|e| e.target_id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(g.iter_variable_nodes().map(|n| n.id).collect::<Vec<_>>(), vec![0, 1]);

        let x1 = g.get_node_by_id(1);
        assert_eq!(x1.find_outgoing_edge(&g, "nam").unwrap().get_target_node(&g).label, "JAN");
        assert_eq!(x1.find_outgoing_edge(&g, "NAM").unwrap().id, 1);
        assert!(x1.find_outgoing_edge(&g, "dob").is_none());
        assert_eq!(x1.iter_outgoing_edges(&g).map(|e| e.get_source_node(&g).id).collect::<Vec<_>>(), vec![1]);
    }
}
