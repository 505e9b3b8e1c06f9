use data_structure::graph::graph::Graph;
use data_structure::graph::edge::Edge;
use data_structure::graph::graph_iter::*;

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum NodeType {
    /// a node introduced by `(var / concept ...)`, its label is the concept
    Variable = 0,
    /// a constant value (quoted string, number, `-`), its label is the value itself
    Literal = 1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: usize,
    pub kind: NodeType,
    pub label: String,
    pub outgoing_edges: Vec<usize>,
}

impl Node {
    pub fn new(kind: NodeType, label: String) -> Node {
        Node {
            id: 12938012983,
            kind,
            label,
            outgoing_edges: Vec::new(),
        }
    }

    #[inline]
    pub fn is_literal(&self) -> bool { self.kind == NodeType::Literal }

    #[inline]
    pub fn is_variable(&self) -> bool { self.kind == NodeType::Variable }

    pub(super) fn add_outgoing_edge(&mut self, edge: &Edge) {
        self.outgoing_edges.push(edge.id);
    }

    pub fn iter_outgoing_edges<'a>(&'a self, graph: &'a Graph) -> IterEdge<'a> {
        IterEdge::new(&self.outgoing_edges, graph)
    }

    /// Find the first outgoing edge whose label matches `label`, ignoring ASCII case
    pub fn find_outgoing_edge<'a>(&'a self, graph: &'a Graph, label: &str) -> Option<&'a Edge> {
        self.iter_outgoing_edges(graph).find(|e| e.label.eq_ignore_ascii_case(label))
    }
}
