use data_structure::graph::graph::Graph;
use data_structure::graph::Node;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum EdgeType {
    /// edge between two variable nodes
    Relation = 0,
    /// edge from a variable node to a literal node
    Attribute = 1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: usize,
    pub kind: EdgeType,
    pub label: String,
    pub source_id: usize,
    pub target_id: usize,
}

impl Edge {
    pub fn new(kind: EdgeType, label: String, source_id: usize, target_id: usize) -> Edge {
        Edge {
            id: 182731897,
            kind,
            label,
            source_id,
            target_id,
        }
    }

    #[inline]
    pub fn is_attribute(&self) -> bool { self.kind == EdgeType::Attribute }

    #[inline]
    pub fn get_source_node<'a>(&self, graph: &'a Graph) -> &'a Node {
        graph.get_node_by_id(self.source_id)
    }

    #[inline]
    pub fn get_target_node<'a>(&self, graph: &'a Graph) -> &'a Node {
        graph.get_node_by_id(self.target_id)
    }
}
