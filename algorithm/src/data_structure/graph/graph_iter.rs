use data_structure::graph::graph::Graph;
use data_structure::graph::Edge;
use data_structure::graph::Node;

pub struct IterEdge<'a> {
    current_idx: usize,
    pub(super) edges: &'a [usize],
    pub(super) graph: &'a Graph
}

pub struct IterNode<'a> {
    current_idx: usize,
    pub(super) nodes: &'a [usize],
    pub(super) graph: &'a Graph
}

impl<'a> IterEdge<'a> {
    pub fn new(edges: &'a [usize], graph: &'a Graph) -> IterEdge<'a> {
        IterEdge {
            current_idx: 0,
            edges,
            graph
        }
    }
}

impl<'a> IterNode<'a> {
    pub fn new(nodes: &'a [usize], graph: &'a Graph) -> IterNode<'a> {
        IterNode {
            current_idx: 0,
            nodes,
            graph
        }
    }
}

impl<'a> Iterator for IterEdge<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.edges.get(self.current_idx)
            .map(|&eid| self.graph.get_edge_by_id(eid));

        self.current_idx += 1;
        result
    }
}

impl<'a> Iterator for IterNode<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.nodes.get(self.current_idx)
            .map(|&nid| self.graph.get_node_by_id(nid));

        self.current_idx += 1;
        result
    }
}
