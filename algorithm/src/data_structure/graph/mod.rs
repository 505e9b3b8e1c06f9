mod node;
mod edge;
mod graph;
mod graph_iter;

pub use self::graph::Graph;
pub use self::node::{Node, NodeType};
pub use self::edge::{Edge, EdgeType};
pub use self::graph_iter::*;
