use std::fmt;
use fnv::{FnvHashMap, FnvHashSet};
use algorithm::prelude::*;
use errors::*;
use super::parser::{RawGraph, RawValue};

pub const INSTANCE_ROLE: &str = "instance";
const INVERSE_MARKER: &str = "-of";

/// A forward-direction triple rendered with the variable names of the source text.
/// Literal targets are rendered between double quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PenmanTriple {
    pub source: String,
    pub role: String,
    pub target: String,
}

impl fmt::Display for PenmanTriple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, :{}, {})", self.source, self.role, self.target)
    }
}

/// A parsed meaning representation. Variables are `Variable` nodes labeled by their concept,
/// every literal occurrence gets its own `Literal` node, and all edges are in forward direction.
#[derive(Debug, Clone)]
pub struct Amr {
    pub graph: Graph,
    /// node id of the top variable
    pub top: usize,
    /// variable name of each node, `None` for literal nodes
    pub variables: Vec<Option<String>>,
}

/// If `role` is an inverse role (`rol-of`), return its forward form (`rol`)
pub fn forward_role(role: &str) -> Option<&str> {
    if role.len() > INVERSE_MARKER.len() && role.ends_with(INVERSE_MARKER) {
        Some(&role[..role.len() - INVERSE_MARKER.len()])
    } else {
        None
    }
}

/// Build the normalized graph: resolve back-references and rewrite every `(a, r-of, b)` into
/// `(b, r, a)`. Duplicated triples are kept once.
pub fn normalize(raw: RawGraph) -> Amr {
    let mut graph = Graph::with_capacity(raw.top.clone(), raw.instances.len() + raw.edges.len(), raw.edges.len());
    let mut variables: Vec<Option<String>> = Vec::with_capacity(raw.instances.len() + raw.edges.len());
    let mut var2node: FnvHashMap<String, usize> = Default::default();

    for (var, concept) in raw.instances {
        let nid = graph.add_node(Node::new(NodeType::Variable, concept));
        var2node.insert(var.clone(), nid);
        variables.push(Some(var));
    }

    let mut seen_relations: FnvHashSet<(usize, String, usize)> = Default::default();
    let mut seen_attributes: FnvHashSet<(usize, String, String)> = Default::default();

    for edge in raw.edges {
        let source_id = var2node[&edge.source];
        let target = match edge.target {
            RawValue::Node(var) => Ok(var2node[&var]),
            RawValue::Symbol(symbol) => match var2node.get(&symbol) {
                Some(&nid) => Ok(nid),
                None => Err(symbol),
            },
            RawValue::Literal(value) => Err(value),
        };

        match target {
            Ok(target_id) => {
                let (source_id, role, target_id) = match forward_role(&edge.role) {
                    Some(role) => (target_id, role.to_owned(), source_id),
                    None => (source_id, edge.role, target_id),
                };

                if seen_relations.insert((source_id, role.clone(), target_id)) {
                    graph.add_edge(Edge::new(EdgeType::Relation, role, source_id, target_id));
                }
            },
            Err(value) => {
                if forward_role(&edge.role).is_some() {
                    // a literal cannot be the source of a triple, keep the role as written
                    let err = Error::from(ErrorKind::SchemaMismatch(edge.role.clone(), format!("inverse role points to literal `{}`", value)));
                    debug!("{}", err);
                }

                if seen_attributes.insert((source_id, edge.role.clone(), value.clone())) {
                    let target_id = graph.add_node(Node::new(NodeType::Literal, value));
                    variables.push(None);
                    graph.add_edge(Edge::new(EdgeType::Attribute, edge.role, source_id, target_id));
                }
            }
        }
    }

    let top = var2node[&raw.top];
    Amr { graph, top, variables }
}

impl Amr {
    /// The top variable, which for tombstones is the record id (`t00004`)
    pub fn id(&self) -> &str {
        &self.graph.id
    }

    #[inline]
    pub fn concept_of(&self, node_id: usize) -> Option<&str> {
        let node = self.graph.get_node_by_id(node_id);
        if node.is_variable() {
            Some(&node.label)
        } else {
            None
        }
    }

    /// Variable name for variable nodes, the value for literal nodes
    pub fn node_name(&self, node_id: usize) -> &str {
        match self.variables[node_id] {
            Some(ref var) => var,
            None => &self.graph.get_node_by_id(node_id).label,
        }
    }

    /// Render a node the way it appears as the target of a triple
    pub fn render_target(&self, node_id: usize) -> String {
        match self.variables[node_id] {
            Some(ref var) => var.clone(),
            None => format!("\"{}\"", self.graph.get_node_by_id(node_id).label),
        }
    }

    /// Mapping from variable name to concept
    pub fn concepts(&self) -> FnvHashMap<&str, &str> {
        self.graph.iter_variable_nodes()
            .map(|n| (self.node_name(n.id), n.label.as_str()))
            .collect()
    }

    /// The forward-only triple list: one instance triple per variable followed by the edges
    pub fn triples(&self) -> Vec<PenmanTriple> {
        let instances = self.graph.iter_variable_nodes()
            .map(|n| PenmanTriple {
                source: self.node_name(n.id).to_owned(),
                role: INSTANCE_ROLE.to_owned(),
                target: n.label.clone(),
            });
        let edges = self.graph.iter_edges()
            .map(|e| PenmanTriple {
                source: self.node_name(e.source_id).to_owned(),
                role: e.label.clone(),
                target: self.render_target(e.target_id),
            });

        instances.chain(edges).collect()
    }
}
