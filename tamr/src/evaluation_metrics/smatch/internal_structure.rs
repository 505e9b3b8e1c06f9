use fnv::{FnvHashMap, FnvHashSet};
use penman::{Amr, PenmanTriple, INSTANCE_ROLE};

pub const TOP_ROLE: &str = "TOP";
const TOP_VALUE: &str = "top";

/// Triple between two variables, identified by their positions in `GraphTriples::var_nodes`
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Triple<'a> {
    pub source_id: usize,
    pub predicate: &'a str,
    pub target_id: usize,
}

/// Triple that only involves one variable: its instance, its attributes and the top marker
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct LocalTriple<'a> {
    pub predicate: &'a str,
    pub value: &'a str,
}

pub type TripleSet<'a> = FnvHashSet<Triple<'a>>;

/// Triples of one graph, indexed by variable position
#[derive(Debug)]
pub struct GraphTriples<'a> {
    pub amr: &'a Amr,
    /// node id of each variable
    pub var_nodes: Vec<usize>,
    pub local_triples: Vec<Vec<LocalTriple<'a>>>,
    pub relations: Vec<Triple<'a>>,
    pub relation_set: TripleSet<'a>,
}

/// Partial injective mapping between gold variables (`x`) and predicted variables (`x_prime`)
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Bijection {
    pub prime2x: Vec<Option<usize>>,
    pub x2prime: Vec<Option<usize>>,
}

impl<'a> GraphTriples<'a> {
    pub fn new(amr: &'a Amr, include_top: bool) -> GraphTriples<'a> {
        let graph = &amr.graph;
        let var_nodes = graph.iter_variable_nodes().map(|n| n.id).collect::<Vec<_>>();
        let mut node2var: FnvHashMap<usize, usize> = Default::default();
        for (i, &nid) in var_nodes.iter().enumerate() {
            node2var.insert(nid, i);
        }

        let mut local_triples = Vec::with_capacity(var_nodes.len());
        for &nid in &var_nodes {
            let node = graph.get_node_by_id(nid);
            let mut triples = vec![LocalTriple { predicate: INSTANCE_ROLE, value: &node.label }];
            if include_top && nid == amr.top {
                triples.push(LocalTriple { predicate: TOP_ROLE, value: TOP_VALUE });
            }

            for e in node.iter_outgoing_edges(graph) {
                if e.is_attribute() {
                    let triple = LocalTriple { predicate: &e.label, value: &e.get_target_node(graph).label };
                    // an attribute may collide with the instance triple (`:instance "x"`)
                    if !triples.contains(&triple) {
                        triples.push(triple);
                    }
                }
            }
            local_triples.push(triples);
        }

        let relations = graph.iter_edges()
            .filter(|e| !e.is_attribute())
            .map(|e| Triple { source_id: node2var[&e.source_id], predicate: &e.label, target_id: node2var[&e.target_id] })
            .collect::<Vec<_>>();
        let relation_set = relations.iter().cloned().collect();

        GraphTriples { amr, var_nodes, local_triples, relations, relation_set }
    }

    #[inline]
    pub fn n_variables(&self) -> usize {
        self.var_nodes.len()
    }

    pub fn n_triples(&self) -> usize {
        self.local_triples.iter().map(|ts| ts.len()).sum::<usize>() + self.relations.len()
    }

    #[inline]
    pub fn var_name(&self, var: usize) -> &'a str {
        self.amr.node_name(self.var_nodes[var])
    }

    pub fn render_local(&self, var: usize, triple: &LocalTriple) -> PenmanTriple {
        let target = if triple.predicate == INSTANCE_ROLE || triple.predicate == TOP_ROLE {
            triple.value.to_owned()
        } else {
            format!("\"{}\"", triple.value)
        };

        PenmanTriple { source: self.var_name(var).to_owned(), role: triple.predicate.to_owned(), target }
    }

    pub fn render_relation(&self, triple: &Triple) -> PenmanTriple {
        PenmanTriple {
            source: self.var_name(triple.source_id).to_owned(),
            role: triple.predicate.to_owned(),
            target: self.var_name(triple.target_id).to_owned(),
        }
    }
}

impl Bijection {
    pub fn new(n_x: usize, n_x_prime: usize) -> Bijection {
        Bijection {
            prime2x: vec![None; n_x_prime],
            x2prime: vec![None; n_x],
        }
    }

    pub fn clear(&mut self) {
        for v in self.prime2x.iter_mut() {
            *v = None;
        }
        for v in self.x2prime.iter_mut() {
            *v = None;
        }
    }

    pub fn push_both(&mut self, x: usize, x_prime: usize) {
        self.x2prime[x] = Some(x_prime);
        self.prime2x[x_prime] = Some(x);
    }

    /// Remove the link of a predicted variable, if any
    pub fn unset_x_prime(&mut self, x_prime: usize) {
        if let Some(x) = self.prime2x[x_prime].take() {
            self.x2prime[x] = None;
        }
    }

    /// Apply a move given as a list of `(x_prime, new x)`. All touched links are released before
    /// the new ones are set, so a swap can be written as two changes.
    pub fn apply(&mut self, changes: &[(usize, Option<usize>)]) {
        for &(x_prime, _) in changes {
            self.unset_x_prime(x_prime);
        }
        for &(x_prime, x) in changes {
            if let Some(x) = x {
                debug_assert!(self.x2prime[x].is_none(), "gold variable is mapped twice");
                self.push_both(x, x_prime);
            }
        }
    }

    #[inline]
    pub fn is_gold_node_bounded(&self, x: usize) -> bool {
        self.x2prime[x].is_some()
    }

    #[inline]
    pub fn is_pred_node_bounded(&self, x_prime: usize) -> bool {
        self.prime2x[x_prime].is_some()
    }

    #[inline]
    pub fn to_x_prime(&self, x: usize) -> Option<usize> {
        self.x2prime[x]
    }

    #[inline]
    pub fn to_x(&self, x_prime: usize) -> Option<usize> {
        self.prime2x[x_prime]
    }

    /// Number of predicted variables that are mapped
    pub fn len(&self) -> usize {
        self.prime2x.iter().filter(|x| x.is_some()).count()
    }
}
