use fnv::{FnvHashMap, FnvHashSet};
use itertools::Itertools;
use algorithm::prelude::*;
use penman::Amr;
use errors::*;

const NAME_ROLE: &str = "nam";
const ROLE_ROLES: [&str; 2] = ["rol", "tgt"];
const MEMBER_ROLES: [&str; 2] = ["ent", "member"];
const NEGATION_ROLES: [&str; 2] = ["neg", "negation"];
const POLARITY_ROLE: &str = "polarity";
const DISCOURSE_ROLES: [&str; 11] = [
    "continuation", "contrast", "explanation", "result", "precondition", "elaboration",
    "consequence", "alternation", "attribution", "necessity", "possibility",
];
const DATE_ROLES: [&str; 2] = ["dob", "dod"];
const DATE_PARTS: [&str; 3] = ["dom", "moy", "yoc"];
const OCCUPATION_ROLE: &str = "hco";
const LOCATION_ROLE: &str = "geo";

/// A semantic category scored separately from the overall triple match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NamedEntity,
    Negation,
    Role,
    Member,
    Concept,
    ConceptNoun,
    ConceptVerb,
    ConceptAdjective,
    ConceptAdverb,
    Discourse,
    Date,
    Occupation,
    Location,
}

static ALL_CATEGORIES: [Category; 13] = [
    Category::NamedEntity,
    Category::Negation,
    Category::Role,
    Category::Member,
    Category::Concept,
    Category::ConceptNoun,
    Category::ConceptVerb,
    Category::ConceptAdjective,
    Category::ConceptAdverb,
    Category::Discourse,
    Category::Date,
    Category::Occupation,
    Category::Location,
];

#[inline]
fn role_in(role: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|r| r.eq_ignore_ascii_case(role))
}

fn is_member_role(role: &str) -> bool {
    if role_in(role, &MEMBER_ROLES) {
        return true;
    }

    // roles are not restricted to ASCII
    match (role.get(..2), role.get(2..)) {
        (Some(prefix), Some(index)) => prefix.eq_ignore_ascii_case("op") && !index.is_empty()
            && index.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn is_negation(amr: &Amr, edge: &Edge) -> bool {
    if role_in(&edge.label, &NEGATION_ROLES) {
        return true;
    }
    edge.label.eq_ignore_ascii_case(POLARITY_ROLE) && amr.graph.get_node_by_id(edge.target_id).is_literal()
        && amr.graph.get_node_by_id(edge.target_id).label == "-"
}

/// Token of an edge: its role, the concept of its source and the concept or value of its target
fn edge_token(amr: &Amr, edge: &Edge) -> String {
    let graph = &amr.graph;
    format!("{}:{}:{}", edge.label.to_lowercase(), graph.get_node_by_id(edge.source_id).label, graph.get_node_by_id(edge.target_id).label)
}

fn skip(role: &str, reason: String) {
    let err = Error::from(ErrorKind::SchemaMismatch(role.to_owned(), reason));
    debug!("{}", err);
}

/// Append `#2`, `#3`, ... to repeated tokens so that each occurrence is counted
pub fn disambiguate(tokens: Vec<String>) -> Vec<String> {
    let mut counts: FnvHashMap<String, usize> = Default::default();
    tokens.into_iter()
        .map(|token| {
            let count = {
                let count = counts.entry(token.clone()).or_insert(0);
                *count += 1;
                *count
            };

            if count == 1 {
                token
            } else {
                format!("{}#{}", token, count)
            }
        })
        .collect()
}

impl Category {
    pub fn all() -> &'static [Category] {
        &ALL_CATEGORIES
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Category::NamedEntity => "named_entity",
            Category::Negation => "negation",
            Category::Role => "role",
            Category::Member => "member",
            Category::Concept => "concept",
            Category::ConceptNoun => "concept_noun",
            Category::ConceptVerb => "concept_verb",
            Category::ConceptAdjective => "concept_adjective",
            Category::ConceptAdverb => "concept_adverb",
            Category::Discourse => "discourse",
            Category::Date => "date",
            Category::Occupation => "occupation",
            Category::Location => "location",
        }
    }

    /// Occurrences of the category in `amr`, in graph order. Repeated occurrences are kept.
    pub fn extract(&self, amr: &Amr) -> Vec<String> {
        let graph = &amr.graph;
        match *self {
            Category::NamedEntity => graph.iter_edges()
                .filter(|e| e.label.eq_ignore_ascii_case(NAME_ROLE))
                .filter_map(|e| {
                    let target = e.get_target_node(graph);
                    if target.is_literal() {
                        Some(format!("{}:{}", e.get_source_node(graph).label, target.label))
                    } else {
                        skip(&e.label, format!("name points to variable `{}`", amr.node_name(target.id)));
                        None
                    }
                })
                .collect(),
            Category::Negation => graph.iter_edges()
                .filter(|e| is_negation(amr, e))
                .map(|e| e.get_source_node(graph).label.clone())
                .collect(),
            Category::Role => graph.iter_edges()
                .filter(|e| role_in(&e.label, &ROLE_ROLES))
                .map(|e| edge_token(amr, e))
                .collect(),
            Category::Member => graph.iter_edges()
                .filter(|e| is_member_role(&e.label))
                .map(|e| edge_token(amr, e))
                .collect(),
            Category::Discourse => graph.iter_edges()
                .filter(|e| role_in(&e.label, &DISCOURSE_ROLES))
                .map(|e| edge_token(amr, e))
                .collect(),
            Category::Concept => self.concepts(amr, ""),
            Category::ConceptNoun => self.concepts(amr, ".n."),
            Category::ConceptVerb => self.concepts(amr, ".v."),
            Category::ConceptAdjective => {
                let mut concepts = self.concepts(amr, ".a.");
                concepts.extend(self.concepts(amr, ".s."));
                concepts
            },
            Category::ConceptAdverb => self.concepts(amr, ".r."),
            Category::Date => graph.iter_edges()
                .filter(|e| role_in(&e.label, &DATE_ROLES))
                .filter_map(|e| {
                    let date = e.get_target_node(graph);
                    if date.is_literal() {
                        skip(&e.label, format!("date is the literal `{}` instead of a node", date.label));
                        return None;
                    }

                    let parts = DATE_PARTS.iter()
                        .map(|part| date.find_outgoing_edge(graph, part)
                            .map(|pe| pe.get_target_node(graph).label.as_str())
                            .unwrap_or(""))
                        .join("-");
                    Some(format!("{}:{}", e.label.to_lowercase(), parts))
                })
                .collect(),
            Category::Occupation => Category::values_of(amr, OCCUPATION_ROLE),
            Category::Location => Category::values_of(amr, LOCATION_ROLE),
        }
    }

    /// Distinct tokens of the category, ready to be intersected with the tokens of another graph
    pub fn extract_tokens(&self, amr: &Amr) -> FnvHashSet<String> {
        disambiguate(self.extract(amr)).into_iter().collect()
    }

    fn concepts(&self, amr: &Amr, pos_marker: &str) -> Vec<String> {
        amr.graph.iter_variable_nodes()
            .filter(|n| n.label.contains(pos_marker))
            .map(|n| n.label.clone())
            .collect()
    }

    /// Literal values of `role`, or concepts when the role points at a variable
    fn values_of(amr: &Amr, role: &str) -> Vec<String> {
        amr.graph.iter_edges()
            .filter(|e| e.label.eq_ignore_ascii_case(role))
            .map(|e| e.get_target_node(&amr.graph).label.clone())
            .collect()
    }
}
