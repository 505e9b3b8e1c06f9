pub mod internal_structure;
pub mod alignment;
pub mod hill_climbing;

use fnv::FnvHashSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use penman::{Amr, PenmanTriple};
use settings::SmatchConf;
use super::f1_precision_recall;
pub use self::internal_structure::{Bijection, GraphTriples, Triple, LocalTriple, TripleSet};
pub use self::alignment::AlignmentProblem;
pub use self::hill_climbing::{search, SearchOutcome};

/// Result of matching one predicted graph against its gold graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmatchScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub n_matched: usize,
    pub n_pred_triples: usize,
    pub n_gold_triples: usize,
    pub unmatched_gold: Vec<PenmanTriple>,
    pub unmatched_pred: Vec<PenmanTriple>,
    /// `(predicted variable, gold variable)` pairs of the best alignment
    pub alignment: Vec<(String, String)>,
    pub n_moves: usize,
    pub budget_exhausted: bool,
}

/// Align `pred` to `gold` and score the matched triples. `seed` drives the random restarts, so
/// the same inputs, configuration and seed always give the same score.
pub fn smatch_score(gold: &Amr, pred: &Amr, conf: &SmatchConf, seed: u64) -> SmatchScore {
    let gold_triples = GraphTriples::new(gold, conf.include_top);
    let pred_triples = GraphTriples::new(pred, conf.include_top);
    let problem = AlignmentProblem::new(&gold_triples, &pred_triples);

    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = search(&problem, conf, &mut rng);
    let bijection = &outcome.bijection;

    let mut unmatched_gold = Vec::new();
    let mut unmatched_pred = Vec::new();

    // local triples
    for x_prime in 0..pred_triples.n_variables() {
        let gold_local: FnvHashSet<&LocalTriple> = match bijection.to_x(x_prime) {
            Some(x) => gold_triples.local_triples[x].iter().collect(),
            None => Default::default(),
        };
        for triple in &pred_triples.local_triples[x_prime] {
            if !gold_local.contains(triple) {
                unmatched_pred.push(pred_triples.render_local(x_prime, triple));
            }
        }
    }
    for x in 0..gold_triples.n_variables() {
        let pred_local: FnvHashSet<&LocalTriple> = match bijection.to_x_prime(x) {
            Some(x_prime) => pred_triples.local_triples[x_prime].iter().collect(),
            None => Default::default(),
        };
        for triple in &gold_triples.local_triples[x] {
            if !pred_local.contains(triple) {
                unmatched_gold.push(gold_triples.render_local(x, triple));
            }
        }
    }

    // relations
    for triple in &pred_triples.relations {
        let matched = match (bijection.to_x(triple.source_id), bijection.to_x(triple.target_id)) {
            (Some(s), Some(t)) => gold_triples.relation_set.contains(&Triple { source_id: s, predicate: triple.predicate, target_id: t }),
            _ => false,
        };
        if !matched {
            unmatched_pred.push(pred_triples.render_relation(triple));
        }
    }
    for triple in &gold_triples.relations {
        let matched = match (bijection.to_x_prime(triple.source_id), bijection.to_x_prime(triple.target_id)) {
            (Some(s), Some(t)) => pred_triples.relation_set.contains(&Triple { source_id: s, predicate: triple.predicate, target_id: t }),
            _ => false,
        };
        if !matched {
            unmatched_gold.push(gold_triples.render_relation(triple));
        }
    }

    let n_gold_triples = gold_triples.n_triples();
    let n_pred_triples = pred_triples.n_triples();
    debug_assert_eq!(n_pred_triples - unmatched_pred.len(), outcome.n_matched);
    let (f1, precision, recall) = f1_precision_recall(outcome.n_matched, n_pred_triples, n_gold_triples);

    let alignment = (0..pred_triples.n_variables())
        .filter_map(|x_prime| bijection.to_x(x_prime)
            .map(|x| (pred_triples.var_name(x_prime).to_owned(), gold_triples.var_name(x).to_owned())))
        .collect();

    unmatched_gold.sort();
    unmatched_pred.sort();

    SmatchScore {
        precision,
        recall,
        f1,
        n_matched: outcome.n_matched,
        n_pred_triples,
        n_gold_triples,
        unmatched_gold,
        unmatched_pred,
        alignment,
        n_moves: outcome.n_moves,
        budget_exhausted: outcome.budget_exhausted,
    }
}
