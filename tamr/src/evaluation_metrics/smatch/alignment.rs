use fnv::{FnvHashMap, FnvHashSet};
use super::internal_structure::*;

/// Everything the hill climbing needs to score a bijection between the variables of a
/// predicted graph (`x_prime`) and a gold graph (`x`).
pub struct AlignmentProblem<'a> {
    pub gold: &'a GraphTriples<'a>,
    pub pred: &'a GraphTriples<'a>,
    /// number of local triples of `x_prime` matched when it is mapped to `x`
    pub local_weights: FnvHashMap<(usize, usize), usize>,
    /// gold variables each predicted variable may be mapped to, in increasing order
    pub candidates: Vec<Vec<usize>>,
    /// indexes into `pred.relations` of the relations touching each predicted variable
    pub pred_relations_by_var: Vec<Vec<usize>>,
}

impl<'a> AlignmentProblem<'a> {
    pub fn new(gold: &'a GraphTriples<'a>, pred: &'a GraphTriples<'a>) -> AlignmentProblem<'a> {
        let mut local_weights: FnvHashMap<(usize, usize), usize> = Default::default();
        let mut candidates: Vec<FnvHashSet<usize>> = vec![Default::default(); pred.n_variables()];

        let gold_local_sets = gold.local_triples.iter()
            .map(|ts| ts.iter().cloned().collect::<FnvHashSet<_>>())
            .collect::<Vec<_>>();

        for (x_prime, pred_triples) in pred.local_triples.iter().enumerate() {
            for (x, gold_set) in gold_local_sets.iter().enumerate() {
                let weight = pred_triples.iter().filter(|t| gold_set.contains(t)).count();
                if weight > 0 {
                    local_weights.insert((x_prime, x), weight);
                    candidates[x_prime].insert(x);
                }
            }
        }

        // variables that share a relation label on the same side are also candidates
        let mut gold_relations_by_label: FnvHashMap<&str, Vec<&Triple>> = Default::default();
        for triple in &gold.relations {
            gold_relations_by_label.entry(triple.predicate).or_insert_with(Vec::new).push(triple);
        }

        let mut pred_relations_by_var = vec![Vec::new(); pred.n_variables()];
        for (i, triple) in pred.relations.iter().enumerate() {
            pred_relations_by_var[triple.source_id].push(i);
            if triple.target_id != triple.source_id {
                pred_relations_by_var[triple.target_id].push(i);
            }

            if let Some(gold_triples) = gold_relations_by_label.get(triple.predicate) {
                for gold_triple in gold_triples {
                    candidates[triple.source_id].insert(gold_triple.source_id);
                    candidates[triple.target_id].insert(gold_triple.target_id);
                }
            }
        }

        let candidates = candidates.into_iter()
            .map(|xs| {
                let mut xs = xs.into_iter().collect::<Vec<_>>();
                xs.sort();
                xs
            })
            .collect();

        AlignmentProblem { gold, pred, local_weights, candidates, pred_relations_by_var }
    }

    #[inline]
    pub fn local_weight(&self, x_prime: usize, x: usize) -> usize {
        self.local_weights.get(&(x_prime, x)).cloned().unwrap_or(0)
    }

    /// Best reachable number of matched triples
    pub fn upper_bound(&self) -> usize {
        self.gold.n_triples().min(self.pred.n_triples())
    }

    #[inline]
    fn is_relation_matched<F>(&self, rid: usize, to_x: &F) -> bool
        where F: Fn(usize) -> Option<usize> {
        let triple = &self.pred.relations[rid];
        match (to_x(triple.source_id), to_x(triple.target_id)) {
            (Some(s), Some(t)) => self.gold.relation_set.contains(&Triple { source_id: s, predicate: triple.predicate, target_id: t }),
            _ => false,
        }
    }

    /// Number of matched triples under `bijection`
    pub fn score(&self, bijection: &Bijection) -> usize {
        let local: usize = (0..self.pred.n_variables())
            .filter_map(|x_prime| bijection.to_x(x_prime).map(|x| self.local_weight(x_prime, x)))
            .sum();
        let to_x = |x_prime: usize| bijection.to_x(x_prime);
        let relations = (0..self.pred.relations.len())
            .filter(|&rid| self.is_relation_matched(rid, &to_x))
            .count();

        local + relations
    }

    /// Change of the score if `changes` (pairs of `(x_prime, new x)`) were applied to `bijection`.
    /// Only the triples touching a changed variable are re-evaluated.
    pub fn gain(&self, bijection: &Bijection, changes: &[(usize, Option<usize>)]) -> i64 {
        let mut delta: i64 = 0;
        for &(x_prime, new_x) in changes {
            if let Some(x) = bijection.to_x(x_prime) {
                delta -= self.local_weight(x_prime, x) as i64;
            }
            if let Some(x) = new_x {
                delta += self.local_weight(x_prime, x) as i64;
            }
        }

        let mut affected_relations: Vec<usize> = Vec::new();
        for &(x_prime, _) in changes {
            for &rid in &self.pred_relations_by_var[x_prime] {
                if !affected_relations.contains(&rid) {
                    affected_relations.push(rid);
                }
            }
        }

        let before = |x_prime: usize| bijection.to_x(x_prime);
        let after = |x_prime: usize| match changes.iter().find(|c| c.0 == x_prime) {
            Some(&(_, x)) => x,
            None => bijection.to_x(x_prime),
        };

        for rid in affected_relations {
            if self.is_relation_matched(rid, &before) {
                delta -= 1;
            }
            if self.is_relation_matched(rid, &after) {
                delta += 1;
            }
        }

        delta
    }
}
