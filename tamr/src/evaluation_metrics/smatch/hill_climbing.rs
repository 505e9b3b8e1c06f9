use rand::Rng;
use rand::seq::SliceRandom;
use algorithm::prelude::CDF;
use settings::SmatchConf;
use super::alignment::AlignmentProblem;
use super::internal_structure::Bijection;

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub bijection: Bijection,
    pub n_matched: usize,
    /// accepted moves over all restarts
    pub n_moves: usize,
    pub budget_exhausted: bool,
}

/// Map every predicted variable to the free candidate with the most matched local triples
pub fn smart_init(problem: &AlignmentProblem, bijection: &mut Bijection) {
    for x_prime in 0..problem.pred.n_variables() {
        let best = problem.candidates[x_prime].iter()
            .filter(|&&x| !bijection.is_gold_node_bounded(x))
            .map(|&x| (problem.local_weight(x_prime, x), x))
            .filter(|&(w, _)| w > 0)
            // keep the first of equal weights
            .fold(None, |best: Option<(usize, usize)>, item| match best {
                Some(b) if b.0 >= item.0 => Some(b),
                _ => Some(item),
            });

        if let Some((_, x)) = best {
            bijection.push_both(x, x_prime);
        }
    }
}

/// Visit predicted variables in random order and draw a free candidate for each, candidates with
/// more matched local triples are more likely.
pub fn random_init<R: Rng>(problem: &AlignmentProblem, bijection: &mut Bijection, rng: &mut R) {
    let mut order = (0..problem.pred.n_variables()).collect::<Vec<_>>();
    order.shuffle(rng);

    for x_prime in order {
        let free = problem.candidates[x_prime].iter()
            .cloned()
            .filter(|&x| !bijection.is_gold_node_bounded(x))
            .collect::<Vec<_>>();
        if free.is_empty() {
            continue;
        }

        let weights = free.iter()
            .map(|&x| (problem.local_weight(x_prime, x) + 1) as f64)
            .collect::<Vec<_>>();
        let cdf = CDF::new(&weights);
        let x = free[cdf.draw_sample(rng.gen::<f64>())];
        bijection.push_both(x, x_prime);
    }
}

/// Best single move from `bijection`: remap one predicted variable to one of its candidates,
/// swapping with the predicted variable that currently holds that candidate.
fn best_move(problem: &AlignmentProblem, bijection: &Bijection) -> Option<(i64, Vec<(usize, Option<usize>)>)> {
    let mut best: Option<(i64, Vec<(usize, Option<usize>)>)> = None;

    for x_prime in 0..problem.pred.n_variables() {
        let current = bijection.to_x(x_prime);
        for &x in &problem.candidates[x_prime] {
            if current == Some(x) {
                continue;
            }

            let changes = match bijection.to_x_prime(x) {
                Some(holder) => vec![(x_prime, Some(x)), (holder, current)],
                None => vec![(x_prime, Some(x))],
            };
            let gain = problem.gain(bijection, &changes);
            if gain > 0 && best.as_ref().map_or(true, |b| gain > b.0) {
                best = Some((gain, changes));
            }
        }
    }

    best
}

/// Hill climbing with restarts. Restart 0 starts from `smart_init`, the others from
/// `random_init`. The search stops as soon as every triple of the smaller graph is matched, or
/// when the move budget is spent, in which case the best bijection found so far is returned.
pub fn search<R: Rng>(problem: &AlignmentProblem, conf: &SmatchConf, rng: &mut R) -> SearchOutcome {
    let upper_bound = problem.upper_bound();
    let mut bijection = Bijection::new(problem.gold.n_variables(), problem.pred.n_variables());
    let mut outcome = SearchOutcome {
        bijection: bijection.clone(),
        n_matched: problem.score(&bijection),
        n_moves: 0,
        budget_exhausted: false,
    };

    for restart in 0..conf.n_restarts.max(1) {
        bijection.clear();
        if restart == 0 {
            smart_init(problem, &mut bijection);
        } else {
            random_init(problem, &mut bijection, rng);
        }

        let mut score = problem.score(&bijection);
        while score < upper_bound {
            if conf.max_moves.map_or(false, |max_moves| outcome.n_moves >= max_moves) {
                outcome.budget_exhausted = true;
                break;
            }

            match best_move(problem, &bijection) {
                None => break,
                Some((gain, changes)) => {
                    bijection.apply(&changes);
                    score = (score as i64 + gain) as usize;
                    outcome.n_moves += 1;
                }
            }
        }

        trace!("restart {}: {} matched triples", restart, score);
        if restart == 0 || score > outcome.n_matched {
            outcome.n_matched = score;
            outcome.bijection = bijection.clone();
        }

        if outcome.n_matched == upper_bound || outcome.budget_exhausted {
            break;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use penman::parse;
    use evaluation_metrics::smatch::internal_structure::GraphTriples;

    #[test]
    fn test_search_escapes_smart_init() {
        // smart init maps the males in order of appearance, the relations prefer the swap
        let gold = parse("(a / widow.n.01 :tgt (b / male.n.02) :equ (c / male.n.02))").unwrap();
        let pred = parse("(p / widow.n.01 :equ (q / male.n.02) :tgt (r / male.n.02))").unwrap();
        let gold_triples = GraphTriples::new(&gold, false);
        let pred_triples = GraphTriples::new(&pred, false);
        let problem = AlignmentProblem::new(&gold_triples, &pred_triples);

        let conf = SmatchConf { n_restarts: 3, ..Default::default() };
        let outcome = search(&problem, &conf, &mut StdRng::seed_from_u64(120));
        assert_eq!(outcome.n_matched, 5);
        assert_eq!(outcome.bijection.to_x(1), Some(2));
        assert_eq!(outcome.bijection.to_x(2), Some(1));
        assert!(!outcome.budget_exhausted);
    }

    #[test]
    fn test_budget_is_reported() {
        let gold = parse("(a / widow.n.01 :tgt (b / male.n.02) :equ (c / male.n.02))").unwrap();
        let pred = parse("(p / widow.n.01 :equ (q / male.n.02) :tgt (r / male.n.02))").unwrap();
        let gold_triples = GraphTriples::new(&gold, false);
        let pred_triples = GraphTriples::new(&pred, false);
        let problem = AlignmentProblem::new(&gold_triples, &pred_triples);

        let conf = SmatchConf { n_restarts: 3, max_moves: Some(0), ..Default::default() };
        let outcome = search(&problem, &conf, &mut StdRng::seed_from_u64(120));
        assert!(outcome.budget_exhausted);
        assert_eq!(outcome.n_moves, 0);
        // still the smart initialisation score
        assert_eq!(outcome.n_matched, 3);
    }

    #[test]
    fn test_random_init_is_injective() {
        let gold = parse("(a / male.n.02 :equ (b / male.n.02) :equ (c / male.n.02))").unwrap();
        let pred = parse("(p / male.n.02 :equ (q / male.n.02))").unwrap();
        let gold_triples = GraphTriples::new(&gold, false);
        let pred_triples = GraphTriples::new(&pred, false);
        let problem = AlignmentProblem::new(&gold_triples, &pred_triples);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut bijection = Bijection::new(3, 2);
            random_init(&problem, &mut bijection, &mut rng);
            assert_eq!(bijection.len(), 2);
            assert_ne!(bijection.to_x(0), bijection.to_x(1));
        }
    }
}
