use std::collections::BTreeMap;
use rayon::prelude::*;
use dataset::{Buckets, PredictionRecord};
use errors::*;
use penman::{parse, Amr};
use settings::Settings;
use super::f1_precision_recall;
use super::fine_grained::Category;
use super::smatch::{smatch_score, SmatchScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    Scored,
    IllFormedGold,
    IllFormedPred,
}

/// Counts of matched, predicted and gold items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub n_matched: usize,
    pub n_pred: usize,
    pub n_gold: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Metrics {
    pub n_matched: usize,
    pub n_pred: usize,
    pub n_gold: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// One row of the per-pair listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairRecord {
    pub index: usize,
    pub id: String,
    pub status: PairStatus,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub n_matched: usize,
    pub n_pred_triples: usize,
    pub n_gold_triples: usize,
    pub budget_exhausted: bool,
    /// parse error of an ill-formed pair
    pub error: Option<String>,
}

/// Everything computed for one pair, before it is merged into the batch totals
#[derive(Debug, Clone)]
pub struct PairResult {
    pub record: PairRecord,
    pub categories: Vec<(Category, Counts)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub category: Category,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketReport {
    pub label: String,
    pub n_members: usize,
    pub n_scored: usize,
    /// mean smatch F1 of the scored members
    pub avg_f1: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub n_pairs: usize,
    pub n_scored: usize,
    pub n_ill_formed: usize,
    /// micro scores over all triples of the well-formed pairs
    pub smatch: Metrics,
    /// mean F1 over all pairs, an ill-formed pair counts as 0
    pub macro_f1_all: f64,
    /// mean F1 over well-formed pairs only
    pub macro_f1_well_formed: f64,
    pub categories: Vec<CategoryMetrics>,
    pub buckets: Vec<BucketReport>,
    pub pairs: Vec<PairRecord>,
}

impl Counts {
    pub fn new(n_matched: usize, n_pred: usize, n_gold: usize) -> Counts {
        Counts { n_matched, n_pred, n_gold }
    }

    pub fn add(&mut self, other: &Counts) {
        self.n_matched += other.n_matched;
        self.n_pred += other.n_pred;
        self.n_gold += other.n_gold;
    }

    pub fn metrics(&self) -> Metrics {
        let (f1, precision, recall) = f1_precision_recall(self.n_matched, self.n_pred, self.n_gold);
        Metrics { n_matched: self.n_matched, n_pred: self.n_pred, n_gold: self.n_gold, precision, recall, f1 }
    }
}

/// Record id: the gold top variable when it looks like `t00042`, else derived from the index
fn record_id(index: usize, gold: Option<&Amr>) -> String {
    if let Some(gold) = gold {
        let id = gold.id();
        if id.len() > 1 && id.starts_with('t') && id[1..].chars().all(|c| c.is_ascii_digit()) {
            return id.to_owned();
        }
    }

    format!("t{:05}", index)
}

/// Accumulates per-pair results into batch statistics
pub struct Aggregator<'a> {
    settings: &'a Settings,
    pairs: Vec<PairRecord>,
    smatch: Counts,
    categories: BTreeMap<Category, Counts>,
}

impl<'a> Aggregator<'a> {
    pub fn new(settings: &'a Settings) -> Aggregator<'a> {
        let mut categories = BTreeMap::new();
        if settings.fine_grained.enable {
            for &category in &settings.fine_grained.categories {
                categories.insert(category, Counts::default());
            }
        }

        Aggregator { settings, pairs: Vec::new(), smatch: Counts::default(), categories }
    }

    /// Score one pair. Does not touch the totals, so pairs can be scored concurrently and
    /// merged with `absorb` afterward.
    pub fn score_pair(&self, index: usize, gold_text: &str, pred_text: &str) -> PairResult {
        let gold = parse(gold_text);
        let pred = parse(pred_text);
        let id = record_id(index, gold.as_ref().ok());

        let (gold, pred) = match (gold, pred) {
            (Ok(gold), Ok(pred)) => (gold, pred),
            (Err(e), _) => {
                warn!("{}: ill-formed gold graph: {}", id, e);
                return PairResult { record: PairRecord::ill_formed(index, id, PairStatus::IllFormedGold, &e), categories: Vec::new() };
            },
            (_, Err(e)) => {
                warn!("{}: ill-formed prediction: {}", id, e);
                return PairResult { record: PairRecord::ill_formed(index, id, PairStatus::IllFormedPred, &e), categories: Vec::new() };
            },
        };

        let seed = self.settings.smatch.manual_seed.wrapping_add(index as u64);
        let score = smatch_score(&gold, &pred, &self.settings.smatch, seed);
        if score.budget_exhausted {
            warn!("{}: {}", id, Error::from(ErrorKind::AlignmentTimeout(score.n_moves)));
        }
        debug!("{}: smatch f1 = {:.3}", id, score.f1);

        let categories = self.categories.keys()
            .map(|&category| {
                let gold_tokens = category.extract_tokens(&gold);
                let pred_tokens = category.extract_tokens(&pred);
                let n_matched = gold_tokens.intersection(&pred_tokens).count();
                (category, Counts::new(n_matched, pred_tokens.len(), gold_tokens.len()))
            })
            .collect();

        PairResult { record: PairRecord::scored(index, id, &score), categories }
    }

    pub fn absorb(&mut self, result: PairResult) {
        if result.record.status == PairStatus::Scored {
            self.smatch.add(&Counts::new(result.record.n_matched, result.record.n_pred_triples, result.record.n_gold_triples));
        }
        for (category, counts) in result.categories {
            if let Some(total) = self.categories.get_mut(&category) {
                total.add(&counts);
            }
        }
        self.pairs.push(result.record);
    }

    pub fn finish(self, buckets: Option<&Buckets>) -> EvaluationReport {
        let n_pairs = self.pairs.len();
        let scored = self.pairs.iter().filter(|p| p.status == PairStatus::Scored).collect::<Vec<_>>();
        let n_scored = scored.len();
        let sum_f1: f64 = scored.iter().map(|p| p.f1).sum();

        let mean = |sum: f64, n: usize| if n == 0 { 0.0 } else { sum / n as f64 };

        let buckets = match buckets {
            None => Vec::new(),
            Some(buckets) => buckets.iter()
                .map(|(label, members)| {
                    let member_f1 = members.iter()
                        .filter_map(|&i| self.pairs.get(i))
                        .filter(|p| p.status == PairStatus::Scored)
                        .map(|p| p.f1)
                        .collect::<Vec<_>>();
                    BucketReport {
                        label: label.clone(),
                        n_members: members.len(),
                        n_scored: member_f1.len(),
                        avg_f1: mean(member_f1.iter().sum(), member_f1.len()),
                    }
                })
                .collect(),
        };

        let report = EvaluationReport {
            n_pairs,
            n_scored,
            n_ill_formed: n_pairs - n_scored,
            smatch: self.smatch.metrics(),
            macro_f1_all: mean(sum_f1, n_pairs),
            macro_f1_well_formed: mean(sum_f1, n_scored),
            categories: self.categories.iter()
                .map(|(&category, counts)| CategoryMetrics { category, metrics: counts.metrics() })
                .collect(),
            buckets,
            pairs: self.pairs,
        };

        info!("Evaluated {} pairs ({} ill-formed): micro f1 = {:.4}, macro f1 = {:.4}",
              report.n_pairs, report.n_ill_formed, report.smatch.f1, report.macro_f1_all);
        report
    }
}

impl PairRecord {
    fn scored(index: usize, id: String, score: &SmatchScore) -> PairRecord {
        PairRecord {
            index,
            id,
            status: PairStatus::Scored,
            precision: score.precision,
            recall: score.recall,
            f1: score.f1,
            n_matched: score.n_matched,
            n_pred_triples: score.n_pred_triples,
            n_gold_triples: score.n_gold_triples,
            budget_exhausted: score.budget_exhausted,
            error: None,
        }
    }

    fn ill_formed(index: usize, id: String, status: PairStatus, error: &Error) -> PairRecord {
        PairRecord {
            index,
            id,
            status,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            n_matched: 0,
            n_pred_triples: 0,
            n_gold_triples: 0,
            budget_exhausted: false,
            error: Some(error.to_string()),
        }
    }
}

/// Score a batch of records. With `settings.parallel` pairs are scored on the rayon pool, the
/// report is the same either way since every pair has its own seed.
pub fn evaluate_records(records: &[PredictionRecord], settings: &Settings, buckets: Option<&Buckets>) -> EvaluationReport {
    let mut aggregator = Aggregator::new(settings);

    let results = if settings.parallel {
        records.par_iter()
            .enumerate()
            .map(|(i, r)| aggregator.score_pair(i, &r.label, &r.predict))
            .collect::<Vec<_>>()
    } else {
        records.iter()
            .enumerate()
            .map(|(i, r)| aggregator.score_pair(i, &r.label, &r.predict))
            .collect::<Vec<_>>()
    };

    for result in results {
        aggregator.absorb(result);
    }
    aggregator.finish(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id() {
        let amr = parse("(t00042 / tombstone.n.01)").unwrap();
        assert_eq!(record_id(3, Some(&amr)), "t00042");
        let amr = parse("(x1 / tombstone.n.01)").unwrap();
        assert_eq!(record_id(3, Some(&amr)), "t00003");
        assert_eq!(record_id(12, None), "t00012");
    }

    #[test]
    fn test_ill_formed_gold() {
        let settings = Settings::default();
        let aggregator = Aggregator::new(&settings);
        let result = aggregator.score_pair(0, "(t00000 / tombstone.n.01", "(t00000 / tombstone.n.01)");
        assert_eq!(result.record.status, PairStatus::IllFormedGold);
        assert_eq!(result.record.id, "t00000");
        assert!(result.record.error.as_ref().unwrap().contains("never closed"));
        assert!(result.categories.is_empty());
    }

    #[test]
    fn test_disabled_categories() {
        let mut settings = Settings::default();
        settings.fine_grained.enable = false;
        let mut aggregator = Aggregator::new(&settings);
        let result = aggregator.score_pair(0, "(t00000 / tombstone.n.01)", "(t00000 / tombstone.n.01)");
        assert!(result.categories.is_empty());
        aggregator.absorb(result);

        let report = aggregator.finish(None);
        assert!(report.categories.is_empty());
        assert_eq!(report.smatch.f1, 1.0);
    }
}
