pub mod smatch;
pub mod fine_grained;
pub mod aggregation;

pub use self::smatch::{smatch_score, SmatchScore};
pub use self::fine_grained::Category;
pub use self::aggregation::{Aggregator, EvaluationReport, PairRecord, PairStatus, evaluate_records};

/// Return `(f1, precision, recall)` for `n_matched` items out of `n_pred` predicted and `n_gold`
/// gold items. Empty denominators give 0.
pub fn f1_precision_recall(n_matched: usize, n_pred: usize, n_gold: usize) -> (f64, f64, f64) {
    let precision = if n_pred == 0 { 0.0 } else { n_matched as f64 / n_pred as f64 };
    let recall = if n_gold == 0 { 0.0 } else { n_matched as f64 / n_gold as f64 };
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    (f1, precision, recall)
}
