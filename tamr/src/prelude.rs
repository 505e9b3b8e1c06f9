pub use penman::{parse, Amr, PenmanTriple};
pub use settings::{Settings, SmatchConf, FineGrainedConf};
pub use evaluation_metrics::{smatch_score, SmatchScore, Category, Aggregator, EvaluationReport, PairRecord, PairStatus, evaluate_records};
pub use dataset::{PredictionRecord, Buckets, read_jsonl, read_buckets};
pub use utils::Timer;
