use std::collections::BTreeMap;
use serde_json;
use tamr::dataset::{PredictionRecord, resolve_buckets};
use tamr::evaluation_metrics::*;
use tamr::evaluation_metrics::aggregation::CategoryMetrics;
use tamr::settings::Settings;

const GOLD: &str = r#"(t00000 / tombstone.n.01 :ent (x1 / male.n.02 :nam "JAN" :dob (x2 / date.n.05 :yoc "1900")))"#;

fn record(label: &str, predict: &str) -> PredictionRecord {
    PredictionRecord { label: label.to_owned(), predict: predict.to_owned() }
}

fn category<'a>(report: &'a EvaluationReport, category: Category) -> &'a CategoryMetrics {
    report.categories.iter().find(|c| c.category == category).unwrap()
}

#[test]
fn test_wrong_year() {
    let predict = GOLD.replace("1900", "1901");
    let report = evaluate_records(&[record(GOLD, &predict)], &Settings::default(), None);

    assert_eq!(report.n_ill_formed, 0);
    assert!(report.smatch.f1 < 1.0);
    assert_eq!(report.smatch.n_matched, 6);
    assert_eq!(report.smatch.n_gold - report.smatch.n_matched, 1);
    assert_eq!(report.smatch.n_pred - report.smatch.n_matched, 1);

    let date = &category(&report, Category::Date).metrics;
    assert_eq!((date.n_matched, date.n_pred, date.n_gold), (0, 1, 1));
    assert_eq!(date.f1, 0.0);
    assert_eq!(category(&report, Category::NamedEntity).metrics.f1, 1.0);
    assert_eq!(category(&report, Category::Concept).metrics.f1, 1.0);
}

#[test]
fn test_name_literal_is_exact_match() {
    let predict = GOLD.replace("\"JAN\"", "\"JAM\"");
    let report = evaluate_records(&[record(GOLD, &predict)], &Settings::default(), None);
    assert_eq!(category(&report, Category::NamedEntity).metrics.recall, 0.0);

    let report = evaluate_records(&[record(GOLD, GOLD)], &Settings::default(), None);
    assert_eq!(category(&report, Category::NamedEntity).metrics.recall, 1.0);
}

#[test]
fn test_one_malformed_prediction() {
    let records = vec![
        record(GOLD, GOLD),
        record(GOLD, &format!("{})", GOLD)),
        record(GOLD, &GOLD.replace("1900", "1901")),
    ];
    let report = evaluate_records(&records, &Settings::default(), None);
    let alone = evaluate_records(&[records[0].clone(), records[2].clone()], &Settings::default(), None);

    assert_eq!(report.n_pairs, 3);
    assert_eq!(report.n_ill_formed, 1);
    assert_eq!(report.n_scored, 2);
    assert_eq!(report.pairs[1].status, PairStatus::IllFormedPred);
    assert!(report.pairs[1].error.as_ref().unwrap().contains("trailing `)`"));

    // the other pairs are not affected by the failure
    assert_eq!(report.smatch.n_matched, alone.smatch.n_matched);
    assert_eq!(report.smatch.f1, alone.smatch.f1);
    assert_eq!(report.pairs[2].f1, alone.pairs[1].f1);
    assert!((report.macro_f1_well_formed - alone.macro_f1_well_formed).abs() < 1e-12);
    assert!((report.macro_f1_all - (1.0 + 6.0 / 7.0) / 3.0).abs() < 1e-12);
}

#[test]
fn test_record_ids() {
    let records = vec![
        record(GOLD, GOLD),
        record("(x1 / tombstone.n.01)", "(x1 / tombstone.n.01)"),
        record("(t00042 / tombstone.n.01", "(t00042 / tombstone.n.01)"),
    ];
    let report = evaluate_records(&records, &Settings::default(), None);
    let ids = report.pairs.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["t00000", "t00001", "t00002"]);
    assert_eq!(report.pairs[2].status, PairStatus::IllFormedGold);
}

#[test]
fn test_buckets() {
    let records = vec![
        record(GOLD, GOLD),
        record(GOLD, "(t00001 / tombstone.n.01)"),
        record(GOLD, "(t00002 / tombstone.n.01"),
    ];
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(r#"{
        "figurative_language": ["t00000.jpg", "t00001.jpg"],
        "multiple_persons": ["t00002.jpg", "t00099.jpg"]
    }"#).unwrap();
    let buckets = resolve_buckets(raw);

    let report = evaluate_records(&records, &Settings::default(), Some(&buckets));
    assert_eq!(report.buckets.len(), 2);

    let figurative = &report.buckets[0];
    assert_eq!(figurative.label, "figurative_language");
    assert_eq!((figurative.n_members, figurative.n_scored), (2, 2));
    let partial_f1 = report.pairs[1].f1;
    assert!((figurative.avg_f1 - (1.0 + partial_f1) / 2.0).abs() < 1e-12);

    let multiple = &report.buckets[1];
    assert_eq!((multiple.n_members, multiple.n_scored), (2, 0));
    assert_eq!(multiple.avg_f1, 0.0);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let records = vec![
        record(GOLD, GOLD),
        record(GOLD, &GOLD.replace("male.n.02", "female.n.02")),
        record(GOLD, "(t00002 / tombstone.n.01 :ent (x1 / male.n.02 :nam \"JAN\"))"),
        record(GOLD, "(t00003 / tombstone.n.01"),
    ];

    let mut settings = Settings::default();
    settings.parallel = true;
    let parallel = evaluate_records(&records, &settings, None);
    settings.parallel = false;
    let sequential = evaluate_records(&records, &settings, None);

    assert_eq!(serde_json::to_value(&parallel).unwrap(), serde_json::to_value(&sequential).unwrap());
}

#[test]
fn test_non_ascii_role_is_scored() {
    let records = vec![
        record(GOLD, GOLD),
        record(GOLD, r#"(t00000 / tombstone.n.01 :aé (x1 / male.n.02 :nam "JAN"))"#),
    ];
    let mut settings = Settings::default();
    settings.parallel = true;
    let report = evaluate_records(&records, &settings, None);

    assert_eq!(report.n_scored, 2);
    assert_eq!(report.pairs[1].status, PairStatus::Scored);
    assert!(report.pairs[1].f1 > 0.0 && report.pairs[1].f1 < 1.0);
    let member = &category(&report, Category::Member).metrics;
    assert_eq!((member.n_matched, member.n_pred, member.n_gold), (1, 1, 2));
}

#[test]
fn test_exhausted_budget_still_scores_the_pair() {
    // the greedy start maps the males in order of appearance, the relations prefer the swap
    let gold = "(a / widow.n.01 :tgt (b / male.n.02) :equ (c / male.n.02))";
    let pred = "(p / widow.n.01 :equ (q / male.n.02) :tgt (r / male.n.02))";
    let records = vec![record(GOLD, GOLD), record(gold, pred)];

    let mut settings = Settings::default();
    let unbounded = evaluate_records(&records, &settings, None);
    assert!(!unbounded.pairs[1].budget_exhausted);
    assert_eq!(unbounded.pairs[1].f1, 1.0);

    settings.smatch.max_moves = Some(0);
    let report = evaluate_records(&records, &settings, None);
    let pair = &report.pairs[1];
    assert!(pair.budget_exhausted);
    assert_eq!(pair.status, PairStatus::Scored);
    assert!((pair.f1 - 0.6).abs() < 1e-12);

    assert_eq!(report.n_scored, 2);
    assert_eq!(report.n_ill_formed, 0);
    assert_eq!(report.smatch.n_matched, 7 + 3);
    assert_eq!(report.smatch.n_gold, 7 + 5);
    assert_eq!(report.smatch.n_pred, 7 + 5);
}
