use serde_json;
use std::path::PathBuf;
use std::fs::File;
use std::ffi::OsStr;
use tamr::penman::parse;
use tamr::settings::SmatchConf;
use tamr::evaluation_metrics::smatch::*;

#[derive(Deserialize)]
struct TestCase {
    comment: String,
    gold: String,
    pred: String,
    f1_precision_recall: (f64, f64, f64),
    n_matched: usize,
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() <= 1e-9, "{} != {}", a, b);
}

fn score(gold: &str, pred: &str) -> SmatchScore {
    smatch_score(&parse(gold).unwrap(), &parse(pred).unwrap(), &SmatchConf::default(), 120)
}

#[test]
fn run_test_from_data() {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("tests/evaluation_metrics/data");

    let mut n_cases = 0;
    for entry in dir.read_dir().unwrap() {
        if let Ok(entry) = entry {
            if entry.path().extension().unwrap_or(OsStr::new("")) == "json" {
                let input: TestCase = serde_json::from_reader(File::open(entry.path()).unwrap()).unwrap();

                let result = score(&input.gold, &input.pred);
                assert_eq!(result.n_matched, input.n_matched, "{}", input.comment);
                assert_close(result.f1, input.f1_precision_recall.0);
                assert_close(result.precision, input.f1_precision_recall.1);
                assert_close(result.recall, input.f1_precision_recall.2);
                n_cases += 1;
            }
        }
    }

    assert!(n_cases > 0);
}

#[test]
fn test_renaming_variables_keeps_perfect_score() {
    let gold = r#"(t00003 / tombstone.n.01 :ent (x1 / female.n.02 :nam "GEERTJE" :rol (x2 / wife.n.01 :tgt (x3 / male.n.02 :nam "JAN"))))"#;
    let renamed = gold.replace("x1", "y7").replace("x2", "y1").replace("x3", "y2");

    let result = score(gold, &renamed);
    assert_eq!((result.f1, result.precision, result.recall), (1.0, 1.0, 1.0));
    assert!(result.alignment.contains(&("y7".to_owned(), "x1".to_owned())));
}

#[test]
fn test_swapping_sides_swaps_precision_and_recall() {
    let gold = r#"(t00000 / tombstone.n.01 :ent (x1 / male.n.02 :nam "JAN" :dob (x2 / date.n.05 :yoc "1900")))"#;
    let pred = r#"(t00000 / tombstone.n.01 :ent (x1 / male.n.02 :nam "JAN"))"#;

    let forward = score(gold, pred);
    let backward = score(pred, gold);
    assert_close(forward.precision, backward.recall);
    assert_close(forward.recall, backward.precision);
    assert_close(forward.f1, backward.f1);
    assert_eq!(forward.unmatched_gold, backward.unmatched_pred);
}

#[test]
fn test_extra_triple_never_increases_precision() {
    let gold = r#"(t00000 / tombstone.n.01 :ent (x1 / male.n.02 :nam "JAN"))"#;
    let pred = r#"(t00000 / tombstone.n.01 :ent (x1 / male.n.02 :nam "JAN" :hco "14190"))"#;
    let bigger = r#"(t00000 / tombstone.n.01 :ent (x1 / male.n.02 :nam "JAN" :hco "14190" :geo "2759794"))"#;

    let before = score(gold, pred);
    let after = score(gold, bigger);
    assert!(after.precision <= before.precision);
    assert!(after.n_pred_triples - after.n_matched >= before.n_pred_triples - before.n_matched);
    assert_close(after.recall, before.recall);
}

#[test]
fn test_inverse_roles_score_identically() {
    let inverse = "(x1 / male.n.02 :nam \"JAN\" :tgt-of (x2 / widow.n.01))";
    let forward = "(x2 / widow.n.01 :tgt (x1 / male.n.02 :nam \"JAN\"))";
    let third = "(t00009 / tombstone.n.01 :ent (y1 / male.n.02 :nam \"JAN\" :tgt-of (y2 / wife.n.01)))";

    let mut a = parse(inverse).unwrap().triples();
    let mut b = parse(forward).unwrap().triples();
    a.sort();
    b.sort();
    assert_eq!(a, b);

    let with_inverse = score(third, inverse);
    let with_forward = score(third, forward);
    assert_close(with_inverse.f1, with_forward.f1);
    assert_eq!(with_inverse.n_matched, with_forward.n_matched);
}

#[test]
fn test_same_seed_same_score() {
    let gold = r#"(t00001 / tombstone.n.01 :ent (x1 / male.n.02) :ent (x2 / male.n.02) :ent (x3 / female.n.02 :rol (x4 / wife.n.01 :tgt x2)))"#;
    let pred = r#"(t00001 / tombstone.n.01 :ent (x1 / male.n.02) :ent (x3 / female.n.02 :rol (x4 / mother.n.01 :tgt x1)))"#;
    let conf = SmatchConf { n_restarts: 10, ..Default::default() };

    let first = smatch_score(&parse(gold).unwrap(), &parse(pred).unwrap(), &conf, 42);
    let second = smatch_score(&parse(gold).unwrap(), &parse(pred).unwrap(), &conf, 42);
    assert_eq!(first.n_matched, second.n_matched);
    assert_eq!(first.alignment, second.alignment);
}
