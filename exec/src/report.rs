use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use csv;
use serde_json;
use prettytable::Table;
use tamr::prelude::*;
use errors::*;

pub fn print_report(report: &EvaluationReport) {
    let mut table = Table::new();
    table.add_row(row!["pairs", "ill-formed", "precision", "recall", "f1", "macro-f1 (all)", "macro-f1 (well-formed)"]);
    table.add_row(row![
        report.n_pairs,
        report.n_ill_formed,
        format!("{:.4}", report.smatch.precision),
        format!("{:.4}", report.smatch.recall),
        format!("{:.4}", report.smatch.f1),
        format!("{:.4}", report.macro_f1_all),
        format!("{:.4}", report.macro_f1_well_formed)
    ]);
    table.printstd();

    if !report.categories.is_empty() {
        let mut table = Table::new();
        table.add_row(row!["category", "gold", "predicted", "matched", "precision", "recall", "f1"]);
        for c in &report.categories {
            let m = &c.metrics;
            table.add_row(row![
                c.category.name(), m.n_gold, m.n_pred, m.n_matched,
                format!("{:.4}", m.precision), format!("{:.4}", m.recall), format!("{:.4}", m.f1)
            ]);
        }
        table.printstd();
    }

    if !report.buckets.is_empty() {
        let mut table = Table::new();
        table.add_row(row!["bucket", "members", "scored", "avg-f1"]);
        for b in &report.buckets {
            table.add_row(row![b.label, b.n_members, b.n_scored, format!("{:.3}", b.avg_f1)]);
        }
        table.printstd();
    }
}

pub fn print_pair(score: &SmatchScore) {
    let mut table = Table::new();
    table.add_row(row!["matched", "predicted", "gold", "precision", "recall", "f1", "moves"]);
    table.add_row(row![
        score.n_matched, score.n_pred_triples, score.n_gold_triples,
        format!("{:.4}", score.precision), format!("{:.4}", score.recall), format!("{:.4}", score.f1),
        score.n_moves
    ]);
    table.printstd();
    if score.budget_exhausted {
        println!("search budget exhausted, the score is a lower bound");
    }

    let mut table = Table::new();
    table.add_row(row!["predicted", "gold"]);
    for &(ref x_prime, ref x) in &score.alignment {
        table.add_row(row![x_prime, x]);
    }
    table.printstd();

    for (title, triples) in &[("unmatched gold triples", &score.unmatched_gold), ("unmatched predicted triples", &score.unmatched_pred)] {
        println!("{} ({}):", title, triples.len());
        for triple in triples.iter() {
            println!("    {}", triple);
        }
    }
}

pub fn write_report(foutput: &Path, report: &EvaluationReport) -> Result<()> {
    let writer = BufWriter::new(File::create(foutput)
        .chain_err(|| format!("Cannot create report file: {:?}", foutput))?);
    serde_json::to_writer_pretty(writer, report)?;
    info!("Write report to {:?}", foutput);
    Ok(())
}

/// One row per pair: id, status, precision, recall, f1, ...
pub fn write_pairs(foutput: &Path, report: &EvaluationReport) -> Result<()> {
    let mut wtr = csv::Writer::from_path(foutput)
        .chain_err(|| format!("Cannot create pair file: {:?}", foutput))?;
    for pair in &report.pairs {
        wtr.serialize(pair)?;
    }
    wtr.flush()?;
    info!("Write {} pairs to {:?}", report.pairs.len(), foutput);
    Ok(())
}
