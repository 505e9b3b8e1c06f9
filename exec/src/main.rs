// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

extern crate tamr;

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate serde_json;
extern crate csv;
extern crate env_logger;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate prettytable;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tamr::prelude::*;
use errors::*;

mod errors;
mod report;

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        eprintln!("error: {}", e);
        for e in e.iter().skip(1) {
            eprintln!("caused by: {}", e);
        }

        // The backtrace is not always generated. Try to run with `RUST_BACKTRACE=1`.
        if let Some(backtrace) = e.backtrace() {
            eprintln!("{:?}", backtrace);
        }

        ::std::process::exit(1);
    }
}

fn read_text(fpath: &str) -> Result<String> {
    let mut text = String::new();
    File::open(fpath)
        .chain_err(|| format!("Cannot open {}", fpath))?
        .read_to_string(&mut text)
        .chain_err(|| format!("Cannot read {}", fpath))?;
    Ok(text)
}

fn run() -> Result<()> {
    let mut timer = Timer::start();

    let app_m = clap_app!(tamr =>
        (about: "Evaluate predicted tombstone meaning representations against gold graphs")
        (@arg settings: -c +takes_value "settings file")
        (@subcommand eval =>
            (about: "Score a file of (label, predict) records")
            (@arg input: -i +required +takes_value "newline-delimited JSON records")
            (@arg buckets: -b +takes_value "JSON object mapping bucket labels to record ids")
            (@arg output: -o +takes_value "write the full report as JSON")
            (@arg pairs: -p +takes_value "write one CSV row per pair")
        )
        (@subcommand pair =>
            (about: "Score a single gold/predicted pair")
            (@arg gold: -g +required +takes_value "gold PENMAN file")
            (@arg pred: -p +required +takes_value "predicted PENMAN file")
        )
    ).get_matches();

    let settings = match app_m.value_of("settings") {
        Some(fsettings) => Settings::from_file(Path::new(fsettings))?,
        None => Settings::default(),
    };
    debug!("Current settings: {:?}", settings);

    match app_m.subcommand() {
        ("eval", Some(sub_m)) => {
            let finput = Path::new(sub_m.value_of("input").unwrap_or_default());
            let records = read_jsonl(finput)?;
            let buckets = match sub_m.value_of("buckets") {
                Some(fbuckets) => Some(read_buckets(Path::new(fbuckets))?),
                None => None,
            };
            timer.lap_and_report(&format!("Load {} records", records.len()));

            let evaluation = evaluate_records(&records, &settings, buckets.as_ref());
            timer.lap_and_report("Finish scoring");

            report::print_report(&evaluation);
            if let Some(foutput) = sub_m.value_of("output") {
                report::write_report(Path::new(foutput), &evaluation)?;
            }
            if let Some(fpairs) = sub_m.value_of("pairs") {
                report::write_pairs(Path::new(fpairs), &evaluation)?;
            }
        },
        ("pair", Some(sub_m)) => {
            let gold_text = read_text(sub_m.value_of("gold").unwrap_or_default())?;
            let pred_text = read_text(sub_m.value_of("pred").unwrap_or_default())?;
            let gold = parse(&gold_text).chain_err(|| "Gold graph is ill-formed")?;
            let pred = parse(&pred_text).chain_err(|| "Predicted graph is ill-formed")?;

            let score = smatch_score(&gold, &pred, &settings.smatch, settings.smatch.manual_seed);
            report::print_pair(&score);
        },
        _ => bail!("No subcommand provided, see --help"),
    }

    timer.lap_and_report("Finish the program");
    Ok(())
}
