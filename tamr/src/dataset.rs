use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use regex::Regex;
use serde_json;
use errors::*;

/// One line of a prediction file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// gold PENMAN text
    pub label: String,
    /// predicted PENMAN text
    pub predict: String,
}

/// Bucket label to the indexes of the records it contains
pub type Buckets = BTreeMap<String, Vec<usize>>;

/// Read newline-delimited JSON records. Blank lines are skipped, a line that is not a valid
/// record is an error.
pub fn read_jsonl(fpath: &Path) -> Result<Vec<PredictionRecord>> {
    let reader = BufReader::new(File::open(fpath)
        .chain_err(|| format!("Cannot open prediction file: {:?}", fpath))?);

    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.chain_err(|| format!("Cannot read line {} of {:?}", i + 1, fpath))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: PredictionRecord = serde_json::from_str(&line)
            .chain_err(|| format!("Invalid record at line {} of {:?}", i + 1, fpath))?;
        records.push(record);
    }

    info!("Load {} records from {:?}", records.len(), fpath);
    Ok(records)
}

lazy_static! {
    static ref RECORD_ID: Regex = Regex::new(r"^t(\d+)(?:\.[A-Za-z]+)?$").unwrap();
}

/// Parse a record id such as `t00424` or `t00424.jpg` into its index
pub fn record_index(id: &str) -> Option<usize> {
    RECORD_ID.captures(id)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
}

/// Resolve the record ids of each bucket into record indexes. Ids that do not look like
/// `t` + digits are dropped with a warning.
pub fn resolve_buckets(raw: BTreeMap<String, Vec<String>>) -> Buckets {
    raw.into_iter()
        .map(|(label, ids)| {
            let mut indexes = ids.iter()
                .filter_map(|id| {
                    let index = record_index(id);
                    if index.is_none() {
                        warn!("Bucket `{}`: ignore invalid record id `{}`", label, id);
                    }
                    index
                })
                .collect::<Vec<_>>();
            indexes.sort();
            indexes.dedup();
            (label, indexes)
        })
        .collect()
}

/// Read a JSON object mapping bucket labels to lists of record ids
pub fn read_buckets(fpath: &Path) -> Result<Buckets> {
    let reader = BufReader::new(File::open(fpath)
        .chain_err(|| format!("Cannot open bucket file: {:?}", fpath))?);
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_reader(reader)
        .chain_err(|| format!("Invalid bucket file: {:?}", fpath))?;

    Ok(resolve_buckets(raw))
}
