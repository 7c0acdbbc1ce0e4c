use log::{debug, info, warn};

use spatial_voting::builder::Builder;
use spatial_voting::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

mod config_reader;
mod io_csv;

use crate::spatial::config_reader::*;
use crate::spatial::io_csv::read_csv_positions;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SpatialError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Expected a positive integer"))]
    ParsingJsonNumber {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},

    #[snafu(display("Error opening the CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} is missing a coordinate column"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: {value:?} is not a number"))]
    CsvNumber {
        source: std::num::ParseFloatError,
        lineno: usize,
        value: String,
    },

    #[snafu(display("Invalid election: {source}"))]
    InvalidElection { source: InvalidInputError },
    #[snafu(display("The summary differs from the reference summary {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SResult<T> = Result<T, SpatialError>;

fn winner_id(election: &Election, winner: Option<usize>) -> JSValue {
    json!(winner.and_then(|cidx| election.candidate_id(cidx)).map(|id| id.0))
}

// Counts keyed by candidate label, for the given candidates only, in index order.
fn tally_to_json(
    tally: &[u64],
    cidxs: impl Iterator<Item = usize>,
) -> JSMap<String, JSValue> {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for cidx in cidxs {
        m.insert(candidate_label(cidx), json!(tally[cidx]));
    }
    m
}

fn plurality_to_json(election: &Election, r: &PluralityResult) -> JSValue {
    json!({
        "winner": r.winner_label,
        "winnerId": winner_id(election, Some(r.winner)),
        "voteCount": r.vote_count,
        "tally": tally_to_json(&r.tally, 0..r.tally.len()),
    })
}

fn irv_to_json(election: &Election, r: &IrvResult) -> JSValue {
    let rounds: Vec<JSValue> = r
        .rounds
        .iter()
        .map(|round| {
            // Candidates already out of the race are not reported.
            json!({
                "round": round.round,
                "tally": tally_to_json(&round.tally, round.remaining.iter().cloned()),
                "remaining": round
                    .remaining
                    .iter()
                    .map(|&c| candidate_label(c))
                    .collect::<Vec<String>>(),
                "eliminated": round.eliminated.map(candidate_label),
            })
        })
        .collect();
    json!({
        "winner": r.winner_label,
        "winnerId": winner_id(election, Some(r.winner)),
        "voteCount": r.vote_count,
        "rounds": rounds,
    })
}

fn borda_to_json(election: &Election, r: &BordaResult) -> JSValue {
    json!({
        "winner": r.winner_label,
        "winnerId": winner_id(election, Some(r.winner)),
        "score": r.score,
        "scores": tally_to_json(&r.scores, 0..r.scores.len()),
    })
}

fn condorcet_to_json(election: &Election, r: &CondorcetResult) -> JSValue {
    let n = r.matrix.len();
    let mut pairwise: JSMap<String, JSValue> = JSMap::new();
    for (cidx, row) in r.matrix.iter().enumerate() {
        pairwise.insert(
            candidate_label(cidx),
            json!(tally_to_json(row, (0..n).filter(|&other| other != cidx))),
        );
    }
    json!({
        "exists": r.exists(),
        "winner": r.winner_label,
        "winnerId": winner_id(election, r.winner),
        "pairwise": pairwise,
    })
}

fn build_summary_js(
    config: &ScenarioConfig,
    election: &Election,
    res: &ElectionResults,
) -> JSValue {
    let candidates: Vec<JSValue> = election
        .candidates()
        .iter()
        .enumerate()
        .map(|(cidx, c)| {
            json!({
                "id": c.id.0,
                "label": candidate_label(cidx),
                "x": c.position.x,
                "y": c.position.y,
            })
        })
        .collect();
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_jurisdiction.clone(),
        candidates,
        voters: res.num_voters,
    };
    json!({
        "config": c,
        "results": {
            "plurality": res.plurality.as_ref().map(|r| plurality_to_json(election, r)),
            "irv": res.irv.as_ref().map(|r| irv_to_json(election, r)),
            "borda": res.borda.as_ref().map(|r| borda_to_json(election, r)),
            "condorcet": condorcet_to_json(election, &res.condorcet),
        }
    })
}

// Relative paths are taken from the directory of the configuration file.
fn resolve_path(root: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

fn path_str(p: &Path) -> SResult<String> {
    match p.to_str() {
        Some(s) => Ok(s.to_string()),
        None => whatever!("Path is not valid unicode: {:?}", p),
    }
}

fn read_voters(
    root: &Path,
    config: &ScenarioConfig,
    input_override: Option<String>,
) -> SResult<Vec<Voter>> {
    if let Some(input_p) = input_override {
        info!("read_voters: using the voters from {:?}", input_p);
        return read_csv_positions(input_p.as_str(), &FileSource::csv(input_p.as_str()));
    }

    let mut voters: Vec<Voter> = config
        .voters
        .iter()
        .flatten()
        .map(|v| Voter::new(v.x, v.y))
        .collect();
    for cfs in config.voter_file_sources.iter().flatten() {
        let p = path_str(&resolve_path(root, cfs.file_path.as_str()))?;
        let mut file_voters = match cfs.provider.as_str() {
            "csv" => read_csv_positions(p.as_str(), cfs)?,
            x => whatever!("Provider not implemented {:?}", x),
        };
        voters.append(&mut file_voters);
    }
    Ok(voters)
}

fn build_election(
    root: &Path,
    config: &ScenarioConfig,
    input: Option<String>,
) -> SResult<Election> {
    let mut builder = Builder::new();
    for (idx, c) in config.candidates.iter().enumerate() {
        // Candidates without an explicit id are identified by their position.
        builder.add_candidate_with_id(c.id.unwrap_or(idx as u32), c.x, c.y);
    }
    for v in read_voters(root, config, input)? {
        builder.add_voter(v.position.x, v.position.y);
    }
    builder.build().context(InvalidElectionSnafu {})
}

fn write_summary(
    root: &Path,
    config: &ScenarioConfig,
    out: Option<String>,
    pretty_js_stats: &str,
) -> SResult<()> {
    let out_p: Option<PathBuf> = match out {
        Some(x) if x.is_empty() || x == "stdout" => None,
        Some(x) => Some(PathBuf::from(x)),
        None => config
            .output_settings
            .output_directory
            .as_ref()
            .map(|d| resolve_path(root, d.as_str()).join("summary.json")),
    };
    match out_p {
        None => {
            println!("{}", pretty_js_stats);
        }
        Some(p) => {
            let path = path_str(&p)?;
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context(WritingOutputSnafu { path: path.clone() })?;
            }
            info!("Writing summary to {:?}", path);
            fs::write(&p, pretty_js_stats).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

pub fn run_election(
    config_path: Option<String>,
    input: Option<String>,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> SResult<()> {
    let config_path = match config_path {
        Some(p) => p,
        None => whatever!("A scenario file must be provided with --config"),
    };
    let config_p = Path::new(config_path.as_str());
    let config = read_config(config_path.as_str())?;
    info!("config: {:?}", config);

    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
    let election = build_election(root_p, &config, input)?;
    let res = election.tabulate().context(InvalidElectionSnafu {})?;
    debug!("res {:?}", res);

    let result_js = build_summary_js(&config, &election, &res);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(WritingJsonSnafu {})?;
    write_summary(root_p, &config, out, pretty_js_stats.as_str())?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p.as_str())?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu { path: summary_p }.fail();
        }
        info!("The summary matches the reference {:?}", summary_p);
    }

    Ok(())
}

#[cfg(test)]
fn test_data_path(test_name: &str, file_name: &str) -> String {
    format!(
        "{}/tests/data/{}/{}",
        env!("CARGO_MANIFEST_DIR"),
        test_name,
        file_name
    )
}

#[cfg(test)]
fn run_election_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> SResult<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    info!("Running test {}", test_name);
    let res = run_election(
        Some(test_data_path(test_name, config_lpath)),
        None,
        Some("stdout".to_string()),
        Some(test_data_path(test_name, summary_lpath)),
    );
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = snafu::ErrorCompat::backtrace(e) {
            eprintln!("trace: {}", bt);
        }
    }
    res
}

#[cfg(test)]
fn test_wrapper(test_name: &str) {
    let res = run_election_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    );
    assert!(res.is_ok(), "{:?}", res);
}
