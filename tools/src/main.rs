//! flow-runner: headless solver for airport flow networks.
//!
//! Usage:
//!   flow-runner --input caso200.txt
//!   flow-runner --input caso200.txt --json --db runs.db --strict
//!   flow-runner --generate 200 --routes 4 --seed 12345 --out caso200.txt

use airflow_core::{
    config::RunConfig,
    engine::{FlowEngine, FlowOutcome},
    store::FlowStore,
    synth::{self, NetworkGenerator},
};
use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::io::BufReader;

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    run_id: Option<&'a str>,
    #[serde(flatten)]
    outcome: &'a FlowOutcome,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match find_arg(&args, "--config") {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if args.iter().any(|a| a == "--strict") {
        config.strict_pivots = true;
    }

    if let Some(airports) = find_arg(&args, "--generate") {
        let airports: usize = airports
            .parse()
            .with_context(|| format!("--generate expects a count, got '{airports}'"))?;
        let routes = parse_arg(&args, "--routes", config.routes_per_airport);
        let seed = parse_arg(&args, "--seed", 42u64);
        return generate(airports, routes, seed, find_arg(&args, "--out"));
    }

    let input = find_arg(&args, "--input")
        .context("missing --input FILE (or --generate N)")?;
    let json = args.iter().any(|a| a == "--json");

    let file = File::open(input).with_context(|| format!("Cannot read {input}"))?;
    let engine = FlowEngine::new(config);
    let outcome = engine.run(BufReader::new(file))?;

    let run_id = match find_arg(&args, "--db") {
        Some(db) => Some(record_run(db, input, &outcome)?),
        None => None,
    };

    if json {
        let out = JsonOutput { run_id: run_id.as_deref(), outcome: &outcome };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", outcome.report.render_text(engine.config.precision));
        if let Some(run_id) = run_id {
            println!();
            println!("  run_id:   {run_id}");
            println!("  residual: {:.3e}", outcome.residual);
        }
    }

    Ok(())
}

fn generate(airports: usize, routes: usize, seed: u64, out: Option<&str>) -> Result<()> {
    let records = NetworkGenerator::new(seed).generate(airports, routes);
    let text = synth::to_text(&records);
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Cannot write {path}"))?;
            log::info!("wrote {} records to {path}", records.len());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn record_run(db: &str, source: &str, outcome: &FlowOutcome) -> Result<String> {
    let mut store = FlowStore::open(db)?;
    store.migrate()?;
    let run_id = store.insert_run(source, outcome.report.volumes.len())?;
    store.insert_volumes(&run_id, &outcome.report)?;
    Ok(run_id)
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
