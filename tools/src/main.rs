//! labor-runner: headless batch runner for the labor-supply choice simulation.
//!
//! Usage:
//!   labor-runner
//!   labor-runner --seed 1234 --agents 1000000 --out consumption.npy
//!   labor-runner --config model.json --summary-json
//!
//! With no arguments it runs the fixed default configuration and
//! writes `consumption.npy` to the working directory.

use anyhow::{Context, Result};
use laborsim_core::{config::ModelConfig, engine::ChoiceEngine, outcome::ChoiceSummary};
use std::env;

const KNOWN_FLAGS: &[&str] = &["--config", "--seed", "--agents", "--out", "--summary-json"];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    for flag in unknown_flags(&args) {
        log::warn!("Unknown flag ignored: {flag}");
    }
    let mut config = match find_arg(&args, "--config") {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed)?;
    config.num_grid = parse_arg(&args, "--agents", config.num_grid)?;
    if let Some(out) = find_arg(&args, "--out") {
        config.output_path = out.to_string();
    }
    let summary_json = args.iter().any(|a| a == "--summary-json");

    if !summary_json {
        println!("labor-runner");
        println!("  seed:        {}", config.seed);
        println!("  agents:      {}", config.num_grid);
        println!("  max_grid:    {}", config.max_grid);
        println!("  floor:       {}", config.floor);
        println!("  disutility:  {}", config.disutility);
        println!("  output:      {}", config.output_path);
        println!();
    }

    let mut engine = ChoiceEngine::new(config)?;
    let outcome = engine.run_and_persist()?;

    if summary_json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    } else {
        print_summary(&outcome.summary);
    }
    for entry in engine.event_log() {
        log::debug!("{} {} {}", entry.seq, entry.stage, entry.payload);
    }
    Ok(())
}

fn print_summary(summary: &ChoiceSummary) {
    println!("=== RUN SUMMARY ===");
    println!("  agents:              {}", summary.agents);
    println!("  work:                {}", summary.work_count);
    println!("  unemployed:          {}", summary.unemployed_count);
    println!("  work share:          {:.4}", summary.work_share);
    println!("  logit work share:    {:.4}", summary.expected_work_share);
    println!("  mean chosen utility: {:.4}", summary.mean_chosen_utility);
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// `default` when `flag` is absent; an error when its value does not parse.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match find_arg(args, flag) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {flag}: {value:?}")),
        None => Ok(default),
    }
}

fn unknown_flags(args: &[String]) -> Vec<&str> {
    args.iter()
        .skip(1)
        .map(String::as_str)
        .filter(|a| a.starts_with("--") && !KNOWN_FLAGS.contains(a))
        .collect()
}
