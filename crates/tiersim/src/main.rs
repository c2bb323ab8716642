//! TierSim - compares cache write policies on a shared workload

mod report;
mod runner;
mod trace;
mod workload;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tiercache::{SimConfig, WritePolicy};
use tracing::{info, warn};

use crate::report::{Summary, WorkloadSource};
use crate::runner::RunOptions;
use crate::workload::WorkloadSpec;

/// Policies to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    WriteThrough,
    WriteBack,
    Both,
}

impl PolicyArg {
    fn policies(self) -> Vec<WritePolicy> {
        match self {
            PolicyArg::WriteThrough => vec![WritePolicy::WriteThrough],
            PolicyArg::WriteBack => vec![WritePolicy::WriteBack],
            PolicyArg::Both => WritePolicy::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write policy to simulate
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Both)]
    policy: PolicyArg,

    /// Cache capacity in lines (overrides the config file)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Number of generated requests
    #[arg(short = 'n', long, default_value_t = 1000)]
    requests: usize,

    /// Generated addresses are drawn from 1..=ADDR_RANGE
    #[arg(long, default_value_t = 20)]
    addr_range: u64,

    /// Probability that a generated request is a read
    #[arg(long, default_value_t = 0.6)]
    read_ratio: f64,

    /// Workload PRNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Replay a trace file instead of generating a workload
    #[arg(short, long, conflicts_with_all = ["requests", "addr_range", "read_ratio", "seed"])]
    trace: Option<PathBuf>,

    /// Save the request stream as a trace file
    #[arg(long)]
    dump_workload: Option<PathBuf>,

    /// JSON file with capacity and timing costs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Flush dirty lines before reporting
    #[arg(long)]
    flush_at_end: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the report
    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();

    info!("Starting TierSim v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    config.validate().context("invalid simulation config")?;

    let (source, requests) = match &args.trace {
        Some(path) => {
            let requests = trace::read_trace(path)
                .with_context(|| format!("failed to read trace {}", path.display()))?;
            info!("Loaded {} requests from {}", requests.len(), path.display());
            let source = WorkloadSource::Trace {
                path: path.display().to_string(),
                requests: requests.len(),
            };
            (source, requests)
        }
        None => {
            let spec = WorkloadSpec {
                requests: args.requests,
                addr_range: args.addr_range,
                read_ratio: args.read_ratio,
                seed: args.seed,
            };
            let requests = workload::generate(&spec)?;
            info!("Generated {} requests (seed {})", requests.len(), spec.seed);
            (WorkloadSource::Generated(spec), requests)
        }
    };

    if requests.is_empty() {
        warn!("Workload is empty; every counter will stay at zero");
    }

    if let Some(path) = &args.dump_workload {
        trace::write_trace(path, &requests)
            .with_context(|| format!("failed to write trace {}", path.display()))?;
        info!("Workload saved to {}", path.display());
    }

    let options = RunOptions {
        config,
        flush_at_end: args.flush_at_end,
    };
    let reports = runner::compare(&args.policy.policies(), &requests, &options)?;
    let summary = Summary::new(source, config, args.flush_at_end, reports);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        report::write_json(&mut out, &summary)?;
    } else {
        report::write_text(&mut out, &summary)?;
    }
    out.flush()?;

    Ok(())
}

/// Load a JSON config; missing fields keep their defaults
fn load_config(path: &Path) -> Result<SimConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tiersim"]).unwrap();

        assert_eq!(args.policy, PolicyArg::Both);
        assert_eq!(args.requests, 1000);
        assert_eq!(args.addr_range, 20);
        assert_eq!(args.read_ratio, 0.6);
        assert_eq!(args.seed, 0);
        assert!(args.capacity.is_none());
        assert_eq!(args.policy.policies(), WritePolicy::ALL.to_vec());
    }

    #[test]
    fn test_trace_conflicts_with_generator_flags() {
        let result = Args::try_parse_from(["tiersim", "--trace", "run.trace", "--seed", "3"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["tiersim", "--trace", "run.trace", "-p", "write-back"]).unwrap();
        assert_eq!(args.policy.policies(), vec![WritePolicy::WriteBack]);
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sim.json");
        fs::write(&path, r#"{"capacity": 3, "timing": {"slow_read": 80}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.timing.slow_read, 80);
        assert_eq!(config.timing.slow_write, 150);
    }

    #[test]
    fn test_load_config_errors() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(&dir.path().join("missing.json")).is_err());

        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn test_dumped_workload_replays_identically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.trace");
        let requests = workload::generate(&WorkloadSpec::default()).unwrap();
        trace::write_trace(&path, &requests).unwrap();

        let replayed = trace::read_trace(&path).unwrap();
        let options = RunOptions::default();
        assert_eq!(
            runner::compare(&WritePolicy::ALL, &requests, &options).unwrap(),
            runner::compare(&WritePolicy::ALL, &replayed, &options).unwrap()
        );
    }
}
