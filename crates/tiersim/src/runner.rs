//! Policy comparison runner
//!
//! Each policy gets its own engine (and so its own backing store) and runs on
//! its own thread; only the finished reports are shared.

use std::thread;

use parking_lot::Mutex;
use serde::Serialize;
use tiercache::{CacheEngine, Report, Request, Result, SimConfig, WritePolicy};
use tracing::info;

/// Settings shared by every engine in a comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub config: SimConfig,
    /// Flush dirty lines before taking the report
    pub flush_at_end: bool,
}

/// Run one policy over the request list on a fresh engine
pub fn run_policy(policy: WritePolicy, requests: &[Request], options: &RunOptions) -> Result<Report> {
    let mut engine = CacheEngine::with_config(policy, &options.config)?;
    info!(%policy, requests = requests.len(), capacity = engine.capacity(), "starting run");

    engine.replay(requests);
    if options.flush_at_end {
        let flushed = engine.flush();
        info!(%policy, flushed, "end-of-run flush");
    }

    let report = engine.report();
    info!(
        %policy,
        hits = report.hits,
        misses = report.misses,
        hdd_writes = report.hdd_writes,
        total_time = report.total_time,
        "run finished"
    );
    Ok(report)
}

/// Run every policy concurrently; reports come back in `policies` order
pub fn compare(policies: &[WritePolicy], requests: &[Request], options: &RunOptions) -> Result<Vec<Report>> {
    let results = Mutex::new(Vec::with_capacity(policies.len()));

    thread::scope(|scope| {
        for (idx, &policy) in policies.iter().enumerate() {
            let results = &results;
            scope.spawn(move || {
                let outcome = run_policy(policy, requests, options);
                results.lock().push((idx, outcome));
            });
        }
    });

    let mut results = results.into_inner();
    results.sort_by_key(|(idx, _)| *idx);
    results.into_iter().map(|(_, outcome)| outcome).collect()
}

/// Which of two runs finished first in simulated time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub faster: WritePolicy,
    pub slower: WritePolicy,
    pub faster_time: u64,
    pub slower_time: u64,
    /// slower_time / faster_time
    pub speedup: f64,
}

impl Comparison {
    /// Compare a baseline run against a candidate
    ///
    /// The candidate wins only if strictly faster. Returns `None` when the
    /// winner took no time at all.
    pub fn between(baseline: &Report, candidate: &Report) -> Option<Self> {
        let (faster, slower) = if candidate.total_time < baseline.total_time {
            (candidate, baseline)
        } else {
            (baseline, candidate)
        };

        if faster.total_time == 0 {
            return None;
        }

        Some(Self {
            faster: faster.policy,
            slower: slower.policy,
            faster_time: faster.total_time,
            slower_time: slower.total_time,
            speedup: slower.total_time as f64 / faster.total_time as f64,
        })
    }
}
