//! Console and JSON rendering of simulation results

use std::io::{self, Write};

use serde::Serialize;
use tiercache::{Report, SimConfig};

use crate::runner::Comparison;
use crate::workload::WorkloadSpec;

const RULE_WIDTH: usize = 80;

/// Where the request stream came from
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum WorkloadSource {
    /// Seeded synthetic workload
    Generated(WorkloadSpec),
    /// Replayed trace file
    Trace { path: String, requests: usize },
}

/// Everything printed at the end of a run
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub workload: WorkloadSource,
    pub config: SimConfig,
    pub flush_at_end: bool,
    pub reports: Vec<Report>,
    pub comparison: Option<Comparison>,
}

impl Summary {
    /// Assemble a summary; two reports also get a comparison
    pub fn new(
        workload: WorkloadSource,
        config: SimConfig,
        flush_at_end: bool,
        reports: Vec<Report>,
    ) -> Self {
        let comparison = match reports.as_slice() {
            [baseline, candidate] => Comparison::between(baseline, candidate),
            _ => None,
        };

        Self {
            workload,
            config,
            flush_at_end,
            reports,
            comparison,
        }
    }
}

/// Print the summary in the fixed console layout
pub fn write_text<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    match &summary.workload {
        WorkloadSource::Generated(spec) => writeln!(
            out,
            "--- SIMULATING {} REQUESTS (R/W) OVER {} BLOCKS ---",
            spec.requests, spec.addr_range
        )?,
        WorkloadSource::Trace { path, requests } => {
            writeln!(out, "--- REPLAYING {} REQUESTS FROM {} ---", requests, path)?
        }
    }

    let timing = &summary.config.timing;
    writeln!(
        out,
        "Cache: R={} TU, W={} TU | Backing store: R={} TU, W={} TU | Capacity: {} lines",
        timing.fast_read,
        timing.fast_write,
        timing.slow_read,
        timing.slow_write,
        summary.config.capacity
    )?;
    if summary.flush_at_end {
        writeln!(out, "Dirty lines are flushed at end of run")?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for report in &summary.reports {
        write_report(out, report)?;
    }

    if let Some(cmp) = &summary.comparison {
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "POLICY COMPARISON:")?;
        writeln!(
            out,
            "  -> {} is about {:.2}x faster than {}.",
            cmp.faster, cmp.speedup, cmp.slower
        )?;
        writeln!(out, "  {} time: {} TU", cmp.faster, cmp.faster_time)?;
        writeln!(out, "  {} time: {} TU", cmp.slower, cmp.slower_time)?;
    }

    Ok(())
}

/// Print one policy's block
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "[{}]", report.policy.as_str().to_uppercase())?;
    writeln!(out, "  Total operations     : {}", report.total_ops)?;
    writeln!(out, "  Reads (R)            : {}", report.reads)?;
    writeln!(out, "  Writes (W)           : {}", report.writes)?;
    writeln!(out, "  Cache hits           : {}", report.hits)?;
    writeln!(out, "  Cache misses         : {}", report.misses)?;
    writeln!(out, "  Hit ratio            : {:.2}%", report.hit_ratio)?;
    writeln!(out, "  Backing store writes : {}", report.hdd_writes)?;
    writeln!(out, "  Total time           : {} TU", report.total_time)?;
    writeln!(out)
}

/// Print the summary as pretty JSON
pub fn write_json<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}
