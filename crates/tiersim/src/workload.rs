//! Synthetic request stream generator

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tiercache::{Op, Request};

/// Parameters of a generated workload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkloadSpec {
    /// Number of requests
    pub requests: usize,
    /// Addresses are drawn uniformly from `1..=addr_range`
    pub addr_range: u64,
    /// Probability that a request is a read
    pub read_ratio: f64,
    /// PRNG seed
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            requests: 1000,
            addr_range: 20,
            read_ratio: 0.6,
            seed: 0,
        }
    }
}

impl WorkloadSpec {
    pub fn validate(&self) -> Result<()> {
        if self.addr_range == 0 {
            bail!("address range must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.read_ratio) {
            bail!("read ratio must be within [0, 1], got {}", self.read_ratio);
        }
        Ok(())
    }
}

/// Build the request list for a workload
///
/// Writes carry no payload, so every engine synthesizes the same one. The
/// same parameters always yield the same list.
pub fn generate(spec: &WorkloadSpec) -> Result<Vec<Request>> {
    spec.validate()?;

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let requests = (0..spec.requests)
        .map(|_| {
            let address = rng.gen_range(1..=spec.addr_range);
            let op = if rng.gen::<f64>() < spec.read_ratio {
                Op::Read
            } else {
                Op::Write
            };
            Request {
                op,
                address,
                data: None,
            }
        })
        .collect();

    Ok(requests)
}
