// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Latency distribution statistics.
//!
//! Percentiles use the nearest-rank method: index `floor((n - 1) * p)`
//! into the ascending-sorted sample set, no interpolation. The method is
//! part of the report contract — changing it would diff every
//! regenerated report.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Nearest-rank percentile over an ascending-sorted slice.
///
/// Returns [`Duration::ZERO`] for an empty slice.
pub fn percentile_nearest_rank(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() - 1) as f64 * p).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Latency distribution for one provider's executed records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Minimum latency.
    pub min: Duration,
    /// Maximum latency.
    pub max: Duration,
    /// Mean latency.
    pub avg: Duration,
    /// 50th percentile (median).
    pub p50: Duration,
    /// 95th percentile.
    pub p95: Duration,
    /// 99th percentile.
    pub p99: Duration,
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
            avg: Duration::ZERO,
            p50: Duration::ZERO,
            p95: Duration::ZERO,
            p99: Duration::ZERO,
        }
    }
}

impl LatencyStats {
    /// Compute the distribution from a set of samples.
    ///
    /// Sorts a copy; the input order does not matter. Empty input yields
    /// the all-zero distribution.
    pub fn from_samples(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted: Vec<Duration> = samples.to_vec();
        sorted.sort();

        let n = sorted.len();
        let sum: Duration = sorted.iter().sum();

        Self {
            min: sorted[0],
            max: sorted[n - 1],
            avg: sum / n as u32,
            p50: percentile_nearest_rank(&sorted, 0.50),
            p95: percentile_nearest_rank(&sorted, 0.95),
            p99: percentile_nearest_rank(&sorted, 0.99),
        }
    }

    /// Mean latency in fractional milliseconds, for report rendering.
    pub fn avg_ms(&self) -> f64 {
        self.avg.as_secs_f64() * 1000.0
    }
}
