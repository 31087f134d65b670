// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-provider aggregate summary.
//!
//! A [`ProviderSummary`] is derived on demand from the current record set
//! and never stored; recomputing reflects whatever has been appended
//! since. Every rate and average is computed over its own denominator and
//! guarded against division by zero — degenerate inputs produce zeros,
//! never NaN or infinity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use seekbench_core::{ErrorCategory, QualityBand, TestResult};

use crate::pricing::CostCalculator;
use crate::stats::LatencyStats;

/// Aggregate metrics for one provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSummary {
    /// Provider identifier.
    pub provider: String,

    /// All records observed for the provider, skipped included.
    pub total_tests: u32,
    /// Records actually executed (`total_tests - skipped_tests`).
    pub executed_tests: u32,
    /// Executed records that succeeded.
    pub successful_tests: u32,
    /// Executed records that failed.
    pub failed_tests: u32,
    /// Records skipped before execution.
    pub skipped_tests: u32,
    /// Executed records excluded from primary comparison.
    pub excluded_tests: u32,
    /// Executed records eligible for cross-provider comparison.
    pub primary_comparable_tests: u32,
    /// Primary-comparable records that succeeded.
    pub primary_comparable_successes: u32,

    /// Percentage of executed records that succeeded, in `[0, 100]`.
    pub success_rate: f64,
    /// Success percentage over primary-comparable records only.
    pub primary_success_rate: f64,

    /// Latency distribution over executed records.
    pub latency: LatencyStats,

    /// Billing units consumed across executed records.
    pub total_credits: f64,
    /// Mean billing units per executed record.
    pub avg_credits_per_req: f64,
    /// Underlying requests issued across executed records.
    pub total_requests: u32,
    /// Mean content bytes per executed record.
    pub avg_content_length: f64,
    /// Mean results returned per executed record.
    pub avg_results_count: f64,
    /// Content bytes obtained per billing unit.
    pub content_bytes_per_credit: f64,

    /// Total cost in USD (measured where available, calculated otherwise).
    pub total_cost_usd: f64,
    /// Mean cost per executed record.
    pub avg_cost_per_req: f64,
    /// Cost per returned result.
    pub cost_per_result_usd: f64,

    /// Mean quality score over scored records.
    pub avg_quality_score: f64,
    /// Lowest quality score among scored records.
    pub min_quality_score: f64,
    /// Highest quality score among scored records.
    pub max_quality_score: f64,
    /// Executed records that received a quality score.
    pub quality_scored_tests: u32,
    /// Percentage of executed records that were scored.
    pub quality_coverage_pct: f64,
    /// Quality discounted by success rate and scoring coverage.
    pub reliability_adjusted_quality: f64,
    /// Scored records bucketed into the five quality bands.
    pub quality_histogram: BTreeMap<QualityBand, u32>,

    /// Failure counts by category.
    pub error_histogram: BTreeMap<ErrorCategory, u32>,
}

impl ProviderSummary {
    /// Zero-valued summary carrying only the provider name.
    pub fn empty(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Fold a provider's records into a summary.
    ///
    /// Single pass over the records plus one sort for the latency
    /// percentiles. Skipped records count toward `skipped_tests` only.
    /// Per-record cost prefers the measured `cost_usd` when nonzero and
    /// falls back to `pricing` otherwise, so a real measurement is never
    /// double-charged with a synthetic one.
    pub fn compute<'a, I>(provider: &str, records: I, pricing: &CostCalculator) -> Self
    where
        I: IntoIterator<Item = &'a TestResult>,
    {
        let mut summary = Self::empty(provider);

        let mut latencies: Vec<Duration> = Vec::new();
        let mut content_sum: f64 = 0.0;
        let mut results_sum: u64 = 0;
        let mut quality_sum: f64 = 0.0;
        let mut quality_min: Option<f64> = None;
        let mut quality_max: Option<f64> = None;

        for record in records {
            summary.total_tests += 1;

            if record.skipped {
                summary.skipped_tests += 1;
                continue;
            }
            summary.executed_tests += 1;

            latencies.push(record.latency);
            summary.total_credits += record.credits_used;
            summary.total_requests += record.request_count;
            content_sum += record.content_length as f64;
            results_sum += u64::from(record.results_count);

            let cost = if record.cost_usd > 0.0 {
                record.cost_usd
            } else {
                pricing.provider_cost(&record.provider, record.credits_used, &record.test_type)
            };
            summary.total_cost_usd += cost;

            if record.excluded_from_primary {
                summary.excluded_tests += 1;
            } else {
                summary.primary_comparable_tests += 1;
            }

            if record.success {
                summary.successful_tests += 1;
                if !record.excluded_from_primary {
                    summary.primary_comparable_successes += 1;
                }
            } else {
                summary.failed_tests += 1;
                let category = record.error_category.or_else(|| {
                    record
                        .error
                        .as_deref()
                        .filter(|msg| !msg.is_empty())
                        .map(|_| ErrorCategory::Unknown)
                });
                if let Some(category) = category {
                    *summary.error_histogram.entry(category).or_insert(0) += 1;
                }
            }

            if record.is_quality_scored() {
                summary.quality_scored_tests += 1;
                quality_sum += record.quality_score;
                quality_min =
                    Some(quality_min.map_or(record.quality_score, |m| m.min(record.quality_score)));
                quality_max =
                    Some(quality_max.map_or(record.quality_score, |m| m.max(record.quality_score)));
                *summary
                    .quality_histogram
                    .entry(QualityBand::from_score(record.quality_score))
                    .or_insert(0) += 1;
            }
        }

        let executed = f64::from(summary.executed_tests);
        if summary.executed_tests > 0 {
            summary.success_rate = f64::from(summary.successful_tests) / executed * 100.0;
            summary.avg_credits_per_req = summary.total_credits / executed;
            summary.avg_content_length = content_sum / executed;
            summary.avg_results_count = results_sum as f64 / executed;
            summary.avg_cost_per_req = summary.total_cost_usd / executed;
        }
        if summary.primary_comparable_tests > 0 {
            summary.primary_success_rate = f64::from(summary.primary_comparable_successes)
                / f64::from(summary.primary_comparable_tests)
                * 100.0;
        }
        if summary.total_credits > 0.0 {
            summary.content_bytes_per_credit = content_sum / summary.total_credits;
        }
        if results_sum > 0 {
            summary.cost_per_result_usd = summary.total_cost_usd / results_sum as f64;
        }

        summary.latency = LatencyStats::from_samples(&latencies);

        if summary.quality_scored_tests > 0 {
            summary.avg_quality_score = quality_sum / f64::from(summary.quality_scored_tests);
            summary.min_quality_score = quality_min.unwrap_or(0.0);
            summary.max_quality_score = quality_max.unwrap_or(0.0);
            summary.quality_coverage_pct =
                f64::from(summary.quality_scored_tests) / executed * 100.0;
        }

        summary.reliability_adjusted_quality = summary.avg_quality_score
            * (summary.success_rate / 100.0)
            * (summary.quality_coverage_pct / 100.0);

        summary
    }
}
