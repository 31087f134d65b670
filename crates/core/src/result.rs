// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The per-invocation benchmark result record.
//!
//! A [`TestResult`] captures one executed test against one provider. The
//! execution layer creates it through [`TestResult::builder`] after each
//! provider call and appends it to the collector, which never mutates it.
//!
//! # Invariants
//!
//! - `skipped` and `success` are mutually exclusive in effect: a skipped
//!   record is excluded from every success/failure denominator.
//! - A record with `excluded_from_primary` set participates in overall
//!   totals but not in primary-comparable denominators.
//! - Quality is optional. A record counts as scored when `quality_scored`
//!   is set OR `quality_score > 0`; legacy records carry only a nonzero
//!   score, which makes an explicitly-scored zero from an old producer
//!   indistinguishable from "never scored". Both fields are carried so
//!   modern producers are unambiguous.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{ErrorCategory, ImplKind, RunMode, TestType};

/// Serialize a [`Duration`] as integer milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}

/// Serialize an optional [`Duration`] as integer milliseconds.
mod opt_duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let ms = Option::<u64>::deserialize(d)?;
        Ok(ms.map(Duration::from_millis))
    }
}

/// One executed test invocation against one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Test name (e.g. `"academic_search_arxiv"`).
    pub test_name: String,
    /// Provider identifier (e.g. `"tavily"`).
    pub provider: String,
    /// Operation kind exercised by this test.
    pub test_type: TestType,
    /// How the execution was driven.
    #[serde(default)]
    pub run_mode: RunMode,
    /// Zero-based repeat index within the test's repeat series.
    #[serde(default)]
    pub repeat_index: u32,
    /// Implementation path that produced this record.
    #[serde(default)]
    pub implementation: ImplKind,
    /// Whether the call succeeded.
    pub success: bool,
    /// Whether the test was skipped (never executed).
    #[serde(default)]
    pub skipped: bool,
    /// Why the test was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    /// Error message when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_category: Option<ErrorCategory>,
    /// Wall-clock latency measured by the harness.
    #[serde(with = "duration_ms", rename = "latency_ms")]
    pub latency: Duration,
    /// Latency reported by the provider itself, when available.
    #[serde(
        with = "opt_duration_ms",
        rename = "provider_latency_ms",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_latency: Option<Duration>,
    /// Billing units consumed (provider-specific credits).
    #[serde(default)]
    pub credits_used: f64,
    /// Number of underlying requests issued (crawls fan out).
    #[serde(default)]
    pub request_count: u32,
    /// Bytes of content returned.
    #[serde(default)]
    pub content_length: u64,
    /// Number of results returned.
    #[serde(default)]
    pub results_count: u32,
    /// Measured cost in USD. Zero means "not measured"; the collector
    /// then falls back to the cost calculator.
    #[serde(default)]
    pub cost_usd: f64,
    /// Quality score in `[0, 100]`.
    #[serde(default)]
    pub quality_score: f64,
    /// Whether a validator explicitly scored this record. Distinguishes
    /// an explicit zero from "never scored"; legacy records leave this
    /// unset and rely on a nonzero score.
    #[serde(default)]
    pub quality_scored: bool,
    /// Semantic relevance sub-score, when the validator computed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<f64>,
    /// Reranker agreement sub-score, when the validator computed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranker_score: Option<f64>,
    /// Excluded from primary-comparable denominators (test variants not
    /// fairly comparable across providers).
    #[serde(default)]
    pub excluded_from_primary: bool,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
}

impl TestResult {
    /// Create a new builder.
    pub fn builder() -> TestResultBuilder {
        TestResultBuilder::default()
    }

    /// Whether this record counts as quality-scored.
    ///
    /// True when `quality_scored` is set, or when the score is nonzero
    /// (legacy compatibility rule).
    pub fn is_quality_scored(&self) -> bool {
        self.quality_scored || self.quality_score > 0.0
    }

    /// Whether this record was executed (not skipped).
    pub fn is_executed(&self) -> bool {
        !self.skipped
    }
}

/// Builder for [`TestResult`] records.
#[derive(Debug, Default)]
pub struct TestResultBuilder {
    test_name: Option<String>,
    provider: Option<String>,
    test_type: Option<TestType>,
    run_mode: RunMode,
    repeat_index: u32,
    implementation: Option<ImplKind>,
    success: bool,
    skipped: bool,
    skip_reason: Option<String>,
    error: Option<String>,
    error_category: Option<ErrorCategory>,
    latency: Duration,
    provider_latency: Option<Duration>,
    credits_used: f64,
    request_count: u32,
    content_length: u64,
    results_count: u32,
    cost_usd: f64,
    quality_score: f64,
    quality_scored: bool,
    semantic_score: Option<f64>,
    reranker_score: Option<f64>,
    excluded_from_primary: bool,
    timestamp: Option<DateTime<Utc>>,
}

impl TestResultBuilder {
    /// Set the test name (required).
    pub fn test_name(mut self, name: impl Into<String>) -> Self {
        self.test_name = Some(name.into());
        self
    }

    /// Set the provider identifier (required).
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set the test type (required).
    pub fn test_type(mut self, test_type: TestType) -> Self {
        self.test_type = Some(test_type);
        self
    }

    /// Set the run mode (default: standard).
    pub fn run_mode(mut self, mode: RunMode) -> Self {
        self.run_mode = mode;
        self
    }

    /// Set the repeat index (default: 0).
    pub fn repeat_index(mut self, index: u32) -> Self {
        self.repeat_index = index;
        self
    }

    /// Set the implementation kind (default: api).
    pub fn implementation(mut self, kind: ImplKind) -> Self {
        self.implementation = Some(kind);
        self
    }

    /// Mark the call as succeeded or failed.
    pub fn success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Mark the test as skipped with a reason. A skipped record is never
    /// a success.
    pub fn skipped(mut self, reason: impl Into<String>) -> Self {
        self.skipped = true;
        self.skip_reason = Some(reason.into());
        self.success = false;
        self
    }

    /// Record a failure message and category.
    pub fn error(mut self, msg: impl Into<String>, category: ErrorCategory) -> Self {
        self.error = Some(msg.into());
        self.error_category = Some(category);
        self.success = false;
        self
    }

    /// Record a failure message without a category. The collector buckets
    /// these under `unknown`.
    pub fn error_uncategorized(mut self, msg: impl Into<String>) -> Self {
        self.error = Some(msg.into());
        self.success = false;
        self
    }

    /// Set the harness-measured latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set the provider-reported latency.
    pub fn provider_latency(mut self, latency: Duration) -> Self {
        self.provider_latency = Some(latency);
        self
    }

    /// Set billing units consumed.
    pub fn credits_used(mut self, credits: f64) -> Self {
        self.credits_used = credits;
        self
    }

    /// Set the number of underlying requests issued.
    pub fn request_count(mut self, count: u32) -> Self {
        self.request_count = count;
        self
    }

    /// Set the content length in bytes.
    pub fn content_length(mut self, bytes: u64) -> Self {
        self.content_length = bytes;
        self
    }

    /// Set the number of results returned.
    pub fn results_count(mut self, count: u32) -> Self {
        self.results_count = count;
        self
    }

    /// Set the measured cost in USD.
    pub fn cost_usd(mut self, cost: f64) -> Self {
        self.cost_usd = cost;
        self
    }

    /// Set an explicit quality score and mark the record as scored.
    pub fn quality_score(mut self, score: f64) -> Self {
        self.quality_score = score;
        self.quality_scored = true;
        self
    }

    /// Set the semantic relevance sub-score.
    pub fn semantic_score(mut self, score: f64) -> Self {
        self.semantic_score = Some(score);
        self
    }

    /// Set the reranker agreement sub-score.
    pub fn reranker_score(mut self, score: f64) -> Self {
        self.reranker_score = Some(score);
        self
    }

    /// Exclude this record from primary-comparable denominators.
    pub fn excluded_from_primary(mut self, excluded: bool) -> Self {
        self.excluded_from_primary = excluded;
        self
    }

    /// Set the record timestamp. Defaults to `Utc::now()`.
    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Build the [`TestResult`]. Returns `Err` if a required field is
    /// missing.
    pub fn build(self) -> Result<TestResult> {
        let test_name = self
            .test_name
            .ok_or_else(|| Error::invalid_input("test_name is required"))?;
        let provider = self
            .provider
            .ok_or_else(|| Error::invalid_input("provider is required"))?;
        let test_type = self
            .test_type
            .ok_or_else(|| Error::invalid_input("test_type is required"))?;

        Ok(TestResult {
            test_name,
            provider,
            test_type,
            run_mode: self.run_mode,
            repeat_index: self.repeat_index,
            implementation: self.implementation.unwrap_or_default(),
            success: self.success,
            skipped: self.skipped,
            skip_reason: self.skip_reason,
            error: self.error,
            error_category: self.error_category,
            latency: self.latency,
            provider_latency: self.provider_latency,
            credits_used: self.credits_used,
            request_count: self.request_count,
            content_length: self.content_length,
            results_count: self.results_count,
            cost_usd: self.cost_usd,
            quality_score: self.quality_score,
            quality_scored: self.quality_scored,
            semantic_score: self.semantic_score,
            reranker_score: self.reranker_score,
            excluded_from_primary: self.excluded_from_primary,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> TestResult {
        TestResult::builder()
            .test_name("academic_search")
            .provider("tavily")
            .test_type(TestType::Search)
            .success(true)
            .latency(Duration::from_millis(420))
            .credits_used(1.0)
            .results_count(10)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_test_name() {
        let result = TestResult::builder()
            .provider("tavily")
            .test_type(TestType::Search)
            .build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("test_name"));
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = TestResult::builder()
            .test_name("t")
            .test_type(TestType::Search)
            .build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("provider"));
    }

    #[test]
    fn test_builder_requires_test_type() {
        let result = TestResult::builder().test_name("t").provider("p").build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("test_type"));
    }

    #[test]
    fn test_skipped_clears_success() {
        let r = TestResult::builder()
            .test_name("t")
            .provider("p")
            .test_type(TestType::Extract)
            .success(true)
            .skipped("extract unsupported")
            .build()
            .unwrap();
        assert!(r.skipped);
        assert!(!r.success);
        assert_eq!(r.skip_reason.as_deref(), Some("extract unsupported"));
        assert!(!r.is_executed());
    }

    #[test]
    fn test_quality_score_sets_flag() {
        let r = TestResult::builder()
            .test_name("t")
            .provider("p")
            .test_type(TestType::Search)
            .quality_score(0.0)
            .build()
            .unwrap();
        assert!(r.quality_scored);
        // Explicit zero counts as scored through the flag.
        assert!(r.is_quality_scored());
    }

    #[test]
    fn test_legacy_nonzero_score_counts_as_scored() {
        let mut r = make_result();
        r.quality_scored = false;
        r.quality_score = 62.0;
        assert!(r.is_quality_scored());

        r.quality_score = 0.0;
        assert!(!r.is_quality_scored());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let r = make_result();
        let json = serde_json::to_string(&r).unwrap();
        let back: TestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.test_name, r.test_name);
        assert_eq!(back.provider, r.provider);
        assert_eq!(back.latency, r.latency);
        assert_eq!(back.results_count, 10);
    }

    #[test]
    fn test_latency_serializes_as_millis() {
        let r = make_result();
        let value: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["latency_ms"], serde_json::json!(420));
    }
}
