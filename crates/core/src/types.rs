// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Closed enums shared across the benchmark harness.
//!
//! Error categories and quality bands are deliberately closed sets: report
//! histograms are keyed by these enums, so a typo'd free-form label cannot
//! silently open a new bucket. Unrecognized labels map to
//! [`ErrorCategory::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of provider operation a test exercises.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Web search query.
    Search,
    /// Single-page content extraction.
    Extract,
    /// Multi-page site crawl.
    Crawl,
    /// Multi-step research workflow.
    Research,
    /// Provider-specific operation outside the standard set.
    Custom(String),
}

impl TestType {
    /// Whether this operation retrieves page content rather than result
    /// listings. Providers with a separate content-retrieval rate bill
    /// these operations at that sub-rate.
    pub fn is_content_retrieval(&self) -> bool {
        matches!(self, TestType::Extract | TestType::Crawl)
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestType::Search => write!(f, "search"),
            TestType::Extract => write!(f, "extract"),
            TestType::Crawl => write!(f, "crawl"),
            TestType::Research => write!(f, "research"),
            TestType::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// How a test execution was driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Normal single-shot execution.
    Standard,
    /// Repeated execution under concurrent load.
    Stress,
    /// Degenerate-input execution (unicode, oversized, empty queries).
    EdgeCase,
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Standard
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Standard => write!(f, "standard"),
            RunMode::Stress => write!(f, "stress"),
            RunMode::EdgeCase => write!(f, "edge_case"),
        }
    }
}

/// Which implementation path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplKind {
    /// Direct REST API call.
    Api,
    /// Official provider SDK.
    Sdk,
    /// Deterministic simulation (no network).
    Simulated,
}

impl Default for ImplKind {
    fn default() -> Self {
        ImplKind::Api
    }
}

impl fmt::Display for ImplKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImplKind::Api => write!(f, "api"),
            ImplKind::Sdk => write!(f, "sdk"),
            ImplKind::Simulated => write!(f, "simulated"),
        }
    }
}

/// Closed taxonomy of failure causes.
///
/// Failure records carrying an error string but no category are bucketed
/// under [`ErrorCategory::Unknown`] by the collector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Request exceeded its deadline.
    Timeout,
    /// Provider rejected the request for quota reasons.
    RateLimit,
    /// Credentials missing, expired, or rejected.
    Auth,
    /// Transport-level failure before a response arrived.
    Network,
    /// Provider rejected the request as malformed.
    InvalidRequest,
    /// Provider returned a 5xx-class failure.
    ServerError,
    /// Call succeeded at the transport level but returned nothing usable.
    EmptyResults,
    /// Anything that does not fit the categories above.
    Unknown,
}

impl ErrorCategory {
    /// Map a free-form label onto the closed set.
    ///
    /// Accepts the labels emitted by earlier harness versions; anything
    /// unrecognized becomes [`ErrorCategory::Unknown`] rather than opening
    /// a new histogram bucket.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "timeout" | "deadline" | "deadline_exceeded" => ErrorCategory::Timeout,
            "rate_limit" | "ratelimit" | "429" | "quota" => ErrorCategory::RateLimit,
            "auth" | "authentication" | "authorization" | "401" | "403" => ErrorCategory::Auth,
            "network" | "connection" | "dns" | "tls" => ErrorCategory::Network,
            "invalid_request" | "bad_request" | "validation" | "400" => {
                ErrorCategory::InvalidRequest
            }
            "server_error" | "server" | "500" | "502" | "503" => ErrorCategory::ServerError,
            "empty_results" | "no_results" | "empty" => ErrorCategory::EmptyResults,
            _ => ErrorCategory::Unknown,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ErrorCategory {
    /// Stable snake_case label, used for histogram rendering.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::RateLimit => "rate_limit",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Network => "network",
            ErrorCategory::InvalidRequest => "invalid_request",
            ErrorCategory::ServerError => "server_error",
            ErrorCategory::EmptyResults => "empty_results",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

/// Quality score band used for the five-bucket histogram.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    /// Score in `[90, 100]`.
    Excellent,
    /// Score in `[75, 90)`.
    Good,
    /// Score in `[60, 75)`.
    Acceptable,
    /// Score in `[40, 60)`.
    Poor,
    /// Score in `[0, 40)`.
    Failed,
}

impl QualityBand {
    /// Band for a quality score. Scores outside `[0, 100]` are clamped.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            QualityBand::Excellent
        } else if score >= 75.0 {
            QualityBand::Good
        } else if score >= 60.0 {
            QualityBand::Acceptable
        } else if score >= 40.0 {
            QualityBand::Poor
        } else {
            QualityBand::Failed
        }
    }

    /// Stable label for report rendering.
    pub fn label(&self) -> &'static str {
        match self {
            QualityBand::Excellent => "excellent",
            QualityBand::Good => "good",
            QualityBand::Acceptable => "acceptable",
            QualityBand::Poor => "poor",
            QualityBand::Failed => "failed",
        }
    }
}

impl fmt::Display for QualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
