// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark run configuration.
//!
//! A run is described by a TOML file: which providers to exercise, which
//! tests to execute against each, repeat counts, the concurrency bound,
//! and optional per-provider pricing overrides for enterprise rates.
//!
//! ```toml
//! run_name = "nightly"
//! providers = ["tavily", "exa", "firecrawl"]
//! concurrency = 8
//! output_dir = "output"
//!
//! [[tests]]
//! name = "academic_search"
//! test_type = "search"
//! query = "transformer architectures survey"
//! repeats = 3
//!
//! [pricing.tavily]
//! per_unit_usd = 0.006
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{RunMode, TestType};

/// One test definition from the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Test name; also the key used to pick a content validator.
    pub name: String,
    /// Operation kind this test exercises.
    pub test_type: TestType,
    /// Query or URL handed to the provider.
    pub query: String,
    /// How many times to repeat the test per provider.
    #[serde(default = "default_repeats")]
    pub repeats: u32,
    /// Execution mode.
    #[serde(default)]
    pub run_mode: RunMode,
    /// Excluded from primary-comparable denominators.
    #[serde(default)]
    pub excluded_from_primary: bool,
}

fn default_repeats() -> u32 {
    1
}

/// Per-provider pricing override from the `[pricing.<provider>]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingOverride {
    /// USD per billing unit.
    pub per_unit_usd: f64,
    /// USD per billing unit for content-retrieval operations, when the
    /// provider bills extract/crawl at a different sub-rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_per_unit_usd: Option<f64>,
}

/// Full benchmark run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Human-readable run name, embedded in reports.
    #[serde(default = "default_run_name")]
    pub run_name: String,
    /// Provider identifiers to benchmark.
    pub providers: Vec<String>,
    /// Tests to execute against every provider.
    pub tests: Vec<TestSpec>,
    /// Maximum in-flight provider calls.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Directory that receives the generated reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Whether to append generated edge-case tests to the run.
    #[serde(default)]
    pub include_edge_cases: bool,
    /// Per-provider pricing overrides.
    #[serde(default)]
    pub pricing: HashMap<String, PricingOverride>,
}

fn default_run_name() -> String {
    "seekbench".to_string()
}

fn default_concurrency() -> usize {
    8
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl BenchConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(Error::config("at least one provider is required"));
        }
        if self.tests.is_empty() {
            return Err(Error::config("at least one test is required"));
        }
        if self.concurrency == 0 {
            return Err(Error::config("concurrency must be at least 1"));
        }
        for test in &self.tests {
            if test.repeats == 0 {
                return Err(Error::config(format!(
                    "test {} has zero repeats",
                    test.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
run_name = "nightly"
providers = ["tavily", "exa"]
concurrency = 4

[[tests]]
name = "academic_search"
test_type = "search"
query = "transformer architectures survey"
repeats = 2

[[tests]]
name = "news_extract"
test_type = "extract"
query = "https://example.com/article"

[pricing.tavily]
per_unit_usd = 0.006
content_per_unit_usd = 0.009
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = BenchConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.run_name, "nightly");
        assert_eq!(config.providers, vec!["tavily", "exa"]);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.tests.len(), 2);
        assert_eq!(config.tests[0].repeats, 2);
        assert_eq!(config.tests[1].repeats, 1, "repeats defaults to 1");
        assert_eq!(config.tests[1].test_type, TestType::Extract);
        let tavily = config.pricing.get("tavily").unwrap();
        assert_eq!(tavily.per_unit_usd, 0.006);
        assert_eq!(tavily.content_per_unit_usd, Some(0.009));
    }

    #[test]
    fn test_defaults_applied() {
        let config = BenchConfig::from_toml_str(
            r#"
providers = ["exa"]

[[tests]]
name = "t"
test_type = "search"
query = "q"
"#,
        )
        .unwrap();
        assert_eq!(config.run_name, "seekbench");
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.output_dir, "output");
        assert!(!config.include_edge_cases);
        assert!(config.pricing.is_empty());
    }

    #[test]
    fn test_rejects_empty_providers() {
        let err = BenchConfig::from_toml_str(
            r#"
providers = []

[[tests]]
name = "t"
test_type = "search"
query = "q"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn test_rejects_zero_repeats() {
        let err = BenchConfig::from_toml_str(
            r#"
providers = ["exa"]

[[tests]]
name = "t"
test_type = "search"
query = "q"
repeats = 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("zero repeats"));
    }
}
