// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The concurrency-safe result store.
//!
//! [`ResultCollector`] owns the full set of [`TestResult`] records for a
//! benchmark run and aggregates them on demand. It is an explicit object
//! injected into the execution layer (never a global), so tests get clean
//! isolation by constructing their own.
//!
//! Producers append concurrently under the exclusive side of a
//! reader/writer lock; readers take the shared side and either clone the
//! records out or fold them into a [`ProviderSummary`] before releasing
//! it, so report formatting never holds the lock.

use std::collections::BTreeSet;
use std::sync::RwLock;
use tracing::trace;

use seekbench_core::TestResult;

use crate::pricing::CostCalculator;
use crate::summary::ProviderSummary;

/// Append-only store of benchmark results plus on-demand aggregation.
pub struct ResultCollector {
    records: RwLock<Vec<TestResult>>,
    pricing: CostCalculator,
}

impl Default for ResultCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCollector {
    /// Collector with the default pricing table.
    pub fn new() -> Self {
        Self::with_pricing(CostCalculator::with_default_rates())
    }

    /// Collector with an injected cost calculator.
    pub fn with_pricing(pricing: CostCalculator) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            pricing,
        }
    }

    /// The fallback pricing source used by [`ResultCollector::summary`].
    pub fn pricing(&self) -> &CostCalculator {
        &self.pricing
    }

    /// Append one record.
    ///
    /// No field validation happens here; an inconsistent record folds into
    /// an equally inconsistent summary. Safe to call from many producers;
    /// under concurrent writers the stored order is commit order, not
    /// request-issue order.
    pub fn add_result(&self, result: TestResult) {
        trace!(
            provider = %result.provider,
            test = %result.test_name,
            success = result.success,
            "recording result"
        );
        self.records.write().unwrap().push(result);
    }

    /// All records, insertion order preserved. Defensive copy.
    pub fn results(&self) -> Vec<TestResult> {
        self.records.read().unwrap().clone()
    }

    /// Records for one provider, insertion order preserved. Empty when
    /// the provider was never seen.
    pub fn results_for_provider(&self, provider: &str) -> Vec<TestResult> {
        self.records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.provider == provider)
            .cloned()
            .collect()
    }

    /// Records for one test name, insertion order preserved.
    pub fn results_for_test(&self, test_name: &str) -> Vec<TestResult> {
        self.records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.test_name == test_name)
            .cloned()
            .collect()
    }

    /// Sorted, de-duplicated provider identifiers observed so far.
    ///
    /// Lexicographic and stable regardless of insertion order; report
    /// generators rely on this for deterministic output.
    pub fn providers(&self) -> Vec<String> {
        let records = self.records.read().unwrap();
        let set: BTreeSet<String> = records.iter().map(|r| r.provider.clone()).collect();
        set.into_iter().collect()
    }

    /// Sorted, de-duplicated test names observed so far.
    pub fn tests(&self) -> Vec<String> {
        let records = self.records.read().unwrap();
        let set: BTreeSet<String> = records.iter().map(|r| r.test_name.clone()).collect();
        set.into_iter().collect()
    }

    /// Aggregate summary for one provider, folded from the current record
    /// set under the shared lock.
    ///
    /// A provider with no records yields a zero-valued summary carrying
    /// only the provider name — never an error.
    pub fn summary(&self, provider: &str) -> ProviderSummary {
        let records = self.records.read().unwrap();
        ProviderSummary::compute(
            provider,
            records.iter().filter(|r| r.provider == provider),
            &self.pricing,
        )
    }

    /// Summaries for every observed provider, in sorted provider order.
    pub fn summaries(&self) -> Vec<ProviderSummary> {
        self.providers()
            .into_iter()
            .map(|p| self.summary(&p))
            .collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether no records have been stored yet.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekbench_core::TestType;
    use std::sync::Arc;
    use std::time::Duration;

    fn make_result(provider: &str, test: &str, success: bool) -> TestResult {
        TestResult::builder()
            .test_name(test)
            .provider(provider)
            .test_type(TestType::Search)
            .success(success)
            .latency(Duration::from_millis(100))
            .credits_used(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_results_preserve_insertion_order() {
        let collector = ResultCollector::new();
        collector.add_result(make_result("zeta", "a", true));
        collector.add_result(make_result("alpha", "b", true));
        collector.add_result(make_result("zeta", "c", false));

        let all = collector.results();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].provider, "zeta");
        assert_eq!(all[1].provider, "alpha");
        assert_eq!(all[2].test_name, "c");
    }

    #[test]
    fn test_results_are_defensive_copies() {
        let collector = ResultCollector::new();
        collector.add_result(make_result("tavily", "a", true));

        let mut copy = collector.results();
        copy[0].provider = "mutated".to_string();
        assert_eq!(collector.results()[0].provider, "tavily");
    }

    #[test]
    fn test_filtered_reads_return_empty_for_unseen_keys() {
        let collector = ResultCollector::new();
        collector.add_result(make_result("tavily", "a", true));
        assert!(collector.results_for_provider("exa").is_empty());
        assert!(collector.results_for_test("missing").is_empty());
    }

    #[test]
    fn test_filtered_reads_preserve_order() {
        let collector = ResultCollector::new();
        collector.add_result(make_result("tavily", "first", true));
        collector.add_result(make_result("exa", "other", true));
        collector.add_result(make_result("tavily", "second", false));

        let tavily = collector.results_for_provider("tavily");
        assert_eq!(tavily.len(), 2);
        assert_eq!(tavily[0].test_name, "first");
        assert_eq!(tavily[1].test_name, "second");
    }

    #[test]
    fn test_providers_sorted_regardless_of_insertion_order() {
        let collector = ResultCollector::new();
        for provider in ["zeta", "alpha", "mid"] {
            collector.add_result(make_result(provider, "t", true));
        }
        // Duplicate insertions do not duplicate entries.
        collector.add_result(make_result("alpha", "t2", true));

        assert_eq!(collector.providers(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_tests_sorted_and_deduplicated() {
        let collector = ResultCollector::new();
        collector.add_result(make_result("p", "news_extract", true));
        collector.add_result(make_result("p", "academic_search", true));
        collector.add_result(make_result("p", "news_extract", false));

        assert_eq!(
            collector.tests(),
            vec!["academic_search", "news_extract"]
        );
    }

    #[test]
    fn test_summary_for_unseen_provider_is_zero_valued() {
        let collector = ResultCollector::new();
        let summary = collector.summary("never-seen");
        assert_eq!(summary.provider, "never-seen");
        assert_eq!(summary.total_tests, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.total_cost_usd, 0.0);
    }

    #[test]
    fn test_summary_reflects_latest_data() {
        let collector = ResultCollector::new();
        collector.add_result(make_result("tavily", "a", true));
        assert_eq!(collector.summary("tavily").success_rate, 100.0);

        collector.add_result(make_result("tavily", "b", false));
        assert_eq!(collector.summary("tavily").success_rate, 50.0);
    }

    #[test]
    fn test_summaries_cover_all_providers_in_order() {
        let collector = ResultCollector::new();
        collector.add_result(make_result("zeta", "a", true));
        collector.add_result(make_result("alpha", "a", true));

        let summaries = collector.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].provider, "alpha");
        assert_eq!(summaries[1].provider, "zeta");
    }

    #[test]
    fn test_concurrent_producers_lose_no_writes() {
        let collector = Arc::new(ResultCollector::new());
        let mut handles = Vec::new();
        for i in 0..100 {
            let collector = Arc::clone(&collector);
            handles.push(std::thread::spawn(move || {
                collector.add_result(make_result("tavily", &format!("test_{i}"), true));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(collector.len(), 100);
        assert_eq!(collector.results_for_provider("tavily").len(), 100);
        let summary = collector.summary("tavily");
        assert_eq!(summary.total_tests, 100);
        assert_eq!(summary.successful_tests, 100);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let collector = Arc::new(ResultCollector::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let collector = Arc::clone(&collector);
            handles.push(std::thread::spawn(move || {
                collector.add_result(make_result("exa", &format!("t{i}"), i % 2 == 0));
                // Interleaved reads must never observe torn state.
                let summary = collector.summary("exa");
                assert!(summary.successful_tests <= summary.executed_tests);
                assert!(summary.executed_tests <= summary.total_tests);
                let _ = collector.providers();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(collector.len(), 50);
    }

    #[test]
    fn test_len_and_is_empty() {
        let collector = ResultCollector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.len(), 0);
        collector.add_result(make_result("p", "t", true));
        assert!(!collector.is_empty());
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_injected_pricing_drives_summary_fallback() {
        use crate::pricing::{BillingModel, ProviderRates};

        let pricing = CostCalculator::empty();
        pricing.set_custom_rate("tavily", ProviderRates::flat(BillingModel::PerCredit, 0.5));
        let collector = ResultCollector::with_pricing(pricing);

        let mut record = make_result("tavily", "t", true);
        record.credits_used = 2.0;
        collector.add_result(record);

        assert_eq!(collector.summary("tavily").total_cost_usd, 1.0);
    }
}
