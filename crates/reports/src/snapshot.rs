//! The frozen view of a benchmark run consumed by every renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seekbench_collector::{ProviderSummary, ResultCollector};
use seekbench_core::TestResult;

/// Immutable snapshot of a run: metadata, the sorted provider/test sets,
/// per-provider summaries, and the raw records.
///
/// Taking the snapshot copies everything out of the collector up front;
/// renderers then work from plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSnapshot {
    /// Run name from the configuration.
    pub run_name: String,
    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,
    /// Sorted, de-duplicated providers observed in the run.
    pub providers: Vec<String>,
    /// Sorted, de-duplicated test names observed in the run.
    pub tests: Vec<String>,
    /// Per-provider aggregates, in provider order.
    pub summaries: Vec<ProviderSummary>,
    /// Every raw record, insertion order preserved.
    pub results: Vec<TestResult>,
}

impl ReportSnapshot {
    /// Snapshot the current state of a collector.
    pub fn from_collector(run_name: impl Into<String>, collector: &ResultCollector) -> Self {
        Self {
            run_name: run_name.into(),
            generated_at: Utc::now(),
            providers: collector.providers(),
            tests: collector.tests(),
            summaries: collector.summaries(),
            results: collector.results(),
        }
    }

    /// Records for one provider, in insertion order.
    pub fn results_for_provider(&self, provider: &str) -> Vec<&TestResult> {
        self.results
            .iter()
            .filter(|r| r.provider == provider)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekbench_core::TestType;
    use std::time::Duration;

    fn collector_with_data() -> ResultCollector {
        let collector = ResultCollector::new();
        for (provider, test) in [("zeta", "b_test"), ("alpha", "a_test"), ("zeta", "a_test")] {
            collector.add_result(
                TestResult::builder()
                    .test_name(test)
                    .provider(provider)
                    .test_type(TestType::Search)
                    .success(true)
                    .latency(Duration::from_millis(100))
                    .build()
                    .unwrap(),
            );
        }
        collector
    }

    #[test]
    fn test_snapshot_sorted_sets() {
        let collector = collector_with_data();
        let snapshot = ReportSnapshot::from_collector("run", &collector);
        assert_eq!(snapshot.providers, vec!["alpha", "zeta"]);
        assert_eq!(snapshot.tests, vec!["a_test", "b_test"]);
        assert_eq!(snapshot.summaries.len(), 2);
        assert_eq!(snapshot.results.len(), 3);
    }

    #[test]
    fn test_snapshot_is_decoupled_from_collector() {
        let collector = collector_with_data();
        let snapshot = ReportSnapshot::from_collector("run", &collector);
        collector.add_result(
            TestResult::builder()
                .test_name("later")
                .provider("new")
                .test_type(TestType::Search)
                .success(true)
                .build()
                .unwrap(),
        );
        assert_eq!(snapshot.results.len(), 3);
        assert_eq!(snapshot.providers.len(), 2);
    }

    #[test]
    fn test_results_for_provider_filters() {
        let collector = collector_with_data();
        let snapshot = ReportSnapshot::from_collector("run", &collector);
        assert_eq!(snapshot.results_for_provider("zeta").len(), 2);
        assert!(snapshot.results_for_provider("missing").is_empty());
    }
}
