//! Concurrent benchmark execution.
//!
//! The runner is the producer side of the collector's concurrency
//! contract: one tokio task per `(provider, test, repeat)` triple, bounded
//! by a semaphore, each appending exactly one [`TestResult`]. Results land
//! in commit order, which under concurrency is not request-issue order.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use async_trait::async_trait;

use seekbench_collector::ResultCollector;
use seekbench_core::{BenchConfig, ErrorCategory, ImplKind, TestResult, TestSpec};
use seekbench_validators::validator_for;

use crate::generate::edge_case_specs;

/// A completed provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Returned content (concatenated for multi-result responses).
    pub content: String,
    /// Number of results returned.
    pub results_count: u32,
    /// Underlying requests issued.
    pub request_count: u32,
    /// Billing units consumed.
    pub credits_used: f64,
    /// Measured cost in USD; zero when the provider does not report one.
    pub cost_usd: f64,
    /// Latency reported by the provider itself.
    pub provider_latency: Option<Duration>,
}

/// Outcome of one provider call.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// The call completed and returned a response.
    Completed(ProviderResponse),
    /// The call failed.
    Failed {
        /// Error message.
        error: String,
        /// Failure category.
        category: ErrorCategory,
    },
    /// The test was skipped before issuing a call.
    Skipped {
        /// Why the test was not executed.
        reason: String,
    },
}

/// The seam real provider clients plug into.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Provider identifier as it appears in records and reports.
    fn name(&self) -> &str;

    /// Which implementation path this client represents.
    fn kind(&self) -> ImplKind {
        ImplKind::Api
    }

    /// Execute one repeat of a test.
    async fn execute(&self, spec: &TestSpec, repeat: u32) -> CallOutcome;
}

/// Tally of a finished run.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    /// Records produced.
    pub total: usize,
    /// Successful calls.
    pub succeeded: usize,
    /// Failed calls.
    pub failed: usize,
    /// Skipped tests.
    pub skipped: usize,
    /// Wall-clock duration of the whole run.
    pub elapsed: Duration,
}

/// Execute every `(provider, test, repeat)` combination and append the
/// results to `collector`.
pub async fn run_benchmark(
    config: &BenchConfig,
    clients: &[Arc<dyn ProviderClient>],
    collector: Arc<ResultCollector>,
    show_progress: bool,
) -> RunStats {
    let mut specs: Vec<TestSpec> = config.tests.clone();
    if config.include_edge_cases {
        specs.extend(edge_case_specs());
    }

    let total: u64 = specs
        .iter()
        .map(|s| u64::from(s.repeats) * clients.len() as u64)
        .sum();
    let progress = if show_progress {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .expect("static progress template"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let started = Instant::now();
    let mut handles = Vec::new();

    for client in clients {
        for spec in &specs {
            for repeat in 0..spec.repeats {
                let client = Arc::clone(client);
                let spec = spec.clone();
                let collector = Arc::clone(&collector);
                let semaphore = Arc::clone(&semaphore);
                let progress = progress.clone();

                handles.push(tokio::spawn(async move {
                    let _permit = semaphore.acquire().await.expect("semaphore never closed");
                    let call_started = Instant::now();
                    let outcome = execute_one(client.as_ref(), &spec, repeat).await;
                    let measured = call_started.elapsed();
                    progress.set_message(format!("{}/{}", client.name(), spec.name));
                    progress.inc(1);

                    let tally = match &outcome {
                        CallOutcome::Completed(_) => (1usize, 0usize, 0usize),
                        CallOutcome::Failed { .. } => (0, 1, 0),
                        CallOutcome::Skipped { .. } => (0, 0, 1),
                    };
                    match build_record(client.as_ref(), &spec, repeat, measured, outcome) {
                        Ok(record) => collector.add_result(record),
                        Err(e) => warn!(error = %e, "dropping malformed record"),
                    }
                    tally
                }));
            }
        }
    }

    let mut stats = RunStats {
        total: 0,
        succeeded: 0,
        failed: 0,
        skipped: 0,
        elapsed: Duration::ZERO,
    };
    for handle in handles {
        match handle.await {
            Ok((succeeded, failed, skipped)) => {
                stats.total += 1;
                stats.succeeded += succeeded;
                stats.failed += failed;
                stats.skipped += skipped;
            }
            Err(e) => warn!(error = %e, "benchmark task panicked"),
        }
    }
    stats.elapsed = started.elapsed();
    progress.finish_and_clear();

    debug!(
        total = stats.total,
        succeeded = stats.succeeded,
        failed = stats.failed,
        skipped = stats.skipped,
        "benchmark run complete"
    );
    stats
}

async fn execute_one(client: &dyn ProviderClient, spec: &TestSpec, repeat: u32) -> CallOutcome {
    let outcome = client.execute(spec, repeat).await;
    if let CallOutcome::Failed { error, category } = &outcome {
        debug!(
            provider = client.name(),
            test = %spec.name,
            %category,
            error = %error,
            "provider call failed"
        );
    }
    outcome
}

fn build_record(
    client: &dyn ProviderClient,
    spec: &TestSpec,
    repeat: u32,
    measured: Duration,
    outcome: CallOutcome,
) -> seekbench_core::Result<TestResult> {
    let builder = TestResult::builder()
        .test_name(&spec.name)
        .provider(client.name())
        .test_type(spec.test_type.clone())
        .run_mode(spec.run_mode)
        .repeat_index(repeat)
        .implementation(client.kind())
        .excluded_from_primary(spec.excluded_from_primary);

    match outcome {
        CallOutcome::Skipped { reason } => builder.skipped(reason).build(),
        CallOutcome::Failed { error, category } => {
            builder.error(error, category).latency(measured).build()
        }
        CallOutcome::Completed(response) => {
            let mut builder = builder
                .success(true)
                .latency(measured)
                .credits_used(response.credits_used)
                .request_count(response.request_count)
                .content_length(response.content.len() as u64)
                .results_count(response.results_count)
                .cost_usd(response.cost_usd);
            if let Some(latency) = response.provider_latency {
                builder = builder.provider_latency(latency);
            }
            if let Some(validator) = validator_for(&spec.name) {
                let assessment = validator.assess(&response.content);
                debug!(
                    provider = client.name(),
                    test = %spec.name,
                    domain = validator.domain(),
                    score = assessment.score,
                    "scored response content"
                );
                builder = builder.quality_score(assessment.score);
            }
            builder.build()
        }
    }
}
