//! Markdown report generation.
//!
//! Produces the provider comparison summary and the per-provider detail
//! report. Metrics whose denominator is empty render as `-` rather than
//! zero, so a provider that never executed is visibly distinct from one
//! that executed and scored zero.

use std::fmt::Write;
use std::time::Duration;

use seekbench_collector::ProviderSummary;

use crate::snapshot::ReportSnapshot;

/// Render a duration as milliseconds, or seconds above one second.
fn fmt_latency(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        format!("{:.0} ms", ms)
    }
}

fn fmt_pct(value: f64, populated: bool) -> String {
    if populated {
        format!("{:.1}%", value)
    } else {
        "-".to_string()
    }
}

fn fmt_usd(value: f64, populated: bool) -> String {
    if populated {
        format!("${:.4}", value)
    } else {
        "-".to_string()
    }
}

fn fmt_score(value: f64, populated: bool) -> String {
    if populated {
        format!("{:.1}", value)
    } else {
        "-".to_string()
    }
}

/// Generate the comparison summary report.
pub fn generate_summary(snapshot: &ReportSnapshot) -> String {
    let mut output = String::new();

    writeln!(output, "# Seekbench Report: {}", snapshot.run_name).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", snapshot.generated_at.to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Provider Comparison").unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "| Provider | Executed | Success | Primary Success | Avg Latency | P95 | Avg Quality | Reliability-Adj | Total Cost |"
    )
    .unwrap();
    writeln!(
        output,
        "|----------|----------|---------|-----------------|-------------|-----|-------------|-----------------|------------|"
    )
    .unwrap();

    for summary in &snapshot.summaries {
        let executed = summary.executed_tests > 0;
        let scored = summary.quality_scored_tests > 0;
        writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            summary.provider,
            summary.executed_tests,
            fmt_pct(summary.success_rate, executed),
            fmt_pct(summary.primary_success_rate, summary.primary_comparable_tests > 0),
            if executed {
                fmt_latency(summary.latency.avg)
            } else {
                "-".to_string()
            },
            if executed {
                fmt_latency(summary.latency.p95)
            } else {
                "-".to_string()
            },
            fmt_score(summary.avg_quality_score, scored),
            fmt_score(summary.reliability_adjusted_quality, scored),
            fmt_usd(summary.total_cost_usd, executed),
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    write_quality_section(&mut output, &snapshot.summaries);
    write_error_section(&mut output, &snapshot.summaries);

    writeln!(output, "---").unwrap();
    writeln!(
        output,
        "Providers: {} | Tests: {} | Records: {}",
        snapshot.providers.len(),
        snapshot.tests.len(),
        snapshot.results.len()
    )
    .unwrap();

    output
}

fn write_quality_section(output: &mut String, summaries: &[ProviderSummary]) {
    let any_scored = summaries.iter().any(|s| s.quality_scored_tests > 0);
    if !any_scored {
        return;
    }

    writeln!(output, "## Quality Distribution").unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "| Provider | Coverage | Excellent | Good | Acceptable | Poor | Failed |"
    )
    .unwrap();
    writeln!(
        output,
        "|----------|----------|-----------|------|------------|------|--------|"
    )
    .unwrap();
    for summary in summaries {
        if summary.quality_scored_tests == 0 {
            continue;
        }
        let band = |b| {
            summary
                .quality_histogram
                .get(&b)
                .copied()
                .unwrap_or(0)
                .to_string()
        };
        use seekbench_core::QualityBand::*;
        writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} |",
            summary.provider,
            fmt_pct(summary.quality_coverage_pct, true),
            band(Excellent),
            band(Good),
            band(Acceptable),
            band(Poor),
            band(Failed),
        )
        .unwrap();
    }
    writeln!(output).unwrap();
}

fn write_error_section(output: &mut String, summaries: &[ProviderSummary]) {
    let any_errors = summaries.iter().any(|s| !s.error_histogram.is_empty());
    if !any_errors {
        return;
    }

    writeln!(output, "## Error Breakdown").unwrap();
    writeln!(output).unwrap();
    for summary in summaries {
        if summary.error_histogram.is_empty() {
            continue;
        }
        writeln!(output, "**{}**", summary.provider).unwrap();
        writeln!(output).unwrap();
        for (category, count) in &summary.error_histogram {
            writeln!(output, "- {}: {}", category, count).unwrap();
        }
        writeln!(output).unwrap();
    }
}

/// Generate the per-provider detail report.
pub fn generate_detailed_report(snapshot: &ReportSnapshot) -> String {
    let mut output = String::new();

    writeln!(output, "# Seekbench Detailed Report: {}", snapshot.run_name).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", snapshot.generated_at.to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    for summary in &snapshot.summaries {
        writeln!(output, "## {}", summary.provider).unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "- Tests: {} total, {} executed, {} skipped, {} excluded from primary",
            summary.total_tests,
            summary.executed_tests,
            summary.skipped_tests,
            summary.excluded_tests
        )
        .unwrap();
        writeln!(
            output,
            "- Outcomes: {} succeeded, {} failed ({})",
            summary.successful_tests,
            summary.failed_tests,
            fmt_pct(summary.success_rate, summary.executed_tests > 0)
        )
        .unwrap();
        if summary.executed_tests > 0 {
            writeln!(
                output,
                "- Latency: min {} / p50 {} / p95 {} / p99 {} / max {}",
                fmt_latency(summary.latency.min),
                fmt_latency(summary.latency.p50),
                fmt_latency(summary.latency.p95),
                fmt_latency(summary.latency.p99),
                fmt_latency(summary.latency.max),
            )
            .unwrap();
            writeln!(
                output,
                "- Cost: {} total, {} per request, {} per result",
                fmt_usd(summary.total_cost_usd, true),
                fmt_usd(summary.avg_cost_per_req, true),
                fmt_usd(summary.cost_per_result_usd, summary.cost_per_result_usd > 0.0),
            )
            .unwrap();
            writeln!(
                output,
                "- Credits: {:.1} total, {:.2} per request, {:.0} content bytes per credit",
                summary.total_credits,
                summary.avg_credits_per_req,
                summary.content_bytes_per_credit
            )
            .unwrap();
        }
        if summary.quality_scored_tests > 0 {
            writeln!(
                output,
                "- Quality: avg {:.1} (min {:.1}, max {:.1}) over {} scored tests, coverage {}, reliability-adjusted {:.1}",
                summary.avg_quality_score,
                summary.min_quality_score,
                summary.max_quality_score,
                summary.quality_scored_tests,
                fmt_pct(summary.quality_coverage_pct, true),
                summary.reliability_adjusted_quality
            )
            .unwrap();
        }
        writeln!(output).unwrap();

        let failures: Vec<_> = snapshot
            .results_for_provider(&summary.provider)
            .into_iter()
            .filter(|r| !r.skipped && !r.success)
            .collect();
        if !failures.is_empty() {
            writeln!(output, "### Failures").unwrap();
            writeln!(output).unwrap();
            for failure in failures {
                writeln!(
                    output,
                    "- `{}` ({}): {}",
                    failure.test_name,
                    failure
                        .error_category
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "unknown".to_string()),
                    failure.error.as_deref().unwrap_or("no error message"),
                )
                .unwrap();
            }
            writeln!(output).unwrap();
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekbench_collector::ResultCollector;
    use seekbench_core::{ErrorCategory, TestResult, TestType};
    use std::time::Duration;

    fn snapshot_with_data() -> ReportSnapshot {
        let collector = ResultCollector::new();
        collector.add_result(
            TestResult::builder()
                .test_name("academic_search")
                .provider("tavily")
                .test_type(TestType::Search)
                .success(true)
                .latency(Duration::from_millis(150))
                .credits_used(1.0)
                .quality_score(88.0)
                .build()
                .unwrap(),
        );
        collector.add_result(
            TestResult::builder()
                .test_name("news_extract")
                .provider("tavily")
                .test_type(TestType::Extract)
                .error("504 upstream", ErrorCategory::ServerError)
                .latency(Duration::from_millis(2500))
                .build()
                .unwrap(),
        );
        collector.add_result(
            TestResult::builder()
                .test_name("academic_search")
                .provider("exa")
                .test_type(TestType::Search)
                .skipped("no extract endpoint")
                .build()
                .unwrap(),
        );
        ReportSnapshot::from_collector("unit", &collector)
    }

    #[test]
    fn test_summary_contains_all_providers() {
        let md = generate_summary(&snapshot_with_data());
        assert!(md.contains("# Seekbench Report: unit"));
        assert!(md.contains("| tavily |"));
        assert!(md.contains("| exa |"));
    }

    #[test]
    fn test_unexecuted_provider_renders_dashes() {
        let md = generate_summary(&snapshot_with_data());
        let exa_row = md
            .lines()
            .find(|l| l.starts_with("| exa |"))
            .expect("exa row");
        assert!(exa_row.contains("| - |"), "row: {}", exa_row);
    }

    #[test]
    fn test_error_breakdown_present() {
        let md = generate_summary(&snapshot_with_data());
        assert!(md.contains("## Error Breakdown"));
        assert!(md.contains("server_error: 1"));
    }

    #[test]
    fn test_detailed_report_lists_failures() {
        let md = generate_detailed_report(&snapshot_with_data());
        assert!(md.contains("### Failures"));
        assert!(md.contains("`news_extract`"));
        assert!(md.contains("504 upstream"));
    }

    #[test]
    fn test_latency_formatting() {
        assert_eq!(fmt_latency(Duration::from_millis(150)), "150 ms");
        assert_eq!(fmt_latency(Duration::from_millis(2500)), "2.50 s");
    }
}
