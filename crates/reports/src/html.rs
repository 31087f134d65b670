//! HTML report generation.
//!
//! Produces a single self-contained page: the comparison table plus bar
//! charts for latency percentiles, total cost, and reliability-adjusted
//! quality. Chart rendering itself is delegated to Chart.js loaded from
//! its CDN; this module only generates the data arrays.

use std::fmt::Write;

use crate::snapshot::ReportSnapshot;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn js_number(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4}", value)
    } else {
        "0".to_string()
    }
}

/// Generate the full HTML report.
pub fn generate_html(snapshot: &ReportSnapshot) -> String {
    let mut page = String::new();

    let labels: Vec<String> = snapshot
        .summaries
        .iter()
        .map(|s| format!("\"{}\"", escape(&s.provider)))
        .collect();
    let labels = labels.join(", ");

    let series = |f: &dyn Fn(&seekbench_collector::ProviderSummary) -> f64| -> String {
        snapshot
            .summaries
            .iter()
            .map(|s| js_number(f(s)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let p50 = series(&|s| s.latency.p50.as_secs_f64() * 1000.0);
    let p95 = series(&|s| s.latency.p95.as_secs_f64() * 1000.0);
    let p99 = series(&|s| s.latency.p99.as_secs_f64() * 1000.0);
    let cost = series(&|s| s.total_cost_usd);
    let quality = series(&|s| s.reliability_adjusted_quality);

    writeln!(page, "<!DOCTYPE html>").unwrap();
    writeln!(page, "<html lang=\"en\">").unwrap();
    writeln!(page, "<head>").unwrap();
    writeln!(page, "<meta charset=\"utf-8\">").unwrap();
    writeln!(
        page,
        "<title>Seekbench Report: {}</title>",
        escape(&snapshot.run_name)
    )
    .unwrap();
    writeln!(page, "<script src=\"{}\"></script>", CHART_JS_CDN).unwrap();
    writeln!(
        page,
        "<style>body{{font-family:sans-serif;margin:2rem}}table{{border-collapse:collapse}}td,th{{border:1px solid #ccc;padding:0.4rem 0.8rem;text-align:right}}th:first-child,td:first-child{{text-align:left}}.chart{{max-width:720px;margin:2rem 0}}</style>"
    )
    .unwrap();
    writeln!(page, "</head>").unwrap();
    writeln!(page, "<body>").unwrap();
    writeln!(
        page,
        "<h1>Seekbench Report: {}</h1>",
        escape(&snapshot.run_name)
    )
    .unwrap();
    writeln!(
        page,
        "<p>Generated {}</p>",
        snapshot.generated_at.to_rfc3339()
    )
    .unwrap();

    write_comparison_table(&mut page, snapshot);

    for (id, title) in [
        ("latency", "Latency percentiles (ms)"),
        ("cost", "Total cost (USD)"),
        ("quality", "Reliability-adjusted quality"),
    ] {
        writeln!(page, "<div class=\"chart\"><h2>{}</h2>", title).unwrap();
        writeln!(page, "<canvas id=\"chart-{}\"></canvas></div>", id).unwrap();
    }

    writeln!(page, "<script>").unwrap();
    writeln!(page, "const labels = [{}];", labels).unwrap();
    writeln!(
        page,
        "new Chart(document.getElementById('chart-latency'), {{type: 'bar', data: {{labels, datasets: [\
         {{label: 'p50', data: [{}]}}, {{label: 'p95', data: [{}]}}, {{label: 'p99', data: [{}]}}]}}}});",
        p50, p95, p99
    )
    .unwrap();
    writeln!(
        page,
        "new Chart(document.getElementById('chart-cost'), {{type: 'bar', data: {{labels, datasets: [{{label: 'USD', data: [{}]}}]}}}});",
        cost
    )
    .unwrap();
    writeln!(
        page,
        "new Chart(document.getElementById('chart-quality'), {{type: 'bar', data: {{labels, datasets: [{{label: 'score', data: [{}]}}]}}, options: {{scales: {{y: {{min: 0, max: 100}}}}}}}});",
        quality
    )
    .unwrap();
    writeln!(page, "</script>").unwrap();
    writeln!(page, "</body>").unwrap();
    writeln!(page, "</html>").unwrap();

    page
}

fn write_comparison_table(page: &mut String, snapshot: &ReportSnapshot) {
    writeln!(page, "<table>").unwrap();
    writeln!(
        page,
        "<tr><th>Provider</th><th>Executed</th><th>Success %</th><th>Avg latency (ms)</th><th>Avg quality</th><th>Total cost (USD)</th></tr>"
    )
    .unwrap();
    for summary in &snapshot.summaries {
        writeln!(
            page,
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{:.0}</td><td>{:.1}</td><td>{:.4}</td></tr>",
            escape(&summary.provider),
            summary.executed_tests,
            summary.success_rate,
            summary.latency.avg.as_secs_f64() * 1000.0,
            summary.avg_quality_score,
            summary.total_cost_usd,
        )
        .unwrap();
    }
    writeln!(page, "</table>").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekbench_collector::ResultCollector;
    use seekbench_core::{TestResult, TestType};
    use std::time::Duration;

    fn snapshot() -> ReportSnapshot {
        let collector = ResultCollector::new();
        collector.add_result(
            TestResult::builder()
                .test_name("t")
                .provider("a<b")
                .test_type(TestType::Search)
                .success(true)
                .latency(Duration::from_millis(200))
                .build()
                .unwrap(),
        );
        ReportSnapshot::from_collector("html", &collector)
    }

    #[test]
    fn test_html_structure() {
        let html = generate_html(&snapshot());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(CHART_JS_CDN));
        assert!(html.contains("chart-latency"));
        assert!(html.contains("chart-cost"));
        assert!(html.contains("chart-quality"));
    }

    #[test]
    fn test_provider_names_are_escaped() {
        let html = generate_html(&snapshot());
        assert!(html.contains("a&lt;b"));
        assert!(!html.contains("<td>a<b</td>"));
    }

    #[test]
    fn test_chart_data_present() {
        let html = generate_html(&snapshot());
        assert!(html.contains("const labels = [\"a&lt;b\"];"));
        assert!(html.contains("{label: 'p95', data: [200.0000]}"));
    }
}
