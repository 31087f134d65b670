//! Output file layout and writing.
//!
//! One run writes into a single output directory:
//!
//! - `raw/<provider>.json` - per-provider raw records
//! - `all_results.json` - the full snapshot (also the input for
//!   re-rendering via `seekbench report`)
//! - `summary.md` - Markdown comparison report
//! - `detailed.md` - per-provider detail report
//! - `report.html` - HTML report with charts

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use seekbench_core::TestResult;

use crate::snapshot::ReportSnapshot;
use crate::{html, json, markdown, Result};

/// Subdirectory receiving per-provider raw records.
pub const RAW_DIR: &str = "raw";

/// Combined snapshot file name.
pub const ALL_RESULTS_FILE: &str = "all_results.json";

/// Markdown summary file name.
pub const SUMMARY_FILE: &str = "summary.md";

/// Markdown detail file name.
pub const DETAILED_FILE: &str = "detailed.md";

/// HTML report file name.
pub const HTML_FILE: &str = "report.html";

/// Which report formats to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON outputs only.
    Json,
    /// Markdown outputs only.
    Markdown,
    /// HTML output only.
    Html,
    /// Every format.
    All,
}

impl Format {
    fn includes_json(self) -> bool {
        matches!(self, Format::Json | Format::All)
    }

    fn includes_markdown(self) -> bool {
        matches!(self, Format::Markdown | Format::All)
    }

    fn includes_html(self) -> bool {
        matches!(self, Format::Html | Format::All)
    }
}

/// Ensure the output directory and its `raw/` subdirectory exist.
pub fn ensure_output_dirs(root: impl AsRef<Path>) -> Result<()> {
    fs::create_dir_all(root.as_ref().join(RAW_DIR))?;
    Ok(())
}

/// Write one provider's raw records under `raw/`.
pub fn write_raw_results(
    root: impl AsRef<Path>,
    provider: &str,
    results: &[&TestResult],
) -> Result<PathBuf> {
    let filename = root
        .as_ref()
        .join(RAW_DIR)
        .join(format!("{}.json", provider.replace('/', "_")));
    fs::write(&filename, serde_json::to_string_pretty(results)?)?;
    Ok(filename)
}

/// Write every requested output for a snapshot. Returns the list of
/// files written.
pub fn write_all_outputs(
    root: impl AsRef<Path>,
    snapshot: &ReportSnapshot,
    format: Format,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    ensure_output_dirs(root)?;
    let mut written = Vec::new();

    if format.includes_json() {
        for provider in &snapshot.providers {
            let results = snapshot.results_for_provider(provider);
            written.push(write_raw_results(root, provider, &results)?);
        }
        let path = root.join(ALL_RESULTS_FILE);
        fs::write(&path, json::to_json_pretty(snapshot)?)?;
        written.push(path);
    }

    if format.includes_markdown() {
        let path = root.join(SUMMARY_FILE);
        fs::write(&path, markdown::generate_summary(snapshot))?;
        written.push(path);

        let path = root.join(DETAILED_FILE);
        fs::write(&path, markdown::generate_detailed_report(snapshot))?;
        written.push(path);
    }

    if format.includes_html() {
        let path = root.join(HTML_FILE);
        fs::write(&path, html::generate_html(snapshot))?;
        written.push(path);
    }

    info!(
        dir = %root.display(),
        files = written.len(),
        "report outputs written"
    );
    Ok(written)
}

/// Read a snapshot back from an `all_results.json` written earlier.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<ReportSnapshot> {
    let content = fs::read_to_string(path)?;
    json::from_json_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekbench_collector::ResultCollector;
    use seekbench_core::{TestResult, TestType};
    use std::time::Duration;

    fn temp_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "seekbench-io-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn snapshot() -> ReportSnapshot {
        let collector = ResultCollector::new();
        collector.add_result(
            TestResult::builder()
                .test_name("t")
                .provider("tavily")
                .test_type(TestType::Search)
                .success(true)
                .latency(Duration::from_millis(90))
                .build()
                .unwrap(),
        );
        ReportSnapshot::from_collector("io", &collector)
    }

    #[test]
    fn test_write_all_formats_and_read_back() {
        let root = temp_root("all");
        let written = write_all_outputs(&root, &snapshot(), Format::All).unwrap();
        assert_eq!(written.len(), 5);
        assert!(root.join(RAW_DIR).join("tavily.json").exists());
        assert!(root.join(SUMMARY_FILE).exists());
        assert!(root.join(HTML_FILE).exists());

        let back = read_snapshot(root.join(ALL_RESULTS_FILE)).unwrap();
        assert_eq!(back.run_name, "io");
        assert_eq!(back.results.len(), 1);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_markdown_only_writes_no_json() {
        let root = temp_root("md");
        write_all_outputs(&root, &snapshot(), Format::Markdown).unwrap();
        assert!(root.join(SUMMARY_FILE).exists());
        assert!(root.join(DETAILED_FILE).exists());
        assert!(!root.join(ALL_RESULTS_FILE).exists());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_read_snapshot_missing_file_errors() {
        let err = read_snapshot("/nonexistent/seekbench/all_results.json").unwrap_err();
        assert!(matches!(err, crate::ReportError::Io(_)));
    }
}
