//! CLI for seekbench.
//!
//! This crate provides the `seekbench` binary: the benchmark runner, the
//! report re-renderer, and the pricing table inspector.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod generate;
pub mod runner;
pub mod simulated;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use seekbench_collector::{BillingModel, CostCalculator, ProviderRates, ResultCollector};
use seekbench_core::BenchConfig;
use seekbench_reports::io as report_io;
use seekbench_reports::ReportSnapshot;

use crate::runner::ProviderClient;
use crate::simulated::SimulatedProvider;

/// Seekbench CLI.
#[derive(Parser, Debug)]
#[command(name = "seekbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Report output format selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON outputs only.
    Json,
    /// Markdown outputs only.
    Markdown,
    /// HTML output only.
    Html,
    /// Every format.
    All,
}

impl From<OutputFormat> for report_io::Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => report_io::Format::Json,
            OutputFormat::Markdown => report_io::Format::Markdown,
            OutputFormat::Html => report_io::Format::Html,
            OutputFormat::All => report_io::Format::All,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a benchmark run and write reports.
    Run {
        /// Path to the benchmark configuration file.
        #[arg(short, long, default_value = "seekbench.toml")]
        config: String,

        /// Output directory override (defaults to the configured one).
        #[arg(short, long)]
        output: Option<String>,

        /// Report formats to write.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::All)]
        format: OutputFormat,

        /// Verbose output.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Re-render reports from a saved `all_results.json`.
    Report {
        /// Path to an `all_results.json` from an earlier run.
        #[arg(short, long)]
        input: String,

        /// Output directory for the regenerated reports.
        #[arg(short, long, default_value = "output")]
        output: String,

        /// Report formats to write.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::All)]
        format: OutputFormat,
    },

    /// Print the provider pricing table.
    Pricing,

    /// Show version and output layout.
    Status {
        /// Show detailed status information.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Run the CLI with the given arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            output,
            format,
            verbose,
        } => {
            init_tracing(verbose);
            cmd_run(&config, output, format)
        }
        Commands::Report {
            input,
            output,
            format,
        } => {
            init_tracing(false);
            cmd_report(&input, &output, format)
        }
        Commands::Pricing => cmd_pricing(),
        Commands::Status { detailed } => cmd_status(detailed),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn cmd_run(config_path: &str, output: Option<String>, format: OutputFormat) -> anyhow::Result<()> {
    let config = BenchConfig::from_path(config_path)
        .with_context(|| format!("loading benchmark config from {config_path}"))?;
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    let run_id = Uuid::new_v4();
    info!(%run_id, run = %config.run_name, "starting benchmark run");

    let collector = Arc::new(ResultCollector::new());
    apply_pricing_overrides(&config, collector.pricing());

    let clients: Vec<Arc<dyn ProviderClient>> = config
        .providers
        .iter()
        .map(|p| Arc::new(SimulatedProvider::new(p.as_str())) as Arc<dyn ProviderClient>)
        .collect();

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let stats = runtime.block_on(runner::run_benchmark(
        &config,
        &clients,
        Arc::clone(&collector),
        true,
    ));

    println!(
        "Completed {} calls in {:.1}s: {} ok, {} failed, {} skipped",
        stats.total,
        stats.elapsed.as_secs_f64(),
        stats.succeeded.to_string().green(),
        stats.failed.to_string().red(),
        stats.skipped.to_string().yellow(),
    );

    let snapshot = ReportSnapshot::from_collector(&config.run_name, &collector);
    print_provider_lines(&snapshot);

    let written = report_io::write_all_outputs(&output_dir, &snapshot, format.into())
        .with_context(|| format!("writing reports to {output_dir}"))?;
    println!("Wrote {} report files to {}/", written.len(), output_dir);

    Ok(())
}

fn apply_pricing_overrides(config: &BenchConfig, pricing: &CostCalculator) {
    for (provider, rate_override) in &config.pricing {
        let billing = pricing
            .rate_entry(provider)
            .map(|entry| entry.billing)
            .unwrap_or(BillingModel::PerCredit);
        pricing.set_custom_rate(
            provider.clone(),
            ProviderRates {
                billing,
                per_unit_usd: rate_override.per_unit_usd,
                content_per_unit_usd: rate_override.content_per_unit_usd,
            },
        );
    }
}

fn print_provider_lines(snapshot: &ReportSnapshot) {
    for summary in &snapshot.summaries {
        let rate = format!("{:.1}%", summary.success_rate);
        let rate = if summary.success_rate >= 90.0 {
            rate.green()
        } else if summary.success_rate >= 70.0 {
            rate.yellow()
        } else {
            rate.red()
        };
        println!(
            "  {:<12} {:>4} executed  success {}  avg {:>6.0}ms  cost ${:.4}",
            summary.provider.bold(),
            summary.executed_tests,
            rate,
            summary.latency.avg_ms(),
            summary.total_cost_usd,
        );
    }
}

fn cmd_report(input: &str, output: &str, format: OutputFormat) -> anyhow::Result<()> {
    let snapshot =
        report_io::read_snapshot(input).with_context(|| format!("reading snapshot {input}"))?;
    println!(
        "Re-rendering run {} ({} records, {} providers)",
        snapshot.run_name.bold(),
        snapshot.results.len(),
        snapshot.providers.len()
    );
    let written = report_io::write_all_outputs(output, &snapshot, format.into())
        .with_context(|| format!("writing reports to {output}"))?;
    println!("Wrote {} report files to {}/", written.len(), output);
    Ok(())
}

fn cmd_pricing() -> anyhow::Result<()> {
    let pricing = CostCalculator::with_default_rates();
    println!("Provider pricing table\n");
    for (provider, attrs) in pricing.pricing_info() {
        println!("{}", provider.bold());
        for (attribute, value) in attrs {
            println!("  {attribute}: {value}");
        }
        println!();
    }
    Ok(())
}

fn cmd_status(detailed: bool) -> anyhow::Result<()> {
    println!("Seekbench Benchmark Harness");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    if detailed {
        println!("\nOutput files per run directory:");
        println!("  - {}/<provider>.json", report_io::RAW_DIR);
        println!("  - {}", report_io::ALL_RESULTS_FILE);
        println!("  - {}", report_io::SUMMARY_FILE);
        println!("  - {}", report_io::DETAILED_FILE);
        println!("  - {}", report_io::HTML_FILE);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_defaults() {
        let cli = Cli::try_parse_from(["seekbench", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                config,
                output,
                format,
                verbose,
            } => {
                assert_eq!(config, "seekbench.toml");
                assert!(output.is_none());
                assert_eq!(format, OutputFormat::All);
                assert!(!verbose);
            }
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn test_cli_parses_report_args() {
        let cli = Cli::try_parse_from([
            "seekbench",
            "report",
            "--input",
            "old/all_results.json",
            "--format",
            "markdown",
        ])
        .unwrap();
        match cli.command {
            Commands::Report { input, format, .. } => {
                assert_eq!(input, "old/all_results.json");
                assert_eq!(format, OutputFormat::Markdown);
            }
            _ => panic!("expected report subcommand"),
        }
    }

    #[test]
    fn test_pricing_override_applied() {
        let config = BenchConfig::from_toml_str(
            r#"
providers = ["tavily"]

[[tests]]
name = "t"
test_type = "search"
query = "q"

[pricing.tavily]
per_unit_usd = 0.5
"#,
        )
        .unwrap();

        let pricing = CostCalculator::with_default_rates();
        apply_pricing_overrides(&config, &pricing);

        let entry = pricing.rate_entry("tavily").unwrap();
        assert_eq!(entry.per_unit_usd, 0.5);
        // Billing model is preserved from the default table.
        assert_eq!(entry.billing, BillingModel::PerCredit);
        assert_eq!(entry.content_per_unit_usd, None);
    }
}
