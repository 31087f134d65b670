//! Report generation for seekbench.
//!
//! Everything here consumes the collector's narrow read API through a
//! [`ReportSnapshot`] taken at render time, so formatting never holds the
//! collector's lock.
//!
//! # Modules
//!
//! - [`snapshot`] - the frozen view of a run that all renderers consume
//! - [`markdown`] - Markdown comparison report
//! - [`json`] - JSON serialization of the snapshot
//! - [`html`] - self-contained HTML report with charts
//! - [`io`] - output directory layout and file writing

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod html;
pub mod io;
pub mod json;
pub mod markdown;
pub mod snapshot;

pub use snapshot::ReportSnapshot;

use thiserror::Error;

/// Errors that can occur while writing reports.
///
/// Aggregation itself is infallible; only rendering to disk can fail.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
