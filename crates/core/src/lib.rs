// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core types for the seekbench benchmark harness.
//!
//! This crate provides the vocabulary shared by every other seekbench
//! crate:
//!
//! - [`result`] - The [`TestResult`] record, one per executed provider call
//! - [`types`] - Closed enums for test types, run modes, error categories,
//!   and quality bands
//! - [`config`] - The TOML benchmark configuration loaded by the CLI
//! - [`error`] - The crate error type
//!
//! A [`TestResult`] is created by the test-execution layer after each
//! provider call and appended to the collector, where it is immutable for
//! the rest of the run.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use config::{BenchConfig, TestSpec};
pub use error::{Error, Result};
pub use result::TestResult;
pub use types::{ErrorCategory, ImplKind, QualityBand, RunMode, TestType};

/// Seekbench version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
