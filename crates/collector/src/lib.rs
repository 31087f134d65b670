// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result collection and metrics aggregation for seekbench.
//!
//! This crate is the aggregation engine at the center of the harness:
//!
//! - [`collector`] - [`ResultCollector`], the concurrency-safe append-only
//!   store of [`seekbench_core::TestResult`] records
//! - [`summary`] - [`ProviderSummary`], the per-provider aggregate folded
//!   on demand from the current record set
//! - [`stats`] - latency distribution helpers (nearest-rank percentiles)
//! - [`pricing`] - [`CostCalculator`], the static per-provider rate table
//!   used as the fallback pricing source
//!
//! # Failure semantics
//!
//! No operation in this crate returns an error. Degenerate inputs (zero
//! records, zero credits, unseen providers) fold into zero-valued
//! summaries: a benchmark run with partial provider failures must still
//! produce a complete, inspectable report.
//!
//! # Concurrency
//!
//! Many producer tasks append concurrently while readers aggregate. The
//! record list sits behind a single reader/writer lock; readers copy data
//! out (or fold) under the shared lock so report formatting never holds
//! it. The pricing table has its own independent lock.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod collector;
pub mod pricing;
pub mod stats;
pub mod summary;

pub use collector::ResultCollector;
pub use pricing::{BillingModel, CostCalculator, ProviderRates};
pub use stats::LatencyStats;
pub use summary::ProviderSummary;
