// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Domain-specific content quality heuristics.
//!
//! Each validator scans returned provider content with regex and keyword
//! heuristics and produces a [`QualityAssessment`]: a 0-100 score plus the
//! list of signals that contributed to it, so reports can explain why a
//! response scored the way it did.
//!
//! These are deliberately shallow scanners, not NLP. They exist to rank
//! providers against each other on the same content, where a consistent
//! shallow heuristic is enough.
//!
//! - [`academic`] - citations, DOIs, arXiv identifiers, scholarly register
//! - [`news`] - datelines, bylines, attribution verbs
//! - [`code`] - fenced blocks, function syntax, repository links

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod academic;
pub mod code;
pub mod news;

pub use academic::AcademicValidator;
pub use code::CodeValidator;
pub use news::NewsValidator;

use serde::{Deserialize, Serialize};

/// Outcome of scoring one piece of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Score in `[0, 100]`.
    pub score: f64,
    /// Human-readable signals that contributed to the score.
    pub signals: Vec<String>,
}

impl QualityAssessment {
    /// Assessment for empty content: zero, with an explanatory signal.
    pub fn empty_content() -> Self {
        Self {
            score: 0.0,
            signals: vec!["content is empty".to_string()],
        }
    }
}

/// A domain heuristic scorer.
pub trait ContentValidator: Send + Sync {
    /// Domain label, used in reports and logs.
    fn domain(&self) -> &'static str;

    /// Score a piece of returned content.
    fn assess(&self, content: &str) -> QualityAssessment;
}

/// Pick a validator for a test by its name prefix.
///
/// `academic_*` tests get the academic validator, `news_*` the news
/// validator, `code_*` the code validator. Tests outside these domains
/// get `None` and stay unscored.
pub fn validator_for(test_name: &str) -> Option<Box<dyn ContentValidator>> {
    if test_name.starts_with("academic") {
        Some(Box::new(AcademicValidator))
    } else if test_name.starts_with("news") {
        Some(Box::new(NewsValidator))
    } else if test_name.starts_with("code") {
        Some(Box::new(CodeValidator))
    } else {
        None
    }
}

/// Clamp a raw signal total into the `[0, 100]` score range.
pub(crate) fn clamp_score(raw: f64) -> f64 {
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_for_prefixes() {
        assert_eq!(
            validator_for("academic_search_arxiv").unwrap().domain(),
            "academic"
        );
        assert_eq!(validator_for("news_extract").unwrap().domain(), "news");
        assert_eq!(validator_for("code_search").unwrap().domain(), "code");
        assert!(validator_for("generic_crawl").is_none());
    }

    #[test]
    fn test_empty_content_assessment() {
        let assessment = QualityAssessment::empty_content();
        assert_eq!(assessment.score, 0.0);
        assert_eq!(assessment.signals.len(), 1);
    }
}
