// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Academic content heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{clamp_score, ContentValidator, QualityAssessment};

static DOI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b10\.\d{4,9}/[-._;()/:A-Za-z0-9]+").unwrap());

static ARXIV_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\barXiv:\d{4}\.\d{4,5}(v\d+)?\b").unwrap());

// Bracketed numeric citations ([12]) or author-year citations ((Smith et
// al., 2021).
static CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\d{1,3}\]|\([A-Z][A-Za-z-]+(?: et al\.)?,? \d{4}\)").unwrap()
});

const SCHOLARLY_TERMS: &[&str] = &[
    "abstract",
    "methodology",
    "results",
    "conclusion",
    "peer-reviewed",
    "dataset",
    "baseline",
    "evaluation",
];

/// Scores scholarly register: citations, identifiers, section vocabulary.
pub struct AcademicValidator;

impl ContentValidator for AcademicValidator {
    fn domain(&self) -> &'static str {
        "academic"
    }

    fn assess(&self, content: &str) -> QualityAssessment {
        if content.trim().is_empty() {
            return QualityAssessment::empty_content();
        }

        let mut score = 0.0;
        let mut signals = Vec::new();
        let lower = content.to_lowercase();

        let doi_count = DOI.find_iter(content).count();
        if doi_count > 0 {
            score += 25.0;
            signals.push(format!("{} DOI reference(s)", doi_count));
        }

        let arxiv_count = ARXIV_ID.find_iter(content).count();
        if arxiv_count > 0 {
            score += 20.0;
            signals.push(format!("{} arXiv identifier(s)", arxiv_count));
        }

        let citation_count = CITATION.find_iter(content).count();
        if citation_count >= 3 {
            score += 20.0;
            signals.push(format!("{} citation markers", citation_count));
        } else if citation_count > 0 {
            score += 10.0;
            signals.push(format!("{} citation marker(s)", citation_count));
        }

        let term_hits = SCHOLARLY_TERMS
            .iter()
            .filter(|t| lower.contains(**t))
            .count();
        if term_hits > 0 {
            // 5 points per distinct term, capped at 25.
            let points = (term_hits as f64 * 5.0).min(25.0);
            score += points;
            signals.push(format!("{} scholarly term(s)", term_hits));
        }

        if content.len() >= 2_000 {
            score += 10.0;
            signals.push("substantial content length".to_string());
        }

        let score = clamp_score(score);
        debug!(score, signals = signals.len(), "academic assessment");
        QualityAssessment { score, signals }
    }
}
