// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! News content heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{clamp_score, ContentValidator, QualityAssessment};

// "WASHINGTON —" / "LONDON (Reuters) -" style datelines.
static DATELINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[A-Z][A-Z .]{2,30}(\([A-Za-z ]+\))?\s*[—-]").unwrap()
});

static BYLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bBy [A-Z][a-z]+ [A-Z][a-z]+").unwrap());

// Month-name or ISO dates.
static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(January|February|March|April|May|June|July|August|September|October|November|December) \d{1,2}, \d{4}\b|\b\d{4}-\d{2}-\d{2}\b",
    )
    .unwrap()
});

const ATTRIBUTION_VERBS: &[&str] = &[
    "said",
    "announced",
    "reported",
    "according to",
    "told",
    "confirmed",
    "stated",
];

/// Scores journalistic structure: datelines, bylines, attribution.
pub struct NewsValidator;

impl ContentValidator for NewsValidator {
    fn domain(&self) -> &'static str {
        "news"
    }

    fn assess(&self, content: &str) -> QualityAssessment {
        if content.trim().is_empty() {
            return QualityAssessment::empty_content();
        }

        let mut score = 0.0;
        let mut signals = Vec::new();
        let lower = content.to_lowercase();

        if DATELINE.is_match(content) {
            score += 20.0;
            signals.push("dateline present".to_string());
        }

        if BYLINE.is_match(content) {
            score += 20.0;
            signals.push("byline present".to_string());
        }

        let date_count = DATE.find_iter(content).count();
        if date_count > 0 {
            score += 15.0;
            signals.push(format!("{} dated reference(s)", date_count));
        }

        let attribution_hits = ATTRIBUTION_VERBS
            .iter()
            .filter(|v| lower.contains(**v))
            .count();
        if attribution_hits >= 3 {
            score += 30.0;
            signals.push(format!("{} attribution verbs", attribution_hits));
        } else if attribution_hits > 0 {
            score += 15.0;
            signals.push(format!("{} attribution verb(s)", attribution_hits));
        }

        // A headline-sized first line suggests article structure.
        if let Some(first_line) = content.lines().next() {
            let words = first_line.split_whitespace().count();
            if (4..=18).contains(&words) {
                score += 15.0;
                signals.push("headline-shaped lead".to_string());
            }
        }

        let score = clamp_score(score);
        debug!(score, signals = signals.len(), "news assessment");
        QualityAssessment { score, signals }
    }
}
