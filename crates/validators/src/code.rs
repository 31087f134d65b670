// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Code content heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{clamp_score, ContentValidator, QualityAssessment};

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z0-9_+-]*\n.*?```").unwrap());

// Function/definition syntax across the common languages.
static FUNCTION_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(fn|def|func|function)\s+[A-Za-z_][A-Za-z0-9_]*\s*\(").unwrap()
});

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(use\s+[a-z_][A-Za-z0-9_:]*|import\s+\S+|from\s+\S+\s+import|#include\s*<)").unwrap()
});

static REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(github|gitlab|bitbucket)\.[a-z]+/[\w.-]+/[\w.-]+").unwrap()
});

/// Scores code-likeness: fenced blocks, definitions, imports, repo links.
pub struct CodeValidator;

impl ContentValidator for CodeValidator {
    fn domain(&self) -> &'static str {
        "code"
    }

    fn assess(&self, content: &str) -> QualityAssessment {
        if content.trim().is_empty() {
            return QualityAssessment::empty_content();
        }

        let mut score = 0.0;
        let mut signals = Vec::new();

        let block_count = FENCED_BLOCK.find_iter(content).count();
        if block_count > 0 {
            score += 30.0;
            signals.push(format!("{} fenced code block(s)", block_count));
        }

        let def_count = FUNCTION_DEF.find_iter(content).count();
        if def_count >= 2 {
            score += 25.0;
            signals.push(format!("{} function definitions", def_count));
        } else if def_count == 1 {
            score += 15.0;
            signals.push("1 function definition".to_string());
        }

        if IMPORT.is_match(content) {
            score += 20.0;
            signals.push("import statements".to_string());
        }

        let repo_count = REPO_URL.find_iter(content).count();
        if repo_count > 0 {
            score += 15.0;
            signals.push(format!("{} repository link(s)", repo_count));
        }

        // Indented lines are weak evidence of code structure.
        let indented = content
            .lines()
            .filter(|l| l.starts_with("    ") || l.starts_with('\t'))
            .count();
        if indented >= 5 {
            score += 10.0;
            signals.push(format!("{} indented lines", indented));
        }

        let score = clamp_score(score);
        debug!(score, signals = signals.len(), "code assessment");
        QualityAssessment { score, signals }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_answer_scores_high() {
        let content = "Use the entry API:\n\
            ```rust\nuse std::collections::HashMap;\n\
            fn tally(words: &[&str]) -> HashMap<&str, u32> {\n    \
            let mut map = HashMap::new();\n    \
            for w in words {\n        *map.entry(*w).or_insert(0) += 1;\n    }\n    \
            map\n}\n```\n\
            See https://github.com/rust-lang/rust for more.";
        let assessment = CodeValidator.assess(content);
        assert!(assessment.score >= 60.0, "score {}", assessment.score);
        assert!(assessment
            .signals
            .iter()
            .any(|s| s.contains("fenced")));
        assert!(assessment
            .signals
            .iter()
            .any(|s| s.contains("repository")));
    }

    #[test]
    fn test_prose_scores_low() {
        let assessment = CodeValidator.assess("A long essay about gardening.");
        assert!(assessment.score < 30.0);
    }

    #[test]
    fn test_empty_content_scores_zero() {
        assert_eq!(CodeValidator.assess("\n\n").score, 0.0);
    }

    #[test]
    fn test_python_definitions_detected() {
        let content = "def parse(line):\n    return line.strip()\n\n\
                       def main():\n    pass\nimport sys";
        let assessment = CodeValidator.assess(content);
        assert!(assessment
            .signals
            .iter()
            .any(|s| s.contains("function definitions")));
        assert!(assessment
            .signals
            .iter()
            .any(|s| s.contains("import")));
    }
}
