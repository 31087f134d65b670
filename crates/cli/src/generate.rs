//! Edge-case test generation.
//!
//! These specs probe degenerate inputs every provider should survive.
//! They are tagged [`RunMode::EdgeCase`] and excluded from primary
//! comparison, since providers legitimately differ on how they treat
//! garbage input.

use seekbench_core::{RunMode, TestSpec, TestType};

fn edge(name: &str, test_type: TestType, query: String) -> TestSpec {
    TestSpec {
        name: name.to_string(),
        test_type,
        query,
        repeats: 1,
        run_mode: RunMode::EdgeCase,
        excluded_from_primary: true,
    }
}

/// Generated edge-case specs appended to a run when
/// `include_edge_cases` is set.
pub fn edge_case_specs() -> Vec<TestSpec> {
    vec![
        edge(
            "edge_unicode_query",
            TestType::Search,
            "量子コンピューティング émergence ☃ مرحبا".to_string(),
        ),
        edge(
            "edge_long_query",
            TestType::Search,
            "distributed consensus ".repeat(200),
        ),
        edge("edge_empty_query", TestType::Search, String::new()),
        edge(
            "edge_fragment_url",
            TestType::Extract,
            "https://example.com/page#section-3".to_string(),
        ),
        edge(
            "edge_redirect_chain",
            TestType::Extract,
            "http://example.com/r/1?next=/r/2?next=/final".to_string(),
        ),
    ]
}
