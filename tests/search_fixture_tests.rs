//! Fixture tests for search response parsing.
//!
//! Each fixture under `tests/fixtures/search/` is a captured (or trimmed)
//! search API response body paired with the candidates it must parse into.
//!
//! Test format:
//! ```json
//! {
//!   "response": { "hits": [ { "recipe": { ... } } ] },
//!   "expected": [ { "label": "...", "sourceUrl": "...", ... } ]
//! }
//! ```

use glob::glob;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use larder_core::{parse_search_response, RecipeCandidate};

/// A test case loaded from a JSON fixture file
#[derive(Debug, Deserialize)]
struct TestCase {
    /// Raw response body, kept as JSON for fixture readability
    response: serde_json::Value,
    /// Candidates the response must parse into, in hit order
    expected: Vec<RecipeCandidate>,
}

fn load_test_cases() -> Vec<(String, TestCase)> {
    let pattern = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/search/*.json");
    let pattern_str = pattern.to_string_lossy();

    let mut cases = Vec::new();
    for entry in glob(&pattern_str).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read directory entry");
        let name = path.file_stem().unwrap().to_string_lossy().to_string();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: TestCase = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    // Sort by name for deterministic ordering
    cases.sort_by(|a, b| a.0.cmp(&b.0));
    cases
}

#[test]
fn test_search_response_fixtures() {
    let cases = load_test_cases();
    assert!(!cases.is_empty(), "no fixtures found");

    let mut failures = Vec::new();

    for (name, case) in &cases {
        let body = case.response.to_string();
        match parse_search_response(&body) {
            Ok(actual) => {
                if actual != case.expected {
                    failures.push(format!(
                        "\n=== {} ===\nExpected: {:#?}\nActual:   {:#?}\n",
                        name, case.expected, actual
                    ));
                }
            }
            Err(e) => {
                failures.push(format!("\n=== {} ===\nParse error: {}\n", name, e));
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "{} failures across {} fixtures:\n{}",
            failures.len(),
            cases.len(),
            failures.join("")
        );
    }
}
