// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The typed shape of a results document.
//!
//! A results document is the JSON file a completed test run writes per
//! project: `{ config, stats, suites: [ { title, tests?, suites? } ] }`.
//! The document is parsed once, up front, into this tree; a document that
//! does not match the shape is rejected whole (and downgraded to a
//! recoverable per-artifact error by the pipeline) rather than walked
//! dynamically.

use serde::{Deserialize, Deserializer};

/// A parsed results document.
///
/// Only the suite tree matters to extraction; the `config` and `stats`
/// objects the runner writes alongside it are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct RunDocument {
    /// Top-level suites, in document order.
    pub suites: Vec<SuiteNode>,
}

impl RunDocument {
    /// Parses a results document from its JSON text.
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

/// One suite in the tree: a title, its own tests, and nested child suites.
#[derive(Clone, Debug, Deserialize)]
pub struct SuiteNode {
    /// The suite title.
    pub title: String,
    /// Tests directly owned by this suite, in document order.
    #[serde(default)]
    pub tests: Vec<TestEntry>,
    /// Nested suites, in document order.
    #[serde(default)]
    pub suites: Vec<SuiteNode>,
}

/// One test entry inside a suite.
#[derive(Clone, Debug, Deserialize)]
pub struct TestEntry {
    /// The test's own title.
    pub title: String,
    /// The raw status string. Absent or unrecognized statuses land in the
    /// `unknown` bucket during extraction.
    #[serde(default)]
    pub status: Option<String>,
    /// Duration in milliseconds. Absent or non-numeric values become 0.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub duration: u64,
    /// Error detail, either a bare string or an object with a `message`
    /// field.
    #[serde(default, deserialize_with = "lenient_error_detail")]
    pub error: Option<String>,
}

// Accepts any JSON value for a duration. Numbers are truncated to whole
// non-negative milliseconds; everything else becomes 0.
fn lenient_millis<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let millis = match value.as_f64() {
        Some(n) if n > 0.0 => n as u64,
        _ => 0,
    };
    Ok(millis)
}

// Accepts an error detail as either `"message"` or `{ "message": "..." }`.
fn lenient_error_detail<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let detail = match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|message| message.as_str())
            .map(str::to_owned),
        _ => None,
    };
    Ok(detail)
}
