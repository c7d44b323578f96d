// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Documented output formats for [rundash](https://crates.io/crates/rundash-cli).
//!
//! The rundash engine writes a bundle of JSON documents next to the HTML
//! dashboard it generates. This crate defines those document shapes so that
//! external tooling can load them without depending on the engine itself.
//! Each document is independently loadable: `summary.json`,
//! `tag-reports.json`, `project-reports.json`, `trends.json` and
//! `all-tests.json` all deserialize from their own file.

mod exit_codes;

pub use exit_codes::RundashExitCode;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version written into every document produced by rundash.
///
/// Bumped whenever the shape of a document changes incompatibly.
pub const FORMAT_VERSION: u32 = 1;

/// The execution outcome of a single test record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The test passed.
    Passed,
    /// The test failed, including on retry if any.
    Failed,
    /// The test was skipped.
    Skipped,
    /// The test failed at first but passed on retry.
    Flaky,
    /// The artifact carried no recognized status for this test.
    ///
    /// Unknown records count toward the total but toward none of the other
    /// buckets, keeping the `passed + failed + skipped + flaky + unknown ==
    /// total` invariant exact.
    Unknown,
}

impl RecordStatus {
    /// Returns the canonical string forms of all statuses.
    pub fn variants() -> [&'static str; 5] {
        ["passed", "failed", "skipped", "flaky", "unknown"]
    }

    /// Returns true if this status represents a failure.
    pub fn is_failure(self) -> bool {
        matches!(self, RecordStatus::Failed)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordStatus::Passed => "passed",
            RecordStatus::Failed => "failed",
            RecordStatus::Skipped => "skipped",
            RecordStatus::Flaky => "flaky",
            RecordStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Counts and derived figures over a scope of test records.
///
/// A stats block appears at three scopes: the overall summary, each tag
/// report and each project report. `total` is always the sum of the five
/// status buckets.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AggregateStats {
    /// Total number of records in this scope.
    pub total: usize,
    /// Number of passed records.
    pub passed: usize,
    /// Number of failed records.
    pub failed: usize,
    /// Number of skipped records.
    pub skipped: usize,
    /// Number of flaky records.
    pub flaky: usize,
    /// Number of records with an unrecognized status.
    pub unknown: usize,
    /// Summed duration of all records in this scope, in milliseconds.
    pub duration_ms: u64,
    /// Pass rate as a percentage string with two decimal places, e.g.
    /// `"97.50%"`. The literal `"0%"` when `total` is zero.
    pub pass_rate: String,
}

/// One flattened test record, as written to `all-tests.json`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RecordSummary {
    /// The test's own title.
    pub title: String,
    /// Ancestor suite titles and the test's own title, joined with `" > "`.
    pub full_title: String,
    /// Ancestor suite titles joined with `" > "`, excluding the test's own
    /// title. Empty for tests directly under a top-level suite with no
    /// ancestors.
    pub suite_path: String,
    /// The execution outcome.
    pub status: RecordStatus,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Tags derived from the title, in first-occurrence order.
    pub tags: Vec<String>,
    /// The project (artifact source directory) this record came from.
    pub project: String,
    /// Error detail, present only for failed records that carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A reduced record used in tag report member lists.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TagMember {
    /// The test's own title.
    pub title: String,
    /// The execution outcome.
    pub status: RecordStatus,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// The project this record came from.
    pub project: String,
}

/// Per-tag aggregation, one entry per distinct tag.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TagReport {
    /// Stats over all records carrying this tag.
    pub stats: AggregateStats,
    /// The records carrying this tag, in extraction order.
    pub members: Vec<TagMember>,
}

/// A failed record within a project report.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FailureDetail {
    /// The test's own title.
    pub title: String,
    /// The fully-qualified title.
    pub full_title: String,
    /// Error detail carried by the artifact, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-project aggregation, one entry per project directory.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectReport {
    /// Stats over this project's records.
    pub stats: AggregateStats,
    /// Tag membership counts restricted to this project.
    pub tag_counts: IndexMap<String, usize>,
    /// Failed records in this project.
    pub failures: Vec<FailureDetail>,
}

/// The kind of observation an [`Insight`] makes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    /// Slow-test observations.
    Performance,
    /// Failure-clustering observations.
    Quality,
    /// Tag coverage observations.
    Coverage,
}

/// One labeled data point within an insight.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InsightDatum {
    /// What this data point refers to (a test title, a tag, ...).
    pub label: String,
    /// The observation for the label, already formatted for display.
    pub value: String,
}

/// A derived, ranked observation over the aggregated record set.
///
/// Insights are recomputed fresh on every run; they have no identity across
/// runs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Insight {
    /// The kind of observation.
    pub category: InsightCategory,
    /// Short human-readable heading.
    pub title: String,
    /// One-sentence description of what the data points show.
    pub description: String,
    /// Ranked data points, most significant first.
    pub data: Vec<InsightDatum>,
}

/// The shape of `summary.json`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SummaryDocument {
    /// Document format version.
    pub version: u32,
    /// When this report was generated.
    pub generated_at: DateTime<Utc>,
    /// Stats over all records in the run.
    pub stats: AggregateStats,
    /// Distinct projects seen, in first-encountered order.
    pub projects: Vec<String>,
    /// Tag membership counts across the whole run.
    pub tag_counts: IndexMap<String, usize>,
    /// Derived observations, in generation order. The final entry is always
    /// the tag coverage insight.
    pub insights: Vec<Insight>,
}

/// The shape of `tag-reports.json`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TagReportsDocument {
    /// Document format version.
    pub version: u32,
    /// One report per distinct tag, in first-encountered order.
    pub tags: IndexMap<String, TagReport>,
}

/// The shape of `project-reports.json`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectReportsDocument {
    /// Document format version.
    pub version: u32,
    /// One report per project, in first-encountered order.
    pub projects: IndexMap<String, ProjectReport>,
}

/// The shape of `all-tests.json`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AllTestsDocument {
    /// Document format version.
    pub version: u32,
    /// Every extracted record, in discovery-then-extraction order.
    pub records: Vec<RecordSummary>,
}

/// One point in the `trends.json` series.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrendPoint {
    /// When the run this point describes was aggregated.
    pub generated_at: DateTime<Utc>,
    /// Total records in the run.
    pub total: usize,
    /// Pass rate string for the run.
    pub pass_rate: String,
    /// Summed duration for the run, in milliseconds.
    pub duration_ms: u64,
}

/// The shape of `trends.json`.
///
/// rundash does not persist state across runs, so the series always holds
/// exactly the current run. The shape is reserved for tooling that stitches
/// runs together externally.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrendsDocument {
    /// Document format version.
    pub version: u32,
    /// Run series, oldest first.
    pub history: Vec<TrendPoint>,
}
