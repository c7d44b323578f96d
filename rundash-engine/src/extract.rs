// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flattening a results document into test records.
//!
//! The suite tree is walked depth-first, pre-order: a suite's own tests are
//! emitted before its nested suites, in document order, with the ancestor
//! path carried down the recursion.

use crate::{
    artifact::{RunDocument, SuiteNode},
    records::{TITLE_SEPARATOR, TestRecord},
    tags::extract_tags,
};
use rundash_metadata::RecordStatus;

/// Extracts the flat record sequence from a parsed results document.
///
/// The number of records always equals the total count of test entries
/// across all nested suites; nothing is dropped. Re-extracting from an
/// unchanged document yields an identical sequence.
pub fn extract_records(project: &str, doc: &RunDocument) -> Vec<TestRecord> {
    let mut records = Vec::new();
    let mut ancestors: Vec<&str> = Vec::new();
    for suite in &doc.suites {
        visit_suite(project, suite, &mut ancestors, &mut records);
    }
    records
}

fn visit_suite<'doc>(
    project: &str,
    suite: &'doc SuiteNode,
    ancestors: &mut Vec<&'doc str>,
    records: &mut Vec<TestRecord>,
) {
    ancestors.push(&suite.title);
    let suite_path = ancestors.join(TITLE_SEPARATOR);

    for test in &suite.tests {
        let status = status_from_artifact(test.status.as_deref());
        // Error detail is only meaningful for failures.
        let error = if status == RecordStatus::Failed {
            test.error.clone()
        } else {
            None
        };
        records.push(TestRecord {
            full_title: format!("{suite_path}{TITLE_SEPARATOR}{}", test.title),
            title: test.title.clone(),
            suite_path: suite_path.clone(),
            status,
            duration_ms: test.duration,
            tags: extract_tags(&test.title),
            project: project.to_owned(),
            error,
        });
    }

    for child in &suite.suites {
        visit_suite(project, child, ancestors, records);
    }
    ancestors.pop();
}

/// Maps an artifact status string to a [`RecordStatus`].
///
/// Absent and unrecognized statuses land in the explicit `unknown` bucket;
/// they still count toward totals. This is a policy choice, not dropped data.
pub fn status_from_artifact(status: Option<&str>) -> RecordStatus {
    match status {
        Some("passed") => RecordStatus::Passed,
        Some("failed") => RecordStatus::Failed,
        Some("skipped") => RecordStatus::Skipped,
        Some("flaky") => RecordStatus::Flaky,
        Some(_) | None => RecordStatus::Unknown,
    }
}
