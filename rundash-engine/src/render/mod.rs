// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering the aggregated run into its serialized forms.
//!
//! The renderer owns the serialized report exclusively: it consumes the
//! in-memory aggregates, writes the JSON bundle and the HTML dashboard, and
//! the values are discarded afterwards. Writing is all-or-nothing per
//! document: one failed write never prevents attempting the others.

mod html;

use crate::{aggregate::RunAggregates, errors::WriteReportError, records::TestRecord};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use rundash_metadata::{
    AllTestsDocument, FORMAT_VERSION, Insight, ProjectReportsDocument, SummaryDocument,
    TagReportsDocument, TrendPoint, TrendsDocument,
};
use serde::Serialize;
use std::fs;

/// File name of the summary document.
pub const SUMMARY_FILE: &str = "summary.json";
/// File name of the tag reports document.
pub const TAG_REPORTS_FILE: &str = "tag-reports.json";
/// File name of the project reports document.
pub const PROJECT_REPORTS_FILE: &str = "project-reports.json";
/// File name of the trends document.
pub const TRENDS_FILE: &str = "trends.json";
/// File name of the flat record document.
pub const ALL_TESTS_FILE: &str = "all-tests.json";
/// File name of the HTML dashboard.
pub const DASHBOARD_FILE: &str = "index.html";

/// The full in-memory report, ready to serialize.
#[derive(Clone, Debug)]
pub struct ReportBundle {
    /// Contents of `summary.json`.
    pub summary: SummaryDocument,
    /// Contents of `tag-reports.json`.
    pub tag_reports: TagReportsDocument,
    /// Contents of `project-reports.json`.
    pub project_reports: ProjectReportsDocument,
    /// Contents of `trends.json`.
    pub trends: TrendsDocument,
    /// Contents of `all-tests.json`.
    pub all_tests: AllTestsDocument,
}

impl ReportBundle {
    /// Assembles the bundle from the aggregation and insight outputs.
    pub fn new(
        aggregates: RunAggregates,
        insights: Vec<Insight>,
        records: &[TestRecord],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let trends = TrendsDocument {
            version: FORMAT_VERSION,
            // The series is reserved for cross-run tooling; rundash itself
            // only ever writes the current run.
            history: vec![TrendPoint {
                generated_at,
                total: aggregates.summary.total,
                pass_rate: aggregates.summary.pass_rate.clone(),
                duration_ms: aggregates.summary.duration_ms,
            }],
        };

        Self {
            summary: SummaryDocument {
                version: FORMAT_VERSION,
                generated_at,
                stats: aggregates.summary,
                projects: aggregates.projects,
                tag_counts: aggregates.tag_counts,
                insights,
            },
            tag_reports: TagReportsDocument {
                version: FORMAT_VERSION,
                tags: aggregates.tag_reports,
            },
            project_reports: ProjectReportsDocument {
                version: FORMAT_VERSION,
                projects: aggregates.project_reports,
            },
            trends,
            all_tests: AllTestsDocument {
                version: FORMAT_VERSION,
                records: records.iter().map(TestRecord::to_summary).collect(),
            },
        }
    }
}

/// Writes a [`ReportBundle`] to an output directory.
#[derive(Clone, Debug)]
pub struct ReportWriter {
    output_dir: Utf8PathBuf,
}

impl ReportWriter {
    /// Creates a writer targeting the given output directory.
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Writes every document in the bundle, returning the failures.
    ///
    /// Failures are collected per document rather than aborting: a run always
    /// produces whatever outputs it can. An empty result means everything was
    /// written.
    pub fn write_all(&self, bundle: &ReportBundle) -> Vec<WriteReportError> {
        if let Err(error) = fs::create_dir_all(&self.output_dir) {
            // Without the directory no document can land; report once.
            return vec![WriteReportError::CreateDir {
                path: self.output_dir.clone(),
                error,
            }];
        }

        let mut failures = Vec::new();
        let mut attempt = |result: Result<(), WriteReportError>| {
            if let Err(error) = result {
                failures.push(error);
            }
        };

        attempt(self.write_json(SUMMARY_FILE, &bundle.summary));
        attempt(self.write_json(TAG_REPORTS_FILE, &bundle.tag_reports));
        attempt(self.write_json(PROJECT_REPORTS_FILE, &bundle.project_reports));
        attempt(self.write_json(TRENDS_FILE, &bundle.trends));
        attempt(self.write_json(ALL_TESTS_FILE, &bundle.all_tests));
        attempt(self.write_text(DASHBOARD_FILE, &html::render_dashboard(bundle)));

        failures
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<(), WriteReportError> {
        let path = self.output_dir.join(file_name);
        let contents = serde_json::to_string_pretty(value)
            .map_err(|error| WriteReportError::Serialize {
                path: path.clone(),
                error,
            })?;
        write_file(&path, &contents)
    }

    fn write_text(&self, file_name: &str, contents: &str) -> Result<(), WriteReportError> {
        write_file(&self.output_dir.join(file_name), contents)
    }
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<(), WriteReportError> {
    fs::write(path, contents).map_err(|error| WriteReportError::Write {
        path: path.to_owned(),
        error,
    })
}
