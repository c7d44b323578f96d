// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline tests over synthetic artifact trees.

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use indoc::indoc;
use pretty_assertions::assert_eq;
use rundash_engine::{config::ReportConfig, pipeline::run_report};
use rundash_metadata::{
    AllTestsDocument, InsightCategory, ProjectReportsDocument, SummaryDocument, TagReportsDocument,
};
use std::fs;

struct Workspace {
    _temp_dir: Utf8TempDir,
    config: ReportConfig,
}

impl Workspace {
    fn new() -> Self {
        let temp_dir = Utf8TempDir::new().unwrap();
        let config = ReportConfig {
            artifacts_dir: temp_dir.path().join("artifacts"),
            output_dir: temp_dir.path().join("report"),
        };
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    fn add_artifact(&self, project: &str, file_name: &str, contents: &str) {
        let dir = self
            .config
            .artifacts_dir
            .join(project)
            .join("test-results");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), contents).unwrap();
    }

    fn output_file(&self, file_name: &str) -> Utf8PathBuf {
        self.config.output_dir.join(file_name)
    }

    fn load<T: serde::de::DeserializeOwned>(&self, file_name: &str) -> T {
        let contents = fs::read_to_string(self.output_file(file_name)).unwrap();
        serde_json::from_str(&contents).unwrap()
    }
}

fn read(path: &Utf8Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn nested_suites_aggregate_per_tag() {
    let workspace = Workspace::new();
    workspace.add_artifact(
        "chromium",
        "results.json",
        indoc! {r#"
            {
                "config": {},
                "stats": {},
                "suites": [
                    {
                        "title": "Auth",
                        "tests": [
                            {
                                "title": "rejects bad token @api @security",
                                "status": "failed",
                                "duration": 150,
                                "error": { "message": "expected 401, got 200" }
                            }
                        ],
                        "suites": [
                            {
                                "title": "Session",
                                "tests": [
                                    {
                                        "title": "keeps session alive @api",
                                        "status": "passed",
                                        "duration": 4200
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }
        "#},
    );

    let outcome = run_report(&workspace.config).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.records_extracted, 2);

    let tag_reports: TagReportsDocument = workspace.load("tag-reports.json");
    let api = &tag_reports.tags["api"];
    assert_eq!(api.stats.total, 2);
    assert_eq!(api.stats.failed, 1);
    assert_eq!(api.stats.passed, 1);
    assert_eq!(api.stats.pass_rate, "50.00%");

    let security = &tag_reports.tags["security"];
    assert_eq!(security.stats.total, 1);
    assert_eq!(security.stats.failed, 1);
    assert_eq!(security.stats.pass_rate, "0.00%");

    let summary: SummaryDocument = workspace.load("summary.json");
    let slowest = &summary.insights[0];
    assert_eq!(slowest.category, InsightCategory::Performance);
    assert_eq!(
        slowest.data[0].label,
        "Auth > Session > keeps session alive @api"
    );
    assert_eq!(slowest.data[0].value, "4.2s (chromium)");

    let projects: ProjectReportsDocument = workspace.load("project-reports.json");
    let chromium = &projects.projects["chromium"];
    assert_eq!(chromium.failures.len(), 1);
    assert_eq!(
        chromium.failures[0].error.as_deref(),
        Some("expected 401, got 200")
    );
}

#[test]
fn missing_root_reports_an_empty_run() {
    let workspace = Workspace::new();
    // Note: artifacts dir intentionally never created.

    let outcome = run_report(&workspace.config).unwrap();
    assert!(!outcome.root_present);
    assert_eq!(outcome.artifacts_found, 0);
    assert_eq!(outcome.records_extracted, 0);
    assert!(outcome.is_clean());

    let summary: SummaryDocument = workspace.load("summary.json");
    assert_eq!(summary.stats.total, 0);
    assert_eq!(summary.stats.pass_rate, "0%");
    assert!(summary.projects.is_empty());

    // The coverage insight is still present, with an empty data list.
    assert_eq!(summary.insights.len(), 1);
    assert_eq!(summary.insights[0].category, InsightCategory::Coverage);
    assert!(summary.insights[0].data.is_empty());

    // No failures, so the dashboard has no failed-tests section.
    let dashboard = read(&workspace.output_file("index.html"));
    assert!(!dashboard.contains("Failed tests"));
}

#[test]
fn per_project_reports_split_by_directory() {
    let workspace = Workspace::new();
    workspace.add_artifact(
        "chromium",
        "results.json",
        r#"{"suites": [{"title": "Smoke", "tests": [
            {"title": "a", "status": "passed", "duration": 10},
            {"title": "b", "status": "passed", "duration": 10},
            {"title": "c", "status": "passed", "duration": 10}
        ]}]}"#,
    );
    workspace.add_artifact(
        "firefox",
        "results.json",
        r#"{"suites": [{"title": "Smoke", "tests": [
            {"title": "d", "status": "failed", "duration": 10, "error": "boom"}
        ]}]}"#,
    );

    let outcome = run_report(&workspace.config).unwrap();
    assert_eq!(outcome.records_extracted, 4);

    let projects: ProjectReportsDocument = workspace.load("project-reports.json");
    assert_eq!(projects.projects["chromium"].stats.pass_rate, "100.00%");
    assert_eq!(projects.projects["firefox"].stats.pass_rate, "0.00%");

    let summary: SummaryDocument = workspace.load("summary.json");
    assert_eq!(summary.projects, vec!["chromium", "firefox"]);

    let dashboard = read(&workspace.output_file("index.html"));
    assert!(dashboard.contains("Failed tests"));
    assert!(dashboard.contains("Smoke &gt; d"));
}

#[test]
fn malformed_artifacts_are_skipped_not_fatal() {
    let workspace = Workspace::new();
    workspace.add_artifact("chromium", "broken.json", "{ not json");
    workspace.add_artifact(
        "chromium",
        "good.json",
        r#"{"suites": [{"title": "S", "tests": [{"title": "ok", "status": "passed", "duration": 1}]}]}"#,
    );
    workspace.add_artifact("chromium", "wrong-shape.json", r#"{"totals": [1, 2]}"#);

    let outcome = run_report(&workspace.config).unwrap();
    assert_eq!(outcome.artifacts_found, 3);
    assert_eq!(outcome.artifacts_skipped, 2);
    assert_eq!(outcome.records_extracted, 1);

    let all_tests: AllTestsDocument = workspace.load("all-tests.json");
    assert_eq!(all_tests.records.len(), 1);
    assert_eq!(all_tests.records[0].title, "ok");
}

#[test]
fn unknown_statuses_count_toward_total_only() {
    let workspace = Workspace::new();
    workspace.add_artifact(
        "chromium",
        "results.json",
        r#"{"suites": [{"title": "S", "tests": [
            {"title": "a", "status": "passed", "duration": 1},
            {"title": "b", "status": "timedOut", "duration": 1},
            {"title": "c", "duration": 1}
        ]}]}"#,
    );

    run_report(&workspace.config).unwrap();
    let summary: SummaryDocument = workspace.load("summary.json");
    assert_eq!(summary.stats.total, 3);
    assert_eq!(summary.stats.passed, 1);
    assert_eq!(summary.stats.unknown, 2);
    assert_eq!(
        summary.stats.passed
            + summary.stats.failed
            + summary.stats.skipped
            + summary.stats.flaky
            + summary.stats.unknown,
        summary.stats.total
    );
    assert_eq!(summary.stats.pass_rate, "33.33%");
}

#[test]
fn repeated_runs_produce_identical_record_documents() {
    let workspace = Workspace::new();
    for project in ["webkit", "chromium"] {
        workspace.add_artifact(
            project,
            "results.json",
            r#"{"suites": [{"title": "S", "tests": [
                {"title": "x @tag", "status": "passed", "duration": 7},
                {"title": "y @tag", "status": "failed", "duration": 7, "error": "nope"}
            ]}]}"#,
        );
    }

    run_report(&workspace.config).unwrap();
    let first_all_tests = read(&workspace.output_file("all-tests.json"));
    let first_tag_reports = read(&workspace.output_file("tag-reports.json"));

    run_report(&workspace.config).unwrap();
    assert_eq!(read(&workspace.output_file("all-tests.json")), first_all_tests);
    assert_eq!(
        read(&workspace.output_file("tag-reports.json")),
        first_tag_reports
    );

    // Projects discovered in name order, not creation order.
    let all_tests: AllTestsDocument = serde_json::from_str(&first_all_tests).unwrap();
    assert_eq!(all_tests.records[0].project, "chromium");
}
