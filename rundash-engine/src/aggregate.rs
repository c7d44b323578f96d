// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregation of the flat record stream.
//!
//! Given the full ordered record sequence, this stage computes the overall
//! summary plus one report per distinct tag and per distinct project. The
//! stage is fully deterministic: no clock, no randomness, and all maps keep
//! first-encountered key order.

use crate::records::TestRecord;
use indexmap::IndexMap;
use rundash_metadata::{AggregateStats, FailureDetail, ProjectReport, TagMember, TagReport};

/// Everything the aggregator computes over one record sequence.
#[derive(Clone, Debug, Default)]
pub struct RunAggregates {
    /// Stats over all records.
    pub summary: AggregateStats,
    /// Distinct projects, in first-encountered order.
    pub projects: Vec<String>,
    /// Tag membership counts across all records.
    pub tag_counts: IndexMap<String, usize>,
    /// Per-tag reports, keyed in first-encountered order.
    pub tag_reports: IndexMap<String, TagReport>,
    /// Per-project reports, keyed in first-encountered order.
    pub project_reports: IndexMap<String, ProjectReport>,
}

/// Computes all aggregates over the record sequence.
pub fn aggregate(records: &[TestRecord]) -> RunAggregates {
    let mut summary = StatsAccumulator::default();
    let mut projects: Vec<String> = Vec::new();
    let mut tag_counts: IndexMap<String, usize> = IndexMap::new();
    let mut tags: IndexMap<String, TagAccumulator> = IndexMap::new();
    let mut project_reports: IndexMap<String, ProjectAccumulator> = IndexMap::new();

    for record in records {
        summary.add(record);

        for tag in &record.tags {
            *tag_counts.entry(tag.clone()).or_insert(0) += 1;
            let acc = tags.entry(tag.clone()).or_default();
            acc.stats.add(record);
            acc.members.push(TagMember {
                title: record.title.clone(),
                status: record.status,
                duration_ms: record.duration_ms,
                project: record.project.clone(),
            });
        }

        if !projects.contains(&record.project) {
            projects.push(record.project.clone());
        }
        let project = project_reports.entry(record.project.clone()).or_default();
        project.stats.add(record);
        for tag in &record.tags {
            *project.tag_counts.entry(tag.clone()).or_insert(0) += 1;
        }
        if record.status.is_failure() {
            project.failures.push(FailureDetail {
                title: record.title.clone(),
                full_title: record.full_title.clone(),
                error: record.error.clone(),
            });
        }
    }

    RunAggregates {
        summary: summary.finish(),
        projects,
        tag_counts,
        tag_reports: tags
            .into_iter()
            .map(|(tag, acc)| {
                (
                    tag,
                    TagReport {
                        stats: acc.stats.finish(),
                        members: acc.members,
                    },
                )
            })
            .collect(),
        project_reports: project_reports
            .into_iter()
            .map(|(project, acc)| {
                (
                    project,
                    ProjectReport {
                        stats: acc.stats.finish(),
                        tag_counts: acc.tag_counts,
                        failures: acc.failures,
                    },
                )
            })
            .collect(),
    }
}

/// Renders a pass rate as a percentage string with two decimal places.
///
/// The literal `"0%"` when `total` is zero, never `NaN` and never omitted.
pub fn pass_rate_string(passed: usize, total: usize) -> String {
    if total == 0 {
        "0%".to_owned()
    } else {
        format!("{:.2}%", passed as f64 / total as f64 * 100.0)
    }
}

/// Incremental counter set behind every [`AggregateStats`] instance.
#[derive(Clone, Debug, Default)]
struct StatsAccumulator {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    flaky: usize,
    unknown: usize,
    duration_ms: u64,
}

impl StatsAccumulator {
    fn add(&mut self, record: &TestRecord) {
        use rundash_metadata::RecordStatus::*;

        self.total += 1;
        match record.status {
            Passed => self.passed += 1,
            Failed => self.failed += 1,
            Skipped => self.skipped += 1,
            Flaky => self.flaky += 1,
            Unknown => self.unknown += 1,
        }
        self.duration_ms += record.duration_ms;
    }

    fn finish(self) -> AggregateStats {
        AggregateStats {
            pass_rate: pass_rate_string(self.passed, self.total),
            total: self.total,
            passed: self.passed,
            failed: self.failed,
            skipped: self.skipped,
            flaky: self.flaky,
            unknown: self.unknown,
            duration_ms: self.duration_ms,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct TagAccumulator {
    stats: StatsAccumulator,
    members: Vec<TagMember>,
}

#[derive(Clone, Debug, Default)]
struct ProjectAccumulator {
    stats: StatsAccumulator,
    tag_counts: IndexMap<String, usize>,
    failures: Vec<FailureDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{records::TestRecord, tags::extract_tags};
    use pretty_assertions::assert_eq;
    use rundash_metadata::RecordStatus;
    use test_case::test_case;

    fn record(
        project: &str,
        title: &str,
        status: RecordStatus,
        duration_ms: u64,
    ) -> TestRecord {
        TestRecord {
            title: title.to_owned(),
            full_title: format!("Suite > {title}"),
            suite_path: "Suite".to_owned(),
            status,
            duration_ms,
            tags: extract_tags(title),
            project: project.to_owned(),
            error: status.is_failure().then(|| "assertion failed".to_owned()),
        }
    }

    #[test_case(0, 0, "0%")]
    #[test_case(0, 3, "0.00%")]
    #[test_case(1, 2, "50.00%")]
    #[test_case(2, 3, "66.67%")]
    #[test_case(3, 3, "100.00%")]
    #[test_case(39, 40, "97.50%")]
    fn pass_rates(passed: usize, total: usize, expected: &str) {
        assert_eq!(pass_rate_string(passed, total), expected);
    }

    #[test]
    fn empty_input_yields_zeroed_summary() {
        let aggregates = aggregate(&[]);
        assert_eq!(aggregates.summary.total, 0);
        assert_eq!(aggregates.summary.pass_rate, "0%");
        assert!(aggregates.projects.is_empty());
        assert!(aggregates.tag_reports.is_empty());
        assert!(aggregates.project_reports.is_empty());
    }

    #[test]
    fn bucket_counts_sum_to_total_in_every_scope() {
        let records = vec![
            record("chromium", "a @api", RecordStatus::Passed, 10),
            record("chromium", "b @api", RecordStatus::Failed, 20),
            record("chromium", "c @ui", RecordStatus::Skipped, 0),
            record("firefox", "d @api @ui", RecordStatus::Flaky, 30),
            record("firefox", "e", RecordStatus::Unknown, 40),
        ];
        let aggregates = aggregate(&records);

        let check = |stats: &AggregateStats| {
            assert_eq!(
                stats.passed + stats.failed + stats.skipped + stats.flaky + stats.unknown,
                stats.total
            );
        };
        check(&aggregates.summary);
        for report in aggregates.tag_reports.values() {
            check(&report.stats);
        }
        for report in aggregates.project_reports.values() {
            check(&report.stats);
        }

        assert_eq!(aggregates.summary.total, 5);
        assert_eq!(aggregates.summary.unknown, 1);
        assert_eq!(aggregates.summary.duration_ms, 100);
    }

    #[test]
    fn tag_reports_restrict_to_members() {
        let records = vec![
            record(
                "chromium",
                "rejects bad token @api @security",
                RecordStatus::Failed,
                150,
            ),
            record("chromium", "keeps session alive @api", RecordStatus::Passed, 4200),
        ];
        let aggregates = aggregate(&records);

        let api = &aggregates.tag_reports["api"];
        assert_eq!(api.stats.total, 2);
        assert_eq!(api.stats.passed, 1);
        assert_eq!(api.stats.failed, 1);
        assert_eq!(api.stats.pass_rate, "50.00%");
        assert_eq!(api.members.len(), 2);
        assert_eq!(api.members[0].title, "rejects bad token @api @security");

        let security = &aggregates.tag_reports["security"];
        assert_eq!(security.stats.total, 1);
        assert_eq!(security.stats.failed, 1);
        assert_eq!(security.stats.pass_rate, "0.00%");

        assert_eq!(aggregates.tag_counts["api"], 2);
        assert_eq!(aggregates.tag_counts["security"], 1);
    }

    #[test]
    fn project_reports_carry_failures_and_tag_distribution() {
        let records = vec![
            record("chromium", "a @smoke", RecordStatus::Passed, 5),
            record("chromium", "b @smoke", RecordStatus::Passed, 5),
            record("chromium", "c", RecordStatus::Passed, 5),
            record("firefox", "d @smoke", RecordStatus::Failed, 5),
        ];
        let aggregates = aggregate(&records);

        assert_eq!(aggregates.projects, vec!["chromium", "firefox"]);

        let chromium = &aggregates.project_reports["chromium"];
        assert_eq!(chromium.stats.pass_rate, "100.00%");
        assert_eq!(chromium.tag_counts["smoke"], 2);
        assert!(chromium.failures.is_empty());

        let firefox = &aggregates.project_reports["firefox"];
        assert_eq!(firefox.stats.pass_rate, "0.00%");
        assert_eq!(firefox.failures.len(), 1);
        assert_eq!(firefox.failures[0].title, "d @smoke");
        assert_eq!(
            firefox.failures[0].error.as_deref(),
            Some("assertion failed")
        );
    }

    #[test]
    fn aggregation_is_deterministic() {
        let records = vec![
            record("webkit", "z @last", RecordStatus::Passed, 1),
            record("chromium", "a @first", RecordStatus::Failed, 2),
        ];
        let first = aggregate(&records);
        let second = aggregate(&records);
        assert_eq!(
            serde_json::to_string(&first.tag_reports).unwrap(),
            serde_json::to_string(&second.tag_reports).unwrap()
        );
        // First-encountered order, not alphabetical.
        assert_eq!(first.projects, vec!["webkit", "chromium"]);
        let tag_order: Vec<&String> = first.tag_reports.keys().collect();
        assert_eq!(tag_order, vec!["last", "first"]);
    }
}
