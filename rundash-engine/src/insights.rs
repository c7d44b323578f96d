// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived, ranked observations over the aggregated record set.
//!
//! Insight order is fixed: slowest tests (when any record has a duration),
//! failures by tag (when any record failed), then tag coverage, which is
//! always present so the insight section has a stable final entry. All sorts
//! are stable, so ties break by first-encountered input order.

use crate::{
    aggregate::RunAggregates,
    helpers::{FormattedDuration, plural},
    records::TestRecord,
};
use itertools::Itertools;
use rundash_metadata::{Insight, InsightCategory, InsightDatum};

/// How many records the slowest-tests insight lists.
const SLOWEST_TEST_COUNT: usize = 5;

/// Generates the ordered insight list for one run.
pub fn generate_insights(records: &[TestRecord], aggregates: &RunAggregates) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(3);
    if let Some(slowest) = slowest_tests(records) {
        insights.push(slowest);
    }
    if let Some(failures) = failures_by_tag(aggregates) {
        insights.push(failures);
    }
    insights.push(tag_coverage(aggregates));
    insights
}

// Top records by duration, descending. Records with a zero duration never
// qualify, so an all-zero run produces no performance insight.
fn slowest_tests(records: &[TestRecord]) -> Option<Insight> {
    let data: Vec<InsightDatum> = records
        .iter()
        .filter(|record| record.duration_ms > 0)
        // sorted_by is a stable sort: equal durations keep input order.
        .sorted_by(|a, b| b.duration_ms.cmp(&a.duration_ms))
        .take(SLOWEST_TEST_COUNT)
        .map(|record| InsightDatum {
            label: record.full_title.clone(),
            value: format!(
                "{} ({})",
                FormattedDuration(record.duration_ms),
                record.project
            ),
        })
        .collect();

    (!data.is_empty()).then(|| Insight {
        category: InsightCategory::Performance,
        title: "Slowest tests".to_owned(),
        description: format!(
            "The {} longest-running {} in this run",
            data.len(),
            plural::tests_str(data.len())
        ),
        data,
    })
}

// Failed-record counts per tag, descending. Only tags that appear on at
// least one failed record are listed.
fn failures_by_tag(aggregates: &RunAggregates) -> Option<Insight> {
    if aggregates.summary.failed == 0 {
        return None;
    }

    let data: Vec<InsightDatum> = aggregates
        .tag_reports
        .iter()
        .filter(|(_, report)| report.stats.failed > 0)
        .sorted_by(|(_, a), (_, b)| b.stats.failed.cmp(&a.stats.failed))
        .map(|(tag, report)| InsightDatum {
            label: tag.clone(),
            value: format!(
                "{} failed {}",
                report.stats.failed,
                plural::tests_str(report.stats.failed)
            ),
        })
        .collect();

    Some(Insight {
        category: InsightCategory::Quality,
        title: "Failures by tag".to_owned(),
        description: "Failed test counts grouped by tag".to_owned(),
        data,
    })
}

// Membership counts per tag, descending. Always emitted, possibly with an
// empty data list.
fn tag_coverage(aggregates: &RunAggregates) -> Insight {
    let data: Vec<InsightDatum> = aggregates
        .tag_counts
        .iter()
        .sorted_by(|(_, a), (_, b)| b.cmp(a))
        .map(|(tag, count)| InsightDatum {
            label: tag.clone(),
            value: format!("{count} {}", plural::tests_str(*count)),
        })
        .collect();

    Insight {
        category: InsightCategory::Coverage,
        title: "Tag coverage".to_owned(),
        description: "Test counts per tag across all projects".to_owned(),
        data,
    }
}
