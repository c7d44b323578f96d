// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The human-readable dashboard document.
//!
//! One self-contained HTML page: a header with the generation timestamp, a
//! statistics grid, a per-tag breakdown with pass-rate bars, a per-project
//! table, and a failed-tests table that only appears when something failed.

use super::ReportBundle;
use crate::helpers::FormattedDuration;
use rundash_metadata::{AggregateStats, RecordSummary};
use swrite::{SWrite, swrite};

pub(super) fn render_dashboard(bundle: &ReportBundle) -> String {
    let stats = &bundle.summary.stats;
    let mut page = String::new();

    swrite!(
        page,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Test Run Dashboard</title>\n\
         <style>{STYLESHEET}</style>\n\
         </head>\n<body>\n"
    );

    swrite!(
        page,
        "<header>\n<h1>Test Run Dashboard</h1>\n\
         <p class=\"meta\">Generated {} &middot; total duration {}</p>\n</header>\n",
        bundle.summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        FormattedDuration(stats.duration_ms),
    );

    render_stats_grid(&mut page, stats);
    render_tag_breakdown(&mut page, bundle);
    render_project_table(&mut page, bundle);

    let failures: Vec<&RecordSummary> = bundle
        .all_tests
        .records
        .iter()
        .filter(|record| record.status.is_failure())
        .collect();
    if !failures.is_empty() {
        render_failed_tests(&mut page, &failures);
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn render_stats_grid(page: &mut String, stats: &AggregateStats) {
    swrite!(page, "<section class=\"stats-grid\">\n");
    for (label, value) in [
        ("Total", stats.total.to_string()),
        ("Passed", stats.passed.to_string()),
        ("Failed", stats.failed.to_string()),
        ("Skipped", stats.skipped.to_string()),
        ("Pass rate", stats.pass_rate.clone()),
    ] {
        swrite!(
            page,
            "<div class=\"stat\"><span class=\"value\">{}</span>\
             <span class=\"label\">{}</span></div>\n",
            escape(&value),
            label,
        );
    }
    swrite!(page, "</section>\n");
}

fn render_tag_breakdown(page: &mut String, bundle: &ReportBundle) {
    swrite!(page, "<section>\n<h2>Tags</h2>\n");
    if bundle.tag_reports.tags.is_empty() {
        swrite!(page, "<p class=\"empty\">No tagged tests in this run.</p>\n");
    }
    for (tag, report) in &bundle.tag_reports.tags {
        let width = pass_rate_percent(&report.stats);
        swrite!(
            page,
            "<div class=\"tag-row\">\
             <span class=\"tag-name\">@{}</span>\
             <div class=\"bar\"><div class=\"bar-fill\" style=\"width: {:.0}%\"></div></div>\
             <span class=\"tag-stats\">{} / {} passed ({})</span>\
             </div>\n",
            escape(tag),
            width,
            report.stats.passed,
            report.stats.total,
            escape(&report.stats.pass_rate),
        );
    }
    swrite!(page, "</section>\n");
}

fn render_project_table(page: &mut String, bundle: &ReportBundle) {
    swrite!(
        page,
        "<section>\n<h2>Projects</h2>\n<table>\n<thead><tr>\
         <th>Project</th><th>Total</th><th>Passed</th><th>Failed</th>\
         <th>Skipped</th><th>Pass rate</th><th>Duration</th>\
         </tr></thead>\n<tbody>\n"
    );
    for (project, report) in &bundle.project_reports.projects {
        swrite!(
            page,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(project),
            report.stats.total,
            report.stats.passed,
            report.stats.failed,
            report.stats.skipped,
            escape(&report.stats.pass_rate),
            FormattedDuration(report.stats.duration_ms),
        );
    }
    swrite!(page, "</tbody>\n</table>\n</section>\n");
}

fn render_failed_tests(page: &mut String, failures: &[&RecordSummary]) {
    swrite!(
        page,
        "<section>\n<h2>Failed tests</h2>\n<table>\n<thead><tr>\
         <th>Test</th><th>Project</th><th>Tags</th><th>Duration</th>\
         </tr></thead>\n<tbody>\n"
    );
    for record in failures {
        let tags = if record.tags.is_empty() {
            String::from("&mdash;")
        } else {
            record
                .tags
                .iter()
                .map(|tag| format!("@{}", escape(tag)))
                .collect::<Vec<_>>()
                .join(" ")
        };
        swrite!(
            page,
            "<tr class=\"failed\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&record.full_title),
            escape(&record.project),
            tags,
            FormattedDuration(record.duration_ms),
        );
    }
    swrite!(page, "</tbody>\n</table>\n</section>\n");
}

// The bar width tracks the tag's pass rate; 0 when the tag has no records.
fn pass_rate_percent(stats: &AggregateStats) -> f64 {
    if stats.total == 0 {
        0.0
    } else {
        stats.passed as f64 / stats.total as f64 * 100.0
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

static STYLESHEET: &str = "\
body { font-family: -apple-system, 'Segoe UI', sans-serif; margin: 2rem auto; max-width: 60rem; color: #1c2733; }\
header .meta { color: #5c6b7a; }\
.stats-grid { display: flex; gap: 1rem; margin: 1.5rem 0; }\
.stat { flex: 1; border: 1px solid #d6dde4; border-radius: 6px; padding: 1rem; text-align: center; }\
.stat .value { display: block; font-size: 1.6rem; font-weight: 600; }\
.stat .label { color: #5c6b7a; font-size: 0.85rem; }\
.tag-row { display: flex; align-items: center; gap: 0.75rem; margin: 0.4rem 0; }\
.tag-name { min-width: 10rem; font-family: monospace; }\
.bar { flex: 1; height: 0.6rem; background: #eef1f4; border-radius: 3px; }\
.bar-fill { height: 100%; background: #2da44e; border-radius: 3px; }\
table { border-collapse: collapse; width: 100%; }\
th, td { border-bottom: 1px solid #d6dde4; padding: 0.4rem 0.6rem; text-align: left; }\
tr.failed td:first-child { color: #cf222e; }\
.empty { color: #5c6b7a; }";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregate::aggregate, extract::extract_records, insights::generate_insights,
        records::TestRecord,
    };
    use chrono::Utc;

    fn bundle_for(records: Vec<TestRecord>) -> ReportBundle {
        let aggregates = aggregate(&records);
        let insights = generate_insights(&records, &aggregates);
        ReportBundle::new(aggregates, insights, &records, Utc::now())
    }

    fn sample_records(json: &str, project: &str) -> Vec<TestRecord> {
        let doc = crate::artifact::RunDocument::from_json_str(json).unwrap();
        extract_records(project, &doc)
    }

    #[test]
    fn failed_table_only_present_with_failures() {
        let passing = bundle_for(sample_records(
            r#"{"suites": [{"title": "S", "tests": [{"title": "ok", "status": "passed", "duration": 5}]}]}"#,
            "chromium",
        ));
        let page = render_dashboard(&passing);
        assert!(!page.contains("Failed tests"));

        let failing = bundle_for(sample_records(
            r#"{"suites": [{"title": "S", "tests": [{"title": "broken <t> @api", "status": "failed", "duration": 5}]}]}"#,
            "chromium",
        ));
        let page = render_dashboard(&failing);
        assert!(page.contains("Failed tests"));
        // Titles are escaped, tags keep their marker.
        assert!(page.contains("broken &lt;t&gt; @api"));
        assert!(page.contains("<td>@api</td>"));
    }

    #[test]
    fn empty_run_renders_a_complete_page() {
        let page = render_dashboard(&bundle_for(vec![]));
        assert!(page.contains("Test Run Dashboard"));
        assert!(page.contains("0%"));
        assert!(page.contains("No tagged tests"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn tag_bar_width_tracks_pass_rate() {
        let bundle = bundle_for(sample_records(
            r#"{"suites": [{"title": "S", "tests": [
                {"title": "a @api", "status": "passed", "duration": 1},
                {"title": "b @api", "status": "failed", "duration": 1}
            ]}]}"#,
            "chromium",
        ));
        let page = render_dashboard(&bundle);
        assert!(page.contains("width: 50%"));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("<script>\"x\"</script>"), "&lt;script&gt;&quot;x&quot;&lt;/script&gt;");
        assert_eq!(escape("plain"), "plain");
    }
}
