// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The end-to-end report pipeline.
//!
//! Discovery, extraction, aggregation, insight generation and rendering run
//! in sequence over one completed artifact set. Per-artifact and per-document
//! failures are isolated and collected into the [`RunOutcome`]; the only
//! fatal error is an artifact root that exists but cannot be read.

use crate::{
    aggregate::aggregate,
    artifact::RunDocument,
    config::ReportConfig,
    discovery::discover_artifacts,
    errors::{DisplayErrorChain, MalformedArtifactError, RootUnreadableError, WriteReportError},
    extract::extract_records,
    helpers::plural,
    insights::generate_insights,
    records::TestRecord,
    render::{ReportBundle, ReportWriter},
};
use camino::Utf8Path;
use chrono::Utc;
use std::fs;
use tracing::{info, warn};

/// What one pipeline run did, for reporting back to the caller.
#[derive(Debug)]
pub struct RunOutcome {
    /// Whether the artifact root existed at all.
    pub root_present: bool,
    /// JSON results documents found during discovery.
    pub artifacts_found: usize,
    /// Results documents skipped as malformed.
    pub artifacts_skipped: usize,
    /// JUnit XML artifacts seen during discovery (recognized, never parsed).
    pub junit_artifacts: usize,
    /// Test records extracted across all documents.
    pub records_extracted: usize,
    /// Per-document write failures, empty on a clean run.
    pub write_failures: Vec<WriteReportError>,
}

impl RunOutcome {
    /// Returns true if every document in the bundle was written.
    pub fn is_clean(&self) -> bool {
        self.write_failures.is_empty()
    }
}

/// Runs the full pipeline for one configuration.
///
/// A missing artifact root produces an empty (all-zero) report, not an
/// error; a root that exists but cannot be read is fatal.
pub fn run_report(config: &ReportConfig) -> Result<RunOutcome, RootUnreadableError> {
    let artifact_set = discover_artifacts(&config.artifacts_dir)?;
    if !artifact_set.root_present {
        warn!(
            "artifact root `{}` does not exist; reporting an empty run",
            config.artifacts_dir
        );
    }

    let mut records: Vec<TestRecord> = Vec::new();
    let mut artifacts_found = 0;
    let mut artifacts_skipped = 0;
    for artifact in artifact_set.json_results() {
        artifacts_found += 1;
        match load_document(&artifact.path) {
            Ok(doc) => records.extend(extract_records(&artifact.project, &doc)),
            Err(error) => {
                artifacts_skipped += 1;
                warn!("{}", DisplayErrorChain::new(error));
            }
        }
    }

    let aggregates = aggregate(&records);
    let insights = generate_insights(&records, &aggregates);
    let bundle = ReportBundle::new(aggregates, insights, &records, Utc::now());

    let write_failures = ReportWriter::new(config.output_dir.clone()).write_all(&bundle);
    for failure in &write_failures {
        warn!("{}", DisplayErrorChain::new(failure));
    }

    info!(
        "aggregated {} {} from {} {} ({} skipped) into `{}`",
        records.len(),
        plural::tests_str(records.len()),
        artifacts_found,
        plural::artifacts_str(artifacts_found),
        artifacts_skipped,
        config.output_dir,
    );
    if !write_failures.is_empty() {
        warn!(
            "{} report {} could not be written",
            write_failures.len(),
            plural::documents_str(write_failures.len()),
        );
    }

    Ok(RunOutcome {
        root_present: artifact_set.root_present,
        artifacts_found,
        artifacts_skipped,
        junit_artifacts: artifact_set.junit_count(),
        records_extracted: records.len(),
        write_failures,
    })
}

// Reads and parses one results document. Failures here are per-document and
// recoverable.
fn load_document(path: &Utf8Path) -> Result<RunDocument, MalformedArtifactError> {
    let contents = fs::read_to_string(path).map_err(|error| MalformedArtifactError::Read {
        path: path.to_owned(),
        error,
    })?;
    RunDocument::from_json_str(&contents).map_err(|error| MalformedArtifactError::Parse {
        path: path.to_owned(),
        error,
    })
}
