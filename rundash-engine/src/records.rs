// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The flattened test record, the value every pipeline stage consumes.

use rundash_metadata::{RecordStatus, RecordSummary};

/// Separator used when joining suite titles into paths and fully-qualified
/// titles.
pub const TITLE_SEPARATOR: &str = " > ";

/// One executed test, flattened out of an artifact's suite tree.
///
/// Records are created fresh from the discovered artifacts at the start of a
/// run and discarded at the end; there is no cross-run identity. Every record
/// belongs to exactly one project.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestRecord {
    /// The test's own title, as it appears in the artifact.
    pub title: String,
    /// Ancestor suite titles and the test's own title, joined with
    /// [`TITLE_SEPARATOR`].
    pub full_title: String,
    /// Ancestor suite titles joined with [`TITLE_SEPARATOR`], excluding the
    /// test's own title.
    pub suite_path: String,
    /// The execution outcome.
    pub status: RecordStatus,
    /// Duration in milliseconds. Zero when the artifact carried no usable
    /// duration.
    pub duration_ms: u64,
    /// Tags derived from [`title`](Self::title), in first-occurrence order
    /// with duplicates collapsed.
    pub tags: Vec<String>,
    /// The project (artifact source directory) this record came from.
    pub project: String,
    /// Error detail, present only when `status` is failed.
    pub error: Option<String>,
}

impl TestRecord {
    /// Returns true if this record carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Converts this record into its serialized form.
    pub fn to_summary(&self) -> RecordSummary {
        RecordSummary {
            title: self.title.clone(),
            full_title: self.full_title.clone(),
            suite_path: self.suite_path.clone(),
            status: self.status,
            duration_ms: self.duration_ms,
            tags: self.tags.clone(),
            project: self.project.clone(),
            error: self.error.clone(),
        }
    }
}
