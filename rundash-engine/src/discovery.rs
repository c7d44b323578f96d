// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Artifact discovery.
//!
//! The artifact root holds one subdirectory per project; each project
//! directory optionally holds a `test-results` subdirectory. Result
//! documents live directly in the project directory or in that one
//! subdirectory, never deeper.

use crate::errors::RootUnreadableError;
use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use tracing::warn;

/// Name of the per-project subdirectory also scanned for result documents.
pub const TEST_RESULTS_DIR: &str = "test-results";

/// The format of a discovered artifact file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArtifactKind {
    /// A JSON results document. The only kind extraction consumes.
    JsonResults,
    /// A JUnit-style XML document. Recognized and counted, never parsed.
    JunitXml,
}

impl ArtifactKind {
    fn classify(path: &Utf8Path) -> Option<Self> {
        match path.extension() {
            Some("json") => Some(ArtifactKind::JsonResults),
            Some("xml") => Some(ArtifactKind::JunitXml),
            _ => None,
        }
    }
}

/// One discovered artifact file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscoveredArtifact {
    /// The project this artifact belongs to: the name of the immediate child
    /// directory under the root.
    pub project: String,
    /// Full path to the artifact file.
    pub path: Utf8PathBuf,
    /// The recognized format.
    pub kind: ArtifactKind,
}

/// The result of scanning the artifact root.
#[derive(Clone, Debug, Default)]
pub struct ArtifactSet {
    /// All recognized artifacts, in traversal order.
    pub artifacts: Vec<DiscoveredArtifact>,
    /// False when the root directory did not exist. A missing root is a
    /// non-fatal condition: the pipeline continues and reports zero records.
    pub root_present: bool,
}

impl ArtifactSet {
    /// Iterates over the JSON results documents, the artifacts extraction
    /// consumes.
    pub fn json_results(&self) -> impl Iterator<Item = &DiscoveredArtifact> {
        self.artifacts
            .iter()
            .filter(|artifact| artifact.kind == ArtifactKind::JsonResults)
    }

    /// Number of recognized-but-unused JUnit XML artifacts.
    pub fn junit_count(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|artifact| artifact.kind == ArtifactKind::JunitXml)
            .count()
    }
}

/// Scans the artifact root and returns every recognized artifact.
///
/// Traversal order carries no semantic meaning, but it is stable: entries at
/// every level are visited in name order, so two scans over identical trees
/// produce identical sequences. Only regular files are considered.
///
/// A missing root yields an empty set with `root_present = false`. A root
/// that exists but cannot be read is the pipeline's one fatal error.
pub fn discover_artifacts(root: &Utf8Path) -> Result<ArtifactSet, RootUnreadableError> {
    let project_dirs = match sorted_entries(root) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(ArtifactSet {
                artifacts: Vec::new(),
                root_present: false,
            });
        }
        Err(error) => {
            return Err(RootUnreadableError {
                path: root.to_owned(),
                error,
            });
        }
    };

    let mut artifacts = Vec::new();
    for project_dir in project_dirs {
        if !project_dir.is_dir() {
            continue;
        }
        let project = match project_dir.file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };

        scan_dir(&project, &project_dir, &mut artifacts);
        let results_dir = project_dir.join(TEST_RESULTS_DIR);
        if results_dir.is_dir() {
            scan_dir(&project, &results_dir, &mut artifacts);
        }
    }

    Ok(ArtifactSet {
        artifacts,
        root_present: true,
    })
}

// Collects one directory level of recognized artifact files. Never recurses.
fn scan_dir(project: &str, dir: &Utf8Path, artifacts: &mut Vec<DiscoveredArtifact>) {
    let entries = match sorted_entries(dir) {
        Ok(entries) => entries,
        Err(error) => {
            // Project-level read failures are isolated, like every other
            // per-unit failure in the pipeline.
            warn!("skipping unreadable directory `{dir}`: {error}");
            return;
        }
    };

    for path in entries {
        if !path.is_file() {
            continue;
        }
        if let Some(kind) = ArtifactKind::classify(&path) {
            artifacts.push(DiscoveredArtifact {
                project: project.to_owned(),
                path,
                kind,
            });
        }
    }
}

// Directory entries in name order. `read_dir` order is platform-dependent;
// sorting keeps discovery deterministic across runs.
fn sorted_entries(dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
    let mut entries = Vec::new();
    for entry in dir.read_dir_utf8()? {
        entries.push(entry?.into_path());
    }
    entries.sort_unstable();
    Ok(entries)
}
