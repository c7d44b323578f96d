// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by rundash-engine.
//!
//! Almost everything here is recoverable: the pipeline isolates failures per
//! artifact and per output document, collecting them into the run outcome
//! rather than aborting. The one fatal condition is an artifact root that
//! exists but cannot be read.

use camino::Utf8PathBuf;
use std::{error::Error, fmt, io};
use thiserror::Error;

/// The artifact root exists but could not be read.
///
/// This is the one fatal condition in the pipeline: a *missing* root is
/// reported as an empty run, but a root we cannot read means the run cannot
/// say anything meaningful at all.
#[derive(Debug, Error)]
#[error("artifact root `{path}` exists but could not be read")]
pub struct RootUnreadableError {
    /// The artifact root path.
    pub path: Utf8PathBuf,
    /// The underlying I/O error.
    #[source]
    pub error: io::Error,
}

/// A single artifact could not be turned into records.
///
/// Malformed artifacts are skipped per document; extraction of other
/// documents continues.
#[derive(Debug, Error)]
pub enum MalformedArtifactError {
    /// The artifact file could not be read.
    #[error("failed to read artifact `{path}`")]
    Read {
        /// The artifact path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// The artifact did not parse as a results document.
    #[error("artifact `{path}` is not a valid results document")]
    Parse {
        /// The artifact path.
        path: Utf8PathBuf,
        /// The underlying deserialization error.
        #[source]
        error: serde_json::Error,
    },
}

/// A single report document could not be written.
///
/// Write failures are isolated per document: the renderer attempts every
/// document in the bundle and reports each failure individually.
#[derive(Debug, Error)]
pub enum WriteReportError {
    /// The output directory could not be created.
    #[error("failed to create output directory `{path}`")]
    CreateDir {
        /// The output directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// A document failed to serialize.
    #[error("failed to serialize report document `{path}`")]
    Serialize {
        /// The document path.
        path: Utf8PathBuf,
        /// The underlying serialization error.
        #[source]
        error: serde_json::Error,
    },

    /// A document failed to write to disk.
    #[error("failed to write report document `{path}`")]
    Write {
        /// The document path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },
}

impl WriteReportError {
    /// Returns the path of the document or directory that failed.
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            WriteReportError::CreateDir { path, .. }
            | WriteReportError::Serialize { path, .. }
            | WriteReportError::Write { path, .. } => path,
        }
    }
}

/// Displays an error along with its full chain of sources.
pub struct DisplayErrorChain<E>(E);

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new display wrapper for the given error.
    pub fn new(error: E) -> Self {
        Self(error)
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(error) = source {
            write!(f, "\n  caused by: {error}")?;
            source = error.source();
        }
        Ok(())
    }
}
