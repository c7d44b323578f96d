// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `rundash` failures.
///
/// A rundash run always attempts to produce whatever outputs it can; most
/// per-artifact and per-document failures are reported and absorbed. This
/// structure documents the exit codes for the conditions that are surfaced to
/// the process level.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum RundashExitCode {}

impl RundashExitCode {
    /// No errors occurred and rundash exited normally.
    ///
    /// This includes runs where the artifact root was missing or some
    /// artifacts were malformed: those conditions are reported in the run
    /// summary, not via the exit code.
    pub const OK: i32 = 0;

    /// The artifact root exists but could not be read.
    pub const ARTIFACT_ROOT_UNREADABLE: i32 = 102;

    /// Writing one or more report documents, or data to stdout, produced an
    /// error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// A user issue happened while setting up a rundash invocation.
    pub const SETUP_ERROR: i32 = 96;
}
