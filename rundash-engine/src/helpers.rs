// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! General support code for rundash-engine.

use std::fmt;

/// Utilities for pluralizing various words based on count.
pub(crate) mod plural {
    /// Returns "test" if `count` is 1, otherwise "tests".
    pub(crate) fn tests_str(count: usize) -> &'static str {
        if count == 1 { "test" } else { "tests" }
    }

    /// Returns "artifact" if `count` is 1, otherwise "artifacts".
    pub(crate) fn artifacts_str(count: usize) -> &'static str {
        if count == 1 { "artifact" } else { "artifacts" }
    }

    /// Returns "document" if `count` is 1, otherwise "documents".
    pub(crate) fn documents_str(count: usize) -> &'static str {
        if count == 1 { "document" } else { "documents" }
    }
}

/// Displays a millisecond duration in the form used throughout rundash
/// reports.
///
/// Values under one second render as whole milliseconds (`"500ms"`), values
/// under one minute as seconds with one decimal place (`"12.3s"`), and
/// anything longer as minutes with an integer seconds remainder (`"2m 5s"`).
#[derive(Clone, Copy, Debug)]
pub struct FormattedDuration(pub u64);

impl fmt::Display for FormattedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0;
        if millis < 1000 {
            write!(f, "{millis}ms")
        } else if millis < 60_000 {
            write!(f, "{:.1}s", millis as f64 / 1000.0)
        } else {
            write!(f, "{}m {}s", millis / 60_000, millis % 60_000 / 1000)
        }
    }
}
