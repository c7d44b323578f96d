// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::StderrStyles;
use owo_colors::OwoColorize;
use rundash_engine::errors::RootUnreadableError;
use rundash_metadata::RundashExitCode;
use std::error::Error;
use thiserror::Error;

/// An error with a documented exit code, reported to the user on stderr.
#[derive(Debug, Error)]
pub enum ExpectedError {
    #[error("failed to read artifact root")]
    RootUnreadable {
        #[from]
        err: RootUnreadableError,
    },
    #[error("error writing to stdout")]
    StdoutWrite {
        #[from]
        err: std::io::Error,
    },
    #[error("{message}")]
    Setup { message: String },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::RootUnreadable { .. } => RundashExitCode::ARTIFACT_ROOT_UNREADABLE,
            Self::StdoutWrite { .. } => RundashExitCode::WRITE_OUTPUT_ERROR,
            Self::Setup { .. } => RundashExitCode::SETUP_ERROR,
        }
    }

    /// Displays this error to stderr, along with its causes.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = Some(self as &dyn Error);
        let mut is_root = true;
        while let Some(error) = next_error {
            if is_root {
                eprintln!("{}: {error}", "error".style(styles.error));
                is_root = false;
            } else {
                eprintln!("  {}: {error}", "caused by".style(styles.bold));
            }
            next_error = error.source();
        }
    }
}
