// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExpectedError,
    output::{OutputContext, OutputOpts, clap_styles},
};
use camino::Utf8PathBuf;
use clap::Parser;
use rundash_engine::{
    config::{ARTIFACTS_PATH_ENV, OUTPUT_PATH_ENV, ReportConfig},
    pipeline::run_report,
    render::DASHBOARD_FILE,
};
use rundash_metadata::RundashExitCode;
use std::io::Write;

/// Aggregate test-run artifacts into JSON reports and an HTML dashboard.
#[derive(Debug, Parser)]
#[command(
    version,
    bin_name = "rundash",
    styles = clap_styles::style(),
    max_term_width = 100
)]
pub struct RundashApp {
    /// Root directory containing one subdirectory per project
    #[arg(long, value_name = "DIR", env = ARTIFACTS_PATH_ENV)]
    artifacts_dir: Option<Utf8PathBuf>,

    /// Directory to write the report bundle to
    #[arg(long, value_name = "DIR", env = OUTPUT_PATH_ENV)]
    output_dir: Option<Utf8PathBuf>,

    #[command(flatten)]
    output: OutputOpts,
}

impl RundashApp {
    /// Initializes the output context for this app.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code on success.
    pub fn exec(self, output: OutputContext) -> Result<i32, ExpectedError> {
        let Self {
            artifacts_dir,
            output_dir,
            output: _,
        } = self;

        for (value, flag) in [
            (&artifacts_dir, "--artifacts-dir"),
            (&output_dir, "--output-dir"),
        ] {
            if value.as_deref().is_some_and(|path| path.as_str().is_empty()) {
                return Err(ExpectedError::Setup {
                    message: format!("{flag} requires a non-empty path"),
                });
            }
        }

        let config = ReportConfig::resolve(artifacts_dir, output_dir);
        let outcome = run_report(&config)?;

        let mut stdout = std::io::stdout().lock();
        writeln!(
            stdout,
            "aggregated {} test records from {} artifacts ({} skipped)",
            outcome.records_extracted, outcome.artifacts_found, outcome.artifacts_skipped,
        )?;
        if output.verbose && outcome.junit_artifacts > 0 {
            writeln!(
                stdout,
                "ignored {} JUnit XML artifacts (JSON results only)",
                outcome.junit_artifacts,
            )?;
        }
        writeln!(stdout, "dashboard: {}", config.output_dir.join(DASHBOARD_FILE))?;

        if !outcome.is_clean() {
            return Ok(RundashExitCode::WRITE_OUTPUT_ERROR);
        }
        Ok(RundashExitCode::OK)
    }
}
