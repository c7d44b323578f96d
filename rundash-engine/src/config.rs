// Copyright (c) The rundash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run configuration: where artifacts come from and where the report goes.

use camino::Utf8PathBuf;

/// Environment variable supplying the artifact root directory.
pub const ARTIFACTS_PATH_ENV: &str = "ARTIFACTS_PATH";

/// Environment variable supplying the report output directory.
pub const OUTPUT_PATH_ENV: &str = "RUNDASH_OUTPUT_PATH";

/// Default artifact root, relative to the working directory.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default report output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "report";

/// Resolved configuration for one report run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportConfig {
    /// Root directory containing one subdirectory per project.
    pub artifacts_dir: Utf8PathBuf,
    /// Directory the report bundle is written to. Created if absent.
    pub output_dir: Utf8PathBuf,
}

impl ReportConfig {
    /// Resolves configuration from explicit overrides, the environment, and
    /// defaults, in that precedence order.
    pub fn resolve(
        artifacts_override: Option<Utf8PathBuf>,
        output_override: Option<Utf8PathBuf>,
    ) -> Self {
        Self::resolve_with(artifacts_override, output_override, |var| {
            std::env::var(var).ok()
        })
    }

    /// [`resolve`](Self::resolve) with an explicit environment lookup,
    /// primarily for tests.
    pub fn resolve_with(
        artifacts_override: Option<Utf8PathBuf>,
        output_override: Option<Utf8PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |explicit: Option<Utf8PathBuf>, var: &str, default: &str| {
            explicit
                .or_else(|| env(var).filter(|value| !value.is_empty()).map(Utf8PathBuf::from))
                .unwrap_or_else(|| Utf8PathBuf::from(default))
        };

        Self {
            artifacts_dir: pick(artifacts_override, ARTIFACTS_PATH_ENV, DEFAULT_ARTIFACTS_DIR),
            output_dir: pick(output_override, OUTPUT_PATH_ENV, DEFAULT_OUTPUT_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_from(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |var| map.get(var).map(|value| (*value).to_owned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ReportConfig::resolve_with(None, None, |_| None);
        assert_eq!(
            config,
            ReportConfig {
                artifacts_dir: DEFAULT_ARTIFACTS_DIR.into(),
                output_dir: DEFAULT_OUTPUT_DIR.into(),
            }
        );
    }

    #[test]
    fn environment_beats_defaults() {
        let env = env_from(hashmap! {
            ARTIFACTS_PATH_ENV => "/var/ci/artifacts",
            OUTPUT_PATH_ENV => "/var/ci/report",
        });
        let config = ReportConfig::resolve_with(None, None, env);
        assert_eq!(config.artifacts_dir, "/var/ci/artifacts");
        assert_eq!(config.output_dir, "/var/ci/report");
    }

    #[test]
    fn explicit_overrides_beat_environment() {
        let env = env_from(hashmap! {
            ARTIFACTS_PATH_ENV => "/var/ci/artifacts",
        });
        let config = ReportConfig::resolve_with(Some("local-artifacts".into()), None, env);
        assert_eq!(config.artifacts_dir, "local-artifacts");
    }

    #[test]
    fn empty_environment_values_fall_through() {
        let env = env_from(hashmap! {
            ARTIFACTS_PATH_ENV => "",
        });
        let config = ReportConfig::resolve_with(None, None, env);
        assert_eq!(config.artifacts_dir, DEFAULT_ARTIFACTS_DIR);
    }
}
