//! Interactive / non-interactive environment detection.

use std::io::{self, IsTerminal};

use safeops_config::EnvSnapshot;
use safeops_config::env::parse_flag;

/// Environment variables set by CI systems.
pub const CI_MARKERS: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "BUILD_NUMBER",
    "RUN_ID",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "DRONE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
    "BITBUCKET_BUILD_NUMBER",
    "CODEBUILD_BUILD_ID",
];

/// Whether a human can answer a prompt in this process.
///
/// Computed once at startup. `effective_interactive` is always
/// `is_tty && !ci_detected && !non_interactive_override`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentClassification {
    is_tty: bool,
    ci_detected: bool,
    non_interactive_override: bool,
}

impl EnvironmentClassification {
    /// Inspect stdin and the current process environment.
    #[must_use]
    pub fn classify() -> Self {
        Self::detect(&EnvSnapshot::capture())
    }

    /// Inspect stdin, reading CI markers from an already-captured snapshot.
    #[must_use]
    pub fn detect(env: &EnvSnapshot) -> Self {
        Self::from_parts(io::stdin().is_terminal(), env)
    }

    /// Classify from an explicit TTY flag and environment snapshot.
    #[must_use]
    pub fn from_parts(is_tty: bool, env: &EnvSnapshot) -> Self {
        Self {
            is_tty,
            ci_detected: ci_marker(env).is_some(),
            non_interactive_override: false,
        }
    }

    /// Copy of this classification with the non-interactive override set.
    #[must_use]
    pub fn with_non_interactive_override(self, non_interactive: bool) -> Self {
        Self {
            non_interactive_override: self.non_interactive_override || non_interactive,
            ..self
        }
    }

    /// Stdin is attached to a terminal.
    #[must_use]
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// A CI marker variable is present and truthy.
    #[must_use]
    pub fn ci_detected(&self) -> bool {
        self.ci_detected
    }

    /// A prompt can be shown and answered.
    #[must_use]
    pub fn effective_interactive(&self) -> bool {
        self.is_tty && !self.ci_detected && !self.non_interactive_override
    }
}

/// The first CI marker that is set to a truthy value.
///
/// Markers hold anything from `true` to a build URL, so any non-empty value
/// counts unless it is an explicit false (`0`, `false`, `no`).
#[must_use]
pub fn ci_marker(env: &EnvSnapshot) -> Option<&'static str> {
    CI_MARKERS.iter().copied().find(|name| {
        env.get(name)
            .is_some_and(|value| parse_flag(value) != Some(false))
    })
}
