//! Process environment snapshot and boolean flag parsing.
//!
//! The environment is captured once at startup into an [`EnvSnapshot`] and
//! passed by reference to everything that needs it. Nothing below the CLI
//! entry point reads `std::env` directly.

use std::collections::HashMap;

/// Values read as `true` (case-insensitive).
const TRUTHY: &[&str] = &["1", "true", "yes"];

/// Values read as `false` (case-insensitive).
const FALSY: &[&str] = &["0", "false", "no"];

/// Immutable copy of the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// An empty environment.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw value of `name`. Empty values are reported as unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Whether `name` is set to a non-empty value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse a boolean-like string.
///
/// Returns `Some(true)` for `1`/`true`/`yes`, `Some(false)` for
/// `0`/`false`/`no` (case-insensitive, surrounding whitespace ignored), and
/// `None` for anything else. Callers decide how to treat `None`.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    let value = raw.trim();
    if TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value)) {
        Some(true)
    } else if FALSY.iter().any(|f| f.eq_ignore_ascii_case(value)) {
        Some(false)
    } else {
        None
    }
}

/// Upper-case a tool name into an environment variable prefix.
///
/// Non-alphanumeric characters become `_`, so `safe-git` → `SAFE_GIT`.
#[must_use]
pub fn env_prefix(tool_name: &str) -> String {
    tool_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
