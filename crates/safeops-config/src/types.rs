//! Configuration types for SafeOps.
//!
//! Every struct implements [`Default`] so that a bare `[section]` header in
//! TOML produces a working configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration shared by every SafeOps tool.
///
/// Loaded from layered TOML files (system, user, workspace, explicit path)
/// on top of the embedded defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
    /// Per-tool confirmation settings, keyed by tool name.
    pub tools: BTreeMap<String, ToolSection>,
}

impl Config {
    /// The configuration section scoped to `tool_name`, if any file set one.
    #[must_use]
    pub fn tool(&self, tool_name: &str) -> Option<&ToolSection> {
        self.tools.get(tool_name)
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["safeops_approval=debug"]`).
    pub directives: Vec<String>,
    /// Prefix each log line with a timestamp.
    pub timestamps: bool,
    /// Include source file and line number.
    pub file_info: bool,
    /// Log span open and close events.
    pub span_events: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            timestamps: true,
            file_info: false,
            span_events: false,
        }
    }
}

// ---------------------------------------------------------------------------
// ToolSection
// ---------------------------------------------------------------------------

/// Flat key → string mapping scoped to one tool (`[tools.<name>]`).
///
/// TOML booleans and integers are accepted and stored in their string
/// form, so `assume_yes = true` and `assume_yes = "yes"` read the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolSection {
    values: BTreeMap<String, String>,
}

impl ToolSection {
    /// Build a section from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw string value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterate over all keys in the section.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Whether the section has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Scalar accepted as a tool-section value.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl ScalarValue {
    fn into_string(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Text(s) => s,
        }
    }
}

impl<'de> Deserialize<'de> for ToolSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, ScalarValue>::deserialize(deserializer)?;
        Ok(Self {
            values: raw
                .into_iter()
                .map(|(k, v)| (k, v.into_string()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_section_accepts_mixed_scalars() {
        let config: Config = toml::from_str(
            r#"
            [tools.safe-git]
            assume_yes = true
            force_yes = "no"
            non_interactive = 1
        "#,
        )
        .unwrap();

        let section = config.tool("safe-git").unwrap();
        assert_eq!(section.get("assume_yes"), Some("true"));
        assert_eq!(section.get("force_yes"), Some("no"));
        assert_eq!(section.get("non_interactive"), Some("1"));
    }

    #[test]
    fn test_missing_tool_section() {
        let config = Config::default();
        assert!(config.tool("safe-file").is_none());
    }

    #[test]
    fn test_bare_sections_use_defaults() {
        let config: Config = toml::from_str("[logging]\n[tools]\n").unwrap();
        assert_eq!(config.logging, LoggingSection::default());
        assert!(config.tools.is_empty());
    }

    #[test]
    fn test_tool_section_serializes_flat() {
        let section = ToolSection::from_pairs([("assume_yes", "true")]);
        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(json, r#"{"assume_yes":"true"}"#);
    }
}
