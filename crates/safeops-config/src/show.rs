//! Source-annotated display for `config show`.
//!
//! Prints the resolved configuration with annotations showing which layer
//! (defaults, system, user, workspace, explicit) set each value, and the
//! effective per-tool settings with the resolution layer that won.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use crate::env::EnvSnapshot;
use crate::error::ConfigResult;
use crate::loader::{self, LoadOptions};
use crate::merge::FieldSources;
use crate::resolve::{EffectiveConfig, Setting};
use crate::types::Config;

/// A resolved configuration together with source annotations.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final merged configuration.
    pub config: Config,
    /// Dotted field path → which layer set the value.
    pub field_sources: FieldSources,
    /// Config file paths that were loaded (in precedence order).
    pub loaded_files: Vec<String>,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// TOML with inline comments showing source.
    Toml,
    /// JSON (for programmatic consumption).
    Json,
}

impl ResolvedConfig {
    /// Load with full layering. See [`loader::load`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::ConfigError) if a config file is
    /// malformed or validation fails.
    pub fn load(options: &LoadOptions<'_>, env: &EnvSnapshot) -> ConfigResult<Self> {
        loader::load(options, env)
    }

    /// Files the loader checks for `options`.
    #[must_use]
    pub fn candidate_paths(options: &LoadOptions<'_>, env: &EnvSnapshot) -> Vec<PathBuf> {
        loader::candidate_paths(options, env)
    }

    /// Format the resolved config, optionally restricted to one section.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or `section` does not exist.
    pub fn show(&self, format: ShowFormat, section: Option<&str>) -> Result<String, fmt::Error> {
        match format {
            ShowFormat::Toml => self.show_toml(section),
            ShowFormat::Json => self.show_json(section),
        }
    }

    fn section_value(&self, section_name: &str) -> Result<toml::Value, fmt::Error> {
        let val = toml::Value::try_from(&self.config).map_err(|_| fmt::Error)?;
        let table = val.as_table().ok_or(fmt::Error)?;
        table.get(section_name).cloned().ok_or(fmt::Error)
    }

    fn show_toml(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        let toml_str = if let Some(section_name) = section {
            toml::to_string_pretty(&self.section_value(section_name)?).map_err(|_| fmt::Error)?
        } else {
            toml::to_string_pretty(&self.config).map_err(|_| fmt::Error)?
        };

        let mut output = String::new();

        output.push_str("# Resolved SafeOps Configuration\n");
        output.push_str("# Source annotations: [defaults] [system] [user] [workspace] [explicit]\n");

        if !self.loaded_files.is_empty() {
            output.push_str("#\n# Loaded files (in precedence order):\n");
            for (i, path) in self.loaded_files.iter().enumerate() {
                writeln!(output, "#   {}. {path}", i.saturating_add(1))?;
            }
        }

        output.push('\n');

        let mut table_prefix = section.unwrap_or("").to_owned();
        for line in toml_str.lines() {
            let trimmed = line.trim();
            if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                table_prefix = match section {
                    Some(s) => format!("{s}.{header}"),
                    None => header.to_owned(),
                };
                table_prefix = table_prefix.replace('"', "");
            }

            if let Some(annotation) = self.annotate_line(line, &table_prefix) {
                writeln!(output, "{line}  # {annotation}")?;
            } else {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn show_json(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        if let Some(section_name) = section {
            serde_json::to_string_pretty(&self.section_value(section_name)?)
                .map_err(|_| fmt::Error)
        } else {
            serde_json::to_string_pretty(&self.config).map_err(|_| fmt::Error)
        }
    }

    /// Try to extract a source annotation for a TOML line.
    fn annotate_line(&self, line: &str, prefix: &str) -> Option<String> {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('[') {
            return None;
        }

        let key = trimmed.split('=').next()?.trim().trim_matches('"');

        let field_path = if prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{prefix}.{key}")
        };

        self.field_sources
            .get(&field_path)
            .map(|layer| format!("[{layer}]"))
    }
}

/// Render the effective settings for one tool.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn show_effective(effective: &EffectiveConfig, format: ShowFormat) -> Result<String, fmt::Error> {
    match format {
        ShowFormat::Toml => {
            let mut output = String::new();
            writeln!(output, "# Effective settings for tool '{}'", effective.tool_name())?;
            writeln!(output, "[tools.\"{}\"]", effective.tool_name())?;
            for setting in Setting::ALL {
                let resolved = effective.get(setting);
                writeln!(
                    output,
                    "{} = {}  # [{}]",
                    setting.key(),
                    resolved.value,
                    resolved.source
                )?;
            }
            Ok(output)
        },
        ShowFormat::Json => {
            let settings: serde_json::Map<String, serde_json::Value> = Setting::ALL
                .into_iter()
                .map(|setting| {
                    let resolved = effective.get(setting);
                    (
                        setting.key().to_owned(),
                        serde_json::json!({
                            "value": resolved.value,
                            "source": resolved.source.to_string(),
                        }),
                    )
                })
                .collect();
            let doc = serde_json::json!({
                "tool": effective.tool_name(),
                "settings": settings,
            });
            serde_json::to_string_pretty(&doc).map_err(|_| fmt::Error)
        },
    }
}
