//! Per-tool setting resolution.
//!
//! Every confirmation setting is resolved from four layers, highest first:
//!
//! 1. **Call site**: the value passed on the command line (`--yes`).
//! 2. **Environment**: `{TOOL}_ASSUME_YES`, `{TOOL}_FORCE_YES`,
//!    `{TOOL}_NONINTERACTIVE`.
//! 3. **Config file**: the `[tools.<tool>]` section of the merged config.
//! 4. **Default**: compiled into [`Setting::default_value`].
//!
//! Absence at one layer falls through to the next. A malformed value at a
//! layer that *is* present counts as `false` and is logged; it never errors.

use std::fmt;

use tracing::{debug, warn};

use crate::env::{EnvSnapshot, env_prefix, parse_flag};
use crate::types::{Config, ToolSection};

/// A confirmation setting understood by every tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Auto-confirm low and medium risk operations.
    AssumeYes,
    /// Auto-confirm high risk operations.
    ForceYes,
    /// Never prompt; fail instead.
    NonInteractive,
}

impl Setting {
    /// All settings, in display order.
    pub const ALL: [Self; 3] = [Self::AssumeYes, Self::ForceYes, Self::NonInteractive];

    /// Key used in `[tools.<tool>]` config sections.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::AssumeYes => "assume_yes",
            Self::ForceYes => "force_yes",
            Self::NonInteractive => "non_interactive",
        }
    }

    /// Look up a setting by its config key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Suffix appended to the tool prefix to form the environment variable.
    #[must_use]
    pub fn env_suffix(self) -> &'static str {
        match self {
            Self::AssumeYes => "ASSUME_YES",
            Self::ForceYes => "FORCE_YES",
            Self::NonInteractive => "NONINTERACTIVE",
        }
    }

    /// Environment variable consulted for `tool_name`.
    #[must_use]
    pub fn env_var(self, tool_name: &str) -> String {
        format!("{}_{}", env_prefix(tool_name), self.env_suffix())
    }

    /// Command-line flag that sets this value.
    #[must_use]
    pub fn cli_flag(self) -> &'static str {
        match self {
            Self::AssumeYes => "--yes",
            Self::ForceYes => "--force-yes",
            Self::NonInteractive => "--non-interactive",
        }
    }

    /// Built-in value used when no layer provides one.
    #[must_use]
    pub fn default_value(self) -> bool {
        match self {
            Self::AssumeYes | Self::ForceYes | Self::NonInteractive => false,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which resolution layer produced a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    /// Explicit call-site / command-line value.
    Cli,
    /// Environment variable.
    Environment {
        /// The variable that was read.
        var: String,
    },
    /// `[tools.<tool>]` section of the merged config files.
    ConfigFile,
    /// Built-in default.
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "command line"),
            Self::Environment { var } => write!(f, "environment ({var})"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved value together with the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The effective value.
    pub value: T,
    /// Where it came from.
    pub source: SettingSource,
}

impl<T> Resolved<T> {
    /// Wrap a value with its source.
    pub fn new(value: T, source: SettingSource) -> Self {
        Self { value, source }
    }
}

/// Resolve one setting for one tool.
///
/// The environment variable name follows the `{TOOL}_{SETTING}` convention;
/// see [`resolve_with_env_var`] to supply a different one.
#[must_use]
pub fn resolve(
    tool_name: &str,
    setting: Setting,
    cli_value: Option<bool>,
    env: &EnvSnapshot,
    config_section: Option<&ToolSection>,
) -> Resolved<bool> {
    resolve_with_env_var(
        tool_name,
        setting,
        cli_value,
        &setting.env_var(tool_name),
        env,
        config_section,
    )
}

/// Resolve one setting, reading `env_var_name` for the environment layer.
#[must_use]
pub fn resolve_with_env_var(
    tool_name: &str,
    setting: Setting,
    cli_value: Option<bool>,
    env_var_name: &str,
    env: &EnvSnapshot,
    config_section: Option<&ToolSection>,
) -> Resolved<bool> {
    let resolved = if let Some(value) = cli_value {
        Resolved::new(value, SettingSource::Cli)
    } else if let Some(raw) = env.get(env_var_name) {
        let value = parse_flag(raw).unwrap_or_else(|| {
            warn!(
                var = env_var_name,
                value = raw,
                "unrecognized boolean in environment variable; treating as false"
            );
            false
        });
        Resolved::new(
            value,
            SettingSource::Environment {
                var: env_var_name.to_owned(),
            },
        )
    } else if let Some(raw) = config_section.and_then(|s| s.get(setting.key())) {
        let value = parse_flag(raw).unwrap_or_else(|| {
            warn!(
                tool = tool_name,
                key = setting.key(),
                value = raw,
                "unrecognized boolean in config file; treating as false"
            );
            false
        });
        Resolved::new(value, SettingSource::ConfigFile)
    } else {
        Resolved::new(setting.default_value(), SettingSource::Default)
    };

    debug!(
        tool = tool_name,
        setting = setting.key(),
        value = resolved.value,
        source = %resolved.source,
        "resolved setting"
    );
    resolved
}

/// Values supplied explicitly at the call site. `None` means "not given",
/// which is distinct from an explicit `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--yes`.
    pub assume_yes: Option<bool>,
    /// `--force-yes`.
    pub force_yes: Option<bool>,
    /// `--non-interactive`.
    pub non_interactive: Option<bool>,
}

impl CliOverrides {
    /// The call-site value for `setting`.
    #[must_use]
    pub fn get(&self, setting: Setting) -> Option<bool> {
        match setting {
            Setting::AssumeYes => self.assume_yes,
            Setting::ForceYes => self.force_yes,
            Setting::NonInteractive => self.non_interactive,
        }
    }
}

/// The resolved confirmation settings for one tool invocation.
///
/// Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    tool_name: String,
    assume_yes: Resolved<bool>,
    force_yes: Resolved<bool>,
    non_interactive: Resolved<bool>,
}

impl EffectiveConfig {
    /// Resolve every setting for `tool_name`.
    #[must_use]
    pub fn resolve(
        tool_name: &str,
        overrides: &CliOverrides,
        env: &EnvSnapshot,
        config: &Config,
    ) -> Self {
        let section = config.tool(tool_name);
        let get = |setting| resolve(tool_name, setting, overrides.get(setting), env, section);
        Self {
            tool_name: tool_name.to_owned(),
            assume_yes: get(Setting::AssumeYes),
            force_yes: get(Setting::ForceYes),
            non_interactive: get(Setting::NonInteractive),
        }
    }

    /// Build directly from values, all attributed to the call site.
    #[must_use]
    pub fn from_flags(
        tool_name: &str,
        assume_yes: bool,
        force_yes: bool,
        non_interactive: bool,
    ) -> Self {
        Self {
            tool_name: tool_name.to_owned(),
            assume_yes: Resolved::new(assume_yes, SettingSource::Cli),
            force_yes: Resolved::new(force_yes, SettingSource::Cli),
            non_interactive: Resolved::new(non_interactive, SettingSource::Cli),
        }
    }

    /// Tool these settings were resolved for.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Auto-confirm low and medium risk.
    #[must_use]
    pub fn assume_yes(&self) -> bool {
        self.assume_yes.value
    }

    /// Auto-confirm high risk.
    #[must_use]
    pub fn force_yes(&self) -> bool {
        self.force_yes.value
    }

    /// Prompting is forbidden.
    #[must_use]
    pub fn non_interactive(&self) -> bool {
        self.non_interactive.value
    }

    /// Full resolution record for `setting`.
    #[must_use]
    pub fn get(&self, setting: Setting) -> &Resolved<bool> {
        match setting {
            Setting::AssumeYes => &self.assume_yes,
            Setting::ForceYes => &self.force_yes,
            Setting::NonInteractive => &self.non_interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_cli_wins_over_all_layers() {
        let env = env(&[("DEMO_ASSUME_YES", "1")]);
        let section = ToolSection::from_pairs([("assume_yes", "true")]);

        let resolved = resolve("demo", Setting::AssumeYes, Some(false), &env, Some(&section));
        assert!(!resolved.value);
        assert_eq!(resolved.source, SettingSource::Cli);
    }

    #[test]
    fn test_env_wins_over_config_file() {
        let env = env(&[("DEMO_FORCE_YES", "no")]);
        let section = ToolSection::from_pairs([("force_yes", "yes")]);

        let resolved = resolve("demo", Setting::ForceYes, None, &env, Some(&section));
        assert!(!resolved.value);
        assert_eq!(
            resolved.source,
            SettingSource::Environment {
                var: "DEMO_FORCE_YES".to_owned()
            }
        );
    }

    #[test]
    fn test_config_file_value_round_trips() {
        let section = ToolSection::from_pairs([("non_interactive", "true")]);
        let resolved = resolve(
            "demo",
            Setting::NonInteractive,
            None,
            &EnvSnapshot::empty(),
            Some(&section),
        );
        assert!(resolved.value);
        assert_eq!(resolved.source, SettingSource::ConfigFile);
    }

    #[test]
    fn test_falls_through_to_default() {
        let resolved = resolve("demo", Setting::AssumeYes, None, &EnvSnapshot::empty(), None);
        assert_eq!(resolved.value, Setting::AssumeYes.default_value());
        assert_eq!(resolved.source, SettingSource::Default);
    }

    #[test]
    fn test_empty_env_value_falls_through() {
        let env = env(&[("DEMO_ASSUME_YES", "")]);
        let section = ToolSection::from_pairs([("assume_yes", "1")]);
        let resolved = resolve("demo", Setting::AssumeYes, None, &env, Some(&section));
        assert!(resolved.value);
        assert_eq!(resolved.source, SettingSource::ConfigFile);
    }

    #[test]
    fn test_malformed_env_value_is_false() {
        let env = env(&[("DEMO_ASSUME_YES", "sure")]);
        let section = ToolSection::from_pairs([("assume_yes", "true")]);
        let resolved = resolve("demo", Setting::AssumeYes, None, &env, Some(&section));
        assert!(!resolved.value);
        assert!(matches!(resolved.source, SettingSource::Environment { .. }));
    }

    #[test]
    fn test_malformed_config_value_is_false() {
        let section = ToolSection::from_pairs([("force_yes", "definitely")]);
        let resolved = resolve(
            "demo",
            Setting::ForceYes,
            None,
            &EnvSnapshot::empty(),
            Some(&section),
        );
        assert!(!resolved.value);
        assert_eq!(resolved.source, SettingSource::ConfigFile);
    }

    #[test]
    fn test_custom_env_var_name() {
        let env = env(&[("LEGACY_YES", "true")]);
        let resolved =
            resolve_with_env_var("demo", Setting::AssumeYes, None, "LEGACY_YES", &env, None);
        assert!(resolved.value);
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(Setting::AssumeYes.env_var("demo"), "DEMO_ASSUME_YES");
        assert_eq!(Setting::ForceYes.env_var("safe-git"), "SAFE_GIT_FORCE_YES");
        assert_eq!(
            Setting::NonInteractive.env_var("demo"),
            "DEMO_NONINTERACTIVE"
        );
    }

    #[test]
    fn test_setting_keys_round_trip() {
        for setting in Setting::ALL {
            assert_eq!(Setting::from_key(setting.key()), Some(setting));
        }
        assert_eq!(Setting::from_key("assume-yes"), None);
    }

    #[test]
    fn test_effective_config_reads_tool_section() {
        let mut config = Config::default();
        config.tools.insert(
            "safe-file".to_owned(),
            ToolSection::from_pairs([("assume_yes", "true"), ("force_yes", "false")]),
        );
        let env = env(&[("SAFE_FILE_NONINTERACTIVE", "1")]);
        let overrides = CliOverrides {
            force_yes: Some(true),
            ..CliOverrides::default()
        };

        let effective = EffectiveConfig::resolve("safe-file", &overrides, &env, &config);
        assert!(effective.assume_yes());
        assert!(effective.force_yes());
        assert!(effective.non_interactive());
        assert_eq!(effective.get(Setting::AssumeYes).source, SettingSource::ConfigFile);
        assert_eq!(effective.get(Setting::ForceYes).source, SettingSource::Cli);
        assert_eq!(effective.tool_name(), "safe-file");
    }

    #[test]
    fn test_sections_are_scoped_per_tool() {
        let mut config = Config::default();
        config.tools.insert(
            "safe-git".to_owned(),
            ToolSection::from_pairs([("assume_yes", "true")]),
        );
        let effective = EffectiveConfig::resolve(
            "safe-file",
            &CliOverrides::default(),
            &EnvSnapshot::empty(),
            &config,
        );
        assert!(!effective.assume_yes());
    }
}
