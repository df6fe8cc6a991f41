//! Integration tests for file-layered configuration feeding the gate.
//!
//! Config files are written to temporary directories and loaded with an
//! injected environment, so nothing depends on the machine's real home
//! directory or process environment.

use std::fs;
use std::path::Path;

use safeops_approval::{Decision, EnvironmentClassification, SafetyGate};
use safeops_config::{
    CliOverrides, ConfigError, ConfigLayer, EffectiveConfig, EnvSnapshot, LoadOptions,
    ResolvedConfig, Setting, SettingSource,
};
use tempfile::TempDir;

fn write_config(dir: &Path, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

struct Fixture {
    home: TempDir,
    workspace: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            workspace: TempDir::new().unwrap(),
        }
    }

    fn user(&self, contents: &str) -> &Self {
        write_config(self.home.path(), contents);
        self
    }

    fn workspace(&self, contents: &str) -> &Self {
        write_config(&self.workspace.path().join(".safeops"), contents);
        self
    }

    fn load(&self, env: &EnvSnapshot) -> Result<ResolvedConfig, ConfigError> {
        let options = LoadOptions {
            workspace_root: Some(self.workspace.path()),
            home_override: Some(self.home.path()),
            explicit_file: None,
        };
        ResolvedConfig::load(&options, env)
    }
}

#[test]
fn test_workspace_file_overrides_user_file() {
    let fixture = Fixture::new();
    fixture
        .user("[tools.safe-git]\nassume_yes = true\nforce_yes = true\n")
        .workspace("[tools.safe-git]\nforce_yes = false\n");

    let env = EnvSnapshot::empty();
    let resolved = fixture.load(&env).unwrap();
    assert_eq!(
        resolved.field_sources.get("tools.safe-git.force_yes"),
        Some(&ConfigLayer::Workspace)
    );
    assert_eq!(
        resolved.field_sources.get("tools.safe-git.assume_yes"),
        Some(&ConfigLayer::User)
    );

    let effective =
        EffectiveConfig::resolve("safe-git", &CliOverrides::default(), &env, &resolved.config);
    assert!(effective.assume_yes());
    assert!(!effective.force_yes());
    assert_eq!(
        effective.get(Setting::ForceYes).source,
        SettingSource::ConfigFile
    );
}

#[test]
fn test_environment_overrides_config_file() {
    let fixture = Fixture::new();
    fixture.user("[tools.demo]\nforce_yes = \"no\"\n");

    let env: EnvSnapshot = [("DEMO_FORCE_YES", "yes")].into_iter().collect();
    let resolved = fixture.load(&env).unwrap();
    let gate = SafetyGate::new(
        resolved.config,
        env.clone(),
        EnvironmentClassification::from_parts(false, &env),
    );

    let decision = gate.evaluate_kind("force_push", "demo", &CliOverrides::default());
    match decision {
        Decision::Proceed { source, .. } => assert_eq!(
            source,
            SettingSource::Environment {
                var: "DEMO_FORCE_YES".to_owned()
            }
        ),
        other => panic!("expected proceed, got {other}"),
    }
}

#[test]
fn test_config_non_interactive_disables_prompts_on_tty() {
    let fixture = Fixture::new();
    fixture.workspace("[tools.demo]\nnon_interactive = 1\n");

    let env = EnvSnapshot::empty();
    let resolved = fixture.load(&env).unwrap();
    let gate = SafetyGate::new(
        resolved.config,
        env.clone(),
        EnvironmentClassification::from_parts(true, &env),
    );

    let decision = gate.evaluate_kind("commit", "demo", &CliOverrides::default());
    assert!(decision.is_refuse());
}

#[test]
fn test_unknown_tool_setting_is_rejected() {
    let fixture = Fixture::new();
    fixture.workspace("[tools.demo]\nassume_yess = true\n");

    let err = fixture.load(&EnvSnapshot::empty()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }), "{err}");
}

#[test]
fn test_malformed_toml_reports_path() {
    let fixture = Fixture::new();
    fixture.user("[tools.demo\nassume_yes = true\n");

    let err = fixture.load(&EnvSnapshot::empty()).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("config.toml")),
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let fixture = Fixture::new();
    let env = EnvSnapshot::empty();
    let resolved = fixture.load(&env).unwrap();

    let effective =
        EffectiveConfig::resolve("demo", &CliOverrides::default(), &env, &resolved.config);
    for setting in Setting::ALL {
        assert!(!effective.get(setting).value);
        assert_eq!(effective.get(setting).source, SettingSource::Default);
    }
}
