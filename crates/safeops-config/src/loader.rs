//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `/etc/safeops/config.toml` (system)
//! 3. Merge `~/.safeops/config.toml`, or `$SAFEOPS_HOME/config.toml` (user)
//! 4. Merge `{workspace}/.safeops/config.toml` (workspace)
//! 5. Merge the `--config` file, if one was given (explicit)
//! 6. Deserialize merged tree → `Config`
//! 7. Validate
//! 8. Return `ResolvedConfig`

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::EnvSnapshot;
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_all_leaves};
use crate::show::ResolvedConfig;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// System-wide config path.
const SYSTEM_CONFIG_PATH: &str = "/etc/safeops/config.toml";

/// Directory name used under home and workspace roots.
const CONFIG_DIR_NAME: &str = ".safeops";

/// Environment variable naming an alternate user config directory.
pub const SAFEOPS_HOME_VAR: &str = "SAFEOPS_HOME";

/// Where to look for configuration files.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions<'a> {
    /// Root of the current project. `None` skips the workspace layer.
    pub workspace_root: Option<&'a Path>,
    /// Directory holding the user `config.toml`, bypassing home discovery.
    pub home_override: Option<&'a Path>,
    /// File given explicitly on the command line.
    pub explicit_file: Option<&'a Path>,
}

/// Load the unified configuration with layered file precedence.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file exists but is unreadable or
/// malformed, if an explicit file is missing, or if the merged configuration
/// fails validation.
pub fn load(options: &LoadOptions<'_>, env: &EnvSnapshot) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();

    record_all_leaves(&merged, "", &ConfigLayer::Defaults, &mut field_sources);

    let mut apply = |overlay: &toml::Value, path: &Path, layer: ConfigLayer| {
        deep_merge_tracking(&mut merged, overlay, "", &layer, &mut field_sources);
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), layer = %layer, "loaded config");
    };

    // 2. System config.
    let system_path = PathBuf::from(SYSTEM_CONFIG_PATH);
    if let Some(overlay) = try_load_file(&system_path)? {
        apply(&overlay, &system_path, ConfigLayer::System);
    }

    // 3. User config.
    if let Some((overlay, path)) = load_user_config(options.home_override, env)? {
        apply(&overlay, &path, ConfigLayer::User);
    }

    // 4. Workspace config.
    if let Some(ws_root) = options.workspace_root {
        let ws_path = ws_root.join(CONFIG_DIR_NAME).join("config.toml");
        if let Some(overlay) = try_load_file(&ws_path)? {
            apply(&overlay, &ws_path, ConfigLayer::Workspace);
        }
    }

    // 5. Explicit file. Unlike the discovered layers, it must exist.
    if let Some(explicit) = options.explicit_file {
        let overlay = try_load_file(explicit)?.ok_or_else(|| ConfigError::ReadError {
            path: explicit.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        apply(&overlay, explicit, ConfigLayer::Explicit);
    }

    // 6. Deserialize.
    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    // 7. Validate.
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// Load a config from a specific file path (no layering).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let value = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
        path: path.display().to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })?;

    let config: Config = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;

    validate::validate(&config)?;
    Ok(config)
}

/// Every path the loader checks, in precedence order (lowest first).
#[must_use]
pub fn candidate_paths(options: &LoadOptions<'_>, env: &EnvSnapshot) -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(h) = options.home_override {
        paths.push(h.join("config.toml"));
    } else {
        if let Ok(home) = home_directory() {
            paths.push(home.join(CONFIG_DIR_NAME).join("config.toml"));
        }
        if let Some(alt) = env.get(SAFEOPS_HOME_VAR) {
            paths.push(PathBuf::from(alt).join("config.toml"));
        }
    }
    if let Some(ws_root) = options.workspace_root {
        paths.push(ws_root.join(CONFIG_DIR_NAME).join("config.toml"));
    }
    if let Some(explicit) = options.explicit_file {
        paths.push(explicit.to_path_buf());
    }
    paths
}

fn load_user_config(
    home_override: Option<&Path>,
    env: &EnvSnapshot,
) -> ConfigResult<Option<(toml::Value, PathBuf)>> {
    if let Some(h) = home_override {
        // When overridden, treat the path as the .safeops directory itself.
        let path = h.join("config.toml");
        return Ok(try_load_file(&path)?.map(|overlay| (overlay, path)));
    }

    // Standard discovery: ~/.safeops/config.toml then SAFEOPS_HOME/config.toml.
    // A missing home directory only skips this layer.
    if let Ok(home) = home_directory() {
        let user_path = home.join(CONFIG_DIR_NAME).join("config.toml");
        if let Some(overlay) = try_load_file(&user_path)? {
            return Ok(Some((overlay, user_path)));
        }
    }

    if let Some(alt) = env.get(SAFEOPS_HOME_VAR) {
        let alt_path = PathBuf::from(alt).join("config.toml");
        return Ok(try_load_file(&alt_path)?.map(|overlay| (overlay, alt_path)));
    }

    Ok(None)
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// Uses a single read operation (no separate exists/metadata checks).
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}
