//! CLI handlers for the `safeops config` subcommand.

use anyhow::{Result, anyhow};
use safeops_config::{
    CliOverrides, EffectiveConfig, EnvSnapshot, LoadOptions, ResolvedConfig, Setting, ShowFormat,
    show_effective,
};

use crate::theme::Theme;

/// Show the resolved configuration with source annotations.
///
/// With `tool`, also show that tool's effective settings and the layer each
/// one came from.
pub(crate) fn show_config(
    resolved: &ResolvedConfig,
    env: &EnvSnapshot,
    format: ShowFormat,
    section: Option<&str>,
    tool: Option<&str>,
) -> Result<()> {
    let output = resolved
        .show(format, section)
        .map_err(|_| match section {
            Some(name) => anyhow!("no section named '{name}' in the configuration"),
            None => anyhow!("failed to format config"),
        })?;
    println!("{output}");

    if let Some(tool) = tool {
        let effective =
            EffectiveConfig::resolve(tool, &CliOverrides::default(), env, &resolved.config);
        let output = show_effective(&effective, format)
            .map_err(|e| anyhow!("failed to format settings: {e}"))?;
        println!("{output}");
    }
    Ok(())
}

/// Show all config file paths that are checked, and the environment
/// variables consulted for `tool`.
pub(crate) fn show_paths(options: &LoadOptions<'_>, env: &EnvSnapshot, tool: Option<&str>) {
    let paths = ResolvedConfig::candidate_paths(options, env);

    println!("{}", Theme::header("Configuration files (lowest precedence first)"));
    for (n, path) in (1_usize..).zip(&paths) {
        let status = if path.exists() {
            "found"
        } else {
            "not found"
        };
        println!("  {n}. {}  {}", path.display(), Theme::dimmed(&format!("[{status}]")));
    }

    println!();
    println!("{}", Theme::header("Environment variables"));
    let tool_label = tool.unwrap_or("<tool>");
    for setting in Setting::ALL {
        let var = match tool {
            Some(tool) => setting.env_var(tool),
            None => format!("{{TOOL}}_{}", setting.env_suffix()),
        };
        println!(
            "  {var:<28} -> tools.{tool_label}.{}  {}",
            setting.key(),
            Theme::dimmed(&format!("(or {})", setting.cli_flag()))
        );
    }
    println!(
        "  {:<28} -> alternate user config directory",
        safeops_config::loader::SAFEOPS_HOME_VAR
    );
}
