//! SafeOps CLI - confirmation gate for destructive shell operations.
//!
//! Shell tools call `safeops check <operation> --tool <name>` before doing
//! anything destructive and act on the exit code: 0 to proceed, 1 when the
//! operation was refused or not confirmed, 2 on usage or configuration
//! errors.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use safeops_approval::{EnvironmentClassification, SafetyGate};
use safeops_config::{CliOverrides, EnvSnapshot, LoadOptions, ResolvedConfig, ShowFormat};

mod commands;
mod config_bridge;
mod theme;

use commands::{check, classify, config, env};
use theme::Theme;

/// Exit code for usage and configuration errors.
const EXIT_USAGE: u8 = 2;

/// SafeOps - confirm destructive operations consistently
#[derive(Parser)]
#[command(name = "safeops")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Explicit configuration file (highest-precedence file layer)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gate an operation: prompt, auto-confirm or refuse
    Check {
        /// Operation kind (e.g. `delete`, `hard_reset`, `overwrite`)
        #[arg(value_parser = parse_operation)]
        operation: String,

        /// Tool requesting the operation; selects env vars and config section
        #[arg(short, long)]
        tool: String,

        /// File, branch or path the operation acts on
        #[arg(long)]
        target: Option<String>,

        /// Phrase required to confirm a high-risk operation
        #[arg(long)]
        phrase: Option<String>,

        /// Offer a numbered choice (repeat for each option)
        #[arg(long = "choice", value_name = "CHOICE")]
        choices: Vec<String>,

        /// Treat an empty answer to a yes/no prompt as yes
        #[arg(long)]
        default_yes: bool,

        #[command(flatten)]
        flags: ConfirmFlags,
    },

    /// Print the risk tier of an operation
    Classify {
        /// Operation kind
        operation: String,
    },

    /// Show whether this environment allows prompting
    Env,

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Confirmation overrides. Each takes an optional `=BOOL`.
#[derive(Args)]
struct ConfirmFlags {
    /// Auto-confirm low and medium risk operations
    #[arg(
        short = 'y',
        long = "yes",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    assume_yes: Option<bool>,

    /// Auto-confirm every operation, including high risk
    #[arg(
        long = "force-yes",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    force_yes: Option<bool>,

    /// Never prompt; refuse instead
    #[arg(
        long = "non-interactive",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    non_interactive: Option<bool>,
}

impl From<ConfirmFlags> for CliOverrides {
    fn from(flags: ConfirmFlags) -> Self {
        Self {
            assume_yes: flags.assume_yes,
            force_yes: flags.force_yes,
            non_interactive: flags.non_interactive,
        }
    }
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration with source annotations
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,

        /// Only show this top-level section (e.g. `logging`, `tools`)
        #[arg(long)]
        section: Option<String>,

        /// Also show the effective settings for this tool
        #[arg(long)]
        tool: Option<String>,
    },
    /// List the configuration files and environment variables consulted
    Paths {
        /// Show variable names for this tool
        #[arg(long)]
        tool: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Toml,
    Json,
}

impl From<OutputFormat> for ShowFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Toml => Self::Toml,
            OutputFormat::Json => Self::Json,
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    safeops_config::parse_flag(raw)
        .ok_or_else(|| format!("expected 1/true/yes or 0/false/no, got '{raw}'"))
}

fn parse_operation(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Err("operation must not be empty".to_owned());
    }
    Ok(raw.to_owned())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    theme::configure_colors();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("{e:#}")));
            ExitCode::from(EXIT_USAGE)
        },
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let env = EnvSnapshot::capture();
    let workspace_root = std::env::current_dir().ok();
    let options = LoadOptions {
        workspace_root: workspace_root.as_deref(),
        home_override: None,
        explicit_file: cli.config.as_deref(),
    };

    let resolved = ResolvedConfig::load(&options, &env);
    init_logging(resolved.as_ref().ok(), cli.verbose);

    match cli.command {
        Commands::Check {
            operation,
            tool,
            target,
            phrase,
            choices,
            default_yes,
            flags,
        } => {
            let resolved = resolved.context("failed to load configuration")?;
            let gate = SafetyGate::detect(resolved.config, env);
            let check_options = check::CheckOptions {
                operation,
                tool,
                target,
                phrase,
                choices,
                default_yes,
                overrides: flags.into(),
                verbose: cli.verbose,
            };
            Ok(check::run_check(&check_options, &gate))
        },
        Commands::Classify { operation } => {
            classify::run_classify(&operation, cli.verbose);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Env => {
            let environment = EnvironmentClassification::detect(&env);
            env::show_environment(&env, &environment);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Config { command } => {
            match command {
                ConfigCommands::Show {
                    format,
                    section,
                    tool,
                } => {
                    let resolved = resolved.context("failed to load configuration")?;
                    config::show_config(
                        &resolved,
                        &env,
                        format.into(),
                        section.as_deref(),
                        tool.as_deref(),
                    )?;
                },
                ConfigCommands::Paths { tool } => {
                    config::show_paths(&options, &env, tool.as_deref());
                },
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// Set up logging from config, with `--verbose` raising the level to debug.
///
/// A config that failed to load still gets default logging so the failure
/// itself can be reported.
fn init_logging(resolved: Option<&ResolvedConfig>, verbose: bool) {
    let mut log_config = match resolved {
        Some(resolved) => config_bridge::to_log_config(&resolved.config),
        None => safeops_telemetry::LogConfig::default(),
    };
    if verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if !io::stderr().is_terminal() {
        log_config = log_config.without_ansi();
    }
    if let Err(e) = safeops_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }
}
