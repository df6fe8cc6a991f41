#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Layered configuration for SafeOps tools.
//!
//! This crate owns two things: the merged configuration file tree
//! ([`Config`]) and the per-tool resolution of confirmation settings
//! ([`EffectiveConfig`]).
//!
//! # Usage
//!
//! ```rust,no_run
//! use safeops_config::{CliOverrides, EffectiveConfig, EnvSnapshot, LoadOptions, ResolvedConfig};
//!
//! let env = EnvSnapshot::capture();
//! let resolved = ResolvedConfig::load(&LoadOptions::default(), &env).unwrap();
//! let effective = EffectiveConfig::resolve(
//!     "safe-git",
//!     &CliOverrides::default(),
//!     &env,
//!     &resolved.config,
//! );
//! println!("assume_yes = {}", effective.assume_yes());
//! ```
//!
//! # File precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Explicit** (`--config <PATH>`)
//! 2. **Workspace** (`{workspace}/.safeops/config.toml`)
//! 3. **User** (`~/.safeops/config.toml`, or `$SAFEOPS_HOME/config.toml`)
//! 4. **System** (`/etc/safeops/config.toml`)
//! 5. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! # Setting precedence
//!
//! Each confirmation setting resolves as command line > environment
//! variable > `[tools.<tool>]` section of the merged files > built-in
//! default. See [`resolve()`].
//!
//! # Design
//!
//! This crate has **no dependencies on other internal safeops crates**.

/// Process environment snapshot and flag parsing.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered configuration merging with precedence.
pub mod merge;
/// Per-tool setting resolution.
pub mod resolve;
/// Resolved configuration display and serialization.
pub mod show;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

// Re-export primary types at the crate root.
pub use env::{EnvSnapshot, parse_flag};
pub use error::{ConfigError, ConfigResult};
pub use loader::LoadOptions;
pub use merge::ConfigLayer;
pub use resolve::{
    CliOverrides, EffectiveConfig, Resolved, Setting, SettingSource, resolve,
    resolve_with_env_var,
};
pub use show::{ResolvedConfig, ShowFormat, show_effective};
pub use types::*;

impl Config {
    /// Load configuration from a single file (no layering).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
