use std::collections::HashMap;

/// Which configuration file layer a value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Compiled-in defaults (`defaults.toml`).
    Defaults,
    /// System-wide configuration (`/etc/safeops/config.toml`).
    System,
    /// User-level configuration: `~/.safeops/config.toml`, or
    /// `$SAFEOPS_HOME/config.toml` when that is where the file was found.
    User,
    /// Workspace-level configuration (`{workspace}/.safeops/config.toml`).
    Workspace,
    /// File passed explicitly with `--config`.
    Explicit,
}

impl std::fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::System => write!(f, "system (/etc/safeops/config.toml)"),
            Self::User => write!(f, "user"),
            Self::Workspace => write!(f, "workspace (.safeops/config.toml)"),
            Self::Explicit => write!(f, "explicit (--config)"),
        }
    }
}

/// Tracks which layer set each field's value.
pub type FieldSources = HashMap<String, ConfigLayer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_layer_does_not_name_a_path() {
        // The user file may live under $SAFEOPS_HOME; the loaded path is
        // listed separately.
        assert_eq!(ConfigLayer::User.to_string(), "user");
        assert_eq!(
            ConfigLayer::Workspace.to_string(),
            "workspace (.safeops/config.toml)"
        );
    }
}
