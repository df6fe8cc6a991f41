//! Operation kind classification.
//!
//! [`OperationKind`] names the destructive operations the SafeOps tools
//! gate. The set is closed; anything the tools pass that is not recognized
//! lands in [`OperationKind::Unknown`], which always classifies as high risk.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::risk::{RiskTier, classify_risk};

/// Typed confirmation phrase used when an operation label cannot produce one.
pub const FALLBACK_PHRASE: &str = "CONFIRM";

/// An operation that may need confirmation before it runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    // Low risk: additive or trivially reversible.
    /// Stage a file.
    AddFile,
    /// Copy a file to a new location.
    Copy,
    /// Create a directory.
    CreateDir,
    /// Record a commit.
    Commit,
    /// Stash working-tree changes.
    Stash,
    /// Create a branch.
    CreateBranch,
    /// Move a file to the trash.
    Trash,

    // Medium risk: changes existing content but can be undone.
    /// Move a file.
    Move,
    /// Rename a file.
    Rename,
    /// Overwrite an existing file.
    Overwrite,
    /// In-place text replacement.
    ReplaceText,
    /// Restore a file from a backup or the trash.
    Restore,
    /// Merge a branch.
    Merge,
    /// Rebase a branch.
    Rebase,
    /// Switch branches or check out paths.
    Checkout,

    // High risk: irreversible or rewrites shared history.
    /// Permanently delete a file.
    Delete,
    /// Force-push, overwriting remote history.
    ForcePush,
    /// `git reset --hard`.
    HardReset,
    /// Remove untracked files.
    Clean,
    /// Delete a branch.
    DeleteBranch,
    /// Drop a stash entry.
    StashDrop,
    /// Discard uncommitted changes.
    DiscardChanges,
    /// Rewrite or purge repository history.
    PurgeHistory,

    /// Anything not recognized. Always high risk.
    Unknown(String),
}

/// Known kinds and their canonical labels.
const KNOWN: &[(OperationKind, &str)] = &[
    (OperationKind::AddFile, "add_file"),
    (OperationKind::Copy, "copy"),
    (OperationKind::CreateDir, "create_dir"),
    (OperationKind::Commit, "commit"),
    (OperationKind::Stash, "stash"),
    (OperationKind::CreateBranch, "create_branch"),
    (OperationKind::Trash, "trash"),
    (OperationKind::Move, "move"),
    (OperationKind::Rename, "rename"),
    (OperationKind::Overwrite, "overwrite"),
    (OperationKind::ReplaceText, "replace_text"),
    (OperationKind::Restore, "restore"),
    (OperationKind::Merge, "merge"),
    (OperationKind::Rebase, "rebase"),
    (OperationKind::Checkout, "checkout"),
    (OperationKind::Delete, "delete"),
    (OperationKind::ForcePush, "force_push"),
    (OperationKind::HardReset, "hard_reset"),
    (OperationKind::Clean, "clean"),
    (OperationKind::DeleteBranch, "delete_branch"),
    (OperationKind::StashDrop, "stash_drop"),
    (OperationKind::DiscardChanges, "discard_changes"),
    (OperationKind::PurgeHistory, "purge_history"),
];

/// Shell-style aliases accepted by [`OperationKind::parse`].
const ALIASES: &[(&str, OperationKind)] = &[
    ("add", OperationKind::AddFile),
    ("cp", OperationKind::Copy),
    ("mkdir", OperationKind::CreateDir),
    ("mv", OperationKind::Move),
    ("rm", OperationKind::Delete),
    ("remove", OperationKind::Delete),
    ("push_force", OperationKind::ForcePush),
    ("reset_hard", OperationKind::HardReset),
    ("branch_delete", OperationKind::DeleteBranch),
];

impl OperationKind {
    /// Parse an operation identifier.
    ///
    /// Matching is case-insensitive and treats `-` and spaces as `_`.
    /// Unrecognized identifiers become [`OperationKind::Unknown`] holding the
    /// original text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        KNOWN
            .iter()
            .find(|(_, label)| *label == normalized)
            .map(|(kind, _)| kind.clone())
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == normalized)
                    .map(|(_, kind)| kind.clone())
            })
            .unwrap_or_else(|| Self::Unknown(raw.trim().to_owned()))
    }

    /// Canonical snake_case label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Unknown(raw) => raw,
            known => KNOWN
                .iter()
                .find(|(kind, _)| kind == known)
                .map_or("unknown", |(_, label)| *label),
        }
    }

    /// Whether this kind is in the known table.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Risk tier for this kind. Unknown kinds are high risk.
    #[must_use]
    pub fn risk_tier(&self) -> RiskTier {
        classify_risk(self)
    }

    /// Phrase a user must type to confirm a high-risk operation of this
    /// kind, e.g. `HARD RESET`. Labels with no alphanumerics fall back to
    /// [`FALLBACK_PHRASE`].
    #[must_use]
    pub fn confirmation_phrase(&self) -> String {
        let label = self.label();
        if !label.chars().any(char::is_alphanumeric) {
            return FALLBACK_PHRASE.to_owned();
        }
        label.replace(['_', '-'], " ").to_uppercase()
    }
}

impl FromStr for OperationKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_labels() {
        for (kind, label) in KNOWN {
            assert_eq!(&OperationKind::parse(label), kind);
            assert_eq!(kind.label(), *label);
        }
    }

    #[test]
    fn test_parse_normalizes_case_and_separators() {
        assert_eq!(OperationKind::parse("Force-Push"), OperationKind::ForcePush);
        assert_eq!(OperationKind::parse("hard reset"), OperationKind::HardReset);
        assert_eq!(OperationKind::parse("  DELETE "), OperationKind::Delete);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(OperationKind::parse("rm"), OperationKind::Delete);
        assert_eq!(OperationKind::parse("mv"), OperationKind::Move);
        assert_eq!(OperationKind::parse("reset-hard"), OperationKind::HardReset);
    }

    #[test]
    fn test_unknown_keeps_raw_text() {
        let kind = OperationKind::parse("launch_missiles");
        assert_eq!(kind, OperationKind::Unknown("launch_missiles".to_owned()));
        assert!(!kind.is_known());
        assert_eq!(kind.to_string(), "launch_missiles");
    }

    #[test]
    fn test_from_str() {
        let kind: OperationKind = "commit".parse().unwrap();
        assert_eq!(kind, OperationKind::Commit);
    }

    #[test]
    fn test_confirmation_phrases() {
        assert_eq!(OperationKind::Delete.confirmation_phrase(), "DELETE");
        assert_eq!(OperationKind::HardReset.confirmation_phrase(), "HARD RESET");
        assert_eq!(
            OperationKind::Unknown("wipe-disk".to_owned()).confirmation_phrase(),
            "WIPE DISK"
        );
    }

    #[test]
    fn test_blank_label_falls_back_to_fixed_phrase() {
        assert_eq!(OperationKind::parse("").confirmation_phrase(), FALLBACK_PHRASE);
        assert_eq!(
            OperationKind::Unknown("--".to_owned()).confirmation_phrase(),
            FALLBACK_PHRASE
        );
    }
}
