//! Risk tiers and the static classification table.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::OperationKind;

/// How destructive an operation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Additive or trivially reversible.
    Low,
    /// Changes existing content; recoverable.
    Medium,
    /// Irreversible. Needs `force_yes` or a typed confirmation.
    High,
}

impl RiskTier {
    /// Whether this tier needs a typed phrase rather than y/N.
    #[must_use]
    pub fn requires_typed_confirmation(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Classify an operation kind.
///
/// Total over every kind. [`OperationKind::Unknown`] fails closed to
/// [`RiskTier::High`].
#[must_use]
pub fn classify_risk(kind: &OperationKind) -> RiskTier {
    match kind {
        OperationKind::AddFile
        | OperationKind::Copy
        | OperationKind::CreateDir
        | OperationKind::Commit
        | OperationKind::Stash
        | OperationKind::CreateBranch
        | OperationKind::Trash => RiskTier::Low,

        OperationKind::Move
        | OperationKind::Rename
        | OperationKind::Overwrite
        | OperationKind::ReplaceText
        | OperationKind::Restore
        | OperationKind::Merge
        | OperationKind::Rebase
        | OperationKind::Checkout => RiskTier::Medium,

        OperationKind::Delete
        | OperationKind::ForcePush
        | OperationKind::HardReset
        | OperationKind::Clean
        | OperationKind::DeleteBranch
        | OperationKind::StashDrop
        | OperationKind::DiscardChanges
        | OperationKind::PurgeHistory => RiskTier::High,

        OperationKind::Unknown(raw) => {
            info!(operation = %raw, "unrecognized operation kind; classifying as high risk");
            RiskTier::High
        },
    }
}
