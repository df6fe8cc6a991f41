/// Errors surfaced when a confirmation does not end in approval.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApprovalError {
    /// The gate refused without asking.
    #[error("refused: {reason} ({remediation})")]
    Refused {
        /// Why the operation was refused.
        reason: String,
        /// How to allow it next time.
        remediation: String,
    },

    /// The prompt did not end in a yes: a negative answer, a wrong phrase,
    /// a cancelled selection, or input that closed before an answer.
    #[error("not confirmed: {reason}")]
    Declined {
        /// What happened, e.g. "answered no".
        reason: String,
    },
}

/// Result type for approval operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;
