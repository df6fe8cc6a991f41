//! Operation requests.
//!
//! An [`OperationRequest`] is what a tool hands the gate: which operation,
//! on behalf of which tool, against what target, and what the prompt should
//! look like if one is needed. The risk tier is classified once when the
//! request is built and never changes afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::OperationKind;
use crate::risk::RiskTier;

/// Unique identifier for an operation request. Used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new random request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op:{}", self.0)
    }
}

/// A destructive operation awaiting a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    id: RequestId,
    tool_name: String,
    kind: OperationKind,
    risk_tier: RiskTier,
    target: Option<String>,
    phrase: Option<String>,
    choices: Vec<String>,
    default_yes: bool,
}

impl OperationRequest {
    /// Create a request for `kind` on behalf of `tool_name`.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, kind: OperationKind) -> Self {
        let risk_tier = kind.risk_tier();
        Self {
            id: RequestId::new(),
            tool_name: tool_name.into(),
            kind,
            risk_tier,
            target: None,
            phrase: None,
            choices: Vec::new(),
            default_yes: false,
        }
    }

    /// Parse `operation` and create a request for it.
    #[must_use]
    pub fn parse(tool_name: impl Into<String>, operation: &str) -> Self {
        Self::new(tool_name, OperationKind::parse(operation))
    }

    /// Set the file, branch or path the operation acts on.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Override the phrase required for typed confirmation.
    #[must_use]
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = Some(phrase.into());
        self
    }

    /// Offer numbered choices instead of a yes/no question.
    ///
    /// Only used for low and medium risk, and only when more than two
    /// choices are given.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Make an empty answer to a yes/no prompt mean yes.
    #[must_use]
    pub fn with_default_yes(mut self, default_yes: bool) -> Self {
        self.default_yes = default_yes;
        self
    }

    /// Request ID.
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Tool that issued the request.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Operation kind.
    #[must_use]
    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    /// Risk tier, fixed at construction.
    #[must_use]
    pub fn risk_tier(&self) -> RiskTier {
        self.risk_tier
    }

    /// Operation target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Phrase required for typed confirmation: the override if one was set
    /// and is not blank, otherwise derived from the operation kind.
    #[must_use]
    pub fn confirmation_phrase(&self) -> String {
        self.phrase
            .as_deref()
            .filter(|phrase| !phrase.trim().is_empty())
            .map_or_else(|| self.kind.confirmation_phrase(), str::to_owned)
    }

    /// Numbered choices.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Whether a yes/no prompt defaults to yes.
    #[must_use]
    pub fn default_yes(&self) -> bool {
        self.default_yes
    }

    /// One-line description, e.g. `hard_reset HEAD~3`.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.target {
            Some(target) => format!("{} {target}", self.kind),
            None => self.kind.to_string(),
        }
    }
}

impl fmt::Display for OperationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.risk_tier,
            self.tool_name,
            self.summary()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("op:"));
    }

    #[test]
    fn test_tier_fixed_at_construction() {
        let request = OperationRequest::parse("safe-git", "reset-hard");
        assert_eq!(request.kind(), &OperationKind::HardReset);
        assert_eq!(request.risk_tier(), RiskTier::High);

        let request = OperationRequest::parse("safe-file", "mystery");
        assert_eq!(request.risk_tier(), RiskTier::High);
    }

    #[test]
    fn test_builders() {
        let request = OperationRequest::new("safe-file", OperationKind::Overwrite)
            .with_target("notes.txt")
            .with_choices(["keep both", "overwrite", "skip"])
            .with_default_yes(true);

        assert_eq!(request.tool_name(), "safe-file");
        assert_eq!(request.target(), Some("notes.txt"));
        assert_eq!(request.choices().len(), 3);
        assert!(request.default_yes());
        assert_eq!(request.summary(), "overwrite notes.txt");
        assert_eq!(
            request.to_string(),
            "[medium] safe-file: overwrite notes.txt"
        );
    }

    #[test]
    fn test_confirmation_phrase_override() {
        let request = OperationRequest::new("safe-file", OperationKind::Delete);
        assert_eq!(request.confirmation_phrase(), "DELETE");

        let request = request.with_phrase("DELETE ALL");
        assert_eq!(request.confirmation_phrase(), "DELETE ALL");
    }

    #[test]
    fn test_blank_phrase_override_is_ignored() {
        let request = OperationRequest::new("safe-file", OperationKind::Delete).with_phrase("");
        assert_eq!(request.confirmation_phrase(), "DELETE");

        let request = OperationRequest::new("safe-file", OperationKind::Delete).with_phrase("  \t");
        assert_eq!(request.confirmation_phrase(), "DELETE");

        let request = OperationRequest::parse("safe-file", "");
        assert_eq!(request.risk_tier(), RiskTier::High);
        assert_eq!(request.confirmation_phrase(), crate::action::FALLBACK_PHRASE);
    }
}
