//! Confirmation policy: decides what happens to an operation request.
//!
//! [`evaluate`] is a pure function of the request's risk tier, the resolved
//! settings and the environment classification. It never reads input,
//! never touches the process environment, and never retries.
//!
//! # Decision order
//!
//! Low and medium risk:
//!
//! 1. `assume_yes` -> `Proceed`
//! 2. Can prompt -> `PromptSimple` (`PromptNumbered` with more than two choices)
//! 3. `force_yes` -> `Proceed`
//! 4. Otherwise -> `Refuse`
//!
//! High risk:
//!
//! 1. `force_yes` -> `Proceed`
//! 2. Can prompt -> `PromptTyped`
//! 3. Otherwise -> `Refuse`
//!
//! "Can prompt" means the environment is effectively interactive and the
//! `non_interactive` setting is off. `assume_yes` never authorizes high risk.

use std::fmt;

use safeops_config::{EffectiveConfig, Setting, SettingSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::environment::EnvironmentClassification;
use crate::request::OperationRequest;
use crate::risk::RiskTier;

/// Refusal reason for low/medium risk without a way to confirm.
pub const REFUSE_NO_AUTO_CONFIRM: &str = "non-interactive, no auto-confirm";

/// Refusal reason for high risk without `force_yes`.
pub const REFUSE_HIGH_RISK: &str = "high-risk operation requires force_yes";

/// Which setting authorized an automatic proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    /// `assume_yes` (low and medium risk only).
    AssumeYes,
    /// `force_yes`.
    ForceYes,
}

impl Authority {
    /// The setting this authority corresponds to.
    #[must_use]
    pub fn setting(self) -> Setting {
        match self {
            Self::AssumeYes => Setting::AssumeYes,
            Self::ForceYes => Setting::ForceYes,
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setting().key())
    }
}

/// Outcome of the confirmation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Run without asking.
    Proceed {
        /// Setting that authorized it.
        authority: Authority,
        /// Layer that setting was resolved from.
        source: SettingSource,
    },
    /// Ask a yes/no question.
    PromptSimple {
        /// Question to show.
        message: String,
        /// Answer assumed for an empty reply.
        default_yes: bool,
    },
    /// Require the user to type a phrase exactly.
    PromptTyped {
        /// Instruction to show.
        message: String,
        /// Phrase that must be typed.
        phrase: String,
    },
    /// Offer numbered choices plus cancel.
    PromptNumbered {
        /// Question to show.
        message: String,
        /// Choices, numbered from 1.
        options: Vec<String>,
    },
    /// Do not run. Terminal.
    Refuse {
        /// Why.
        reason: String,
        /// What would allow it.
        remediation: String,
    },
}

impl Decision {
    /// Whether the decision requires reading an answer.
    #[must_use]
    pub fn is_prompt(&self) -> bool {
        matches!(
            self,
            Self::PromptSimple { .. } | Self::PromptTyped { .. } | Self::PromptNumbered { .. }
        )
    }

    /// Whether this is an automatic proceed.
    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed { .. })
    }

    /// Whether this is a refusal.
    #[must_use]
    pub fn is_refuse(&self) -> bool {
        matches!(self, Self::Refuse { .. })
    }

    /// Refusal reason, if this is a refusal.
    #[must_use]
    pub fn refuse_reason(&self) -> Option<&str> {
        match self {
            Self::Refuse { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Short name for logs, e.g. `prompt_typed`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Proceed { .. } => "proceed",
            Self::PromptSimple { .. } => "prompt_simple",
            Self::PromptTyped { .. } => "prompt_typed",
            Self::PromptNumbered { .. } => "prompt_numbered",
            Self::Refuse { .. } => "refuse",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed { authority, source } => {
                write!(f, "proceed ({authority} from {source})")
            },
            Self::Refuse { reason, .. } => write!(f, "refuse: {reason}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Decide what to do with `request`.
#[must_use]
pub fn evaluate(
    request: &OperationRequest,
    config: &EffectiveConfig,
    environment: &EnvironmentClassification,
) -> Decision {
    let can_prompt = environment
        .with_non_interactive_override(config.non_interactive())
        .effective_interactive();
    let tool = config.tool_name();

    let decision = match request.risk_tier() {
        RiskTier::Low | RiskTier::Medium => {
            if config.assume_yes() {
                proceed(config, Authority::AssumeYes)
            } else if can_prompt {
                prompt_for(request)
            } else if config.force_yes() {
                proceed(config, Authority::ForceYes)
            } else {
                Decision::Refuse {
                    reason: REFUSE_NO_AUTO_CONFIRM.to_owned(),
                    remediation: remediation(tool, Setting::AssumeYes),
                }
            }
        },
        RiskTier::High => {
            if config.force_yes() {
                proceed(config, Authority::ForceYes)
            } else if can_prompt {
                Decision::PromptTyped {
                    message: format!("{} cannot be undone.", request.summary()),
                    phrase: request.confirmation_phrase(),
                }
            } else {
                Decision::Refuse {
                    reason: REFUSE_HIGH_RISK.to_owned(),
                    remediation: remediation(tool, Setting::ForceYes),
                }
            }
        },
    };

    debug!(
        request_id = %request.id(),
        tool = request.tool_name(),
        operation = %request.kind(),
        risk = %request.risk_tier(),
        is_tty = environment.is_tty(),
        ci = environment.ci_detected(),
        non_interactive = config.non_interactive(),
        assume_yes = config.assume_yes(),
        force_yes = config.force_yes(),
        decision = decision.name(),
        "confirmation gate evaluated"
    );

    decision
}

fn proceed(config: &EffectiveConfig, authority: Authority) -> Decision {
    Decision::Proceed {
        authority,
        source: config.get(authority.setting()).source.clone(),
    }
}

fn prompt_for(request: &OperationRequest) -> Decision {
    if request.choices().len() > 2 {
        Decision::PromptNumbered {
            message: format!("How should {} proceed?", request.summary()),
            options: request.choices().to_vec(),
        }
    } else {
        Decision::PromptSimple {
            message: format!("Proceed with {}?", request.summary()),
            default_yes: request.default_yes(),
        }
    }
}

fn remediation(tool_name: &str, setting: Setting) -> String {
    format!(
        "re-run with {} or set {}=1",
        setting.cli_flag(),
        setting.env_var(tool_name)
    )
}

#[cfg(test)]
mod tests {
    use safeops_config::EnvSnapshot;

    use super::*;
    use crate::action::OperationKind;

    fn tty() -> EnvironmentClassification {
        EnvironmentClassification::from_parts(true, &EnvSnapshot::empty())
    }

    fn no_tty() -> EnvironmentClassification {
        EnvironmentClassification::from_parts(false, &EnvSnapshot::empty())
    }

    fn flags(assume_yes: bool, force_yes: bool, non_interactive: bool) -> EffectiveConfig {
        EffectiveConfig::from_flags("demo", assume_yes, force_yes, non_interactive)
    }

    fn low() -> OperationRequest {
        OperationRequest::new("demo", OperationKind::AddFile)
    }

    fn medium() -> OperationRequest {
        OperationRequest::new("demo", OperationKind::Move)
    }

    fn high() -> OperationRequest {
        OperationRequest::new("demo", OperationKind::HardReset)
    }

    #[test]
    fn test_low_interactive_prompts() {
        let d = evaluate(&low(), &flags(false, false, false), &tty());
        assert!(matches!(d, Decision::PromptSimple { default_yes: false, .. }));
    }

    #[test]
    fn test_low_interactive_with_force_yes_still_prompts() {
        let d = evaluate(&low(), &flags(false, true, false), &tty());
        assert!(matches!(d, Decision::PromptSimple { .. }));
    }

    #[test]
    fn test_assume_yes_proceeds_for_low_and_medium_everywhere() {
        for request in [low(), medium()] {
            for env in [tty(), no_tty()] {
                for non_interactive in [false, true] {
                    let d = evaluate(&request, &flags(true, false, non_interactive), &env);
                    assert!(
                        matches!(d, Decision::Proceed { authority: Authority::AssumeYes, .. }),
                        "{request}: {d}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_low_non_interactive_force_yes_proceeds() {
        let d = evaluate(&medium(), &flags(false, true, false), &no_tty());
        assert!(matches!(d, Decision::Proceed { authority: Authority::ForceYes, .. }));
    }

    #[test]
    fn test_low_non_interactive_refuses() {
        let d = evaluate(&low(), &flags(false, false, false), &no_tty());
        assert_eq!(d.refuse_reason(), Some(REFUSE_NO_AUTO_CONFIRM));
        match d {
            Decision::Refuse { remediation, .. } => {
                assert!(remediation.contains("--yes"));
                assert!(remediation.contains("DEMO_ASSUME_YES"));
            },
            other => panic!("expected refuse, got {other}"),
        }
    }

    #[test]
    fn test_non_interactive_setting_blocks_prompt_on_tty() {
        let d = evaluate(&low(), &flags(false, false, true), &tty());
        assert!(d.is_refuse());
        let d = evaluate(&high(), &flags(false, false, true), &tty());
        assert_eq!(d.refuse_reason(), Some(REFUSE_HIGH_RISK));
    }

    #[test]
    fn test_more_than_two_choices_prompts_numbered() {
        let request = medium().with_choices(["overwrite", "rename", "skip"]);
        match evaluate(&request, &flags(false, false, false), &tty()) {
            Decision::PromptNumbered { options, .. } => assert_eq!(options.len(), 3),
            other => panic!("expected numbered prompt, got {other}"),
        }

        let request = medium().with_choices(["overwrite", "skip"]);
        let d = evaluate(&request, &flags(false, false, false), &tty());
        assert!(matches!(d, Decision::PromptSimple { .. }));
    }

    #[test]
    fn test_high_force_yes_proceeds_everywhere() {
        for env in [tty(), no_tty()] {
            for assume_yes in [false, true] {
                for non_interactive in [false, true] {
                    let d = evaluate(&high(), &flags(assume_yes, true, non_interactive), &env);
                    assert!(matches!(
                        d,
                        Decision::Proceed { authority: Authority::ForceYes, .. }
                    ));
                }
            }
        }
    }

    #[test]
    fn test_high_interactive_prompts_typed() {
        for assume_yes in [false, true] {
            match evaluate(&high(), &flags(assume_yes, false, false), &tty()) {
                Decision::PromptTyped { phrase, .. } => assert_eq!(phrase, "HARD RESET"),
                other => panic!("expected typed prompt, got {other}"),
            }
        }
    }

    #[test]
    fn test_assume_yes_never_authorizes_high() {
        for env in [tty(), no_tty()] {
            for non_interactive in [false, true] {
                let d = evaluate(&high(), &flags(true, false, non_interactive), &env);
                assert!(!d.is_proceed(), "{d}");
            }
        }
    }

    #[test]
    fn test_high_non_interactive_refuses() {
        let d = evaluate(&high(), &flags(true, false, false), &no_tty());
        assert_eq!(d.refuse_reason(), Some(REFUSE_HIGH_RISK));
        match d {
            Decision::Refuse { remediation, .. } => {
                assert!(remediation.contains("--force-yes"));
                assert!(remediation.contains("DEMO_FORCE_YES"));
            },
            other => panic!("expected refuse, got {other}"),
        }
    }

    #[test]
    fn test_force_yes_never_refuses() {
        for request in [low(), medium(), high()] {
            for env in [tty(), no_tty()] {
                for assume_yes in [false, true] {
                    for non_interactive in [false, true] {
                        let d =
                            evaluate(&request, &flags(assume_yes, true, non_interactive), &env);
                        assert!(!d.is_refuse(), "{request}: {d}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_ci_marker_blocks_prompt() {
        let env: EnvSnapshot = [("CI", "true")].into_iter().collect();
        let ci = EnvironmentClassification::from_parts(true, &env);
        let d = evaluate(&low(), &flags(false, false, false), &ci);
        assert!(d.is_refuse());
    }

    #[test]
    fn test_unknown_operation_treated_as_high() {
        let request = OperationRequest::parse("demo", "obliterate");
        let d = evaluate(&request, &flags(true, false, false), &no_tty());
        assert_eq!(d.refuse_reason(), Some(REFUSE_HIGH_RISK));
    }

    #[test]
    fn test_proceed_records_source() {
        let d = evaluate(&high(), &flags(false, true, false), &no_tty());
        assert_eq!(
            d,
            Decision::Proceed {
                authority: Authority::ForceYes,
                source: SettingSource::Cli,
            }
        );
        assert_eq!(d.to_string(), "proceed (force_yes from command line)");
    }
}
