//! SafeOps Approval - confirmation gating for destructive operations.
//!
//! Tools describe the operation they are about to run as an
//! [`OperationRequest`]. The [`SafetyGate`] classifies its risk, combines it
//! with the resolved settings and the environment classification, and
//! returns a [`Decision`]. A [`PromptExecutor`] then turns the decision into
//! a [`Resolution`], asking the user only when the decision calls for it.
//!
//! # Components
//!
//! - **Risk classification**: [`OperationKind`], [`RiskTier`], [`classify_risk`]
//! - **Environment detection**: [`EnvironmentClassification`]
//! - **Confirmation gate**: [`evaluate`], [`SafetyGate`], [`Decision`]
//! - **Prompting**: [`PromptExecutor`], [`Resolution`]
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//!
//! use safeops_approval::{
//!     Decision, EnvironmentClassification, OperationRequest, PromptExecutor, SafetyGate,
//! };
//! use safeops_config::{CliOverrides, Config, EnvSnapshot};
//!
//! let env: EnvSnapshot = [("DEMO_FORCE_YES", "1")].into_iter().collect();
//! let environment = EnvironmentClassification::from_parts(false, &env);
//! let gate = SafetyGate::new(Config::default(), env, environment);
//!
//! let request = OperationRequest::parse("demo", "hard_reset").with_target("HEAD~3");
//! let decision = gate.evaluate(&request, &CliOverrides::default());
//! assert!(matches!(decision, Decision::Proceed { .. }));
//!
//! let mut executor = PromptExecutor::new(Cursor::new(Vec::new()), Vec::new());
//! assert!(executor.execute(&decision).proceed);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod action;
pub mod environment;
/// Error types and results for the approval module.
pub mod error;
pub mod gate;
pub mod policy;
pub mod prompt;
pub mod request;
pub mod risk;

pub use action::{FALLBACK_PHRASE, OperationKind};
pub use environment::{CI_MARKERS, EnvironmentClassification, ci_marker};
pub use error::{ApprovalError, ApprovalResult};
pub use gate::SafetyGate;
pub use policy::{Authority, Decision, evaluate};
pub use prompt::{PromptExecutor, Resolution};
pub use request::{OperationRequest, RequestId};
pub use risk::{RiskTier, classify_risk};
