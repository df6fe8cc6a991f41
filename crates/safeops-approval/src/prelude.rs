//! Prelude module - commonly used types for convenient import.
//!
//! Use `use safeops_approval::prelude::*;` to import all essential types.

// Classification
pub use crate::{OperationKind, RiskTier, classify_risk};

// Requests
pub use crate::{OperationRequest, RequestId};

// Gate
pub use crate::{Authority, Decision, EnvironmentClassification, SafetyGate};

// Prompting
pub use crate::{PromptExecutor, Resolution};

// Errors
pub use crate::{ApprovalError, ApprovalResult};
