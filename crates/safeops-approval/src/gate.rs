//! Process-wide safety gate.
//!
//! [`SafetyGate`] bundles the three inputs that are fixed for a process
//! (loaded config, environment snapshot, environment classification) so
//! tools only pass the per-operation parts.

use safeops_config::{CliOverrides, Config, EffectiveConfig, EnvSnapshot};

use crate::environment::EnvironmentClassification;
use crate::policy::{Decision, evaluate};
use crate::request::OperationRequest;

/// Entry point tools use to gate destructive operations.
#[derive(Debug, Clone)]
pub struct SafetyGate {
    config: Config,
    env: EnvSnapshot,
    environment: EnvironmentClassification,
}

impl SafetyGate {
    /// Build a gate from already-captured inputs.
    #[must_use]
    pub fn new(config: Config, env: EnvSnapshot, environment: EnvironmentClassification) -> Self {
        Self {
            config,
            env,
            environment,
        }
    }

    /// Build a gate for the current process, classifying stdin from `env`.
    #[must_use]
    pub fn detect(config: Config, env: EnvSnapshot) -> Self {
        let environment = EnvironmentClassification::detect(&env);
        Self::new(config, env, environment)
    }

    /// Environment classification this gate was built with.
    #[must_use]
    pub fn environment(&self) -> &EnvironmentClassification {
        &self.environment
    }

    /// Resolve the settings `tool_name` would run with.
    #[must_use]
    pub fn effective_config(&self, tool_name: &str, overrides: &CliOverrides) -> EffectiveConfig {
        EffectiveConfig::resolve(tool_name, overrides, &self.env, &self.config)
    }

    /// Decide what to do with `request`.
    #[must_use]
    pub fn evaluate(&self, request: &OperationRequest, overrides: &CliOverrides) -> Decision {
        let effective = self.effective_config(request.tool_name(), overrides);
        evaluate(request, &effective, &self.environment)
    }

    /// Shorthand for gating a bare operation kind with no target or prompt
    /// customization.
    #[must_use]
    pub fn evaluate_kind(
        &self,
        operation_kind: &str,
        tool_name: &str,
        overrides: &CliOverrides,
    ) -> Decision {
        self.evaluate(&OperationRequest::parse(tool_name, operation_kind), overrides)
    }
}
