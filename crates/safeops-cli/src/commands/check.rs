//! `safeops check`: gate one operation and report the outcome through the
//! exit code.

use std::process::ExitCode;

use safeops_approval::{Decision, OperationRequest, PromptExecutor, SafetyGate};
use safeops_config::CliOverrides;
use tracing::info_span;

use crate::theme::Theme;

/// Exit code for a refusal or a negative answer.
pub(crate) const EXIT_NOT_CONFIRMED: u8 = 1;

/// Everything `check` needs besides the gate.
pub(crate) struct CheckOptions {
    pub(crate) operation: String,
    pub(crate) tool: String,
    pub(crate) target: Option<String>,
    pub(crate) phrase: Option<String>,
    pub(crate) choices: Vec<String>,
    pub(crate) default_yes: bool,
    pub(crate) overrides: CliOverrides,
    pub(crate) verbose: bool,
}

impl CheckOptions {
    fn request(&self) -> OperationRequest {
        let mut request = OperationRequest::parse(&self.tool, &self.operation)
            .with_choices(self.choices.iter().cloned())
            .with_default_yes(self.default_yes);
        if let Some(target) = &self.target {
            request = request.with_target(target);
        }
        if let Some(phrase) = &self.phrase {
            request = request.with_phrase(phrase);
        }
        request
    }
}

/// Evaluate the gate, prompt if needed, and map the result to an exit code.
///
/// Prompts go to stderr. The only stdout output is the chosen option number
/// for numbered prompts.
pub(crate) fn run_check(options: &CheckOptions, gate: &SafetyGate) -> ExitCode {
    let request = options.request();
    let span = info_span!("check", request_id = %request.id(), tool = request.tool_name());
    let _guard = span.enter();

    if !request.kind().is_known() {
        eprintln!(
            "{}",
            Theme::warning(&format!(
                "unrecognized operation '{}'; treating it as high risk",
                request.kind()
            ))
        );
    }

    let decision = gate.evaluate(&request, &options.overrides);

    if decision.is_prompt() {
        eprintln!("{}", Theme::confirmation_box(&request));
    } else if let Decision::Proceed { authority, source } = &decision
        && options.verbose
    {
        eprintln!(
            "{}",
            Theme::dimmed(&format!("auto-confirmed by {authority} ({source})"))
        );
    }

    let resolution = PromptExecutor::stdio().execute(&decision);

    if resolution.proceed {
        if let Some(selection) = resolution.selection {
            println!("{selection}");
        }
        return ExitCode::SUCCESS;
    }

    let reason = resolution
        .refuse_reason
        .as_deref()
        .unwrap_or("not confirmed");
    eprintln!("{}", Theme::error(&format!("{}: {reason}", request.summary())));
    if let Some(remediation) = &resolution.remediation {
        eprintln!("{}", Theme::info(remediation));
    }
    ExitCode::from(EXIT_NOT_CONFIRMED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use safeops_approval::RiskTier;

    fn options(operation: &str) -> CheckOptions {
        CheckOptions {
            operation: operation.to_owned(),
            tool: "safe-file".to_owned(),
            target: Some("notes.txt".to_owned()),
            phrase: None,
            choices: Vec::new(),
            default_yes: false,
            overrides: CliOverrides::default(),
            verbose: false,
        }
    }

    #[test]
    fn test_request_carries_options() {
        let mut opts = options("rm");
        opts.phrase = Some("DELETE NOTES".to_owned());
        let request = opts.request();

        assert_eq!(request.tool_name(), "safe-file");
        assert_eq!(request.target(), Some("notes.txt"));
        assert_eq!(request.risk_tier(), RiskTier::High);
        assert_eq!(request.confirmation_phrase(), "DELETE NOTES");
    }

    #[test]
    fn test_request_choices() {
        let mut opts = options("overwrite");
        opts.choices = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        opts.default_yes = true;
        let request = opts.request();
        assert_eq!(request.choices(), ["a", "b", "c"]);
        assert!(request.default_yes());
    }
}
