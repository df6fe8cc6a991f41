//! Prompt execution.
//!
//! [`PromptExecutor`] turns a [`Decision`] into a [`Resolution`]. It is
//! generic over its input and output so the CLI can use stdin/stderr while
//! tests feed byte buffers. Nothing here panics or returns an error: closed
//! input, interrupted reads and write failures all resolve as refusals.

use std::io::{self, BufRead, ErrorKind, Stderr, StdinLock, Write};

use tracing::{debug, info};

use crate::error::{ApprovalError, ApprovalResult};
use crate::policy::Decision;

/// Refusal reason when input hits EOF before an answer.
pub const INPUT_CLOSED: &str = "input stream closed";

/// Refusal reason when the read was interrupted.
pub const INTERRUPTED: &str = "interrupted";

/// Final answer for one gated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the operation may run.
    pub proceed: bool,
    /// Why not, when `proceed` is false.
    pub refuse_reason: Option<String>,
    /// How to allow it next time, for gate refusals.
    pub remediation: Option<String>,
    /// Chosen option (1-based) for numbered prompts.
    pub selection: Option<usize>,
}

impl Resolution {
    /// Positive resolution.
    #[must_use]
    pub fn approved() -> Self {
        Self {
            proceed: true,
            refuse_reason: None,
            remediation: None,
            selection: None,
        }
    }

    /// Positive resolution for numbered option `selection`.
    #[must_use]
    pub fn selected(selection: usize) -> Self {
        Self {
            selection: Some(selection),
            ..Self::approved()
        }
    }

    /// Negative answer from the user.
    #[must_use]
    pub fn declined(reason: impl Into<String>) -> Self {
        Self {
            proceed: false,
            refuse_reason: Some(reason.into()),
            remediation: None,
            selection: None,
        }
    }

    /// Refusal without a usable answer.
    #[must_use]
    pub fn refused(reason: impl Into<String>, remediation: Option<String>) -> Self {
        Self {
            remediation,
            ..Self::declined(reason)
        }
    }

    /// Convert into a `Result` for callers that prefer `?`.
    ///
    /// `Ok` carries the numbered selection, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Refused`] for gate refusals (those carry a
    /// remediation) and [`ApprovalError::Declined`] for everything else.
    pub fn into_result(self) -> ApprovalResult<Option<usize>> {
        if self.proceed {
            return Ok(self.selection);
        }
        let reason = self.refuse_reason.unwrap_or_default();
        match self.remediation {
            Some(remediation) => Err(ApprovalError::Refused {
                reason,
                remediation,
            }),
            None => Err(ApprovalError::Declined { reason }),
        }
    }
}

/// Renders prompts and reads answers.
pub struct PromptExecutor<R, W> {
    input: R,
    output: W,
}

impl PromptExecutor<StdinLock<'static>, Stderr> {
    /// Executor reading stdin and writing prompts to stderr, so stdout stays
    /// free for the caller's own output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptExecutor<R, W> {
    /// Create an executor over `input` and `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Resolve `decision`, prompting if it asks for a prompt.
    ///
    /// `Proceed` and `Refuse` return immediately without touching either
    /// stream.
    pub fn execute(&mut self, decision: &Decision) -> Resolution {
        let resolution = match decision {
            Decision::Proceed { authority, source } => {
                info!(%authority, %source, "confirmation synthesized from configuration");
                Resolution::approved()
            },
            Decision::Refuse {
                reason,
                remediation,
            } => Resolution::refused(reason.clone(), Some(remediation.clone())),
            Decision::PromptSimple {
                message,
                default_yes,
            } => self.prompt_simple(message, *default_yes),
            Decision::PromptTyped { message, phrase } => self.prompt_typed(message, phrase),
            Decision::PromptNumbered { message, options } => {
                self.prompt_numbered(message, options)
            },
        };
        debug!(
            decision = decision.name(),
            proceed = resolution.proceed,
            reason = resolution.refuse_reason.as_deref(),
            "prompt resolved"
        );
        resolution
    }

    fn prompt_simple(&mut self, message: &str, default_yes: bool) -> Resolution {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        let line = match self.ask(&format!("{message} {hint} ")) {
            Ok(line) => line,
            Err(refusal) => return refusal,
        };

        let answer = line.trim().to_lowercase();
        let yes = if answer.is_empty() {
            default_yes
        } else {
            "yes".starts_with(&answer)
        };

        if yes {
            Resolution::approved()
        } else {
            Resolution::declined("answered no")
        }
    }

    fn prompt_typed(&mut self, message: &str, phrase: &str) -> Resolution {
        if phrase.trim().is_empty() {
            return Resolution::declined("no confirmation phrase to match");
        }
        let question = format!("{message}\nType '{phrase}' to confirm: ");
        let line = match self.ask(&question) {
            Ok(line) => line,
            Err(refusal) => return refusal,
        };

        if strip_line_ending(&line) == phrase {
            Resolution::approved()
        } else {
            Resolution::declined("confirmation phrase did not match")
        }
    }

    fn prompt_numbered(&mut self, message: &str, options: &[String]) -> Resolution {
        let mut question = format!("{message}\n");
        for (n, option) in (1_usize..).zip(options) {
            question.push_str(&format!("  {n}) {option}\n"));
        }
        question.push_str(&format!("  0) Cancel\nSelect [0-{}]: ", options.len()));

        let line = match self.ask(&question) {
            Ok(line) => line,
            Err(refusal) => return refusal,
        };

        match line.trim().parse::<usize>() {
            Ok(0) => Resolution::declined("cancelled"),
            Ok(n) if n <= options.len() => Resolution::selected(n),
            _ => Resolution::declined("invalid selection"),
        }
    }

    /// Write `question` and read one line. Any failure becomes a refusal.
    fn ask(&mut self, question: &str) -> Result<String, Resolution> {
        self.output
            .write_all(question.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| Resolution::refused(format!("output error: {e}"), None))?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(Resolution::refused(INPUT_CLOSED, None)),
            Ok(_) => Ok(line),
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                Err(Resolution::refused(INTERRUPTED, None))
            },
            Err(e) => Err(Resolution::refused(format!("input error: {e}"), None)),
        }
    }
}

/// Remove a single trailing `\n` or `\r\n`, nothing else.
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}
