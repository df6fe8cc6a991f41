//! CLI theme and styling.

use std::io::{self, IsTerminal};

use colored::Colorize;
use safeops_approval::{OperationRequest, RiskTier};

/// Width of the confirmation box, borders included.
const BOX_WIDTH: usize = 60;

/// Turn colors off when stderr is not a terminal.
pub(crate) fn configure_colors() {
    if !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
}

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {}", key.bold(), value)
    }

    /// Format a risk tier.
    pub(crate) fn risk_tier(tier: RiskTier) -> String {
        match tier {
            RiskTier::Low => "Low".green().to_string(),
            RiskTier::Medium => "Medium".yellow().to_string(),
            RiskTier::High => "High".red().bold().to_string(),
        }
    }

    /// Box shown above a prompt, colored by risk.
    pub(crate) fn confirmation_box(request: &OperationRequest) -> String {
        let mut content = vec![
            Self::kv("Tool", request.tool_name()),
            Self::kv("Operation", &request.kind().to_string()),
        ];
        if let Some(target) = request.target() {
            content.push(Self::kv("Target", target));
        }
        content.push(Self::kv("Risk", &Self::risk_tier(request.risk_tier())));

        Self::approval_box("Confirmation required", &content, request.risk_tier())
    }

    /// Format a box around lines of text using box-drawing characters.
    pub(crate) fn approval_box(title: &str, content: &[String], risk: RiskTier) -> String {
        let color_fn = |s: &str| match risk {
            RiskTier::Low => s.green().to_string(),
            RiskTier::Medium => s.yellow().to_string(),
            RiskTier::High => s.red().to_string(),
        };

        let inner = BOX_WIDTH.saturating_sub(2);
        let top = format!("╭{}╮", "─".repeat(inner));
        let bottom = format!("╰{}╯", "─".repeat(inner));
        let empty = format!("│{:w$}│", "", w = inner);

        let pad_line = |text: &str| -> String {
            let visible_len = strip_ansi(text).chars().count();
            let padding = BOX_WIDTH.saturating_sub(4).saturating_sub(visible_len);
            format!("│ {text}{:p$} │", "", p = padding)
        };

        let mut lines = vec![
            color_fn(&top),
            pad_line(&title.bold().to_string()),
            color_fn(&empty),
        ];
        lines.extend(content.iter().map(|line| pad_line(line.as_str())));
        lines.push(color_fn(&bottom));
        lines.join("\n")
    }
}

/// Strip ANSI escape codes from a string for visible-length calculation.
fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_confirmation_box_lines_have_equal_width() {
        colored::control::set_override(false);
        let request = OperationRequest::parse("safe-git", "hard_reset").with_target("HEAD~3");
        let rendered = Theme::confirmation_box(&request);

        assert!(rendered.contains("Tool: safe-git"));
        assert!(rendered.contains("Target: HEAD~3"));
        assert!(rendered.contains("Risk: High"));
        for line in rendered.lines() {
            assert_eq!(line.chars().count(), BOX_WIDTH, "{line:?}");
        }
    }
}
