//! `safeops env`: show how the current environment is classified.

use safeops_approval::{EnvironmentClassification, ci_marker};
use safeops_config::EnvSnapshot;

use crate::theme::Theme;

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Print the TTY, CI and effective-interactive status.
pub(crate) fn show_environment(env: &EnvSnapshot, environment: &EnvironmentClassification) {
    println!("{}", Theme::header("Environment"));
    println!("  {}", Theme::kv("stdin is a terminal", yes_no(environment.is_tty())));

    let ci = match ci_marker(env) {
        Some(marker) => format!("yes ({marker})"),
        None => "no".to_owned(),
    };
    println!("  {}", Theme::kv("CI detected", &ci));

    let interactive = environment.effective_interactive();
    let line = format!("prompts {}", if interactive { "allowed" } else { "disabled" });
    if interactive {
        println!("  {}", Theme::success(&line));
    } else {
        println!("  {}", Theme::warning(&line));
        println!(
            "  {}",
            Theme::dimmed("confirmations need --yes / --force-yes or the matching env vars")
        );
    }
}
