//! `safeops classify`: print the risk tier of an operation.

use safeops_approval::OperationKind;

use crate::theme::Theme;

/// Print the tier on stdout so scripts can branch on it.
pub(crate) fn run_classify(operation: &str, verbose: bool) {
    let kind = OperationKind::parse(operation);
    let tier = kind.risk_tier();

    if verbose {
        eprintln!("{}", Theme::kv("Operation", &kind.to_string()));
        eprintln!("{}", Theme::kv("Risk", &Theme::risk_tier(tier)));
        if tier.requires_typed_confirmation() {
            eprintln!("{}", Theme::kv("Phrase", &kind.confirmation_phrase()));
        }
    }
    if !kind.is_known() {
        eprintln!(
            "{}",
            Theme::warning(&format!("unrecognized operation '{kind}'; treated as high risk"))
        );
    }

    println!("{tier}");
}
