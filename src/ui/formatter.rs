//! Pure formatting functions for UI output.
//!
//! `format_*` functions build strings and are unit tested; `display_*`
//! functions only print them.

use console::style;

use crate::cli::ReleaseOutcome;
use crate::domain::ReleaseDecision;

/// Message shown when the commit range cannot be resolved
pub const INVALID_RANGE_MESSAGE: &str = "invalid commit range, cannot execute semantic-release";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Summary lines for a published release
pub fn format_decision(decision: &ReleaseDecision) -> Vec<String> {
    vec![
        format!("  Latest version:  {}", style(&decision.base_version).cyan()),
        format!(
            "  Next version:    {}",
            style(&decision.next_version).green().bold()
        ),
        format!("  Release type:    {}", style(decision.severity).yellow()),
        format!(
            "  Tag:             {} -> {}",
            decision.tag_name,
            short(&decision.tag_sha)
        ),
    ]
}

fn short(sha: &str) -> &str {
    match sha.char_indices().nth(8) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// Print the result of a release run.
pub fn display_outcome(outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::Published(decision) => {
            println!("\n{}", style("Release Published").bold());
            for line in format_decision(decision) {
                println!("{}", line);
            }
            println!();
            display_success(&format!("Published tag {}", decision.tag_name));
        }
        ReleaseOutcome::DryRun { severity, reason } => {
            display_status(&format!("Not publishing: {}", reason));
            display_status(&format!("Detected release type: {}", severity));
        }
    }
}
