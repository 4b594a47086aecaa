//! Console message styling.
//!
//! Centralizes the non-progress output: status lines, warnings, and the
//! final run summary. Progress bars live in [`crate::progress`]; anything
//! printed while bars are active must go through the reporter so lines do
//! not tear.

use colored::*;

/// Styled console messages with consistent markers.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints the end-of-run transfer summary.
    pub fn run_summary(transferred: usize, skipped: usize, failed: usize) {
        let counts = format!(
            "{} transferred, {} skipped, {} failed",
            transferred.to_string().green(),
            skipped,
            failed
        );
        if failed == 0 {
            Self::success(&format!("Merge operation completed: {}.", counts));
        } else {
            Self::warning(&format!(
                "Merge operation completed with errors: {}.",
                counts
            ));
        }
    }
}
