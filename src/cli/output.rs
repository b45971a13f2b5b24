//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: program name on errors
//! - Cyan: paths
//! - Dimmed: labels, secondary info

use console::style;
use std::fmt::Display;

use crate::core::constants::PROGRAM;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ registered alice@example.com`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print a fatal error to stderr as a single line, prefixed with the
/// program name.
///
/// Example: `e3db-cli: profile work already registered`
pub fn error(msg: &str) {
    let msg = single_line(msg);
    if colors_enabled() {
        eprintln!("{}: {}", style(PROGRAM).red().bold(), msg);
    } else {
        eprintln!("{}: {}", PROGRAM, msg);
    }
}

/// Collapse a multi-line message (e.g. a TOML parse report) onto one line.
fn single_line(msg: &str) -> String {
    msg.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print an aligned `Label:  value` line.
///
/// Example: `Client ID:   3f2c...`
pub fn field(label: &str, value: impl Display) {
    let label = format!("{}:", label);
    if colors_enabled() {
        println!("{} {}", style(format!("{:<12}", label)).dim(), value);
    } else {
        println!("{:<12} {}", label, value);
    }
}

/// Format a path string in cyan.
pub fn path(p: &str) -> String {
    if colors_enabled() {
        style(p).cyan().to_string()
    } else {
        p.to_string()
    }
}

/// Print raw data to stdout without decoration.
pub fn data(value: impl Display) {
    println!("{}", value);
}
