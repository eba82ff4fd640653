//! Terminal UI utilities
//!
//! Status lines carry colour; the machine-readable lines produced by
//! [`export`] never do, so they can be `eval`ed.

use colored::Colorize;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a key-value pair to stderr, below an error
pub fn key_value(key: &str, value: &str) {
    eprintln!("  {}: {}", key.cyan(), value);
}

/// Print a shell `export` line with the value single-quoted
pub fn export(name: &str, value: &str) {
    println!("export {}={}", name, shell_quote(value));
}

/// Quote for POSIX shells: wrap in single quotes, splicing in `'\''` for
/// embedded quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
