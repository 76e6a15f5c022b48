//! Terminal output shared by the commands

use std::fmt::Display;
use std::path::Path;

use console::style;
use serde_json::Value;

/// Print a success line
pub fn success(message: impl Display) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning line on stderr, keeping stdout for the report itself
pub fn warning(message: impl Display) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info line
pub fn info(message: impl Display) {
    println!("{} {}", style("→").blue(), message);
}

/// A path styled for the terminal
pub fn path(path: &Path) -> String {
    style(path.display()).cyan().to_string()
}

/// Pretty-printed JSON on stdout
pub fn json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
