//! CLI formatting utilities for colorful output
//!
//! Styling is dropped automatically when the stream is not a terminal or
//! when colors are disabled through [`set_colors_enabled`].

use console::style;

pub fn set_colors_enabled(enabled: bool) {
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

/// Formats a header with bold green
pub fn header(text: &str) -> String {
    style(format!("=== {} ===", text)).green().bold().to_string()
}

/// Formats an entity name (module, command) with cyan
pub fn entity(text: &str) -> String {
    style(text).cyan().to_string()
}

/// Formats a warning with yellow
pub fn warning(text: &str) -> String {
    style(text).yellow().to_string()
}

/// Formats an error with red, for the error stream
pub fn error(text: &str) -> String {
    style(text).for_stderr().red().to_string()
}

/// Formats secondary information with gray
pub fn secondary(text: &str) -> String {
    style(text).dim().to_string()
}

/// Formats a success message with green
pub fn success(text: &str) -> String {
    style(text).green().to_string()
}
