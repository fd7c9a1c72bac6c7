//! Terminal UI components and styling for vidshrink.
//!
//! Consistent, hierarchical terminal output. Everything is emitted through
//! `log::info!` so the CLI's logger decides where it goes (console, log file).

use console::style;
use log::info;
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

/// Represents the visual hierarchy levels in the CLI output
#[derive(Debug, Clone, Copy)]
pub enum OutputLevel {
    /// Level 1: Main sections (===== SECTION =====)
    Section,
    /// Level 2: Subsections and per-file operations (» Operation)
    Subsection,
    /// Level 3: Sub-items of an operation
    Progress,
    /// Level 4: Key-value status information
    Status,
}

impl OutputLevel {
    /// Get the indentation for this output level
    fn indent(&self) -> &'static str {
        match self {
            OutputLevel::Section => "",
            OutputLevel::Subsection => "  ",
            OutputLevel::Progress => "    ",
            OutputLevel::Status => "      ",
        }
    }
}

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print an item at the specified hierarchy level
pub fn print_item(level: OutputLevel, symbol: Option<&str>, text: &str, bold: bool) {
    let indent = level.indent();
    let prefix = symbol.map(|sym| format!("{sym} ")).unwrap_or_default();

    if should_use_color() && bold {
        info!("{indent}{prefix}{}", style(text).bold());
    } else {
        info!("{indent}{prefix}{text}");
    }
}

/// Print a per-file processing step
pub fn print_processing(message: &str) {
    info!("");
    print_item(OutputLevel::Subsection, Some("»"), message, true);
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    print_item(OutputLevel::Subsection, None, title, true);
}

/// Print a sub-item under a processing step
pub fn print_sub_item(message: &str) {
    print_item(OutputLevel::Progress, None, message, false);
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("    ✓ {}", message.green());
    } else {
        info!("    ✓ {message}");
    }
}

/// Column that status values line up on.
const STATUS_LABEL_WIDTH: usize = 15;

/// Spaces between a status label and its value; at least one.
fn status_padding(label: &str) -> usize {
    STATUS_LABEL_WIDTH.saturating_sub(label.width()).max(1)
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let indent = OutputLevel::Status.indent();
    let spacer = " ".repeat(status_padding(label));

    if should_use_color() && highlight {
        info!("{indent}{label}:{spacer} {}", value.bold());
    } else {
        info!("{indent}{label}:{spacer} {value}");
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if should_use_color() {
        info!("    ⚠ {}", message.yellow());
    } else {
        info!("    ⚠ {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_values_share_a_column() {
        assert_eq!(status_padding("Preset"), 9);
        assert_eq!(status_padding("Files"), 10);
        // Double-width characters count twice.
        assert_eq!(status_padding("入力"), 11);
    }

    #[test]
    fn long_status_labels_keep_one_space() {
        assert_eq!(status_padding("A very long status label"), 1);
        print_status("A very long status label", "value", true);
    }
}
