use super::sorted_by_location;
use crate::LintError;
use crate::Severity;
use crate::config::{Color, ColorConfig};
use colored::{ColoredString, Colorize};
use std::path::Path;

pub(crate) fn report(
    errors: &[LintError],
    path: &Path,
    colors: &ColorConfig,
    ignored_count: usize,
) {
    for error in sorted_by_location(errors) {
        let color = match error.severity {
            Severity::Error => colors.error,
            Severity::Warning => colors.warning,
        };

        let severity_str = apply_color(
            &format!(
                "{}[{}/{}]",
                severity_label(error.severity),
                error.category,
                error.rule
            ),
            color,
        )
        .bold();

        println!("{}: {}: {}", location(error, path), severity_str, error.message);
    }

    if let Some(summary) = summary(errors, ignored_count) {
        println!();
        println!("{}", summary);
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn location(error: &LintError, path: &Path) -> String {
    let path_str = path.display();
    match (error.line, error.column) {
        (Some(line), Some(col)) => format!("{}:{}:{}", path_str, line, col),
        (Some(line), None) => format!("{}:{}", path_str, line),
        _ => format!("{}", path_str),
    }
}

/// `Found 1 error(s), 2 ignored`, or `None` when there is nothing to say
fn summary(errors: &[LintError], ignored_count: usize) -> Option<String> {
    let error_count = errors
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .count();
    let warning_count = errors
        .iter()
        .filter(|e| e.severity == Severity::Warning)
        .count();

    let mut parts = Vec::new();
    if error_count > 0 {
        parts.push(format!("{} error(s)", error_count));
    }
    if warning_count > 0 {
        parts.push(format!("{} warning(s)", warning_count));
    }
    if ignored_count > 0 {
        parts.push(format!("{} ignored", ignored_count));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("Found {}", parts.join(", ")))
    }
}

#[cfg(test)]
fn format_line(error: &LintError, path: &Path) -> String {
    format!(
        "{}: {}[{}/{}]: {}",
        location(error, path),
        severity_label(error.severity),
        error.category,
        error.rule,
        error.message
    )
}

/// Apply a color to a string
fn apply_color(s: &str, color: Color) -> ColoredString {
    match color {
        Color::Black => s.black(),
        Color::Red => s.red(),
        Color::Green => s.green(),
        Color::Yellow => s.yellow(),
        Color::Blue => s.blue(),
        Color::Magenta => s.magenta(),
        Color::Cyan => s.cyan(),
        Color::White => s.white(),
        Color::BrightBlack => s.bright_black(),
        Color::BrightRed => s.bright_red(),
        Color::BrightGreen => s.bright_green(),
        Color::BrightYellow => s.bright_yellow(),
        Color::BrightBlue => s.bright_blue(),
        Color::BrightMagenta => s.bright_magenta(),
        Color::BrightCyan => s.bright_cyan(),
        Color::BrightWhite => s.bright_white(),
    }
}
