#[cfg(feature = "cli")]
mod errorformat;
mod json;

use crate::LintError;
use crate::config::ColorConfig;
use std::cmp::Ordering;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Reporter {
    format: OutputFormat,
    #[cfg_attr(not(feature = "cli"), allow(dead_code))]
    colors: ColorConfig,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colors: ColorConfig::default(),
        }
    }

    pub fn with_colors(format: OutputFormat, colors: ColorConfig) -> Self {
        Self { format, colors }
    }

    pub fn report(&self, errors: &[LintError], path: &Path, ignored_count: usize) {
        match self.format {
            #[cfg(feature = "cli")]
            OutputFormat::Text => errorformat::report(errors, path, &self.colors, ignored_count),
            #[cfg(not(feature = "cli"))]
            OutputFormat::Text => json::report(errors, path, ignored_count),
            OutputFormat::Json => json::report(errors, path, ignored_count),
        }
    }
}

/// Errors ordered by line, then column; errors without a location go last
fn sorted_by_location(errors: &[LintError]) -> Vec<&LintError> {
    let mut sorted: Vec<_> = errors.iter().collect();
    sorted.sort_by(|a, b| match (a.line, b.line) {
        (Some(line_a), Some(line_b)) => {
            line_a
                .cmp(&line_b)
                .then_with(|| match (a.column, b.column) {
                    (Some(col_a), Some(col_b)) => col_a.cmp(&col_b),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}
