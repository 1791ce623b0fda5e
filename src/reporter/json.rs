use super::sorted_by_location;
use crate::LintError;
use crate::Severity;
use std::path::Path;

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    file: String,
    errors: Vec<&'a LintError>,
    summary: Summary,
}

#[derive(serde::Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
    ignored: usize,
}

pub(crate) fn report(errors: &[LintError], path: &Path, ignored_count: usize) {
    match format(errors, path, ignored_count) {
        Ok(output) => println!("{}", output),
        Err(e) => log::error!("failed to serialize report for {}: {}", path.display(), e),
    }
}

pub(crate) fn format(
    errors: &[LintError],
    path: &Path,
    ignored_count: usize,
) -> serde_json::Result<String> {
    let report = JsonReport {
        file: path.display().to_string(),
        errors: sorted_by_location(errors),
        summary: Summary {
            errors: errors
                .iter()
                .filter(|e| e.severity == Severity::Error)
                .count(),
            warnings: errors
                .iter()
                .filter(|e| e.severity == Severity::Warning)
                .count(),
            ignored: ignored_count,
        },
    };

    serde_json::to_string_pretty(&report)
}
