use super::Cli;
use clap::CommandFactory;
use colored::control;
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use txtlint::parser::DocumentKind;
use txtlint::{
    ColorMode, ConfigError, FilterRule, LintConfig, LintError, LintRule, Linter, Reporter, Severity,
    lint_source,
};

/// Extensions picked up when a directory is passed on the command line
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Result of linting a single file
enum FileResult {
    ReadError {
        path: PathBuf,
        error: String,
    },
    ParseError {
        path: PathBuf,
        error: String,
    },
    LintErrors {
        path: PathBuf,
        errors: Vec<LintError>,
        ignored_count: usize,
    },
}

/// Returns true if the argument contains glob wildcard characters
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

/// Expand command line arguments into the list of files to lint
///
/// Patterns are expanded with `glob`, directories are searched for
/// documents, and everything else is taken literally.
fn resolve_files(args: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut seen = BTreeSet::new();
    let mut paths = Vec::new();
    let mut push = |path: PathBuf| {
        if seen.insert(path.clone()) {
            paths.push(path);
        }
    };

    for arg in args {
        let pattern = arg.to_string_lossy();

        if is_glob_pattern(&pattern) {
            let entries =
                glob(&pattern).map_err(|e| format!("invalid pattern '{}': {}", pattern, e))?;
            let mut matched: Vec<PathBuf> = entries.flatten().filter(|p| p.is_file()).collect();
            if matched.is_empty() {
                return Err(format!("no files match '{}'", pattern));
            }
            matched.sort();
            matched.into_iter().for_each(&mut push);
        } else if arg.is_dir() {
            let mut found = Vec::new();
            for ext in DOCUMENT_EXTENSIONS {
                let pattern = arg.join("**").join(format!("*.{}", ext));
                let pattern = pattern.to_string_lossy().replace('\\', "/");
                if let Ok(entries) = glob(&pattern) {
                    found.extend(entries.flatten().filter(|p| p.is_file()));
                }
            }
            found.sort();
            found.into_iter().for_each(&mut push);
        } else if arg.is_file() {
            push(arg.clone());
        } else {
            return Err(format!("{} not found", arg.display()));
        }
    }

    Ok(paths)
}

/// Lint a single file and return the result
fn lint_file(path: &Path, linter: &Linter) -> FileResult {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return FileResult::ReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            };
        }
    };

    log::info!("linting {}", path.display());
    match lint_source(linter, &content, DocumentKind::from_path(path)) {
        Ok(result) => {
            log::debug!(
                "{}: {} error(s), {} ignored",
                path.display(),
                result.errors.len(),
                result.ignored_count
            );
            FileResult::LintErrors {
                path: path.to_path_buf(),
                errors: result.errors,
                ignored_count: result.ignored_count,
            }
        }
        Err(e) => FileResult::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        },
    }
}

/// Load the config given with `--config`, or search `search_dir` and its parents
fn load_config(
    config_path: Option<&Path>,
    search_dir: &Path,
) -> Result<Option<LintConfig>, ConfigError> {
    match config_path {
        Some(path) => {
            let config = LintConfig::from_file(path)?;
            log::info!("using config: {}", path.display());
            Ok(Some(config))
        }
        None => LintConfig::find_and_load(search_dir),
    }
}

fn has_issues(errors: &[LintError], no_fail_on_warnings: bool) -> bool {
    if no_fail_on_warnings {
        errors.iter().any(|e| e.severity == Severity::Error)
    } else {
        !errors.is_empty()
    }
}

pub fn run_lint(cli: Cli) -> ExitCode {
    // 1. Detect stdin mode and read content if applicable
    let stdin_mode = cli.files.len() == 1 && cli.files[0].as_os_str() == "-";
    let stdin_content = if stdin_mode {
        let mut content = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut content) {
            eprintln!("Error reading from stdin: {}", e);
            return ExitCode::from(2);
        }
        Some(content)
    } else {
        None
    };

    // 2. Resolve files (file mode only)
    let file_paths = if stdin_content.is_none() {
        if cli.files.is_empty() {
            let _ = Cli::command().print_help();
            eprintln!();
            return ExitCode::from(2);
        }

        match resolve_files(&cli.files) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        }
    } else {
        Vec::new()
    };

    // 3. Load configuration
    let search_dir = if stdin_content.is_some() {
        Path::new(".")
    } else {
        file_paths
            .first()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."))
    };
    let mut lint_config = match load_config(cli.config.as_deref(), search_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Some(keyword) = &cli.disable_next_line_keyword {
        lint_config
            .get_or_insert_with(LintConfig::default)
            .set_disabling_next_line_comment(keyword);
    }

    // 4. Configure color output (CLI flags take precedence over config)
    if cli.color {
        control::set_override(true);
    } else if cli.no_color {
        control::set_override(false);
    } else if let Some(ref config) = lint_config {
        match config.color_mode() {
            ColorMode::Always => control::set_override(true),
            ColorMode::Never => control::set_override(false),
            ColorMode::Auto => {}
        }
    }

    // 5. Create reporter with color configuration
    let color_config = lint_config
        .as_ref()
        .map(|c| c.color.clone())
        .unwrap_or_default();
    let reporter = Reporter::with_colors(cli.format.into(), color_config);

    // 6. Create linter
    let linter = Linter::with_config(lint_config.as_ref());
    for rule in linter.rules() {
        log::debug!("rule {}: {}", rule.name(), rule.description());
    }
    for filter in linter.filters() {
        log::debug!("filter {}: {}", filter.name(), filter.description());
    }

    // 7. Branch: stdin mode vs file mode
    if let Some(ref content) = stdin_content {
        let stdin_path = Path::new("<stdin>");
        let kind = if cli.stdin_markdown {
            DocumentKind::Markdown
        } else {
            DocumentKind::Text
        };

        let result = match lint_source(&linter, content, kind) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error parsing stdin: {}", e);
                return ExitCode::from(1);
            }
        };

        reporter.report(&result.errors, stdin_path, result.ignored_count);

        if has_issues(&result.errors, cli.no_fail_on_warnings) {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    } else {
        log::info!("linting {} file(s)", file_paths.len());

        // Every file gets its own filter state inside lint_source
        let results: Vec<FileResult> = file_paths
            .par_iter()
            .map(|path| lint_file(path, &linter))
            .collect();

        // Process results sequentially (for consistent output ordering)
        let mut all_errors = Vec::new();
        let mut has_parse_error = false;
        let mut has_read_error = false;

        for result in results {
            match result {
                FileResult::ReadError { path, error } => {
                    eprintln!("Error reading {}: {}", path.display(), error);
                    has_read_error = true;
                }
                FileResult::ParseError { path, error } => {
                    eprintln!("Error parsing {}: {}", path.display(), error);
                    has_parse_error = true;
                }
                FileResult::LintErrors {
                    path,
                    errors,
                    ignored_count,
                } => {
                    reporter.report(&errors, &path, ignored_count);
                    all_errors.extend(errors);
                }
            }
        }

        if has_read_error {
            return ExitCode::from(2);
        }
        if has_parse_error || has_issues(&all_errors, cli.no_fail_on_warnings) {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}
