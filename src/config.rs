use crate::parser::ast::NodeType;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for by [`LintConfig::find_and_load`]
pub const CONFIG_FILE_NAME: &str = ".txtlint.toml";

/// Template written by `txtlint config init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# txtlint configuration

[rules.no-todo]
enabled = true

# Reports every node of the listed kinds. Handy for checking directives.
[rules.report-node-types]
enabled = false
node_types = ["Str"]

[filters.disable-next-line]
enabled = true
# Matched as a substring of the comment body:
#   <!-- disable-next-line -->
#   <!-- disable-next-line no-todo, report-node-types -->
disabling_next_line_comment = "disable-next-line"

[color]
ui = "auto"
error = "red"
warning = "yellow"
"#;

/// Configuration for txtlint loaded from .txtlint.toml
#[derive(Debug, Default, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
    #[serde(default)]
    pub filters: HashMap<String, FilterConfig>,
    #[serde(default)]
    pub color: ColorConfig,
}

/// Configuration for a specific lint rule
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Node kinds reported by `report-node-types`
    #[serde(default)]
    pub node_types: Vec<NodeType>,
}

/// Configuration for a specific filter rule
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directive keyword for `disable-next-line`
    pub disabling_next_line_comment: Option<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            disabling_next_line_comment: None,
        }
    }
}

/// Color output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ColorConfig {
    /// Color mode: "auto" (default), "always", or "never"
    #[serde(default)]
    pub ui: ColorMode,
    #[serde(default = "default_error_color")]
    pub error: Color,
    #[serde(default = "default_warning_color")]
    pub warning: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            ui: ColorMode::default(),
            error: default_error_color(),
            warning: default_warning_color(),
        }
    }
}

/// Color mode for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Automatically detect (default) - respects NO_COLOR env and terminal detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Terminal colors usable for severities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

fn default_true() -> bool {
    true
}

fn default_error_color() -> Color {
    Color::Red
}

fn default_warning_color() -> Color {
    Color::Yellow
}

impl LintConfig {
    /// Rules that only run when explicitly enabled
    pub const DISABLED_BY_DEFAULT: &'static [&'static str] = &["report-node-types"];

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Find and load .txtlint.toml from the given directory or its parents
    ///
    /// Returns `Ok(None)` when no config file exists. A config file that exists
    /// but cannot be loaded is an error.
    pub fn find_and_load(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let mut current = dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::from_file(&config_path)?;
                log::debug!("loaded {}", config_path.display());
                return Ok(Some(config));
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        self.rules
            .get(name)
            .map(|r| r.enabled)
            .unwrap_or_else(|| !Self::DISABLED_BY_DEFAULT.contains(&name))
    }

    /// Check if a filter rule is enabled (filters are on unless disabled)
    pub fn is_filter_enabled(&self, name: &str) -> bool {
        self.filters.get(name).map(|f| f.enabled).unwrap_or(true)
    }

    /// Get the configuration for a specific rule
    pub fn get_rule_config(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.get(name)
    }

    /// Configured `disable-next-line` keyword, if any
    pub fn disabling_next_line_comment(&self) -> Option<&str> {
        self.filters
            .get("disable-next-line")
            .and_then(|f| f.disabling_next_line_comment.as_deref())
    }

    /// Override the `disable-next-line` keyword
    pub fn set_disabling_next_line_comment(&mut self, keyword: &str) {
        self.filters
            .entry("disable-next-line".to_string())
            .or_default()
            .disabling_next_line_comment = Some(keyword.to_string());
    }

    /// Get the color mode setting
    pub fn color_mode(&self) -> ColorMode {
        self.color.ui
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}
