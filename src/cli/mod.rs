pub mod config;
pub mod lint;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use txtlint::OutputFormat;

#[derive(Parser)]
#[command(name = "txtlint")]
#[command(author, version, about = "Lint Markdown and plain text documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files or glob patterns to lint, or `-` to read from stdin
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    pub format: Format,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Parse stdin as Markdown instead of plain text
    #[arg(long)]
    pub stdin_markdown: bool,

    /// Comment keyword that suppresses diagnostics on the next node
    #[arg(long, value_name = "WORD")]
    pub disable_next_line_keyword: Option<String>,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not exit with non-zero code on warnings (only fail on errors)
    #[arg(long)]
    pub no_fail_on_warnings: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration file management
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}
