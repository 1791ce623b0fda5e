use clap::Subcommand;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use txtlint::config::{CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate a default .txtlint.toml configuration file
    Init {
        /// Output path for the configuration file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run_config(command: &ConfigCommands) -> ExitCode {
    match command {
        ConfigCommands::Init { output, force } => run_init(output.clone(), *force),
    }
}

fn run_init(output: PathBuf, force: bool) -> ExitCode {
    if output.exists() && !force {
        eprintln!(
            "Error: {} already exists. Use --force to overwrite.",
            output.display()
        );
        return ExitCode::from(1);
    }

    match fs::write(&output, DEFAULT_CONFIG_TEMPLATE) {
        Ok(()) => {
            eprintln!("Created {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output.display(), e);
            ExitCode::from(2)
        }
    }
}
