//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("kubetalk")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Render, sample and validate the kubetalk.io Kubetalk resource")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::crd::command())
            .subcommand(commands::sample::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::kinds::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("crd", sub_matches)) => commands::crd::run(sub_matches).await,
            Some(("sample", sub_matches)) => commands::sample::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("kinds", sub_matches)) => commands::kinds::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use crate::config::OutputFormat;
    use anyhow::Result;
    use clap::{Arg, ArgMatches};
    use std::path::PathBuf;
    use tracing::debug;

    /// The `--config` argument shared by every command that reads settings
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// The `--format` argument, overriding the configured output format
    pub fn format_arg() -> Arg {
        Arg::new("format")
            .short('f')
            .long("format")
            .help("Output format (yaml or json)")
            .value_name("FORMAT")
    }

    /// Get configuration file path from arguments or the default locations
    pub fn get_config_path(matches: &ArgMatches) -> Result<Option<PathBuf>> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(Some(crate::utils::expand_path(&PathBuf::from(config_path))?));
        }

        let mut default_paths = vec![
            PathBuf::from(".kubetalk.yaml"),
            PathBuf::from(".kubetalk.yml"),
            PathBuf::from("kubetalk.yaml"),
            PathBuf::from("kubetalk.yml"),
        ];
        if let Ok(config_dir) = crate::utils::get_config_dir() {
            default_paths.push(config_dir.join("config.yaml"));
        }

        Ok(default_paths.into_iter().find(|path| path.exists()))
    }

    /// Load configuration, falling back to defaults when no file is found
    pub fn load_config(matches: &ArgMatches) -> Result<crate::Config> {
        match get_config_path(matches)? {
            Some(path) => {
                debug!("Loading configuration from {:?}", path);
                crate::Config::from_file(&path)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Resolve the output format from `--format` or the configuration
    pub fn output_format(matches: &ArgMatches, config: &crate::Config) -> Result<OutputFormat> {
        match matches.get_one::<String>("format") {
            Some(format) => format.parse(),
            None => Ok(config.output.format),
        }
    }

    /// Create the application context
    pub fn create_app(config: crate::Config) -> Result<crate::KubetalkApp> {
        crate::KubetalkApp::new(config)
    }
}
