//! Init command implementation

use crate::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".kubetalk.yaml"),
        )
        .arg(
            clap::Arg::new("force")
                .long("force")
                .help("Overwrite an existing configuration file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output = matches
        .get_one::<String>("output")
        .ok_or_else(|| anyhow!("Missing output path"))?;
    let output_path = crate::utils::expand_path(&PathBuf::from(output))?;

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{:?} already exists, pass --force to overwrite it",
            output_path
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            crate::utils::ensure_directory(parent)?;
        }
    }
    Config::default().save_to_file(&output_path)?;

    println!("Configuration file created: {}", output_path.display());
    println!("Edit the output, sample and validation sections to customize it.");

    Ok(())
}
