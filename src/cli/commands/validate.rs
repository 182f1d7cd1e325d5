//! Validate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate Kubetalk manifests against the registered types and CRD schema")
        .arg(
            clap::Arg::new("paths")
                .help("Manifest files or directories")
                .value_name("PATH")
                .required(true)
                .num_args(1..),
        )
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("filter")
                .long("filter")
                .help("apiVersion glob to select documents (repeatable)")
                .value_name("GLOB")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("strict")
                .long("strict")
                .help("Treat warnings as failures")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;

    let filters: Vec<String> = match matches.get_many::<String>("filter") {
        Some(values) => values.cloned().collect(),
        None => config.validation.filters.clone(),
    };
    let strict = matches.get_flag("strict") || config.validation.strict;

    let paths = matches
        .get_many::<String>("paths")
        .into_iter()
        .flatten()
        .map(|path| crate::utils::expand_path(&PathBuf::from(path)))
        .collect::<Result<Vec<_>>>()?;

    info!("Validating {} paths", paths.len());

    let app = utils::create_app(config)?;
    let summary = app.validate_paths(&paths, &filters)?;

    for report in &summary.reports {
        print!("{report}");
    }
    for (path, reason) in &summary.unreadable {
        warn!("Could not read {:?}: {}", path, reason);
        println!("{}: unreadable: {}", path.display(), reason);
    }

    println!(
        "\n{} documents checked, {} invalid, {} with warnings",
        summary.reports.len(),
        summary.invalid_count(),
        summary.warning_count()
    );

    summary.into_result(strict)?;
    Ok(())
}
