//! CRD command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("crd")
        .about("Render the Kubetalk CustomResourceDefinition")
        .arg(utils::config_arg())
        .arg(utils::format_arg())
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory, overriding output.crd_path")
                .value_name("DIR"),
        )
        .arg(
            clap::Arg::new("stdout")
                .long("stdout")
                .help("Print the manifest instead of writing a file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let format = utils::output_format(matches, &config)?;
    let app = utils::create_app(config)?;

    if matches.get_flag("stdout") {
        print!("{}", app.render_crd(format)?);
        return Ok(());
    }

    let dir = match matches.get_one::<String>("output") {
        Some(dir) => PathBuf::from(dir),
        None => app.config().output.crd_path.clone(),
    };
    let dir = crate::utils::expand_path(&dir)?;

    info!("Generating CRD into {:?}", dir);
    let path = app.write_crd(&dir, format).await?;
    println!("CRD written to {}", path.display());

    Ok(())
}
