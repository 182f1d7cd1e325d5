//! Sample command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("sample")
        .about("Print a sample Kubetalk resource")
        .arg(utils::config_arg())
        .arg(utils::format_arg())
        .arg(
            clap::Arg::new("name")
                .long("name")
                .help("Resource name")
                .value_name("NAME"),
        )
        .arg(
            clap::Arg::new("namespace")
                .short('n')
                .long("namespace")
                .help("Resource namespace")
                .value_name("NAMESPACE"),
        )
        .arg(
            clap::Arg::new("foo")
                .long("foo")
                .help("Value of spec.foo")
                .value_name("VALUE"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let format = utils::output_format(matches, &config)?;

    let mut sample = config.sample.clone();
    if let Some(name) = matches.get_one::<String>("name") {
        sample.name = name.clone();
    }
    if let Some(namespace) = matches.get_one::<String>("namespace") {
        sample.namespace = Some(namespace.clone());
    }
    if let Some(foo) = matches.get_one::<String>("foo") {
        sample.foo = foo.clone();
    }

    let app = utils::create_app(config)?;
    print!("{}", app.render_sample(&sample, format)?);

    Ok(())
}
