//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};
use kubetalk_api::v1alpha1;

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("Kubetalk - {} API tooling", v1alpha1::API_VERSION);
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    if detailed {
        let scheme = kubetalk_api::scheme();
        println!("\nDetailed Information:");
        println!("  Group: {}", v1alpha1::GROUP);
        println!("  Version: {}", v1alpha1::VERSION);
        println!("  Kind: {} (list: {})", v1alpha1::KIND, v1alpha1::LIST_KIND);
        println!("  Resource: {}.{}", v1alpha1::PLURAL, v1alpha1::GROUP);
        println!("  Scope: Namespaced, status subresource enabled");
        println!("  Registered kinds: {}", scheme.len());
        if let Ok(config_dir) = crate::utils::get_config_dir() {
            println!("  User config: {}", config_dir.join("config.yaml").display());
        }
    }

    Ok(())
}
