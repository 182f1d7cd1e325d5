//! Kinds command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("kinds").about("List the kinds registered in the scheme")
}

pub async fn run(_matches: &ArgMatches) -> Result<()> {
    let scheme = kubetalk_api::scheme();

    for gvk in scheme.known_kinds() {
        let type_name = scheme
            .descriptor(gvk)
            .map(|descriptor| descriptor.type_name())
            .unwrap_or("<unknown>");
        println!("{}\t{}\t{}", gvk.api_version(), gvk.kind, type_name);
    }

    Ok(())
}
