//! Kubetalk CLI binary

use anyhow::Result;

use kubetalk::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kubetalk=info".into()),
        )
        .init();

    // Register API types before any command runs
    kubetalk_api::scheme();

    let matches = CliApp::app().get_matches();

    CliApp::run(&matches).await
}
