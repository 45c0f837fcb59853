// Entry point for the `dox` command

use anyhow::{Context, Result};
use clap::Parser;
use dox_cli::{Cli, Outcome};
use dox_client::DoxClient;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code for any error (transport, authentication, failed extraction).
const EXIT_FAILURE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present so DOX_* variables can be kept there
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the extraction result only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,dox_client=info,dox_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match execute(&cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn execute(cli: &Cli) -> Result<Outcome> {
    let client = DoxClient::new(cli.client_config());
    let options = cli.run_options();

    tracing::debug!(base_url = %cli.base_url, oauth_url = %cli.oauth_url, "Configuration loaded");

    let mut stdout = std::io::stdout();
    dox_cli::run(&client, &options, &mut stdout)
        .await
        .with_context(|| format!("Failed to extract data from {}", options.file.display()))
}
