//! drive_transfer CLI - Request an ownership transfer of a Google Drive file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use drive_transfer::prompt::prompt_request;
use drive_transfer::{run, Config, TerminalPrompt, TransferOutcome};

/// CLI tool for transferring ownership of a Google Drive file.
#[derive(Parser)]
#[command(name = "drive_transfer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the OAuth2 client credentials JSON file
    /// (defaults to credentials.json next to the executable).
    #[arg(long, env = "DRIVE_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Path to the cached token file (defaults to token.json next to the executable).
    #[arg(long, env = "DRIVE_TOKEN")]
    token: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Failures are reported, not turned into an exit code.
    if let Err(e) = execute(cli).await {
        error!("{:#}", e);
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.credentials, cli.token)
        .context("Failed to resolve credential file locations")?;

    let request = prompt_request().context("Failed to read input")?;

    let outcome = run(&config, &request, &TerminalPrompt)
        .await
        .with_context(|| format!("Failed to transfer ownership of {:?}", request.file_name))?;

    match outcome {
        TransferOutcome::FileNotFound => {
            println!("No files found with that name.");
        }
        TransferOutcome::Requested { file, permission } => {
            println!(
                "Ownership transfer requested for file ({}) to {}.",
                file.id, request.new_owner
            );
            if permission.pending_owner == Some(true) {
                println!("{} is now the pending owner and must accept the transfer.", request.new_owner);
            } else {
                println!("The new owner may need to accept the transfer from their Drive.");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
