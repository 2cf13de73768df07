//! # AWS Secret Manager
//!
//! Command-line front end for AWS Secrets Manager.
//!
//! ```text
//! aws-secret-manager <REGION_NAME> <OPERATION> <SECRET_NAME> [SECRET_VALUE]
//! ```
//!
//! Exit status is `0` whenever an operation was dispatched, even if the
//! service rejected it; `1` when a `.json` payload file cannot be used; `2`
//! for usage errors.

use anyhow::{Context, Result};
use aws_secret_manager::constants::EXIT_INPUT_ERROR;
use aws_secret_manager::observability::init_tracing;
use aws_secret_manager::{AwsSecretManager, Cli, CliConfig, Dispatcher};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    init_tracing(&config)?;

    // Required for rustls 0.23+ when no default provider is set via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("BUILD_GIT_HASH"),
        build_datetime = env!("BUILD_DATETIME"),
        "Starting aws-secret-manager"
    );

    // Payload problems abort before the client exists
    let request = match cli.secret_request() {
        Ok(request) => request,
        Err(e) => {
            println!("Error: {e}");
            return Ok(ExitCode::from(EXIT_INPUT_ERROR));
        }
    };

    let store = AwsSecretManager::new(&cli.aws_settings()).await;
    let dispatcher = Dispatcher::new(store);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatcher
        .dispatch(&request, &mut out)
        .await
        .context("Failed to write operation report")?;

    Ok(ExitCode::SUCCESS)
}
