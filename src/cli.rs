//! # Command-Line Interface
//!
//! Positional argument surface of the tool.
//!
//! ## Usage
//!
//! ```bash
//! # Create a secret from a literal value
//! aws-secret-manager us-east-1 create_secret db-pass hunter2
//!
//! # Read it back
//! aws-secret-manager us-east-1 get_secret db-pass
//!
//! # Replace it with the contents of a JSON file
//! aws-secret-manager us-east-1 update_secret db-pass config.json
//!
//! # Delete it immediately (no recovery window)
//! aws-secret-manager us-east-1 delete_secret db-pass
//! ```

use crate::dispatcher::{Operation, SecretRequest};
use crate::payload::{resolve_secret_value, PayloadError};
use crate::provider::aws::AwsSettings;
use clap::Parser;

/// Package version with build metadata
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Manage AWS Secrets
#[derive(Parser, Debug, Clone)]
#[command(name = "aws-secret-manager")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Manage AWS Secrets",
    long_about = None,
    after_help = "\
Secret values ending in .json are read from that file and sent as JSON.
delete_secret removes the secret immediately; it cannot be recovered.

Examples:
  aws-secret-manager us-east-1 create_secret db-pass hunter2
  aws-secret-manager eu-central-1 update_secret db-pass config.json
"
)]
pub struct Cli {
    /// AWS region name (e.g., us-east-1, eu-central-1)
    #[arg(value_name = "REGION_NAME")]
    pub region_name: String,

    /// Operation to perform
    #[arg(value_enum, value_name = "OPERATION")]
    pub operation: Operation,

    /// Name of the secret
    #[arg(value_name = "SECRET_NAME")]
    pub secret_name: String,

    /// Value of the secret (required for create and update)
    #[arg(value_name = "SECRET_VALUE", allow_hyphen_values = true)]
    pub secret_value: Option<String>,

    /// AWS shared config profile to use
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Override the Secrets Manager endpoint (e.g. a LocalStack URL)
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,
}

impl Cli {
    /// Client settings for the target region
    pub fn aws_settings(&self) -> AwsSettings {
        AwsSettings {
            region: self.region_name.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }

    /// Build the request, loading the payload file if one was named
    ///
    /// The file is resolved for every operation, so a missing `.json` path
    /// aborts even a `get_secret` before any remote call.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] if the value names an unusable JSON file.
    pub fn secret_request(&self) -> Result<SecretRequest, PayloadError> {
        let mut request = SecretRequest::new(self.operation, self.secret_name.clone());
        request.secret_value = resolve_secret_value(self.secret_value.as_deref())?;
        Ok(request)
    }
}
