//! # AWS Secrets Manager Client
//!
//! Client for interacting with AWS Secrets Manager API.
//!
//! This module provides functionality to:
//! - Create, read, update and delete secrets in AWS Secrets Manager
//! - Resolve credentials through the default AWS credential chain
//! - Point the client at an alternate endpoint (LocalStack, mock servers)

use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use tracing::info;

pub mod auth;
mod operations;

pub use operations::classify_sdk_error;

/// Connection settings for the Secrets Manager client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    /// AWS region for Secrets Manager (e.g., "us-east-1", "eu-central-1")
    pub region: String,
    /// Shared config profile; the environment's default when unset
    pub profile: Option<String>,
    /// Service endpoint override; the regional endpoint when unset
    pub endpoint_url: Option<String>,
}

/// AWS Secrets Manager provider implementation
pub struct AwsSecretManager {
    client: SecretsManagerClient,
    region: String,
}

impl std::fmt::Debug for AwsSecretManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretManager")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsSecretManager {
    /// Create a new AWS Secrets Manager client
    ///
    /// Credentials come from the default provider chain (environment,
    /// shared config, SSO, container or instance metadata).
    pub async fn new(settings: &AwsSettings) -> Self {
        info!(
            provider = "aws",
            region = %settings.region,
            profile = settings.profile.as_deref().unwrap_or("default"),
            "Creating AWS Secrets Manager client"
        );
        let sdk_config = auth::create_sdk_config(settings).await;
        Self::from_client(SecretsManagerClient::new(&sdk_config), settings.region.clone())
    }

    /// Wrap an already configured client
    pub fn from_client(client: SecretsManagerClient, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}
