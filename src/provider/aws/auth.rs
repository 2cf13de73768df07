//! # AWS Secrets Manager Authentication
//!
//! Handles AWS SDK configuration and authentication setup.

use super::AwsSettings;
use crate::constants::MAX_ATTEMPTS;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Create AWS SDK config using the default credential chain
///
/// Retries are disabled so each operation is exactly one service attempt.
pub async fn create_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut builder = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .retry_config(RetryConfig::standard().with_max_attempts(MAX_ATTEMPTS));

    if let Some(profile) = &settings.profile {
        debug!(profile = %profile, "Using AWS shared config profile");
        builder = builder.profile_name(profile);
    }

    if let Some(endpoint) = &settings.endpoint_url {
        debug!(endpoint = %endpoint, "Overriding AWS Secrets Manager endpoint");
        builder = builder.endpoint_url(endpoint);
    }

    builder.load().await
}
