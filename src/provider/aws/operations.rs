//! # AWS Secrets Manager Operations
//!
//! Implements [`SecretStore`] for AWS Secrets Manager.

use super::AwsSecretManager;
use crate::provider::{
    CreatedSecret, DeletedSecret, ProviderError, ProviderErrorKind, SecretStore, UpdatedSecret,
};
use async_trait::async_trait;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::primitives::{DateTime, DateTimeFormat};
use std::time::Instant;
use tracing::{debug, debug_span, info, info_span, warn, Instrument};

/// Convert an SDK failure into a classified [`ProviderError`]
///
/// Service errors are classified by their error code; failures that never
/// reached the service (connection, timeout, credential resolution) become
/// [`ProviderErrorKind::Transport`].
pub fn classify_sdk_error<E, R>(err: &SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            let message = service_err
                .message()
                .map_or_else(|| DisplayErrorContext(err).to_string(), ToString::to_string);
            match service_err.code() {
                Some(code) => ProviderError::from_service_code(code, message),
                None => ProviderError::new(ProviderErrorKind::Other, message),
            }
        }
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => ProviderError::new(
            ProviderErrorKind::Transport,
            DisplayErrorContext(err).to_string(),
        ),
        _ => ProviderError::new(ProviderErrorKind::Other, DisplayErrorContext(err).to_string()),
    }
}

fn format_date(date: Option<&DateTime>) -> Option<String> {
    date.and_then(|d| d.fmt(DateTimeFormat::DateTime).ok())
}

impl AwsSecretManager {
    /// Log the raw SDK error and classify it
    fn report_failure<E, R>(
        &self,
        operation: &'static str,
        secret_name: &str,
        start: Instant,
        err: &SdkError<E, R>,
    ) -> ProviderError
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        let classified = classify_sdk_error(err);
        let error_details = format!("{err:?}");
        warn!(
            provider = "aws",
            region = %self.region,
            secret_name = secret_name,
            operation = operation,
            error_kind = %classified.kind,
            error = %DisplayErrorContext(err),
            error_details = %error_details,
            duration_ms = start.elapsed().as_millis() as u64,
            "AWS Secrets Manager {} failed",
            operation
        );
        classified
    }
}

#[async_trait]
impl SecretStore for AwsSecretManager {
    async fn create_secret(
        &self,
        secret_name: &str,
        description: &str,
        secret_value: Option<&str>,
    ) -> Result<CreatedSecret, ProviderError> {
        let span = info_span!("aws.secret.create", secret.name = secret_name, region = %self.region);
        let start = Instant::now();

        info!(
            provider = "aws",
            region = %self.region,
            secret_name = secret_name,
            operation = "create",
            has_value = secret_value.is_some(),
            "Creating AWS secret: region={}, secret={}",
            self.region,
            secret_name
        );

        let result = self
            .client
            .create_secret()
            .name(secret_name)
            .description(description)
            .set_secret_string(secret_value.map(ToString::to_string))
            .send()
            .instrument(span)
            .await;

        match result {
            Ok(output) => Ok(CreatedSecret {
                arn: output.arn().map(ToString::to_string),
                name: output.name().map(ToString::to_string),
                version_id: output.version_id().map(ToString::to_string),
            }),
            Err(e) => Err(self.report_failure("create", secret_name, start, &e)),
        }
    }

    async fn get_secret_value(&self, secret_id: &str) -> Result<String, ProviderError> {
        let span = debug_span!("aws.secret.get", secret.name = secret_id, region = %self.region);
        let start = Instant::now();

        let result = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .instrument(span)
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return Err(self.report_failure("get", secret_id, start, &e)),
        };

        let value = response.secret_string().map(ToString::to_string).or_else(|| {
            response
                .secret_binary()
                .map(|blob| String::from_utf8_lossy(blob.as_ref()).to_string())
        });

        match value {
            Some(v) => {
                debug!(
                    provider = "aws",
                    secret_name = secret_id,
                    operation = "get",
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Retrieved AWS secret value"
                );
                Ok(v)
            }
            None => Err(ProviderError::new(
                ProviderErrorKind::EmptyValue,
                format!("Secret {secret_id} has no string or binary value"),
            )),
        }
    }

    async fn update_secret(
        &self,
        secret_id: &str,
        secret_value: Option<&str>,
    ) -> Result<UpdatedSecret, ProviderError> {
        let span = info_span!("aws.secret.update", secret.name = secret_id, region = %self.region);
        let start = Instant::now();

        info!(
            provider = "aws",
            region = %self.region,
            secret_name = secret_id,
            operation = "update",
            has_value = secret_value.is_some(),
            "Updating AWS secret: region={}, secret={}",
            self.region,
            secret_id
        );

        let result = self
            .client
            .update_secret()
            .secret_id(secret_id)
            .set_secret_string(secret_value.map(ToString::to_string))
            .send()
            .instrument(span)
            .await;

        match result {
            Ok(output) => Ok(UpdatedSecret {
                arn: output.arn().map(ToString::to_string),
                name: output.name().map(ToString::to_string),
                version_id: output.version_id().map(ToString::to_string),
            }),
            Err(e) => Err(self.report_failure("update", secret_id, start, &e)),
        }
    }

    async fn delete_secret(
        &self,
        secret_id: &str,
        force: bool,
    ) -> Result<DeletedSecret, ProviderError> {
        let span = info_span!("aws.secret.delete", secret.name = secret_id, region = %self.region);
        let start = Instant::now();

        info!(
            provider = "aws",
            region = %self.region,
            secret_name = secret_id,
            operation = "delete",
            force_delete_without_recovery = force,
            "Deleting AWS secret: {}",
            secret_id
        );

        let result = self
            .client
            .delete_secret()
            .secret_id(secret_id)
            .force_delete_without_recovery(force)
            .send()
            .instrument(span)
            .await;

        match result {
            Ok(output) => Ok(DeletedSecret {
                arn: output.arn().map(ToString::to_string),
                name: output.name().map(ToString::to_string),
                deletion_date: format_date(output.deletion_date()),
            }),
            Err(e) => Err(self.report_failure("delete", secret_id, start, &e)),
        }
    }
}
