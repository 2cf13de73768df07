//! AWS Secret Manager CLI Library
//!
//! Create, read, update and delete secrets in AWS Secrets Manager.
//!
//! The binary parses its arguments with [`cli::Cli`], resolves the payload
//! ([`payload`]), builds one [`provider::aws::AwsSecretManager`] and hands it
//! to a [`dispatcher::Dispatcher`], which issues a single service call.

pub mod cli;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod observability;
pub mod payload;
pub mod provider;

pub use cli::Cli;
pub use config::CliConfig;
pub use dispatcher::{Dispatcher, Operation, OperationReport, SecretOperationError, SecretRequest};
pub use payload::{PayloadError, SecretValue};
pub use provider::aws::{AwsSecretManager, AwsSettings};
pub use provider::{ProviderError, ProviderErrorKind, SecretStore};
