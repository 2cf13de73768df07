//! # Provider Modules
//!
//! Abstract interface for the remote secret store, plus the AWS Secrets
//! Manager implementation.
//!
//! The dispatcher only ever talks to a [`SecretStore`]; the concrete client
//! is built once in `main` and handed in.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod aws;

/// Provider trait for remote secret stores
///
/// Every method maps to exactly one service call.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Create a new secret record
    ///
    /// A `None` value creates the record without a secret string.
    async fn create_secret(
        &self,
        secret_name: &str,
        description: &str,
        secret_value: Option<&str>,
    ) -> Result<CreatedSecret, ProviderError>;

    /// Get the current value of a secret
    async fn get_secret_value(&self, secret_id: &str) -> Result<String, ProviderError>;

    /// Overwrite the stored value of a secret
    async fn update_secret(
        &self,
        secret_id: &str,
        secret_value: Option<&str>,
    ) -> Result<UpdatedSecret, ProviderError>;

    /// Delete a secret
    ///
    /// With `force` set the record is removed immediately with no recovery
    /// window.
    async fn delete_secret(&self, secret_id: &str, force: bool)
        -> Result<DeletedSecret, ProviderError>;
}

/// Response of a successful create
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedSecret {
    pub arn: Option<String>,
    pub name: Option<String>,
    pub version_id: Option<String>,
}

/// Response of a successful update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatedSecret {
    pub arn: Option<String>,
    pub name: Option<String>,
    pub version_id: Option<String>,
}

/// Response of a successful delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedSecret {
    pub arn: Option<String>,
    pub name: Option<String>,
    /// Deletion date as reported by the service (RFC 3339)
    pub deletion_date: Option<String>,
}

/// Classification of remote failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// The secret does not exist (or is already scheduled for deletion)
    NotFound,
    /// The caller lacks permission for the operation
    AccessDenied,
    /// A secret with that name already exists
    AlreadyExists,
    /// The request was rate limited
    Throttled,
    /// The service rejected the request parameters or state
    InvalidRequest,
    /// The request never produced a service response (network, timeout, credentials)
    Transport,
    /// The secret exists but carries no string or binary value
    EmptyValue,
    /// Anything else
    Other,
}

impl ProviderErrorKind {
    /// Map a service error code onto a kind
    ///
    /// Codes follow the AWS Secrets Manager API error names.
    pub fn from_code(code: &str) -> Self {
        match code {
            "ResourceNotFoundException" => ProviderErrorKind::NotFound,
            "AccessDeniedException" | "UnrecognizedClientException" => {
                ProviderErrorKind::AccessDenied
            }
            "ResourceExistsException" => ProviderErrorKind::AlreadyExists,
            "ThrottlingException" | "TooManyRequestsException" => ProviderErrorKind::Throttled,
            "InvalidRequestException"
            | "InvalidParameterException"
            | "MalformedPolicyDocumentException"
            | "LimitExceededException"
            | "PreconditionNotMetException" => ProviderErrorKind::InvalidRequest,
            _ => ProviderErrorKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderErrorKind::NotFound => "not_found",
            ProviderErrorKind::AccessDenied => "access_denied",
            ProviderErrorKind::AlreadyExists => "already_exists",
            ProviderErrorKind::Throttled => "throttled",
            ProviderErrorKind::InvalidRequest => "invalid_request",
            ProviderErrorKind::Transport => "transport",
            ProviderErrorKind::EmptyValue => "empty_value",
            ProviderErrorKind::Other => "other",
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote failure with its kind and the raw service detail
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{kind}] {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    /// Service error code, when the service returned one
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Build an error from a service error code, classifying it
    pub fn from_service_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind: ProviderErrorKind::from_code(&code),
            code: Some(code),
            message: message.into(),
        }
    }
}
