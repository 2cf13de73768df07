//! # Secret Operation Dispatcher
//!
//! Maps one requested operation onto exactly one [`SecretStore`] call and
//! reports the outcome.
//!
//! Remote failures never abort the process: they are logged with the raw
//! detail, printed to the report output and turned into an empty result.
//! [`Dispatcher::try_dispatch`] exposes the same call with the typed error
//! for callers that need to tell failure kinds apart.
//!
//! Deletes always request `ForceDeleteWithoutRecovery`; there is no recovery
//! window and no confirmation step.

use crate::constants::{DEFAULT_SECRET_DESCRIPTION, FORCE_DELETE_WITHOUT_RECOVERY};
use crate::payload::SecretValue;
use crate::provider::{CreatedSecret, DeletedSecret, ProviderError, SecretStore, UpdatedSecret};
use clap::ValueEnum;
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{info, warn};
use zeroize::Zeroizing;

/// Secret operations accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Operation {
    /// Create a new secret
    #[value(name = "create_secret")]
    CreateSecret,
    /// Print the current value of a secret
    #[value(name = "get_secret")]
    GetSecret,
    /// Overwrite the value of an existing secret
    #[value(name = "update_secret")]
    UpdateSecret,
    /// Permanently delete a secret (no recovery window)
    #[value(name = "delete_secret")]
    DeleteSecret,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::CreateSecret => "create_secret",
            Operation::GetSecret => "get_secret",
            Operation::UpdateSecret => "update_secret",
            Operation::DeleteSecret => "delete_secret",
        }
    }

    /// Whether the operation sends a secret value
    pub fn takes_value(self) -> bool {
        matches!(self, Operation::CreateSecret | Operation::UpdateSecret)
    }

    fn verb(self) -> &'static str {
        match self {
            Operation::CreateSecret => "creating",
            Operation::GetSecret => "retrieving",
            Operation::UpdateSecret => "updating",
            Operation::DeleteSecret => "deleting",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One secret operation built from command-line input
#[derive(Debug, Clone)]
pub struct SecretRequest {
    pub operation: Operation,
    pub secret_name: String,
    /// Payload for create/update; ignored by get and delete
    pub secret_value: Option<SecretValue>,
}

impl SecretRequest {
    pub fn new(operation: Operation, secret_name: impl Into<String>) -> Self {
        Self {
            operation,
            secret_name: secret_name.into(),
            secret_value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: SecretValue) -> Self {
        self.secret_value = Some(value);
        self
    }

    /// Payload actually sent; `None` for operations that take no value
    pub fn payload(&self) -> Option<&str> {
        if self.operation.takes_value() {
            self.secret_value.as_ref().map(|v| v.as_str())
        } else {
            None
        }
    }
}

/// Successful outcome of a dispatched operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationReport {
    Created(CreatedSecret),
    Retrieved(SecretValue),
    Updated(UpdatedSecret),
    Deleted(DeletedSecret),
}

/// A failed remote operation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Error {} secret: {source}", .operation.verb())]
pub struct SecretOperationError {
    pub operation: Operation,
    pub secret_name: String,
    #[source]
    pub source: ProviderError,
}

/// Write the success report for an operation
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_report<W: Write>(
    out: &mut W,
    secret_name: &str,
    report: &OperationReport,
) -> io::Result<()> {
    match report {
        OperationReport::Created(response) => {
            writeln!(out, "Secret {secret_name} created successfully!")?;
            writeln!(out, "response {response:?}")
        }
        OperationReport::Retrieved(value) => writeln!(out, "Retrieved secret: {}", value.as_str()),
        OperationReport::Updated(response) => {
            writeln!(out, "Secret {secret_name} updated successfully!")?;
            writeln!(out, "response {response:?}")
        }
        OperationReport::Deleted(_) => writeln!(out, "Secret {secret_name} scheduled for deletion!"),
    }
}

/// Dispatches secret operations to an injected store
#[derive(Debug)]
pub struct Dispatcher<S> {
    store: S,
}

impl<S: SecretStore> Dispatcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Perform the operation, returning the typed outcome
    ///
    /// Issues exactly one store call and prints nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`SecretOperationError`] carrying the provider error kind
    /// when the remote call fails.
    pub async fn try_dispatch(
        &self,
        request: &SecretRequest,
    ) -> Result<OperationReport, SecretOperationError> {
        let name = request.secret_name.as_str();
        let value = request.payload();

        info!(
            operation = %request.operation,
            secret_name = name,
            has_value = value.is_some(),
            "Dispatching secret operation"
        );

        let result = match request.operation {
            Operation::CreateSecret => self
                .store
                .create_secret(name, DEFAULT_SECRET_DESCRIPTION, value)
                .await
                .map(OperationReport::Created),
            Operation::GetSecret => self
                .store
                .get_secret_value(name)
                .await
                .map(|v| OperationReport::Retrieved(Zeroizing::new(v))),
            Operation::UpdateSecret => self
                .store
                .update_secret(name, value)
                .await
                .map(OperationReport::Updated),
            Operation::DeleteSecret => self
                .store
                .delete_secret(name, FORCE_DELETE_WITHOUT_RECOVERY)
                .await
                .map(OperationReport::Deleted),
        };

        result.map_err(|source| SecretOperationError {
            operation: request.operation,
            secret_name: name.to_string(),
            source,
        })
    }

    /// Perform the operation and print its report
    ///
    /// A remote failure is printed as `Error <verb> secret: ...` and yields
    /// `Ok(None)`; it is never turned into an `Err`.
    ///
    /// # Errors
    ///
    /// Only fails when writing to `out` fails.
    pub async fn dispatch<W: Write>(
        &self,
        request: &SecretRequest,
        out: &mut W,
    ) -> io::Result<Option<OperationReport>> {
        match self.try_dispatch(request).await {
            Ok(report) => {
                write_report(out, &request.secret_name, &report)?;
                Ok(Some(report))
            }
            Err(e) => {
                warn!(
                    operation = %e.operation,
                    secret_name = %e.secret_name,
                    error_kind = %e.source.kind,
                    error_code = e.source.code.as_deref().unwrap_or(""),
                    error = %e.source,
                    "Secret operation failed"
                );
                writeln!(out, "{e}")?;
                Ok(None)
            }
        }
    }
}
