//! Common test utilities
//!
//! Provides a recording in-memory [`SecretStore`] and the rustls setup the
//! SDK-backed tests need.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use aws_secret_manager::provider::{CreatedSecret, DeletedSecret, UpdatedSecret};
use aws_secret_manager::{ProviderError, SecretStore};
use std::sync::{Mutex, Once};

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` so it runs a single time per test binary.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // Another component may already have installed one; either is fine
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// A store call as observed by [`RecordingStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create {
        name: String,
        description: String,
        value: Option<String>,
    },
    Get {
        id: String,
    },
    Update {
        id: String,
        value: Option<String>,
    },
    Delete {
        id: String,
        force: bool,
    },
}

/// In-memory store that records every call and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    failure: Option<ProviderError>,
    stored_value: String,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose value lookups return `value`
    pub fn with_value(value: &str) -> Self {
        Self {
            stored_value: value.to_string(),
            ..Self::default()
        }
    }

    /// A store where every call fails with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn record(&self, call: Call) -> Result<(), ProviderError> {
        self.calls.lock().expect("calls lock poisoned").push(call);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SecretStore for RecordingStore {
    async fn create_secret(
        &self,
        secret_name: &str,
        description: &str,
        secret_value: Option<&str>,
    ) -> Result<CreatedSecret, ProviderError> {
        self.record(Call::Create {
            name: secret_name.to_string(),
            description: description.to_string(),
            value: secret_value.map(ToString::to_string),
        })?;
        Ok(CreatedSecret {
            arn: Some(format!(
                "arn:aws:secretsmanager:us-east-1:123456789012:secret:{secret_name}-AbCdEf"
            )),
            name: Some(secret_name.to_string()),
            version_id: Some("00000000-0000-0000-0000-000000000001".to_string()),
        })
    }

    async fn get_secret_value(&self, secret_id: &str) -> Result<String, ProviderError> {
        self.record(Call::Get {
            id: secret_id.to_string(),
        })?;
        Ok(self.stored_value.clone())
    }

    async fn update_secret(
        &self,
        secret_id: &str,
        secret_value: Option<&str>,
    ) -> Result<UpdatedSecret, ProviderError> {
        self.record(Call::Update {
            id: secret_id.to_string(),
            value: secret_value.map(ToString::to_string),
        })?;
        Ok(UpdatedSecret {
            arn: None,
            name: Some(secret_id.to_string()),
            version_id: Some("00000000-0000-0000-0000-000000000002".to_string()),
        })
    }

    async fn delete_secret(
        &self,
        secret_id: &str,
        force: bool,
    ) -> Result<DeletedSecret, ProviderError> {
        self.record(Call::Delete {
            id: secret_id.to_string(),
            force,
        })?;
        Ok(DeletedSecret {
            arn: None,
            name: Some(secret_id.to_string()),
            deletion_date: Some("2024-01-01T00:00:00Z".to_string()),
        })
    }
}
