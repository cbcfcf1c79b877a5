//! Error types for Callsmith.

use uuid::Uuid;

use crate::model::Vertical;

/// A single validation violation, keyed by the configuration field at fault.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn issues_summary(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Top-level error returned by the provisioning orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    /// The onboarding configuration is invalid. Carries every violation at
    /// once so the caller can present a complete list. No side effects have
    /// occurred: no record was created and no remote call was made.
    #[error("validation failed: {}", issues_summary(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The remote platform rejected a call or was unreachable. The local
    /// record survives as `failed` with this error's message for operator
    /// diagnosis and manual retry.
    #[error("remote platform error: {0}")]
    Remote(#[from] RemoteError),

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Programmer-level configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// No prompt template is registered for the requested vertical. Should
    /// not occur in production if the registry is complete.
    #[error("no template registered for vertical {0}")]
    UnregisteredVertical(Vertical),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the remote agent platform.
///
/// The orchestrator treats both variants as hard failures; the distinction
/// matters to the client's retry policy (transport failures are retried at
/// most once, application errors never).
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("{endpoint} request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} rejected with status {status}: {message}")]
    Api {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse {
        endpoint: &'static str,
        message: String,
    },
}

/// Bookkeeping failures around the local record store.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to insert provisioning record: {0}")]
    Insert(#[source] StoreError),

    /// Both remote resources exist but the final status write failed. The
    /// caller must treat this as a reconciliation case, not a silent
    /// success: the remote resources are billable and untracked.
    #[error("record {local_id} has live remote resources but the final status write failed: {source}")]
    Finalize {
        local_id: Uuid,
        #[source]
        source: StoreError,
    },
}

/// Record-store backend errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("record not found: {0}")]
    NotFound(Uuid),

    #[error("serialization error: {0}")]
    Serialization(String),
}
