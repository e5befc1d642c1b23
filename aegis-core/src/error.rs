//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use aegis_provider::ProviderError;

/// Core layer error type
///
/// Only [`CoreError::ScanInProgress`] ever reaches a scan's caller; the
/// advisory variants are absorbed by
/// [`AdvisoryService::explain`](crate::services::AdvisoryService::explain)
/// into fixed user-facing strings.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A scan is already running on this orchestrator
    #[error("A scan is already in progress")]
    ScanInProgress,

    /// No API key configured for the advisory backend
    #[error("Advisory API key is not configured")]
    MissingCredential,

    /// The generative backend answered with an error
    #[error("Advisory backend error: {0}")]
    BackendFailure(String),

    /// network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether this is expected behavior (missing configuration, busy orchestrator), used for log grading.
    ///
    /// Use `warn` level when returning `true` and `error` level when `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::ScanInProgress | Self::MissingCredential)
    }
}

/// Core Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
