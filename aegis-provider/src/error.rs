use serde::{Deserialize, Serialize};

/// Unified error type for all geolocation provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Failure classes
///
/// - **Transport failures** ([`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout)):
///   the request never produced a usable HTTP response.
/// - **Provider rejections** (every other variant): the provider answered, but the
///   answer signals a logical failure or cannot be parsed.
///
/// [`GeoLookupClient`](crate::GeoLookupClient) absorbs both classes into the
/// fallback path; nothing here escapes to a scan's caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, TLS, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provider answered with HTTP 429.
    ///
    /// No retry is attempted; the hint is kept for logging only.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original response body, if any.
        raw_message: Option<String>,
    },

    /// The provider answered with a non-2xx status.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Original response body.
        body: String,
    },

    /// A well-formed response that signals a logical failure
    /// (`"success": false`, an `"error"` field, ...).
    Rejected {
        /// Provider that produced the error.
        provider: String,
        /// Reason reported by the provider, if any.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's response, or a required field was missing.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },
}

impl ProviderError {
    /// Provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::HttpStatus { provider, .. }
            | Self::Rejected { provider, .. }
            | Self::ParseError { provider, .. } => provider,
        }
    }

    /// 是否为传输层失败（网络、超时），其余均视为 provider 拒绝。
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::HttpStatus {
                provider, status, ..
            } => {
                write!(f, "[{provider}] Unexpected HTTP status {status}")
            }
            Self::Rejected {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Lookup rejected: {msg}")
                } else {
                    write!(f, "[{provider}] Lookup rejected")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
