//! # aegis-provider
//!
//! Public-IP geolocation with a primary/secondary fallback, normalized into one
//! canonical record.
//!
//! ## Supported Providers
//!
//! | Provider | Role | Endpoint | Response quirks |
//! |----------|------|----------|-----------------|
//! | [ipwho.is](https://ipwho.is/) | primary | `GET https://ipwho.is/` | `success: false` on failure, ISP/ASN under `connection` |
//! | [ipapi.co](https://ipapi.co/) | secondary | `GET https://ipapi.co/json/` | `error: true` + `reason` on failure, no timestamp |
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aegis_provider::GeoLookupClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = GeoLookupClient::default();
//!     let record = client.resolve().await;
//!     if record.success {
//!         println!("{} ({})", record.ip, record.location());
//!     } else {
//!         println!("lookup failed, showing placeholders: {}", record.ip);
//!     }
//! }
//! ```
//!
//! ## Error Handling
//!
//! Individual providers return [`Result<T, ProviderError>`](ProviderError).
//! [`GeoLookupClient::resolve`] absorbs those errors: a failing primary triggers
//! exactly one fallback to the secondary, and a failing secondary yields
//! [`IpAnalysisRecord::failure`]. Callers never see an error from `resolve`.

mod error;
mod factory;
mod http_client;
mod lookup;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export the fallback client
pub use lookup::{GeoLookupClient, GeoLookupOptions};

// Re-export core trait
pub use traits::GeoProvider;

// Re-export types
pub use types::{IpAnalysisRecord, MISSING_FIELD, ProviderKind, TimezoneInfo};

// Re-export utils modules
pub use utils::{datetime, log_sanitizer};

// Re-export concrete providers and HTTP client tuning
pub use providers::common::{HttpClientOptions, create_http_client};
pub use providers::{IpApiProvider, IpWhoisProvider};
