//! Geolocation provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod ipapi;
mod ipwhois;

pub use ipapi::IpApiProvider;
pub use ipwhois::IpWhoisProvider;
