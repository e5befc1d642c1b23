//! ipwho.is geolocation provider (primary)

mod provider;
mod types;

use reqwest::Client;

use crate::types::ProviderKind;

pub(crate) use types::IpWhoisResponse;

/// ipwho.is Provider
///
/// Schema is close to the canonical record; see [`IpWhoisResponse`] for the
/// fields that need reshaping.
pub struct IpWhoisProvider {
    pub(crate) client: Client,
    pub(crate) url: String,
}

impl IpWhoisProvider {
    /// Provider against the public endpoint.
    pub fn new(client: Client) -> Self {
        Self::with_url(client, ProviderKind::IpWhois.default_url())
    }

    /// Provider against a custom endpoint (self-hosted mirror, test server).
    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}
