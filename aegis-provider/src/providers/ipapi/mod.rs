//! ipapi.co geolocation provider (secondary)

mod provider;
mod types;

use reqwest::Client;

use crate::types::ProviderKind;

pub(crate) use types::IpApiResponse;

/// ipapi.co Provider
pub struct IpApiProvider {
    pub(crate) client: Client,
    pub(crate) url: String,
}

impl IpApiProvider {
    /// Provider against the public endpoint.
    pub fn new(client: Client) -> Self {
        Self::with_url(client, ProviderKind::IpApi.default_url())
    }

    /// Provider against a custom endpoint.
    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}
