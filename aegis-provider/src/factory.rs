//! Provider factory functions.

use std::sync::Arc;

use reqwest::Client;

use crate::providers::{IpApiProvider, IpWhoisProvider};
use crate::traits::GeoProvider;
use crate::types::ProviderKind;

/// Creates a [`GeoProvider`] of the given kind sharing `client`.
///
/// `url` overrides the provider's public endpoint; `None` uses
/// [`ProviderKind::default_url`]. The returned provider is wrapped in
/// `Arc<dyn GeoProvider>` so it can be handed to a
/// [`GeoLookupClient`](crate::GeoLookupClient).
///
/// # Examples
///
/// ```rust
/// use aegis_provider::{create_provider, ProviderKind};
///
/// let provider = create_provider(ProviderKind::IpApi, reqwest::Client::new(), None);
/// assert_eq!(provider.id(), "ipapi");
/// ```
pub fn create_provider(
    kind: ProviderKind,
    client: Client,
    url: Option<&str>,
) -> Arc<dyn GeoProvider> {
    match (kind, url) {
        (ProviderKind::IpWhois, None) => Arc::new(IpWhoisProvider::new(client)),
        (ProviderKind::IpWhois, Some(url)) => Arc::new(IpWhoisProvider::with_url(client, url)),
        (ProviderKind::IpApi, None) => Arc::new(IpApiProvider::new(client)),
        (ProviderKind::IpApi, Some(url)) => Arc::new(IpApiProvider::with_url(client, url)),
    }
}
