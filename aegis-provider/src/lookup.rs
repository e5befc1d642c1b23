//! Primary/secondary geolocation lookup with a single fallback hop.

use std::sync::Arc;

use chrono::Utc;

use crate::factory::create_provider;
use crate::providers::common::{HttpClientOptions, create_http_client};
use crate::traits::GeoProvider;
use crate::types::{IpAnalysisRecord, ProviderKind};

/// Endpoints and timeouts for [`GeoLookupClient::from_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLookupOptions {
    /// Primary (ipwho.is) endpoint.
    pub primary_url: String,
    /// Secondary (ipapi.co) endpoint.
    pub secondary_url: String,
    /// Timeouts shared by both providers.
    pub http: HttpClientOptions,
}

impl Default for GeoLookupOptions {
    fn default() -> Self {
        Self {
            primary_url: ProviderKind::IpWhois.default_url().to_string(),
            secondary_url: ProviderKind::IpApi.default_url().to_string(),
            http: HttpClientOptions::default(),
        }
    }
}

/// Resolves the caller's public IP through a primary provider, falling back
/// to a secondary one.
///
/// [`resolve`](Self::resolve) never fails: when both providers fail it returns
/// [`IpAnalysisRecord::failure`]. There is exactly one fallback hop, no retry
/// within a provider and no caching between calls.
pub struct GeoLookupClient {
    primary: Arc<dyn GeoProvider>,
    secondary: Arc<dyn GeoProvider>,
}

impl GeoLookupClient {
    /// Client over two explicit providers.
    pub fn new(primary: Arc<dyn GeoProvider>, secondary: Arc<dyn GeoProvider>) -> Self {
        Self { primary, secondary }
    }

    /// ipwho.is → ipapi.co client built from options.
    pub fn from_options(options: &GeoLookupOptions) -> Self {
        let client = create_http_client(&options.http);
        Self::new(
            create_provider(
                ProviderKind::IpWhois,
                client.clone(),
                Some(&options.primary_url),
            ),
            create_provider(ProviderKind::IpApi, client, Some(&options.secondary_url)),
        )
    }

    /// Resolve the public IP, absorbing every provider failure.
    pub async fn resolve(&self) -> IpAnalysisRecord {
        let primary_err = match self.primary.lookup().await {
            Ok(record) => {
                log::debug!("[{}] resolved {}", self.primary.id(), record.ip);
                return record;
            }
            Err(e) => e,
        };
        let class = if primary_err.is_transport() {
            "unreachable"
        } else {
            "rejected the lookup"
        };
        log::warn!(
            "Primary IP provider {class}, trying {}: {primary_err}",
            self.secondary.id()
        );

        match self.secondary.lookup().await {
            Ok(record) => {
                log::debug!("[{}] resolved {}", self.secondary.id(), record.ip);
                record
            }
            Err(secondary_err) => {
                log::error!("All IP providers failed: {primary_err}; {secondary_err}");
                IpAnalysisRecord::failure(Utc::now())
            }
        }
    }
}

impl Default for GeoLookupClient {
    fn default() -> Self {
        Self::from_options(&GeoLookupOptions::default())
    }
}
