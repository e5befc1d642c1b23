//! ipapi.co `GeoProvider` 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::GeoProvider;
use crate::types::{IpAnalysisRecord, ProviderKind, TimezoneInfo, or_placeholder};

use super::{IpApiProvider, IpApiResponse};

#[async_trait]
impl GeoProvider for IpApiProvider {
    fn id(&self) -> &'static str {
        ProviderKind::IpApi.id()
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::IpApi
    }

    async fn lookup(&self) -> Result<IpAnalysisRecord> {
        let text =
            HttpUtils::execute_request(self.client.get(&self.url), self.id(), "GET", &self.url)
                .await?;
        let response: IpApiResponse = HttpUtils::parse_json(&text, self.id())?;
        response.into_record(Utc::now())
    }
}

impl IpApiResponse {
    /// Map onto the canonical record.
    ///
    /// ipapi.co sends no timestamp, so `timezone.currentTimeIso` is stamped
    /// with `now`.
    pub(crate) fn into_record(self, now: DateTime<Utc>) -> Result<IpAnalysisRecord> {
        let provider = ProviderKind::IpApi.id();

        if self.is_error() {
            return Err(ProviderError::Rejected {
                provider: provider.to_string(),
                raw_message: self.reason,
            });
        }

        let ip = self
            .ip
            .filter(|ip| !ip.trim().is_empty())
            .ok_or_else(|| ProviderError::ParseError {
                provider: provider.to_string(),
                detail: "response has no `ip` field".to_string(),
            })?;

        let ip_type = self
            .version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "IPv4".to_string());
        let continent = self
            .continent_code
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let timezone_id = self
            .timezone
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| "UTC".to_string());

        Ok(IpAnalysisRecord {
            ip,
            success: true,
            ip_type,
            continent,
            country: or_placeholder(self.country_name),
            country_code: or_placeholder(self.country),
            region: or_placeholder(self.region),
            city: or_placeholder(self.city),
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
            isp: or_placeholder(self.org.clone()),
            org: or_placeholder(self.org),
            asn: or_placeholder(self.asn.map(|a| a.normalize())),
            timezone: TimezoneInfo::stamped(timezone_id, now),
        })
    }
}
