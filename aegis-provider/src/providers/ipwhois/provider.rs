//! ipwho.is `GeoProvider` 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::GeoProvider;
use crate::providers::common::AsnValue;
use crate::types::{IpAnalysisRecord, ProviderKind, TimezoneInfo, non_blank, or_placeholder};

use super::{IpWhoisProvider, IpWhoisResponse};

#[async_trait]
impl GeoProvider for IpWhoisProvider {
    fn id(&self) -> &'static str {
        ProviderKind::IpWhois.id()
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::IpWhois
    }

    async fn lookup(&self) -> Result<IpAnalysisRecord> {
        let text =
            HttpUtils::execute_request(self.client.get(&self.url), self.id(), "GET", &self.url)
                .await?;
        let response: IpWhoisResponse = HttpUtils::parse_json(&text, self.id())?;
        response.into_record(Utc::now())
    }
}

impl IpWhoisResponse {
    /// Map onto the canonical record.
    ///
    /// `success` is forced to `true` here: only an explicit `false` is a
    /// failure, and that is reported as [`ProviderError::Rejected`].
    pub(crate) fn into_record(self, now: DateTime<Utc>) -> Result<IpAnalysisRecord> {
        let provider = ProviderKind::IpWhois.id();

        if self.success == Some(false) {
            return Err(ProviderError::Rejected {
                provider: provider.to_string(),
                raw_message: self.message,
            });
        }

        let ip = self
            .ip
            .filter(|ip| !ip.trim().is_empty())
            .ok_or_else(|| ProviderError::ParseError {
                provider: provider.to_string(),
                detail: "response has no `ip` field".to_string(),
            })?;

        let ip_type = self.ip_type.unwrap_or_else(|| {
            if ip.parse::<std::net::Ipv6Addr>().is_ok() {
                "IPv6"
            } else {
                "IPv4"
            }
            .to_string()
        });

        let (conn_isp, conn_org, conn_asn) = self
            .connection
            .map_or((None, None, None), |conn| (conn.isp, conn.org, conn.asn));

        let (tz_id, tz_time) = self
            .timezone
            .map_or((None, None), |tz| (tz.id, tz.current_time));
        // current_time 原样透传（保留 IP 所在地的时区偏移），缺失时才用解析时刻
        let tz_id = non_blank(tz_id).unwrap_or_else(|| "UTC".to_string());
        let timezone = match non_blank(tz_time) {
            Some(current_time_iso) => TimezoneInfo {
                id: tz_id,
                current_time_iso,
            },
            None => TimezoneInfo::stamped(tz_id, now),
        };

        Ok(IpAnalysisRecord {
            ip,
            success: true,
            ip_type,
            continent: or_placeholder(self.continent),
            country: or_placeholder(self.country),
            country_code: or_placeholder(self.country_code),
            region: or_placeholder(self.region),
            city: or_placeholder(self.city),
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
            isp: or_placeholder(non_blank(self.isp).or(non_blank(conn_isp))),
            org: or_placeholder(non_blank(self.org).or(non_blank(conn_org))),
            asn: or_placeholder(
                non_blank(self.asn.map(AsnValue::normalize))
                    .or(non_blank(conn_asn.map(AsnValue::normalize))),
            ),
            timezone,
        })
    }
}
