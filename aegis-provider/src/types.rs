use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::datetime::format_iso;

// ============ Canonical record ============

/// Placeholder used for string fields a provider left out.
pub const MISSING_FIELD: &str = "-";

/// Timezone block of an [`IpAnalysisRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneInfo {
    /// IANA timezone identifier (e.g. `"Europe/Moscow"`).
    pub id: String,
    /// Current time at resolution: the primary provider's value verbatim, or a
    /// locally stamped UTC instant (millisecond precision).
    pub current_time_iso: String,
}

impl TimezoneInfo {
    /// Builds a timezone block stamped with the given instant.
    pub fn stamped(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            current_time_iso: format_iso(now),
        }
    }
}

/// Canonical, provider-independent result of an IP lookup.
///
/// Both geolocation providers are normalized into this shape. A record with
/// `success == false` is the sentinel produced when every provider failed;
/// its string fields hold fixed placeholders and are never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAnalysisRecord {
    /// Public IP address as seen by the provider.
    pub ip: String,
    /// `false` only when both providers failed.
    pub success: bool,
    /// Address family / connection label (`"IPv4"`, `"IPv6"`).
    #[serde(rename = "type")]
    pub ip_type: String,
    /// Continent name or code.
    pub continent: String,
    /// Country name.
    pub country: String,
    /// ISO country code.
    pub country_code: String,
    /// Region / province / state.
    pub region: String,
    /// City name.
    pub city: String,
    /// Latitude (`0.0` when unknown).
    pub latitude: f64,
    /// Longitude (`0.0` when unknown).
    pub longitude: f64,
    /// Internet Service Provider.
    pub isp: String,
    /// Organisation owning the address block.
    pub org: String,
    /// Autonomous System Number (e.g. `"AS13335"`).
    pub asn: String,
    /// Timezone of the address.
    pub timezone: TimezoneInfo,
}

impl IpAnalysisRecord {
    /// The sentinel record returned when no provider could resolve the address.
    pub fn failure(now: DateTime<Utc>) -> Self {
        Self {
            ip: "Сбой определения".to_string(),
            success: false,
            ip_type: "Unknown".to_string(),
            continent: "-".to_string(),
            country: "Неизвестно".to_string(),
            country_code: "??".to_string(),
            region: "-".to_string(),
            city: "-".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            isp: "AdBlock/Connection Error".to_string(),
            org: "Check Network".to_string(),
            asn: "-".to_string(),
            timezone: TimezoneInfo::stamped("UTC", now),
        }
    }

    /// Human readable `city, region, country` triple.
    pub fn location(&self) -> String {
        format!("{}, {}, {}", self.city, self.region, self.country)
    }
}

/// Drops blank strings so `Option::or` can fall through to another source.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Returns `value` or the missing-field placeholder when absent or blank.
pub(crate) fn or_placeholder(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| MISSING_FIELD.to_string())
}

// ============ Provider metadata ============

/// Geolocation providers known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// <https://ipwho.is/> - primary provider.
    IpWhois,
    /// <https://ipapi.co/> - secondary provider.
    IpApi,
}

impl ProviderKind {
    /// Stable identifier used in logs and errors.
    pub fn id(self) -> &'static str {
        match self {
            Self::IpWhois => "ipwhois",
            Self::IpApi => "ipapi",
        }
    }

    /// Public endpoint queried when no override is configured.
    pub fn default_url(self) -> &'static str {
        match self {
            Self::IpWhois => "https://ipwho.is/",
            Self::IpApi => "https://ipapi.co/json/",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
