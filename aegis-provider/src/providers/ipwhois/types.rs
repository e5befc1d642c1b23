//! ipwho.is API 类型定义

use serde::Deserialize;

use crate::providers::common::AsnValue;

/// ipwho.is 响应
///
/// `success` 仅在失败时才可靠出现（`false` + `message`），缺省视为成功。
/// ISP/组织/ASN 信息通常嵌套在 `connection` 下，部分镜像直接放在顶层。
#[derive(Debug, Deserialize)]
pub struct IpWhoisResponse {
    pub ip: Option<String>,
    pub success: Option<bool>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub ip_type: Option<String>,
    pub continent: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub isp: Option<String>,
    pub org: Option<String>,
    pub asn: Option<AsnValue>,
    pub timezone: Option<IpWhoisTimezone>,
    pub connection: Option<IpWhoisConnection>,
}

#[derive(Debug, Deserialize)]
pub struct IpWhoisTimezone {
    pub id: Option<String>,
    pub current_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IpWhoisConnection {
    pub asn: Option<AsnValue>,
    pub org: Option<String>,
    pub isp: Option<String>,
}
