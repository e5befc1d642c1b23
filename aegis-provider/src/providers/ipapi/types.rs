//! ipapi.co API 类型定义

use serde::Deserialize;
use serde_json::Value;

use crate::providers::common::AsnValue;

/// ipapi.co 响应
///
/// 字段命名与规范记录不同：`country` 是国家代码，`country_name` 才是国家名称；
/// `timezone` 是字符串而非对象；没有单独的 ISP 字段。
#[derive(Debug, Deserialize)]
pub struct IpApiResponse {
    pub ip: Option<String>,
    pub version: Option<String>,
    pub continent_code: Option<String>,
    pub country_name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub org: Option<String>,
    pub asn: Option<AsnValue>,
    pub timezone: Option<String>,
    /// 出错时为 `true`，并带有 `reason`
    pub error: Option<Value>,
    pub reason: Option<String>,
}

impl IpApiResponse {
    /// `error` 字段存在且不是 `false` / `null` / 空字符串时视为失败
    pub fn is_error(&self) -> bool {
        match &self.error {
            None | Some(Value::Null | Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}
