//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP Client 超时配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientOptions {
    /// 连接超时
    pub connect_timeout: Duration,
    /// 整个请求的超时
    pub request_timeout: Duration,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// 创建带超时配置的 HTTP Client
///
/// 构建失败（TLS 后端初始化失败等）时退回默认 Client，并记录警告。
pub fn create_http_client(options: &HttpClientOptions) -> Client {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .user_agent(concat!("aegis/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}

// ============ 字段规范化 ============

/// ASN 字段：ipwho.is 返回数字，ipapi.co 返回 `"AS15169"` 字符串
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum AsnValue {
    Number(i64),
    Text(String),
}

impl AsnValue {
    /// 统一为 `AS<n>` 形式
    pub fn normalize(self) -> String {
        match self {
            Self::Number(n) => format!("AS{n}"),
            Self::Text(s) => {
                let s = s.trim();
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                    format!("AS{s}")
                } else {
                    s.to_string()
                }
            }
        }
    }
}
