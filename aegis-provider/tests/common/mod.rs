//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::time::Duration;

use aegis_provider::{GeoLookupClient, GeoLookupOptions, HttpClientOptions};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 主 provider 的路径（ipwho.is 根路径）
pub const PRIMARY_PATH: &str = "/";
/// 备用 provider 的路径（ipapi.co `/json/`）
pub const SECONDARY_PATH: &str = "/json/";

/// 测试用请求超时，足够短以便覆盖超时分支
pub const TEST_REQUEST_TIMEOUT: Duration = Duration::from_millis(300);

/// 测试上下文 - 两个 mock 服务器分别扮演主/备 provider
pub struct TestContext {
    pub primary: MockServer,
    pub secondary: MockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        Self {
            primary: MockServer::start().await,
            secondary: MockServer::start().await,
        }
    }

    /// 指向 mock 服务器的查询客户端
    pub fn client(&self) -> GeoLookupClient {
        GeoLookupClient::from_options(&GeoLookupOptions {
            primary_url: format!("{}{PRIMARY_PATH}", self.primary.uri()),
            secondary_url: format!("{}{SECONDARY_PATH}", self.secondary.uri()),
            http: HttpClientOptions {
                connect_timeout: TEST_REQUEST_TIMEOUT,
                request_timeout: TEST_REQUEST_TIMEOUT,
            },
        })
    }

    /// 主 provider 返回给定响应，且恰好被调用一次
    pub async fn primary_responds(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(PRIMARY_PATH))
            .respond_with(template)
            .expect(1)
            .mount(&self.primary)
            .await;
    }

    /// 备用 provider 返回给定响应，并断言调用次数
    pub async fn secondary_responds(&self, template: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path(SECONDARY_PATH))
            .respond_with(template)
            .expect(expected_calls)
            .mount(&self.secondary)
            .await;
    }
}

/// ipwho.is 成功响应
pub fn ipwhois_body(ip: &str) -> Value {
    json!({
        "ip": ip,
        "success": true,
        "type": "IPv4",
        "continent": "Europe",
        "country": "Russia",
        "country_code": "RU",
        "region": "Moscow",
        "city": "Moscow",
        "latitude": 55.7558,
        "longitude": 37.6173,
        "connection": {
            "asn": 12389,
            "org": "PJSC Rostelecom",
            "isp": "Rostelecom"
        },
        "timezone": {
            "id": "Europe/Moscow",
            "current_time": "2024-05-01T15:00:00+03:00"
        }
    })
}

/// ipapi.co 成功响应
pub fn ipapi_body(ip: &str) -> Value {
    json!({
        "ip": ip,
        "version": "IPv4",
        "city": "Ashburn",
        "region": "Virginia",
        "country": "US",
        "country_name": "USA",
        "continent_code": "NA",
        "latitude": 39.0438,
        "longitude": -77.4874,
        "timezone": "America/New_York",
        "asn": "AS14618",
        "org": "AMAZON-AES"
    })
}
