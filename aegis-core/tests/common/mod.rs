//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::time::Duration;

use aegis_core::{AdvisoryConfig, PacingConfig, ServiceContext};
use aegis_provider::{GeoLookupOptions, HttpClientOptions};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key-0123456789";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

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

/// 测试上下文 - 三个 mock 服务器：主/备地理查询与生成后端
pub struct TestContext {
    pub primary: MockServer,
    pub secondary: MockServer,
    pub gemini: MockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        Self {
            primary: MockServer::start().await,
            secondary: MockServer::start().await,
            gemini: MockServer::start().await,
        }
    }

    pub fn geo_options(&self) -> GeoLookupOptions {
        GeoLookupOptions {
            primary_url: format!("{}/", self.primary.uri()),
            secondary_url: format!("{}/json/", self.secondary.uri()),
            http: HttpClientOptions {
                connect_timeout: Duration::from_millis(300),
                request_timeout: Duration::from_millis(300),
            },
        }
    }

    pub fn advisory_config(&self, api_key: Option<&str>) -> AdvisoryConfig {
        AdvisoryConfig {
            api_key: api_key.map(ToString::to_string),
            endpoint: self.gemini.uri(),
            ..AdvisoryConfig::default()
        }
    }

    /// 指向全部 mock 服务器、无节奏延迟的服务上下文
    pub fn service_context(&self, api_key: Option<&str>) -> ServiceContext {
        ServiceContext::from_settings(
            &self.geo_options(),
            self.advisory_config(api_key),
            PacingConfig::none(),
        )
    }

    pub async fn primary_responds(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(template)
            .mount(&self.primary)
            .await;
    }

    pub async fn secondary_responds(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(template)
            .mount(&self.secondary)
            .await;
    }

    /// 生成后端返回给定响应，并断言调用次数
    pub async fn gemini_responds(&self, template: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", TEST_API_KEY))
            .respond_with(template)
            .expect(expected_calls)
            .mount(&self.gemini)
            .await;
    }
}

/// Gemini 成功响应，每个参数是一个 part
pub fn completion_body(parts: &[&str]) -> Value {
    let parts: Vec<Value> = parts.iter().map(|t| json!({ "text": t })).collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}

/// ipwho.is 成功响应
pub fn ipwhois_body(ip: &str) -> Value {
    json!({
        "ip": ip,
        "success": true,
        "type": "IPv4",
        "continent": "Europe",
        "country": "Netherlands",
        "country_code": "NL",
        "region": "North Holland",
        "city": "Amsterdam",
        "latitude": 52.3676,
        "longitude": 4.9041,
        "connection": {
            "asn": 14061,
            "org": "DigitalOcean, LLC",
            "isp": "DigitalOcean"
        },
        "timezone": {
            "id": "Europe/Amsterdam",
            "current_time": "2024-05-01T14:00:00+02:00"
        }
    })
}
