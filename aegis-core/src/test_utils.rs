//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

#![allow(clippy::unwrap_used, dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use aegis_provider::{GeoLookupClient, GeoProvider, ProviderError, ProviderKind};

use crate::error::{CoreError, CoreResult};
use crate::traits::AdvisoryBackend;
use crate::types::{GenerationRequest, IpAnalysisRecord, TimezoneInfo};

/// 构造一条成功的记录
pub fn sample_record(ip: &str) -> IpAnalysisRecord {
    IpAnalysisRecord {
        ip: ip.to_string(),
        success: true,
        ip_type: "IPv4".to_string(),
        continent: "Europe".to_string(),
        country: "Russia".to_string(),
        country_code: "RU".to_string(),
        region: "Moscow".to_string(),
        city: "Moscow".to_string(),
        latitude: 55.7558,
        longitude: 37.6173,
        isp: "Rostelecom".to_string(),
        org: "PJSC Rostelecom".to_string(),
        asn: "AS12389".to_string(),
        timezone: TimezoneInfo::stamped("Europe/Moscow", Utc::now()),
    }
}

// ===== MockGeoProvider =====

pub struct MockGeoProvider {
    kind: ProviderKind,
    record: Option<IpAnalysisRecord>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockGeoProvider {
    /// 成功返回给定记录
    pub fn ok(kind: ProviderKind, record: IpAnalysisRecord) -> Arc<Self> {
        Arc::new(Self {
            kind,
            record: Some(record),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    /// 总是返回网络错误
    pub fn failing(kind: ProviderKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            record: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    /// 成功返回，但先等待 `delay`（tokio 时间）
    pub fn slow(kind: ProviderKind, record: IpAnalysisRecord, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            kind,
            record: Some(record),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoProvider for MockGeoProvider {
    fn id(&self) -> &'static str {
        self.kind.id()
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn lookup(&self) -> aegis_provider::Result<IpAnalysisRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.record
            .clone()
            .ok_or_else(|| ProviderError::NetworkError {
                provider: self.kind.id().to_string(),
                detail: "connection refused".to_string(),
            })
    }
}

/// 主 Provider 成功的查询客户端
pub fn geo_client_ok(ip: &str) -> Arc<GeoLookupClient> {
    Arc::new(GeoLookupClient::new(
        MockGeoProvider::ok(ProviderKind::IpWhois, sample_record(ip)),
        MockGeoProvider::failing(ProviderKind::IpApi),
    ))
}

/// 两个 Provider 都失败的查询客户端
pub fn geo_client_failing() -> Arc<GeoLookupClient> {
    Arc::new(GeoLookupClient::new(
        MockGeoProvider::failing(ProviderKind::IpWhois),
        MockGeoProvider::failing(ProviderKind::IpApi),
    ))
}

/// 主 Provider 延迟 `delay` 后成功的查询客户端
pub fn geo_client_slow(ip: &str, delay: Duration) -> Arc<GeoLookupClient> {
    Arc::new(GeoLookupClient::new(
        MockGeoProvider::slow(ProviderKind::IpWhois, sample_record(ip), delay),
        MockGeoProvider::failing(ProviderKind::IpApi),
    ))
}

// ===== MockAdvisoryBackend =====

/// Mock 后端的应答
pub enum MockReply {
    Text(String),
    Fail,
}

/// 记录下来的一次生成请求
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub api_key: String,
}

pub struct MockAdvisoryBackend {
    reply: MockReply,
    calls: AtomicUsize,
    last: Mutex<Option<SeenRequest>>,
}

impl MockAdvisoryBackend {
    pub fn new(reply: MockReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.last.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_request().map(|r| r.prompt)
    }
}

#[async_trait]
impl AdvisoryBackend for MockAdvisoryBackend {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> CoreResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(SeenRequest {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            temperature: request.temperature,
            api_key: request.api_key.to_string(),
        });
        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail => Err(CoreError::BackendFailure("mock failure".to_string())),
        }
    }
}
