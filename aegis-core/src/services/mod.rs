//! 业务逻辑服务层

mod advisory_service;
mod prompt;
mod scan_orchestrator;
mod scan_service;

pub use advisory_service::{
    AdvisoryService, BACKEND_FAILURE_MESSAGE, INTERRUPTED_MESSAGE, MISSING_KEY_MESSAGE,
};
pub use prompt::build_prompt;
pub use scan_orchestrator::ScanOrchestrator;
pub use scan_service::{SecurityScanService, UNREACHABLE_MESSAGE};

use std::sync::Arc;
use std::time::Duration;

use aegis_provider::{
    GeoLookupClient, GeoLookupOptions, HttpClientOptions, create_http_client,
};

use crate::backends::GeminiBackend;
use crate::config::{AdvisoryConfig, PacingConfig};
use crate::traits::AdvisoryBackend;

/// 生成请求的超时（模型输出较慢，比地理查询宽松）
const ADVISORY_REQUEST_TIMEOUT_SECS: u64 = 60;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入具体的查询客户端与生成后端。
pub struct ServiceContext {
    /// 地理位置查询客户端
    pub geo: Arc<GeoLookupClient>,
    /// 生成式语言后端
    pub advisory_backend: Arc<dyn AdvisoryBackend>,
    /// 生成配置（模型、温度、密钥）
    pub advisory_config: Arc<AdvisoryConfig>,
    /// 扫描节奏
    pub pacing: PacingConfig,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        geo: Arc<GeoLookupClient>,
        advisory_backend: Arc<dyn AdvisoryBackend>,
        advisory_config: Arc<AdvisoryConfig>,
        pacing: PacingConfig,
    ) -> Self {
        Self {
            geo,
            advisory_backend,
            advisory_config,
            pacing,
        }
    }

    /// 使用真实的 HTTP 后端（ipwho.is / ipapi.co / Gemini）创建上下文
    #[must_use]
    pub fn from_settings(
        geo_options: &GeoLookupOptions,
        advisory_config: AdvisoryConfig,
        pacing: PacingConfig,
    ) -> Self {
        let advisory_client = create_http_client(&HttpClientOptions {
            connect_timeout: geo_options.http.connect_timeout,
            request_timeout: geo_options
                .http
                .request_timeout
                .max(Duration::from_secs(ADVISORY_REQUEST_TIMEOUT_SECS)),
        });
        let backend = GeminiBackend::with_endpoint(advisory_client, advisory_config.endpoint.clone());

        log::debug!("Advisory settings: {advisory_config:?}");

        Self::new(
            Arc::new(GeoLookupClient::from_options(geo_options)),
            Arc::new(backend),
            Arc::new(advisory_config),
            pacing,
        )
    }
}
