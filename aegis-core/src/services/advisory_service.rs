//! 安全建议生成服务

use std::sync::Arc;

use aegis_provider::IpAnalysisRecord;

use crate::config::AdvisoryConfig;
use crate::error::{CoreError, CoreResult};
use crate::services::prompt::build_prompt;
use crate::traits::AdvisoryBackend;
use crate::types::{AdvisorySource, GenerationRequest};

/// 未配置 API 密钥
pub const MISSING_KEY_MESSAGE: &str = "Ошибка: API ключ не найден.";
/// 后端或网络失败
pub const BACKEND_FAILURE_MESSAGE: &str = "Сбой нейросети. Не удалось сгенерировать отчет.";
/// 后端返回空文本
pub const INTERRUPTED_MESSAGE: &str = "Анализ прерван.";

/// 安全建议服务
///
/// 每次调用只发起一次生成请求；不重试、不缓存。
pub struct AdvisoryService {
    config: Arc<AdvisoryConfig>,
    backend: Arc<dyn AdvisoryBackend>,
}

impl AdvisoryService {
    /// 创建服务实例
    #[must_use]
    pub fn new(config: Arc<AdvisoryConfig>, backend: Arc<dyn AdvisoryBackend>) -> Self {
        Self { config, backend }
    }

    /// Generates the advisory text for `record`.
    ///
    /// Never fails: a missing key, a backend error and an empty completion map
    /// to [`MISSING_KEY_MESSAGE`], [`BACKEND_FAILURE_MESSAGE`] and
    /// [`INTERRUPTED_MESSAGE`] respectively.
    pub async fn explain(&self, record: &IpAnalysisRecord) -> String {
        self.explain_with_source(record).await.0
    }

    /// Like [`explain`](Self::explain), also telling whether the text is a real
    /// completion ([`AdvisorySource::Generated`]) or a fixed failure string
    /// ([`AdvisorySource::Failed`]).
    pub async fn explain_with_source(&self, record: &IpAnalysisRecord) -> (String, AdvisorySource) {
        let failed = |message: &str| (message.to_string(), AdvisorySource::Failed);
        match self.try_explain(record).await {
            Ok(text) if text.trim().is_empty() => {
                log::warn!("[{}] Empty completion", self.backend.id());
                failed(INTERRUPTED_MESSAGE)
            }
            Ok(text) => (text, AdvisorySource::Generated),
            Err(CoreError::MissingCredential) => {
                log::warn!("Advisory skipped: API key is not configured");
                failed(MISSING_KEY_MESSAGE)
            }
            Err(e) => {
                log::error!("[{}] Advisory generation failed: {e}", self.backend.id());
                failed(BACKEND_FAILURE_MESSAGE)
            }
        }
    }

    /// Like [`explain`](Self::explain) but returns the raw completion or the error.
    ///
    /// # Errors
    /// * `CoreError::MissingCredential` - no key configured; the backend is not called
    /// * any error of [`AdvisoryBackend::generate`]
    pub async fn try_explain(&self, record: &IpAnalysisRecord) -> CoreResult<String> {
        let api_key = self.config.credential().ok_or(CoreError::MissingCredential)?;
        let prompt = build_prompt(record);

        log::debug!(
            "[{}] Requesting advisory for {} (model={}, temperature={})",
            self.backend.id(),
            record.ip,
            self.config.model,
            self.config.temperature
        );

        self.backend
            .generate(&GenerationRequest {
                model: &self.config.model,
                prompt: &prompt,
                temperature: self.config.temperature,
                api_key,
            })
            .await
    }
}
