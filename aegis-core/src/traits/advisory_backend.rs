//! 生成式语言后端抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::GenerationRequest;

/// 文本生成后端 Trait
///
/// 平台实现:
/// - [`GeminiBackend`](crate::backends::GeminiBackend)（Gemini REST API）
/// - 测试: `MockAdvisoryBackend`
///
/// 实现方只负责一次请求-响应：不重试、不流式、不保留会话。
#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    /// 后端标识符（用于日志）
    fn id(&self) -> &'static str;

    /// 发起一次文本生成
    ///
    /// 成功时返回模型输出的原始文本（可能为空字符串）。
    ///
    /// # Errors
    /// * `CoreError::NetworkError` - 传输失败
    /// * `CoreError::BackendFailure` - 非 2xx 状态或响应中携带 `error`
    /// * `CoreError::SerializationError` - 响应无法解析
    async fn generate(&self, request: &GenerationRequest<'_>) -> CoreResult<String>;
}
