//! 生成请求类型定义

/// One text-generation request handed to an [`AdvisoryBackend`](crate::traits::AdvisoryBackend).
///
/// Borrowed from the caller's config; never logged as a whole because it
/// carries the API key.
#[derive(Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Model identifier (e.g. `gemini-2.5-flash`).
    pub model: &'a str,
    /// Complete prompt text.
    pub prompt: &'a str,
    /// Sampling temperature.
    pub temperature: f32,
    /// Credential presented to the backend.
    pub api_key: &'a str,
}
