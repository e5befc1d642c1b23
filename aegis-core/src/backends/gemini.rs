//! Gemini REST API 后端
//!
//! `POST {endpoint}/v1beta/models/{model}:generateContent`，密钥通过
//! `x-goog-api-key` 头传递，不出现在 URL 中。

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use aegis_provider::log_sanitizer::truncate_for_log;

use crate::error::{CoreError, CoreResult};
use crate::traits::AdvisoryBackend;
use crate::types::GenerationRequest;

const BACKEND_ID: &str = "gemini";

// ============ 请求结构 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

// ============ 响应结构 ============

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.code.map_or_else(|| "?".to_string(), |c| c.to_string()),
            self.status.as_deref().unwrap_or("UNKNOWN"),
            self.message.as_deref().unwrap_or("no message")
        )
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ============ Backend ============

/// Gemini `generateContent` backend.
pub struct GeminiBackend {
    client: Client,
    endpoint: String,
}

impl GeminiBackend {
    /// Backend against the given API root, e.g.
    /// [`DEFAULT_ENDPOINT`](crate::config::DEFAULT_ENDPOINT).
    #[must_use]
    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.endpoint)
    }
}

#[async_trait]
impl AdvisoryBackend for GeminiBackend {
    fn id(&self) -> &'static str {
        BACKEND_ID
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> CoreResult<String> {
        let url = self.url_for(request.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        debug!("[{BACKEND_ID}] POST {url}");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::NetworkError(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        debug!("[{BACKEND_ID}] Response Status: {status}");

        let text = response
            .text()
            .await
            .map_err(|e| CoreError::NetworkError(format!("Failed to read response body: {e}")))?;
        debug!("[{BACKEND_ID}] Response Body: {}", truncate_for_log(&text));

        // 非 2xx 时尽量取出 error 对象作为详情
        if !status.is_success() {
            let detail = serde_json::from_str::<GenerateContentResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .map_or_else(|| format!("HTTP {status}"), |e| e.to_string());
            return Err(CoreError::BackendFailure(detail));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            CoreError::SerializationError(format!("Failed to parse Gemini response: {e}"))
        })?;

        if let Some(error) = parsed.error {
            return Err(CoreError::BackendFailure(error.to_string()));
        }

        Ok(parsed.into_text())
    }
}
