//! 运行期配置
//!
//! 平台层（CLI）负责从文件/环境变量组装这些结构，然后注入到服务中。

use std::fmt;
use std::time::Duration;

use aegis_provider::log_sanitizer::mask_secret;

/// 默认生成模型
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// 默认采样温度
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Gemini REST API 根地址
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Advisory backend settings, built once at startup and shared via `Arc`.
#[derive(Clone, PartialEq)]
pub struct AdvisoryConfig {
    /// API key; `None` or blank means advisory generation is unavailable.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    /// Base URL of the generative-language API.
    pub endpoint: String,
}

impl AdvisoryConfig {
    /// Config with default model settings and the given key.
    #[must_use]
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// The usable credential, if any (blank keys count as missing).
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

// 手写 Debug，避免密钥进入日志
impl fmt::Debug for AdvisoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryConfig")
            .field("api_key", &self.api_key.as_deref().map(mask_secret))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Cosmetic delays of the scan state machine.
///
/// These only shape perceived duration; they never affect the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Hold time of the `Initializing` step.
    pub initializing: Duration,
    /// Minimum duration of the `FetchingIp` step; a faster lookup is padded up to it.
    pub min_fetch: Duration,
    /// Hold time of the `AnalyzingAsn` step.
    pub analyzing: Duration,
    /// Hold time of the `Complete` step before the record is handed back.
    pub complete: Duration,
}

impl PacingConfig {
    /// All delays zeroed.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            initializing: Duration::ZERO,
            min_fetch: Duration::ZERO,
            analyzing: Duration::ZERO,
            complete: Duration::ZERO,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            initializing: Duration::from_millis(800),
            min_fetch: Duration::from_millis(1500),
            analyzing: Duration::from_millis(1200),
            complete: Duration::from_millis(600),
        }
    }
}
