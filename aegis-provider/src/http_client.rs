//! Generic HTTP client tools
//!
//! Reusable request handling shared by every geolocation provider.
//! Each provider builds its own `RequestBuilder`; this module sends it,
//! logs the exchange, and classifies the outcome into [`ProviderError`].
//!
//! # design principles
//! - **Single attempt** - there is no retry here; the fallback hop lives in
//!   [`GeoLookupClient`](crate::GeoLookupClient)
//! - **Only 2xx is success** - any other status becomes an error before parsing
//! - **Flexible response parsing** - Provides tool functions but does not limit parsing methods

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, headers, body)
    /// * `provider_name` - Provider name (for logging and errors)
    /// * `method_name` - request method name (such as "GET", used for logs)
    /// * `url` - URL (for logging)
    ///
    /// # Returns
    /// * `Ok(response_text)` - the body of a 2xx response
    /// * `Err(ProviderError::Timeout | NetworkError)` - transport failure
    /// * `Err(ProviderError::RateLimited)` - HTTP 429
    /// * `Err(ProviderError::HttpStatus)` - any other non-2xx status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<String, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        // Send request
        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{provider_name}] Response Status: {status}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status.as_u16() == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Unexpected status (HTTP {status})");
            return Err(ProviderError::HttpStatus {
                provider: provider_name.to_string(),
                status: status.as_u16(),
                body: truncate_for_log(&body),
            });
        }

        // Read response body
        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok(response_text)
    }

    /// Parse JSON response
    ///
    /// # Type Parameters
    /// * `T` - target type
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
