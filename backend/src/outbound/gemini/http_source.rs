//! Reqwest-backed Gemini text generation adapter.
//!
//! This adapter owns transport details only: request serialisation, the
//! request timeout, HTTP error mapping and response decoding. The API key is
//! sent as a header so it never appears in URLs or transport error text.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{GenerateContentRequestDto, GenerateContentResponseDto};
use crate::domain::ports::{TextGenerationError, TextGenerationSource};

/// Base URL of the public Gemini API.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
/// Request timeout used when none is configured.
pub const DEFAULT_GEMINI_TIMEOUT: Duration = Duration::from_secs(60);

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiHttpSource`].
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential. Calls fail with a configuration error when absent.
    pub api_key: Option<String>,
    /// Model name, for example `gemini-1.5-flash`.
    pub model: String,
    /// API base URL up to and including the version segment.
    pub endpoint: Url,
    /// Time budget for one call, including reading the body.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings for the public endpoint with the default model and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in endpoint fails to parse.
    pub fn with_api_key(api_key: Option<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            endpoint: Url::parse(DEFAULT_GEMINI_ENDPOINT)?,
            timeout: DEFAULT_GEMINI_TIMEOUT,
        })
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gemini adapter performing one `generateContent` POST per call.
pub struct GeminiHttpSource {
    client: Client,
    api_key: Option<String>,
    url: String,
}

impl GeminiHttpSource {
    /// Build an adapter using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let url = format!(
            "{}/models/{}:generateContent",
            config.endpoint.as_str().trim_end_matches('/'),
            config.model.trim()
        );
        let api_key = config.api_key.filter(|key| !key.trim().is_empty());
        Ok(Self {
            client,
            api_key,
            url,
        })
    }
}

#[async_trait]
impl TextGenerationSource for GeminiHttpSource {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(TextGenerationError::configuration(
                "ROTEIRO_GEMINI_API_KEY is not set",
            ));
        };

        let response = self
            .client
            .post(self.url.as_str())
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateContentRequestDto::from_prompt(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "gemini response received");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_text(body.as_ref())
    }
}

fn parse_text(body: &[u8]) -> Result<String, TextGenerationError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        TextGenerationError::decode(format!("invalid Gemini JSON payload: {error}"))
    })?;
    decoded
        .into_text()
        .map_err(TextGenerationError::empty_response)
}

fn map_transport_error(error: reqwest::Error) -> TextGenerationError {
    let error = error.without_url();
    if error.is_timeout() {
        TextGenerationError::timeout(error.to_string())
    } else {
        TextGenerationError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TextGenerationError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TextGenerationError::unauthorized(message)
        }
        StatusCode::TOO_MANY_REQUESTS => TextGenerationError::quota_exceeded(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TextGenerationError::timeout(message)
        }
        _ if status.is_client_error() => TextGenerationError::rejected(message),
        _ => TextGenerationError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
