//! Driven port for the third-party generative text service.
//!
//! The domain only hands over a prompt and expects plain text back. Adapters
//! own credentials, endpoints and response decoding.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures surfaced while generating text.
    pub enum TextGenerationError {
        /// The adapter is missing required configuration, such as an API key.
        Configuration { message: String } =>
            "text generation is not configured: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "text generation transport failed: {message}",
        /// The call exceeded its time budget.
        Timeout { message: String } =>
            "text generation timed out: {message}",
        /// The service rejected the credentials.
        Unauthorized { message: String } =>
            "text generation credentials rejected: {message}",
        /// The service refused the call because a quota was exhausted.
        QuotaExceeded { message: String } =>
            "text generation quota exceeded: {message}",
        /// The service rejected the request as invalid.
        Rejected { message: String } =>
            "text generation request rejected: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "text generation response could not be decoded: {message}",
        /// The response decoded but carried no text.
        EmptyResponse { message: String } =>
            "text generation returned no text: {message}",
    }
}

impl TextGenerationError {
    /// Short stable label used in structured logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Unauthorized { .. } => "unauthorized",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::Rejected { .. } => "rejected",
            Self::Decode { .. } => "decode",
            Self::EmptyResponse { .. } => "empty_response",
        }
    }
}

/// Port for generating text from a prompt.
///
/// Implementations make exactly one attempt per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerationSource: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError>;
}
