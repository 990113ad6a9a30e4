//! Gemini outbound adapter.
//!
//! Thin HTTP implementation of the `TextGenerationSource` port.

mod dto;
mod http_source;

pub use http_source::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TIMEOUT, GeminiConfig,
    GeminiHttpSource,
};
