//! Wire types for the Gemini `generateContent` call.
//!
//! Responses are decoded into these DTOs first and reduced to plain text in
//! one pass. Two shapes are accepted: a flat `{ "text": ... }` object and the
//! nested `candidates[].content.parts[].text` structure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequestDto<'a> {
    pub(super) contents: [RequestContentDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct RequestContentDto<'a> {
    pub(super) parts: [RequestPartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct RequestPartDto<'a> {
    pub(super) text: &'a str,
}

impl<'a> GenerateContentRequestDto<'a> {
    pub(super) const fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContentDto {
                parts: [RequestPartDto { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum GenerateContentResponseDto {
    Flat {
        text: String,
    },
    Candidates {
        #[serde(default)]
        candidates: Vec<CandidateDto>,
        #[serde(default, rename = "promptFeedback")]
        prompt_feedback: Option<PromptFeedbackDto>,
    },
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateDto {
    #[serde(default)]
    content: Option<CandidateContentDto>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidatePartDto {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PromptFeedbackDto {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

impl CandidateDto {
    fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

impl GenerateContentResponseDto {
    /// Extract the generated text, or describe why there is none.
    pub(super) fn into_text(self) -> Result<String, String> {
        match self {
            Self::Flat { text } if !text.trim().is_empty() => Ok(text),
            Self::Flat { .. } => Err("response text was blank".to_owned()),
            Self::Candidates {
                candidates,
                prompt_feedback,
            } => {
                if let Some(text) = candidates
                    .iter()
                    .map(CandidateDto::text)
                    .find(|text| !text.trim().is_empty())
                {
                    return Ok(text);
                }
                if let Some(reason) = prompt_feedback.and_then(|feedback| feedback.block_reason) {
                    return Err(format!("prompt blocked: {reason}"));
                }
                match candidates.iter().find_map(|c| c.finish_reason.as_deref()) {
                    Some(reason) => Err(format!("no text in candidates (finish reason {reason})")),
                    None => Err("response carried no candidates".to_owned()),
                }
            }
        }
    }
}
