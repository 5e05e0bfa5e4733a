//! Gemini REST wire types.
//!
//! Only the fields this adapter reads or writes are modeled. Unknown fields
//! are ignored on input, so newer API revisions keep deserializing.

use parley_domain::{Role, Turn};
use serde::{Deserialize, Serialize};

/// Role label the API uses for user turns.
pub const USER_ROLE: &str = "user";
/// Role label the API uses for model turns.
pub const MODEL_ROLE: &str = "model";

/// One message in a `contents` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Non-text parts (inline data, function calls) deserialize
/// with `text: None` and are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(USER_ROLE, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::with_role(MODEL_ROLE, text)
    }

    /// Role-less content, as used for `systemInstruction`.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    fn with_role(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// Concatenated text of all text parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// Narrow to a domain turn.
    pub fn to_turn(&self) -> Turn {
        let text = self.text();
        match Role::from_api_label(self.role.as_deref().unwrap_or_default()) {
            Role::User => Turn::user(text),
            Role::Assistant => Turn::assistant(text),
        }
    }
}

/// Body of `generateContent` / `streamGenerateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [Content],
    pub system_instruction: Content,
}

/// A full response, or one SSE frame of a streamed response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Text of the first candidate (empty when there is none).
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(Content::text)
            .unwrap_or_default()
    }

    /// Why the prompt was blocked, if it was.
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

/// Error body returned with non-2xx statuses (and occasionally mid-stream).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl ApiErrorBody {
    /// `reason` fields of `google.rpc.ErrorInfo` details.
    pub fn reasons(&self) -> impl Iterator<Item = &str> {
        self.details
            .iter()
            .filter_map(|d| d.get("reason").and_then(|r| r.as_str()))
    }
}

/// One decoded SSE frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StreamFrame {
    Error(ApiErrorEnvelope),
    Chunk(GenerateContentResponse),
}
