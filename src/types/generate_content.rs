use serde::{Deserialize, Serialize};

use crate::types::{BlockReason, FinishReason, Turn};

/// A single piece of message content.  Only text parts are produced or read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Text of the part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// A message on the wire: a role and its parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Either `user` or `model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The parts that make up the message.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        Self {
            role: Some(turn.role().wire_name().to_string()),
            parts: vec![Part::text(turn.text())],
        }
    }
}

/// Sampling options sent with every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens in a candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// True when no option is set and the field can be left off the request.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.max_output_tokens.is_none()
    }
}

/// Body of a `models/{model}:generateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The conversation so far, oldest first.
    pub contents: Vec<Content>,

    /// Sampling options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Build a request carrying every turn of a conversation.
    ///
    /// Roles are not merged or reordered, so a leading system turn and the
    /// first user turn are sent as two `user` contents in a row.
    pub fn from_turns(turns: &[Turn], generation_config: GenerationConfig) -> Self {
        Self {
            contents: turns.iter().map(Content::from).collect(),
            generation_config: if generation_config.is_empty() {
                None
            } else {
                Some(generation_config)
            },
        }
    }
}

/// A candidate reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The generated content, absent when the candidate was withheld.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Why generation stopped, as the raw API string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl Candidate {
    /// The concatenated text of every text part.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect()
    }

    /// The parsed finish reason.
    ///
    /// Reasons this crate does not know about are reported as
    /// [`FinishReason::Other`].
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
            .as_deref()
            .map(|reason| reason.parse().unwrap_or(FinishReason::Other))
    }
}

/// Feedback about the prompt itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl PromptFeedback {
    /// The parsed block reason, if the prompt was blocked.
    pub fn block_reason(&self) -> Option<BlockReason> {
        self.block_reason
            .as_deref()
            .map(|reason| reason.parse().unwrap_or(BlockReason::Other))
    }
}

/// Token accounting for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_token_count: u64,

    /// Tokens across all candidates.
    #[serde(default)]
    pub candidates_token_count: u64,

    /// Prompt plus candidates.
    #[serde(default)]
    pub total_token_count: u64,
}

/// Body of a successful `generateContent` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate replies; the first one is the reply.
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Feedback about the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,

    /// Token accounting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_from_turns() {
        let turns = vec![
            Turn::system("be medical"),
            Turn::user("hello"),
            Turn::model("Hi there"),
        ];
        let request = GenerateContentRequest::from_turns(&turns, GenerationConfig::default());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "be medical"}]},
                    {"role": "user", "parts": [{"text": "hello"}]},
                    {"role": "model", "parts": [{"text": "Hi there"}]},
                ]
            })
        );
    }

    #[test]
    fn request_with_generation_config() {
        let config = GenerationConfig {
            temperature: Some(0.5),
            max_output_tokens: Some(256),
        };
        let request = GenerateContentRequest::from_turns(&[Turn::user("hi")], config);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["generationConfig"],
            json!({"temperature": 0.5, "maxOutputTokens": 256})
        );
    }

    #[test]
    fn response_parsing() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello"}, {"text": ", friend"}]},
                "finishReason": "STOP",
                "index": 0,
                "safetyRatings": []
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3, "totalTokenCount": 13},
            "modelVersion": "gemini-1.5-flash"
        }))
        .unwrap();
        let candidate = &response.candidates[0];
        assert_eq!(candidate.text(), "Hello, friend");
        assert_eq!(candidate.finish_reason(), Some(FinishReason::Stop));
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 13);
    }

    #[test]
    fn unknown_finish_reason_is_other() {
        let candidate = Candidate {
            content: None,
            finish_reason: Some("SOMETHING_NEW".to_string()),
        };
        assert_eq!(candidate.finish_reason(), Some(FinishReason::Other));
        assert_eq!(candidate.text(), "");
    }

    #[test]
    fn prompt_feedback_block_reason() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY", "safetyRatings": []}
        }))
        .unwrap();
        assert!(response.candidates.is_empty());
        assert_eq!(
            response.prompt_feedback.unwrap().block_reason(),
            Some(BlockReason::Safety)
        );
    }
}
