use crate::types::{FinishReason, GenerateContentResponse};

/// The outcome of one call to the remote model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The model answered.
    Text(String),

    /// The candidate was stopped by a safety or originality check.
    Declined(FinishReason),

    /// The call failed; the string describes why.
    Failed(String),
}

impl Reply {
    /// Interpret a successful `generateContent` response.
    ///
    /// A blocked prompt produced no candidate at all, so it is reported as a
    /// failure carrying the block reason. Only a candidate that stopped for a
    /// reason other than completion is declined.
    pub fn from_response(response: &GenerateContentResponse) -> Self {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason())
        {
            return Reply::Failed(format!("prompt blocked: {reason}"));
        }
        let Some(candidate) = response.candidates.first() else {
            return Reply::Failed("the response contained no candidates".to_string());
        };
        if let Some(reason) = candidate.finish_reason()
            && !reason.is_complete()
        {
            return Reply::Declined(reason);
        }
        let text = candidate.text();
        if text.is_empty() {
            Reply::Failed("the response contained no text".to_string())
        } else {
            Reply::Text(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Reply {
        let response: GenerateContentResponse = serde_json::from_value(value).unwrap();
        Reply::from_response(&response)
    }

    #[test]
    fn text_reply() {
        let reply = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello! How can I help?"}]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(reply, Reply::Text("Hello! How can I help?".to_string()));
    }

    #[test]
    fn max_tokens_keeps_text() {
        let reply = parse(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Aspirin is"}]},
                "finishReason": "MAX_TOKENS"
            }]
        }));
        assert_eq!(reply, Reply::Text("Aspirin is".to_string()));
    }

    #[test]
    fn recitation_is_declined() {
        let reply = parse(json!({
            "candidates": [{"finishReason": "RECITATION"}]
        }));
        assert_eq!(reply, Reply::Declined(FinishReason::Recitation));
    }

    #[test]
    fn unknown_finish_reason_is_declined() {
        let reply = parse(json!({
            "candidates": [{
                "content": {"parts": [{"text": "partial"}]},
                "finishReason": "SOMETHING_NEW"
            }]
        }));
        assert_eq!(reply, Reply::Declined(FinishReason::Other));
    }

    #[test]
    fn blocked_prompt_fails() {
        let reply = parse(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }));
        assert_eq!(reply, Reply::Failed("prompt blocked: SAFETY".to_string()));
    }

    #[test]
    fn empty_response_fails() {
        assert_eq!(
            parse(json!({})),
            Reply::Failed("the response contained no candidates".to_string())
        );
        assert_eq!(
            parse(json!({"candidates": [{"finishReason": "STOP"}]})),
            Reply::Failed("the response contained no text".to_string())
        );
    }
}
