use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reasons why the model stopped generating a candidate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// The server did not say why generation stopped.
    FinishReasonUnspecified,

    /// Natural stop point or a provided stop sequence.
    Stop,

    /// The response reached the maximum token limit.
    MaxTokens,

    /// The candidate was flagged by the safety filters.
    Safety,

    /// The candidate was flagged for reciting training data.
    Recitation,

    /// The candidate used an unsupported language.
    Language,

    /// The candidate contained a forbidden term.
    Blocklist,

    /// The candidate contained prohibited content.
    ProhibitedContent,

    /// The candidate contained sensitive personally identifiable information.
    Spii,

    /// The model produced an invalid function call.
    MalformedFunctionCall,

    /// Generated images were flagged by the safety filters.
    ImageSafety,

    /// Any other reason.
    Other,
}

impl FinishReason {
    /// True when the candidate ended normally and its text can be shown.
    ///
    /// Anything else means the model withheld the content.
    pub fn is_complete(self) -> bool {
        matches!(
            self,
            FinishReason::FinishReasonUnspecified | FinishReason::Stop | FinishReason::MaxTokens
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            FinishReason::FinishReasonUnspecified => "FINISH_REASON_UNSPECIFIED",
            FinishReason::Stop => "STOP",
            FinishReason::MaxTokens => "MAX_TOKENS",
            FinishReason::Safety => "SAFETY",
            FinishReason::Recitation => "RECITATION",
            FinishReason::Language => "LANGUAGE",
            FinishReason::Blocklist => "BLOCKLIST",
            FinishReason::ProhibitedContent => "PROHIBITED_CONTENT",
            FinishReason::Spii => "SPII",
            FinishReason::MalformedFunctionCall => "MALFORMED_FUNCTION_CALL",
            FinishReason::ImageSafety => "IMAGE_SAFETY",
            FinishReason::Other => "OTHER",
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid finish reason string.
#[derive(Debug)]
pub struct FinishReasonParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for FinishReasonParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown finish reason: {}", self.invalid_value)
    }
}

impl std::error::Error for FinishReasonParseError {}

impl FromStr for FinishReason {
    type Err = FinishReasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FINISH_REASON_UNSPECIFIED" => Ok(FinishReason::FinishReasonUnspecified),
            "STOP" => Ok(FinishReason::Stop),
            "MAX_TOKENS" => Ok(FinishReason::MaxTokens),
            "SAFETY" => Ok(FinishReason::Safety),
            "RECITATION" => Ok(FinishReason::Recitation),
            "LANGUAGE" => Ok(FinishReason::Language),
            "BLOCKLIST" => Ok(FinishReason::Blocklist),
            "PROHIBITED_CONTENT" => Ok(FinishReason::ProhibitedContent),
            "SPII" => Ok(FinishReason::Spii),
            "MALFORMED_FUNCTION_CALL" => Ok(FinishReason::MalformedFunctionCall),
            "IMAGE_SAFETY" => Ok(FinishReason::ImageSafety),
            "OTHER" => Ok(FinishReason::Other),
            _ => Err(FinishReasonParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

/// Reasons why the prompt itself was blocked before any candidate was made.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    /// The server did not say why the prompt was blocked.
    BlockReasonUnspecified,

    /// The prompt was flagged by the safety filters.
    Safety,

    /// The prompt contained a forbidden term.
    Blocklist,

    /// The prompt contained prohibited content.
    ProhibitedContent,

    /// Images in the prompt were flagged by the safety filters.
    ImageSafety,

    /// Any other reason.
    Other,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BlockReason::BlockReasonUnspecified => "BLOCK_REASON_UNSPECIFIED",
            BlockReason::Safety => "SAFETY",
            BlockReason::Blocklist => "BLOCKLIST",
            BlockReason::ProhibitedContent => "PROHIBITED_CONTENT",
            BlockReason::ImageSafety => "IMAGE_SAFETY",
            BlockReason::Other => "OTHER",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BlockReason {
    type Err = FinishReasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLOCK_REASON_UNSPECIFIED" => Ok(BlockReason::BlockReasonUnspecified),
            "SAFETY" => Ok(BlockReason::Safety),
            "BLOCKLIST" => Ok(BlockReason::Blocklist),
            "PROHIBITED_CONTENT" => Ok(BlockReason::ProhibitedContent),
            "IMAGE_SAFETY" => Ok(BlockReason::ImageSafety),
            "OTHER" => Ok(BlockReason::Other),
            _ => Err(FinishReasonParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}
