use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The originator of a turn in the conversation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The fixed instruction that opens every transcript.
    System,

    /// Text typed by the person using the chat.
    User,

    /// Text produced by the remote model.
    Model,
}

impl Role {
    /// The label a chat bubble for this role carries in the UI.
    ///
    /// The remote model calls itself `model`; the UI calls the same speaker
    /// `assistant`.  Every other role keeps its own name.
    pub fn ui_label(self) -> &'static str {
        match self {
            Role::Model => "assistant",
            Role::User => "user",
            Role::System => "system",
        }
    }

    /// The role name the Gemini API expects on the wire.
    ///
    /// The API only accepts `user` and `model`, so the system instruction
    /// travels as a user message.  The first question therefore follows it
    /// as a second consecutive `user` content; Gemini accepts that and the
    /// instruction stays in context on every request.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::System | Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

/// Error returned when parsing an invalid role string.
#[derive(Debug)]
pub struct RoleParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role: {}", self.invalid_value)
    }
}

impl std::error::Error for RoleParseError {}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "model" => Ok(Role::Model),
            _ => Err(RoleParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}
