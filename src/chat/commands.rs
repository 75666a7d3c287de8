//! Slash command parsing for the chat application.
//!
//! Lines that start with `/` control the session and are never sent to the
//! remote model.

use crate::chat::config::{MAX_TEMPERATURE, MIN_TEMPERATURE};

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Redraw the conversation so far.
    History,

    /// Change the model.
    Model(String),

    /// List the known models.
    Models,

    /// Set the maximum tokens per response.
    MaxTokens(u32),

    /// Clear the maximum tokens per response (use model default).
    ClearMaxTokens,

    /// Set the sampling temperature.
    Temperature(f32),

    /// Clear the sampling temperature (use model default).
    ClearTemperature,

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted as a question.
///
/// # Examples
///
/// ```
/// # use medassist::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/model gemini-1.5-pro").is_some());
/// assert!(parse_command("What are the symptoms of anemia?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "history" => ChatCommand::History,
        "stats" | "status" => ChatCommand::Stats,
        "models" => ChatCommand::Models,
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "max_tokens" => match argument {
            Some(arg) if arg.eq_ignore_ascii_case("clear") => ChatCommand::ClearMaxTokens,
            Some(arg) => match arg.parse::<u32>() {
                Ok(value) if value > 0 => ChatCommand::MaxTokens(value),
                _ => ChatCommand::Invalid("/max_tokens expects a positive integer".to_string()),
            },
            None => ChatCommand::Invalid("/max_tokens requires a value".to_string()),
        },
        "temperature" => match argument {
            Some(arg) if arg.eq_ignore_ascii_case("clear") => ChatCommand::ClearTemperature,
            Some(arg) => match parse_f32_in_range(arg, MIN_TEMPERATURE, MAX_TEMPERATURE) {
                Ok(value) => ChatCommand::Temperature(value),
                Err(err) => ChatCommand::Invalid(format!("/temperature {err}")),
            },
            None => ChatCommand::Invalid("/temperature requires a value".to_string()),
        },
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_f32_in_range(value: &str, min: f32, max: f32) -> Result<f32, String> {
    let parsed: f32 = value
        .parse()
        .map_err(|_| format!("expects a value between {min} and {max}"))?;
    if parsed.is_finite() && parsed >= min && parsed <= max {
        Ok(parsed)
    } else {
        Err(format!("expects a value between {min} and {max}"))
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /history               Show the conversation so far
  /model <name>          Change the model (e.g., /model gemini-1.5-pro)
  /models                List known models
  /max_tokens <n>        Set maximum response tokens (use 'clear' to reset)
  /temperature <v>       Set temperature 0.0-2.0 (use 'clear' to reset)
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
