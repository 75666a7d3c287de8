//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use arrrg_derive::CommandLine;

use crate::error::Error;
use crate::types::{GenerationConfig, Model};

/// Lowest sampling temperature Gemini accepts.
pub const MIN_TEMPERATURE: f32 = 0.0;
/// Highest sampling temperature Gemini accepts.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// The instruction every conversation opens with.
pub const MEDICAL_SYSTEM_INSTRUCTION: &str = "\
You are a professional medical assistant chatbot. Provide original, conversational responses to medical queries while following these guidelines:

1. If the user greets you (e.g., \"hello\", \"good morning\"), respond with an appropriate greeting and offer assistance with their medical queries.
2. Give concise, clear answers about medical topics including diseases, medications, symptoms, treatments, procedures, healthcare facilities, hospitals, diet, and health advice.
3. For non-medical questions, respond: \"I'm sorry, I can only answer medical-related questions.\"
4. Structure responses naturally with:
   - Brief overview of the topic
   - Key relevant details if asked
   - Practical advice when appropriate
5. Use your own words and avoid quoting or closely paraphrasing other sources.
";

/// Command-line arguments for the medassist-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gemini-1.5-flash)", "MODEL")]
    pub model: Option<String>,

    /// Maximum tokens per response.
    #[arrrg(optional, "Max tokens per response (default: model limit)", "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[arrrg(optional, "Sampling temperature between 0 and 2", "TEMP")]
    pub temperature: Option<f32>,

    /// Override the API base URL.
    #[arrrg(optional, "API base URL", "URL")]
    pub base_url: Option<String>,

    /// API key; falls back to GOOGLE_API_KEY.
    #[arrrg(optional, "API key (default: $GOOGLE_API_KEY)", "KEY")]
    pub api_key: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log every request and response to stderr.
    #[arrrg(flag, "Log API requests and responses to stderr as JSON lines")]
    pub log_requests: bool,
}

// `arrrg::CommandLine` requires `Eq`; `f32` fields prevent deriving it.
impl Eq for ChatArgs {}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// The instruction the transcript opens with.
    pub system_instruction: String,

    /// Maximum tokens per response; `None` leaves it to the model.
    pub max_tokens: Option<u32>,

    /// Optional sampling temperature.
    pub temperature: Option<f32>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// API base URL override.
    pub base_url: Option<String>,

    /// API key override.
    pub api_key: Option<String>,

    /// Whether to log requests and responses to stderr.
    pub log_requests: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gemini-1.5-flash
    /// - System instruction: the medical assistant instruction
    /// - Max tokens and temperature: model defaults
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            system_instruction: MEDICAL_SYSTEM_INSTRUCTION.to_string(),
            max_tokens: None,
            temperature: None,
            use_color: true,
            base_url: None,
            api_key: None,
            log_requests: false,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Replaces the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Sets the maximum tokens per response.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// The sampling options sent with each request.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_tokens,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    /// Resolves command-line arguments, rejecting a temperature Gemini
    /// would refuse on every request.
    fn try_from(args: ChatArgs) -> Result<Self, Self::Error> {
        if let Some(temperature) = args.temperature
            && !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature)
        {
            return Err(Error::validation(
                format!(
                    "{temperature} is outside {MIN_TEMPERATURE}..={MAX_TEMPERATURE}"
                ),
                Some("temperature".to_string()),
            ));
        }
        Ok(ChatConfig {
            model: args.model.map(Model::from).unwrap_or_default(),
            max_tokens: args.max_tokens,
            temperature: args.temperature,
            use_color: !args.no_color,
            base_url: args.base_url,
            api_key: args.api_key,
            log_requests: args.log_requests,
            ..ChatConfig::new()
        })
    }
}
