// Public modules
pub mod finish_reason;
pub mod generate_content;
pub mod model;
pub mod reply;
pub mod role;
pub mod transcript;
pub mod turn;

// Re-exports
pub use finish_reason::{BlockReason, FinishReason, FinishReasonParseError};
pub use generate_content::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    PromptFeedback, UsageMetadata,
};
pub use model::{KnownModel, Model, ModelParseError};
pub use reply::Reply;
pub use role::{Role, RoleParseError};
pub use transcript::Transcript;
pub use turn::Turn;
