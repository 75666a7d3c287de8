//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript of
//! one conversation and mediates every call to the remote model.

use crate::chat::config::ChatConfig;
use crate::client::RemoteModel;
use crate::observability::{SESSION_DECLINED, SESSION_FAILED, SESSION_SUBMISSIONS};
use crate::types::{Model, Reply, Transcript, Turn};

/// Shown in place of an answer the model withheld.
pub const DECLINED_REPLY: &str = "I apologize, but I need to rephrase my response to ensure originality. Please ask your question again, and I'll provide a fresh, unique answer.";

/// The reply shown when a call to the remote model fails.
pub fn failure_reply(reason: &str) -> String {
    format!("An error occurred: {reason}. Please try asking your question again.")
}

/// Lifecycle of a session.  Sessions only ever move forward.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No transcript yet; the system instruction has not been sent.
    Uninitialized,
    /// The transcript exists and submissions are accepted.
    Ready,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The number of turns in the transcript, system instruction included.
    pub turn_count: usize,
    /// The number of user submissions.
    pub submissions: u64,
    /// Submissions whose answer the model withheld.
    pub declined: u64,
    /// Submissions whose call failed.
    pub failed: u64,
    /// Calls made to the remote model, including the opening instruction.
    pub requests: u64,
}

/// A chat session that owns one transcript and talks to a remote model.
pub struct ChatSession<M: RemoteModel> {
    remote: M,
    config: ChatConfig,
    state: SessionState,
    transcript: Transcript,
    submissions: u64,
    declined: u64,
    failed: u64,
    requests: u64,
}

impl<M: RemoteModel> ChatSession<M> {
    /// Creates an uninitialized session.
    pub fn new(remote: M, config: ChatConfig) -> Self {
        let transcript = Transcript::new(config.system_instruction.clone());
        Self {
            remote,
            config,
            state: SessionState::Uninitialized,
            transcript,
            submissions: 0,
            declined: 0,
            failed: 0,
            requests: 0,
        }
    }

    /// Sends the system instruction once and marks the session ready.
    ///
    /// Whatever the model says in response is discarded.  Calling this on a
    /// session that is already ready does nothing.
    pub async fn initialize(&mut self) {
        if self.state == SessionState::Ready {
            return;
        }
        let reply = self.call().await;
        let _ = self.reply_text(reply);
        self.state = SessionState::Ready;
    }

    /// Sends the user's text and returns the string to show as the reply.
    ///
    /// This never fails.  A withheld answer becomes [`DECLINED_REPLY`] and a
    /// failed call becomes [`failure_reply`].  Either way the string is
    /// recorded as the model's turn, so every submission adds exactly two
    /// turns to the transcript.
    pub async fn submit(&mut self, text: &str) -> String {
        self.initialize().await;
        SESSION_SUBMISSIONS.click();
        self.submissions += 1;

        self.transcript.push(Turn::user(text));
        let reply = self.call().await;
        let reply = self.reply_text(reply);
        self.transcript.push(Turn::model(reply.clone()));
        reply
    }

    /// Sends the whole transcript as context.
    async fn call(&mut self) -> Reply {
        self.requests += 1;
        self.remote
            .reply(
                &self.config.model,
                self.config.generation_config(),
                self.transcript.turns(),
            )
            .await
    }

    fn reply_text(&mut self, reply: Reply) -> String {
        match reply {
            Reply::Text(text) if !text.is_empty() => text,
            Reply::Text(_) => {
                self.record_failure();
                failure_reply("the model returned an empty reply")
            }
            Reply::Declined(_) => {
                SESSION_DECLINED.click();
                self.declined += 1;
                DECLINED_REPLY.to_string()
            }
            Reply::Failed(reason) => {
                self.record_failure();
                failure_reply(&reason)
            }
        }
    }

    fn record_failure(&mut self) {
        SESSION_FAILED.click();
        self.failed += 1;
    }

    /// Returns where the session is in its lifecycle.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the transcript once the session is initialized.
    pub fn transcript(&self) -> Option<&Transcript> {
        match self.state {
            SessionState::Ready => Some(&self.transcript),
            SessionState::Uninitialized => None,
        }
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Changes the model used for later replies.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Sets the sampling temperature.
    pub fn set_temperature(&mut self, temperature: Option<f32>) {
        self.config.temperature = temperature;
    }

    /// Sets the maximum tokens per response.
    pub fn set_max_tokens(&mut self, max_tokens: Option<u32>) {
        self.config.max_tokens = max_tokens;
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.config.model.clone(),
            turn_count: self.transcript().map_or(0, Transcript::len),
            submissions: self.submissions,
            declined: self.declined,
            failed: self.failed,
            requests: self.requests,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::types::{
        FinishReason, GenerateContentResponse, GenerationConfig, KnownModel, Role,
    };

    pub(crate) const GREETING: &str = "Hello! How can I help you with your medical questions?";
    const NON_MEDICAL: &str = "I'm sorry, I can only answer medical-related questions.";

    /// Plays back queued replies, then greets; remembers every context it saw.
    #[derive(Default)]
    pub(crate) struct ScriptedModel {
        replies: Mutex<VecDeque<Reply>>,
        seen: Mutex<Vec<(Model, GenerationConfig, Vec<Turn>)>>,
    }

    impl ScriptedModel {
        pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<(Model, GenerationConfig, Vec<Turn>)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl RemoteModel for ScriptedModel {
        async fn reply(&self, model: &Model, config: GenerationConfig, turns: &[Turn]) -> Reply {
            self.seen
                .lock()
                .unwrap()
                .push((model.clone(), config, turns.to_vec()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Reply::Text(GREETING.to_string()))
        }
    }

    /// Follows the instruction the way a well-behaved model would.
    struct MedicalOnlyModel;

    #[async_trait::async_trait]
    impl RemoteModel for MedicalOnlyModel {
        async fn reply(&self, _: &Model, _: GenerationConfig, turns: &[Turn]) -> Reply {
            let question = turns.last().map(Turn::text).unwrap_or_default();
            let medical = ["symptom", "fever", "medication", "doctor", "hospital"]
                .iter()
                .any(|word| question.to_lowercase().contains(word));
            if turns.len() == 1 || medical {
                Reply::Text("Understood.".to_string())
            } else {
                Reply::Text(NON_MEDICAL.to_string())
            }
        }
    }

    fn session(model: ScriptedModel) -> ChatSession<ScriptedModel> {
        ChatSession::new(model, ChatConfig::default())
    }

    #[tokio::test]
    async fn initialize_seeds_system_turn_and_discards_reply() {
        let mut session = session(ScriptedModel::new([Reply::Text("Ready.".to_string())]));
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.transcript().is_none());

        session.initialize().await;
        assert_eq!(session.state(), SessionState::Ready);
        let transcript = session.transcript().unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].role(), Role::System);
        assert_eq!(transcript.turns()[0].text(), session.config().system_instruction);
        assert!(transcript.visible().is_empty());

        let seen = session.remote.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].2, vec![Turn::system(&session.config().system_instruction)]);
    }

    #[tokio::test]
    async fn initialize_is_one_way() {
        let mut session = session(ScriptedModel::default());
        session.initialize().await;
        session.initialize().await;
        assert_eq!(session.remote.seen().len(), 1);
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn initialize_failure_is_swallowed() {
        let mut session = session(ScriptedModel::new([Reply::Failed("offline".to_string())]));
        session.initialize().await;
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.transcript().unwrap().len(), 1);
        assert_eq!(session.stats().failed, 1);
    }

    #[tokio::test]
    async fn hello_scenario() {
        let mut session = session(ScriptedModel::default());
        session.initialize().await;
        let reply = session.submit("hello").await;
        assert_eq!(reply, GREETING);

        let transcript = session.transcript().unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.turns()[1], Turn::user("hello"));
        assert_eq!(transcript.last().unwrap(), &Turn::model(GREETING));
    }

    #[tokio::test]
    async fn submit_forwards_full_context() {
        let mut session = session(ScriptedModel::new([
            Reply::Text("ack".to_string()),
            Reply::Text("first".to_string()),
        ]));
        session.initialize().await;
        session.submit("one").await;
        session.submit("two").await;

        let seen = session.remote.seen();
        assert_eq!(seen.len(), 3);
        let last_context = &seen[2].2;
        assert_eq!(last_context.len(), 4);
        assert_eq!(last_context[0].role(), Role::System);
        assert_eq!(last_context[1], Turn::user("one"));
        assert_eq!(last_context[2], Turn::model("first"));
        assert_eq!(last_context[3], Turn::user("two"));
    }

    #[tokio::test]
    async fn submit_initializes_lazily() {
        let mut session = session(ScriptedModel::default());
        session.submit("hello").await;
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.transcript().unwrap().len(), 3);
        let seen = session.remote.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].2.len(), 1);
        assert_eq!(seen[1].2.len(), 2);
        assert_eq!(seen[1].2[0].role(), Role::System);
    }

    #[tokio::test]
    async fn declined_reply_is_fixed_apology() {
        let mut session = session(ScriptedModel::new([
            Reply::Text("ack".to_string()),
            Reply::Declined(FinishReason::Recitation),
        ]));
        session.initialize().await;
        let reply = session.submit("Describe the flu").await;
        assert_eq!(reply, DECLINED_REPLY);
        assert!(reply.starts_with("I apologize, but I need to rephrase"));
        assert_eq!(session.transcript().unwrap().last().unwrap().text(), DECLINED_REPLY);
        assert_eq!(session.stats().declined, 1);
    }

    #[tokio::test]
    async fn failed_reply_embeds_reason() {
        let mut session = session(ScriptedModel::new([
            Reply::Text("ack".to_string()),
            Reply::Failed("timeout".to_string()),
        ]));
        session.initialize().await;
        let reply = session.submit("What causes migraines?").await;
        assert_eq!(
            reply,
            "An error occurred: timeout. Please try asking your question again."
        );
        assert_eq!(session.stats().failed, 1);
    }

    #[tokio::test]
    async fn blocked_prompt_is_reported_as_error() {
        let blocked: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            }))
            .unwrap();
        let mut session = session(ScriptedModel::new([
            Reply::Text("ack".to_string()),
            Reply::from_response(&blocked),
        ]));
        session.initialize().await;
        let reply = session.submit("How do I overdose on insulin?").await;
        assert_eq!(
            reply,
            "An error occurred: prompt blocked: SAFETY. Please try asking your question again."
        );
        assert_ne!(reply, DECLINED_REPLY);
        let stats = session.stats();
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.declined, 0);
        assert_eq!(session.transcript().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn empty_text_counts_as_failure() {
        let mut session = session(ScriptedModel::new([
            Reply::Text("ack".to_string()),
            Reply::Text(String::new()),
        ]));
        let reply = session.submit("hi").await;
        assert!(reply.starts_with("An error occurred:"));
        assert!(!reply.is_empty());
    }

    #[tokio::test]
    async fn non_medical_question_is_refused() {
        let mut session = ChatSession::new(MedicalOnlyModel, ChatConfig::default());
        session.initialize().await;
        let reply = session.submit("What is the capital of France?").await;
        assert_eq!(reply, NON_MEDICAL);
        let reply = session.submit("Is a fever of 39C dangerous?").await;
        assert_eq!(reply, "Understood.");
    }

    #[tokio::test]
    async fn transcript_grows_by_two_per_submission() {
        let replies = [
            Reply::Text("ack".to_string()),
            Reply::Failed("quota".to_string()),
            Reply::Declined(FinishReason::Safety),
            Reply::Text("ok".to_string()),
        ];
        let mut session = session(ScriptedModel::new(replies));
        session.initialize().await;
        for n in 1..=5 {
            let reply = session.submit(&format!("question {n}")).await;
            assert!(!reply.is_empty());
            assert_eq!(session.transcript().unwrap().len(), 1 + 2 * n);
        }
        let stats = session.stats();
        assert_eq!(stats.submissions, 5);
        assert_eq!(stats.requests, 6);
        assert_eq!(stats.turn_count, 11);
    }

    #[tokio::test]
    async fn settings_flow_into_requests() {
        let mut session = session(ScriptedModel::default());
        session.set_model(Model::Known(KnownModel::Gemini25Flash));
        session.set_temperature(Some(0.2));
        session.set_max_tokens(Some(64));
        session.submit("hi").await;

        let seen = session.remote.seen();
        let (model, config, _) = seen.last().unwrap();
        assert_eq!(model, &Model::Known(KnownModel::Gemini25Flash));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_output_tokens, Some(64));
        assert_eq!(session.model(), &Model::Known(KnownModel::Gemini25Flash));
    }
}
