//! Bridges user input events to the chat session and draws the transcript.

use crate::chat::session::ChatSession;
use crate::client::RemoteModel;
use crate::render::Renderer;
use crate::types::Role;

/// Title shown at the top of the chat.
pub const PAGE_TITLE: &str = "Medical Assistant Chatbot";

/// Icon shown next to the title.
pub const PAGE_ICON: &str = "🏥";

/// Hint shown in the input line.
pub const INPUT_PLACEHOLDER: &str = "Ask a medical question...";

/// Draws the chat and forwards input to a session it borrows.
pub struct Presenter<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
}

impl<'a, R: Renderer + ?Sized> Presenter<'a, R> {
    /// Creates a presenter drawing through `renderer`.
    pub fn new(renderer: &'a mut R) -> Self {
        Self { renderer }
    }

    /// Prints the page title.
    pub fn render_title(&mut self) {
        self.renderer.print_title(PAGE_TITLE, PAGE_ICON);
    }

    /// Draws every visible turn of the session's transcript.
    ///
    /// The system instruction that opens the transcript is never drawn.
    pub fn render_history<M: RemoteModel>(&mut self, session: &ChatSession<M>) {
        let Some(transcript) = session.transcript() else {
            return;
        };
        for turn in transcript.visible() {
            self.renderer.print_bubble(turn.role().ui_label(), turn.text());
        }
    }

    /// Handles one line of user input: draw it, submit it, draw the reply.
    pub async fn on_user_input<M: RemoteModel>(
        &mut self,
        session: &mut ChatSession<M>,
        text: &str,
    ) -> String {
        self.renderer.print_bubble(Role::User.ui_label(), text);
        let reply = session.submit(text).await;
        self.renderer.print_bubble(Role::Model.ui_label(), &reply);
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::config::ChatConfig;
    use crate::chat::session::DECLINED_REPLY;
    use crate::chat::session::tests::{GREETING, ScriptedModel};
    use crate::types::{FinishReason, Reply};

    #[derive(Debug, Clone, PartialEq)]
    enum Drawn {
        Title(String, String),
        Bubble(String, String),
        Error(String),
        Info(String),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        drawn: Vec<Drawn>,
    }

    impl Renderer for RecordingRenderer {
        fn print_title(&mut self, title: &str, icon: &str) {
            self.drawn
                .push(Drawn::Title(title.to_string(), icon.to_string()));
        }

        fn print_bubble(&mut self, label: &str, text: &str) {
            self.drawn
                .push(Drawn::Bubble(label.to_string(), text.to_string()));
        }

        fn print_error(&mut self, error: &str) {
            self.drawn.push(Drawn::Error(error.to_string()));
        }

        fn print_info(&mut self, info: &str) {
            self.drawn.push(Drawn::Info(info.to_string()));
        }
    }

    fn bubble(label: &str, text: &str) -> Drawn {
        Drawn::Bubble(label.to_string(), text.to_string())
    }

    #[test]
    fn title() {
        let mut renderer = RecordingRenderer::default();
        Presenter::new(&mut renderer).render_title();
        assert_eq!(
            renderer.drawn,
            vec![Drawn::Title(PAGE_TITLE.to_string(), PAGE_ICON.to_string())]
        );
    }

    #[tokio::test]
    async fn input_draws_user_then_assistant() {
        let mut session = ChatSession::new(ScriptedModel::default(), ChatConfig::default());
        session.initialize().await;
        let mut renderer = RecordingRenderer::default();
        let reply = Presenter::new(&mut renderer)
            .on_user_input(&mut session, "hello")
            .await;
        assert_eq!(reply, GREETING);
        assert_eq!(
            renderer.drawn,
            vec![bubble("user", "hello"), bubble("assistant", GREETING)]
        );
    }

    #[tokio::test]
    async fn history_skips_system_instruction() {
        let mut session = ChatSession::new(
            ScriptedModel::new([
                Reply::Text("ack".to_string()),
                Reply::Text("Drink fluids.".to_string()),
                Reply::Declined(FinishReason::Recitation),
            ]),
            ChatConfig::default(),
        );
        let mut renderer = RecordingRenderer::default();
        Presenter::new(&mut renderer).render_history(&session);
        assert!(renderer.drawn.is_empty());

        session.submit("I have a cold").await;
        session.submit("Quote a textbook").await;

        let mut renderer = RecordingRenderer::default();
        Presenter::new(&mut renderer).render_history(&session);
        assert_eq!(
            renderer.drawn,
            vec![
                bubble("user", "I have a cold"),
                bubble("assistant", "Drink fluids."),
                bubble("user", "Quote a textbook"),
                bubble("assistant", DECLINED_REPLY),
            ]
        );
        let system = &session.config().system_instruction;
        assert!(
            renderer
                .drawn
                .iter()
                .all(|d| !matches!(d, Drawn::Bubble(_, text) if text == system))
        );
    }
}
