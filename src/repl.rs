use tracing::{info, warn};

use crate::prompt::{InputType, Prompt};
use crate::session::ChatSession;

/// Sent once in place of real input when the input source fails.
pub const FALLBACK_PROMPT: &str = "What do you know about LangGraph?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    Running,
    Terminated,
}

pub struct Repl<P: Prompt> {
    session: ChatSession,
    prompt: P,
    fallback: bool,
    state: ReplState,
}

impl<P: Prompt> Repl<P> {
    pub fn new(session: ChatSession, prompt: P) -> Self {
        Self {
            session,
            prompt,
            fallback: true,
            state: ReplState::Running,
        }
    }

    /// Terminate straight away when input fails instead of running the
    /// fallback turn.
    pub fn without_fallback(mut self) -> Self {
        self.fallback = false;
        self
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub async fn run(&mut self) {
        self.prompt.ready();
        while self.state == ReplState::Running {
            self.state = self.step().await;
        }
        info!(
            session = %self.session.id(),
            turns = self.session.turns(),
            "session closed"
        );
        self.prompt.close();
    }

    /// Read one input and act on it.
    pub async fn step(&mut self) -> ReplState {
        match self.prompt.get_input() {
            Ok(input) => match (input.input_type, input.content) {
                (InputType::Exit, _) => {
                    self.prompt.render_raw("Goodbye!");
                    ReplState::Terminated
                }
                (InputType::Message, Some(content)) => {
                    self.handle_message(&content).await;
                    ReplState::Running
                }
                (InputType::Message, None) | (InputType::AskAgain, _) => ReplState::Running,
            },
            Err(err) => {
                warn!(error = %err, "input unavailable");
                if self.fallback {
                    self.prompt.render_raw(&format!("User: {}", FALLBACK_PROMPT));
                    self.handle_message(FALLBACK_PROMPT).await;
                } else {
                    self.prompt.render_error(&err);
                }
                ReplState::Terminated
            }
        }
    }

    async fn handle_message(&mut self, content: &str) {
        self.prompt.show_busy();
        let result = self.session.turn(content).await;
        self.prompt.hide_busy();

        match result {
            Ok(_) => {
                let state = self.session.state();
                self.prompt.render_transcript(state);
                if let Some(reply) = state.last() {
                    self.prompt.render(reply);
                }
            }
            Err(err) => self.prompt.render_error(&err),
        }
    }
}
