use crate::conversation::ConversationState;
use crate::errors::{ChatError, ChatResult};
use crate::providers::types::message::Message;

pub mod rustyline;

/// Words that end the session, matched against the whole trimmed line.
pub const EXIT_KEYWORDS: [&str; 3] = ["quit", "exit", "q"];

pub fn is_exit_keyword(line: &str) -> bool {
    let line = line.trim();
    EXIT_KEYWORDS
        .iter()
        .any(|keyword| line.eq_ignore_ascii_case(keyword))
}

/// The terminal side of the REPL: where lines come from and where replies go.
pub trait Prompt {
    fn render(&mut self, message: &Message);
    /// Debug listing of the whole transcript after a turn.
    fn render_transcript(&mut self, state: &ConversationState);
    fn render_error(&mut self, error: &ChatError);
    fn render_raw(&mut self, text: &str);
    /// `Err(ChatError::InputUnavailable)` once no further input can be read.
    fn get_input(&mut self) -> ChatResult<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn close(&mut self) {}
    fn ready(&mut self) {
        self.render_raw("Chat is ready. Type quit, exit or q to leave.");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // only set for InputType::Message
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,  // User sent a message
    Exit,     // User wants to exit the session
}

impl Input {
    pub fn ask_again() -> Self {
        Input {
            input_type: InputType::AskAgain,
            content: None,
        }
    }

    /// Classify one line typed by the user.
    pub fn from_line(line: &str) -> Self {
        if is_exit_keyword(line) {
            Input {
                input_type: InputType::Exit,
                content: None,
            }
        } else if line.trim().is_empty() {
            Self::ask_again()
        } else {
            Input {
                input_type: InputType::Message,
                content: Some(line.to_string()),
            }
        }
    }
}
