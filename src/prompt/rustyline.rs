use std::io::{self, Write};

use bat::WrappingMode;
use cliclack::spinner;
use console::style;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use super::{Input, Prompt};
use crate::conversation::ConversationState;
use crate::errors::{ChatError, ChatResult};
use crate::providers::types::message::Message;

const PROMPT: &str = "user: ";
const THEME: &str = "zenburn";

pub struct RustylinePrompt {
    editor: DefaultEditor,
    spinner: cliclack::ProgressBar,
}

impl RustylinePrompt {
    pub fn new() -> anyhow::Result<Self> {
        Ok(RustylinePrompt {
            editor: DefaultEditor::new()?,
            spinner: spinner(),
        })
    }
}

fn print_markdown(content: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(THEME)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();

    if let Err(e) = printed {
        debug!(error = %e, "markdown rendering failed, printing plain text");
        println!("{}", content);
    }
}

fn flush() {
    let _ = io::stdout().flush();
}

impl Prompt for RustylinePrompt {
    fn render(&mut self, message: &Message) {
        println!("{}", style(format!("{}:", message.role())).bold().cyan());
        print_markdown(message.text());
        println!();
        flush();
    }

    fn render_transcript(&mut self, state: &ConversationState) {
        println!("{}", style(state.dump()).dim());
        flush();
    }

    fn render_error(&mut self, error: &ChatError) {
        eprintln!("{}", style(error).red());
    }

    fn render_raw(&mut self, text: &str) {
        println!("{}", text);
        flush();
    }

    fn get_input(&mut self) -> ChatResult<Input> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::from_line(&line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use 'quit' to leave");
                Ok(Input::ask_again())
            }
            Err(ReadlineError::Eof) => Err(ChatError::InputUnavailable(
                "end of input".to_string(),
            )),
            Err(e) => Err(ChatError::InputUnavailable(e.to_string())),
        }
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("awaiting reply");
    }

    fn hide_busy(&mut self) {
        self.spinner.stop("");
    }
}
