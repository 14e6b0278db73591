use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::base::{Provider, Usage};
use super::types::message::Message;

/// A mock provider that returns pre-configured responses for testing.
///
/// Each scripted entry is either a reply text or a failure message. Every
/// history the provider is called with is recorded so tests can check what
/// the model would have seen.
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockProvider {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider that answers successfully with each text in turn
    pub fn replying<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(t.into())).collect())
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, _system: &str, messages: &[Message]) -> Result<(Message, Usage)> {
        self.calls.lock().unwrap().push(messages.to_vec());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok((Message::assistant(text)?, Usage::default())),
            Some(Err(reason)) => Err(anyhow!(reason)),
            // Return empty response if no more pre-configured responses
            None => Ok((Message::assistant("")?, Usage::default())),
        }
    }
}
