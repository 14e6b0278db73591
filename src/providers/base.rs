use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// The language-model collaborator consulted once per turn.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the assistant's next message for `messages`, with `system`
    /// sent ahead of the history.
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<(Message, Usage)>;
}
