use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use super::types::message::{Message, Role};

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role().as_str(),
                "content": message.text(),
            })
        })
        .collect()
}

/// Convert OpenAI's API response to internal Message format
pub fn openai_response_to_message(response: &Value) -> Result<Message> {
    let original = &response["choices"][0]["message"];
    if original.is_null() {
        return Err(anyhow!("No message in response: {}", response));
    }

    if let Some(role) = original.get("role").and_then(|r| r.as_str()) {
        if role != Role::Assistant.as_str() {
            return Err(anyhow!("Unexpected reply role: {}", role));
        }
    }

    let text = original
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| anyhow!("Reply carried no text content"))?;

    Message::assistant(text)
}

#[derive(Debug, thiserror::Error)]
#[error("Input message too long. Message: {0}")]
pub struct ContextLengthExceededError(String);

pub fn check_openai_context_length_error(error: &Value) -> Option<ContextLengthExceededError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(ContextLengthExceededError(message))
    } else {
        None
    }
}
