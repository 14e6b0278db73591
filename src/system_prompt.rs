use std::fs;
use std::path::Path;

use crate::errors::{ChatError, ChatResult};

pub const DEFAULT_PROMPT_FILE: &str = "prompt.txt";

/// Read the whole prompt file as the fixed system message text.
pub fn load_system_prompt(path: impl AsRef<Path>) -> ChatResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        ChatError::Startup(format!(
            "Failed to read system prompt {}: {}",
            path.display(),
            e
        ))
    })
}
