use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::objectid::create_object_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the transcript. Fields are private so a message cannot change
/// after it has been built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    id: String,
    created: i64,
    content: String,
}

impl Message {
    pub fn new<S: Into<String>>(role: Role, content: S) -> Result<Self> {
        let msg = Self {
            role,
            id: create_object_id("msg"),
            created: Utc::now().timestamp(),
            content: content.into(),
        };
        msg.validate()?;
        Ok(msg)
    }

    fn validate(&self) -> Result<()> {
        if self.role == Role::User && self.content.trim().is_empty() {
            return Err(anyhow!("User message must include non-empty text"));
        }
        Ok(())
    }

    pub fn system<S: Into<String>>(text: S) -> Result<Self> {
        Self::new(Role::System, text)
    }

    pub fn user<S: Into<String>>(text: S) -> Result<Self> {
        Self::new(Role::User, text)
    }

    pub fn assistant<S: Into<String>>(text: S) -> Result<Self> {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created(&self) -> i64 {
        self.created
    }

    pub fn text(&self) -> &str {
        &self.content
    }
}
