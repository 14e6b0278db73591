use thiserror::Error;

/// Failure classes of a chat session.
///
/// The provider layer speaks `anyhow`; everything is folded into one of these
/// variants at the turn boundary so the REPL can treat each class on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Prompt file missing or unreadable, credentials missing, client setup failed.
    #[error("Startup failed: {0}")]
    Startup(String),

    /// The model collaborator failed (network, auth, rate limit, bad response).
    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    /// The interactive input source is gone.
    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

impl ChatError {
    pub fn model(err: anyhow::Error) -> Self {
        ChatError::ModelInvocation(format!("{:#}", err))
    }

    pub fn startup(err: anyhow::Error) -> Self {
        ChatError::Startup(format!("{:#}", err))
    }
}
