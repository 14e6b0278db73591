use tracing::debug;

use crate::conversation::ConversationState;
use crate::errors::{ChatError, ChatResult};
use crate::providers::base::Provider;
use crate::providers::types::message::{Message, Role};

/// Advance the conversation by one user/assistant exchange.
///
/// The provider sees the whole history including the new user message,
/// exactly once. `state` is only borrowed, so a failed turn leaves the
/// caller's transcript as it was.
pub async fn run_turn<P>(
    state: &ConversationState,
    user_text: &str,
    provider: &P,
    system: &str,
) -> ChatResult<(ConversationState, String)>
where
    P: Provider + ?Sized,
{
    let user_message =
        Message::user(user_text).map_err(|e| ChatError::InvalidInput(e.to_string()))?;
    let pending = state.clone().append(user_message);

    let (reply, usage) = provider
        .complete(system, pending.messages())
        .await
        .map_err(ChatError::model)?;

    if reply.role() != Role::Assistant {
        return Err(ChatError::ModelInvocation(format!(
            "Expected an assistant reply, got {}",
            reply.role()
        )));
    }

    debug!(
        input_tokens = ?usage.input_tokens,
        output_tokens = ?usage.output_tokens,
        total_tokens = ?usage.total_tokens,
        "turn completed"
    );

    let reply_text = reply.text().to_string();
    Ok((pending.append(reply), reply_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::base::Usage;
    use crate::providers::mock::MockProvider;
    use anyhow::Result;
    use async_trait::async_trait;

    struct EchoUserProvider;

    #[async_trait]
    impl Provider for EchoUserProvider {
        async fn complete(&self, _system: &str, messages: &[Message]) -> Result<(Message, Usage)> {
            let last = messages.last().map(|m| m.text()).unwrap_or("echo");
            Ok((Message::user(last)?, Usage::default()))
        }
    }

    #[tokio::test]
    async fn test_turn_from_empty_state() -> Result<()> {
        let provider = MockProvider::replying(["Hi there"]);
        let state = ConversationState::new();

        let (next, reply) = run_turn(&state, "Hello", &provider, "system").await?;

        assert_eq!(reply, "Hi there");
        assert_eq!(next.len(), 2);
        assert_eq!(next.messages()[0].role(), Role::User);
        assert_eq!(next.messages()[0].text(), "Hello");
        assert_eq!(next.messages()[1].role(), Role::Assistant);
        assert_eq!(next.messages()[1].text(), "Hi there");
        assert!(state.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_provider_sees_full_history_once() -> Result<()> {
        let provider = MockProvider::replying(["first", "second"]);
        let state = ConversationState::with_system("seed")?;

        let (state, _) = run_turn(&state, "one", &provider, "system").await?;
        let (state, _) = run_turn(&state, "two", &provider, "system").await?;

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        let seen: Vec<&str> = calls[1].iter().map(|m| m.text()).collect();
        assert_eq!(seen, ["seed", "one", "first", "two"]);
        assert_eq!(state.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_turn_leaves_state_alone() -> Result<()> {
        let provider = MockProvider::new(vec![Err("rate limited".to_string())]);
        let state = ConversationState::new().append(Message::user("earlier")?);
        let before = state.clone();

        let err = run_turn(&state, "trigger error", &provider, "system")
            .await
            .unwrap_err();

        assert_eq!(err, ChatError::ModelInvocation("rate limited".to_string()));
        assert_eq!(state, before);
        assert_eq!(provider.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_provider() {
        let provider = MockProvider::replying(["unused"]);
        let state = ConversationState::new();

        let err = run_turn(&state, "  ", &provider, "system")
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::InvalidInput(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_assistant_reply_is_rejected() -> Result<()> {
        let state = ConversationState::new();
        let err = run_turn(&state, "Hello", &EchoUserProvider, "system")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ChatError::ModelInvocation("Expected an assistant reply, got user".to_string())
        );
        Ok(())
    }
}
