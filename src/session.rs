use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::conversation::ConversationState;
use crate::errors::ChatResult;
use crate::providers::base::Provider;
use crate::turn::run_turn;

/// Everything one chat needs: the provider, the fixed system prompt and the
/// transcript so far. Built once at startup and owned by the REPL.
pub struct ChatSession {
    id: Uuid,
    provider: Box<dyn Provider>,
    system_prompt: String,
    state: ConversationState,
    turns: usize,
}

impl ChatSession {
    pub fn new(provider: Box<dyn Provider>, system_prompt: String) -> Self {
        Self::with_state(provider, system_prompt, ConversationState::new())
    }

    pub fn with_state(
        provider: Box<dyn Provider>,
        system_prompt: String,
        state: ConversationState,
    ) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, seeded = state.len(), "session started");
        Self {
            id,
            provider,
            system_prompt,
            state,
            turns: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Number of completed turns.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Run one turn and commit it. On failure the transcript is unchanged.
    pub async fn turn(&mut self, user_text: &str) -> ChatResult<String> {
        let span = info_span!("turn", session = %self.id, turn = self.turns + 1);
        let result = run_turn(
            &self.state,
            user_text,
            self.provider.as_ref(),
            &self.system_prompt,
        )
        .instrument(span)
        .await;

        match result {
            Ok((state, reply)) => {
                self.state = state;
                self.turns += 1;
                Ok(reply)
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "turn failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChatError;
    use crate::providers::mock::MockProvider;
    use crate::providers::types::message::{Message, Role};
    use anyhow::Result;

    #[tokio::test]
    async fn test_turns_commit_two_messages_each() -> Result<()> {
        let provider = MockProvider::replying(["Hi there", "Bye"]);
        let mut session = ChatSession::new(Box::new(provider), "Be nice.".to_string());

        assert_eq!(session.turn("Hello").await?, "Hi there");
        assert_eq!(session.turn("See you").await?, "Bye");

        assert_eq!(session.turns(), 2);
        let roles: Vec<Role> = session.state().iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            [Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_turn_is_not_committed() -> Result<()> {
        let provider = MockProvider::new(vec![
            Ok("Hi there".to_string()),
            Err("network down".to_string()),
            Ok("Back again".to_string()),
        ]);
        let seed = ConversationState::with_system("seed")?;
        let mut session = ChatSession::with_state(Box::new(provider), String::new(), seed);

        session.turn("Hello").await?;
        let before = session.state().clone();

        let err = session.turn("trigger error").await.unwrap_err();
        assert_eq!(err, ChatError::ModelInvocation("network down".to_string()));
        assert_eq!(session.state(), &before);
        assert_eq!(session.turns(), 1);

        assert_eq!(session.turn("retry").await?, "Back again");
        assert_eq!(session.state().len(), 1 + 4);
        assert_eq!(
            session.state().last().map(Message::text),
            Some("Back again")
        );
        Ok(())
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = ChatSession::new(Box::new(MockProvider::replying(Vec::<String>::new())), String::new());
        let b = ChatSession::new(Box::new(MockProvider::replying(Vec::<String>::new())), String::new());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.system_prompt(), "");
    }
}
