use anyhow::Result;
use std::slice::Iter;

use crate::providers::types::message::Message;

/// The ordered transcript of one session.
///
/// The only way to change a state is [`ConversationState::append`], which
/// consumes it and hands back the extended transcript. Earlier messages are
/// never dropped, replaced or reordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript that opens with a system message.
    pub fn with_system<S: Into<String>>(prompt: S) -> Result<Self> {
        Ok(Self::new().append(Message::system(prompt)?))
    }

    pub fn append(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> Iter<'_, Message> {
        self.messages.iter()
    }

    /// One line per message, in transcript order.
    pub fn dump(&self) -> String {
        self.messages
            .iter()
            .enumerate()
            .map(|(index, message)| format!("[{}] {}: {}", index, message.role(), message.text()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a ConversationState {
    type Item = &'a Message;
    type IntoIter = Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::types::message::Role;

    #[test]
    fn test_new_state_is_empty() {
        let state = ConversationState::new();
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
        assert!(state.last().is_none());
        assert_eq!(state.dump(), "");
    }

    #[test]
    fn test_with_system_seeds_one_message() -> Result<()> {
        let state = ConversationState::with_system("You are terse.")?;
        assert_eq!(state.len(), 1);
        assert_eq!(state.messages()[0].role(), Role::System);
        assert_eq!(state.messages()[0].text(), "You are terse.");
        Ok(())
    }

    #[test]
    fn test_append_keeps_order_and_prior_messages() -> Result<()> {
        let first = Message::user("one")?;
        let second = Message::assistant("two")?;
        let third = Message::user("three")?;

        let state = ConversationState::new().append(first.clone());
        let snapshot = state.clone();
        let state = state.append(second.clone()).append(third.clone());

        assert_eq!(state.messages(), &[first.clone(), second, third]);
        // the earlier value is untouched by later appends
        assert_eq!(snapshot.messages(), &[first]);
        Ok(())
    }

    #[test]
    fn test_iteration_is_in_append_order() -> Result<()> {
        let texts = ["a", "b", "c", "d"];
        let state = texts
            .iter()
            .try_fold(ConversationState::new(), |state, text| {
                Ok::<_, anyhow::Error>(state.append(Message::user(*text)?))
            })?;

        let seen: Vec<&str> = state.iter().map(|m| m.text()).collect();
        assert_eq!(seen, texts);

        let seen: Vec<&str> = (&state).into_iter().map(|m| m.text()).collect();
        assert_eq!(seen, texts);
        Ok(())
    }

    #[test]
    fn test_dump_does_not_mutate() -> Result<()> {
        let state = ConversationState::new()
            .append(Message::user("Hello")?)
            .append(Message::assistant("Hi there")?);
        let before = state.clone();

        let first = state.dump();
        let second = state.dump();

        assert_eq!(first, "[0] user: Hello\n[1] assistant: Hi there");
        assert_eq!(first, second);
        assert_eq!(state, before);
        Ok(())
    }
}
