//! # Conversation
//!
//! Ordered, in-memory message sequence for the lifetime of the screen.
//!
//! Mutations are append and remove-by-id only. Every mutation bumps
//! `revision`, which the view treats as "the sequence changed" and uses to
//! re-attach auto-scroll.

use super::message::Message;

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    revision: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole sequence with the single welcome message.
    /// Running it more than once still leaves exactly one message.
    pub fn reset_with_welcome(&mut self) {
        self.messages = vec![Message::welcome()];
        self.revision += 1;
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }

    /// Removes the message with the given id. Returns the removed message,
    /// or `None` if no such message exists.
    pub fn remove(&mut self, id: &str) -> Option<Message> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        self.revision += 1;
        Some(self.messages.remove(index))
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

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn thinking_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_thinking).count()
    }
}
