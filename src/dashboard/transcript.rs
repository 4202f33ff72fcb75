//! Conversation transcript replayed to the assistant.

use crate::api::ChatMessage;
use std::sync::{Mutex, MutexGuard};

/// Append-only, insertion-ordered list of chat turns.
///
/// Lives as long as its dashboard and is never persisted.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Mutex<Vec<ChatMessage>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            entries: Mutex::new(messages),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Transcript mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn push(&self, message: ChatMessage) {
        self.entries().push(message);
    }

    /// Append and return the full history including the new entry, taken
    /// under one lock so a concurrent send cannot slip in between.
    pub fn push_and_snapshot(&self, message: ChatMessage) -> Vec<ChatMessage> {
        let mut entries = self.entries();
        entries.push(message);
        entries.clone()
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.entries().clone()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
