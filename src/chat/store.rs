//! The ordered conversation log.
//!
//! Appends during normal flow are confirmed immediately; the one
//! optimistic append per dispatch is tagged with a [`TurnId`] so the
//! dispatch outcome can confirm or revert exactly that entry, even if a
//! reset cleared the log while the request was in flight.

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Identifies one optimistic append for later confirmation or reversal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(u64);

impl TurnId {
    pub(crate) fn new(value: u64) -> Self {
        TurnId(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredMessage {
    message: Message,
    /// Set while the entry awaits dispatch resolution.
    pending: Option<TurnId>,
}

/// Append-only message sequence with bounded, id-keyed rollback.
///
/// Messages are totally ordered by insertion; the store never reorders or
/// deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationStore {
    entries: Vec<StoredMessage>,
}

impl ConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a confirmed message.
    pub fn append(&mut self, message: Message) {
        self.entries.push(StoredMessage {
            message,
            pending: None,
        });
    }

    /// Appends a message optimistically, tagged for later resolution.
    pub fn append_pending(&mut self, message: Message, turn: TurnId) {
        self.entries.push(StoredMessage {
            message,
            pending: Some(turn),
        });
    }

    /// Confirms the optimistic append tagged with `turn`.
    ///
    /// A no-op when no such entry exists (a reset may have cleared it
    /// while the dispatch was in flight).
    pub fn confirm(&mut self, turn: TurnId) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.pending == Some(turn))
        {
            entry.pending = None;
        }
    }

    /// Removes the optimistic append tagged with `turn`.
    ///
    /// Removes at most one entry; a no-op when no such entry exists.
    /// Returns whether an entry was removed.
    pub fn revert(&mut self, turn: TurnId) -> bool {
        match self
            .entries
            .iter()
            .position(|entry| entry.pending == Some(turn))
        {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every message. Invoked only by session reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of messages in the conversation.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the conversation is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered read-only view of the conversation.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().map(|entry| &entry.message)
    }

    /// Ordered owned copy of the conversation.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages().cloned().collect()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.entries.last().map(|entry| &entry.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut store = ConversationStore::new();
        store.append(Message::user("first"));
        store.append(Message::assistant("second"));
        store.append(Message::user("third"));

        let contents: Vec<&str> = store.messages().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn revert_removes_exactly_the_tagged_entry() {
        let mut store = ConversationStore::new();
        store.append(Message::user("kept"));
        store.append_pending(Message::user("optimistic"), TurnId::new(7));

        assert!(store.revert(TurnId::new(7)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.last().unwrap().content, "kept");

        // second revert of the same turn is a no-op
        assert!(!store.revert(TurnId::new(7)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn confirm_clears_pending_tag() {
        let mut store = ConversationStore::new();
        store.append_pending(Message::user("question"), TurnId::new(1));
        store.confirm(TurnId::new(1));

        // once confirmed, the turn can no longer be reverted
        assert!(!store.revert(TurnId::new(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn revert_after_clear_is_noop() {
        let mut store = ConversationStore::new();
        store.append_pending(Message::user("question"), TurnId::new(3));
        store.clear();

        assert!(store.is_empty());
        assert!(!store.revert(TurnId::new(3)));
        store.confirm(TurnId::new(3));
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_is_ordered_copy() {
        let mut store = ConversationStore::new();
        store.append(Message::user("q"));
        store.append(Message::assistant("a").with_source("IPC §154"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].source_label.as_deref(), Some("IPC §154"));
    }
}
