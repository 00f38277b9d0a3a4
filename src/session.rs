//! Conversation session management
//!
//! This module implements the append-only turn log owned by one
//! interactive session, and the bounded "recent window" view that is
//! used to build outbound completion requests.

use crate::providers::ChatMessage;
use chrono::{DateTime, Local};

/// Default number of turns included in the request window
pub const DEFAULT_WINDOW: usize = 10;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text entered by the user
    User,
    /// Text produced by the completion provider (or a diagnostic standing
    /// in for one)
    Assistant,
    /// Text injected by the presentation layer; never sent to the provider
    System,
}

impl Role {
    /// Returns the lowercase wire name for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation
///
/// The timestamp is wall-clock time of creation and is display-only;
/// insertion order in the store is authoritative for ordering.
#[derive(Debug, Clone)]
pub struct Turn {
    /// Who produced this turn
    pub role: Role,
    /// Raw content as received; may be empty or whitespace-only, in which
    /// case the turn is stored but excluded from the request window
    pub content: String,
    /// Creation time, for transcript display
    pub timestamp: DateTime<Local>,
}

/// Ordered, append-only log of chat turns scoped to one session
///
/// Turns are appended only, never mutated or deleted individually; the
/// only bulk operation is [`clear`](ConversationStore::clear). Each
/// session owns its store exclusively, so no locking is required.
///
/// # Examples
///
/// ```
/// use heliochat::session::{ConversationStore, Role};
///
/// let mut store = ConversationStore::new();
/// store.append(Role::User, "hello");
/// let window = store.recent_window(10);
/// assert_eq!(window.len(), 1);
/// assert_eq!(window[0].content, "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn with the current timestamp
    ///
    /// Accepts any string; empty or whitespace-only content is stored as
    /// given and filtered out later by [`recent_window`](Self::recent_window).
    /// Prior turns are never touched.
    ///
    /// # Arguments
    ///
    /// * `role` - Who produced the turn
    /// * `content` - The turn content, stored verbatim
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &Turn {
        let index = self.turns.len();
        self.turns.push(Turn {
            role,
            content: content.into(),
            timestamp: Local::now(),
        });
        &self.turns[index]
    }

    /// Returns the bounded request window
    ///
    /// Takes the last `limit` turns (fewer if the conversation is
    /// shorter), drops turns whose role is not user/assistant or whose
    /// trimmed content is empty, and returns the remainder as
    /// `{role, content}` pairs with content trimmed, preserving order.
    ///
    /// An empty result is not an error; callers must treat it as
    /// "nothing to send" and skip the provider call.
    ///
    /// # Examples
    ///
    /// ```
    /// use heliochat::session::{ConversationStore, Role};
    ///
    /// let mut store = ConversationStore::new();
    /// store.append(Role::User, "  hi  ");
    /// store.append(Role::Assistant, "   ");
    /// let window = store.recent_window(10);
    /// assert_eq!(window.len(), 1);
    /// assert_eq!(window[0].content, "hi");
    /// ```
    pub fn recent_window(&self, limit: usize) -> Vec<ChatMessage> {
        let start = self.turns.len().saturating_sub(limit);
        self.turns[start..]
            .iter()
            .filter(|turn| matches!(turn.role, Role::User | Role::Assistant))
            .filter(|turn| !turn.content.trim().is_empty())
            .map(|turn| ChatMessage {
                role: turn.role.as_str().to_string(),
                content: turn.content.trim().to_string(),
            })
            .collect()
    }

    /// Discards all turns, returning the store to its initial empty state
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Returns the number of stored turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turns have been appended
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns a reference to the full turn log, for transcript display
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}
