//! In-memory cache of the user's prior chats.

use parley_types::Chat;

/// Chat history for the authenticated session.
///
/// Loaded at most once per session and never refreshed; newly created chats
/// are appended client-side without a re-fetch. Entries are never removed
/// within a session — the only way back to `Unloaded` is signing out.
#[derive(Debug, Default)]
pub enum ChatHistory {
    #[default]
    Unloaded,
    /// Fetch in flight. Chats created before it resolves are held here and
    /// merged into the fetched list, so an early append is never lost.
    Loading { pending: Vec<Chat> },
    Loaded(Vec<Chat>),
}

impl ChatHistory {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ChatHistory::Loading { .. })
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, ChatHistory::Loaded(_))
    }

    /// The cached chats; empty until the load resolves.
    #[must_use]
    pub fn chats(&self) -> &[Chat] {
        match self {
            ChatHistory::Loaded(chats) => chats,
            ChatHistory::Loading { pending } => pending,
            ChatHistory::Unloaded => &[],
        }
    }

    /// Mark the one-per-session load as started.
    ///
    /// Returns false when a load already ran (or is running), making the
    /// cache's fetch-once contract a state check rather than caller
    /// discipline.
    pub(crate) fn begin_load(&mut self) -> bool {
        match self {
            ChatHistory::Unloaded => {
                *self = ChatHistory::Loading {
                    pending: Vec::new(),
                };
                true
            }
            ChatHistory::Loading { .. } | ChatHistory::Loaded(_) => false,
        }
    }

    /// Resolve the load. Chats appended while the fetch was in flight stay
    /// at the end of the list (skipping any the server already returned).
    pub(crate) fn install(&mut self, chats: Vec<Chat>) {
        let mut chats = chats;
        if let ChatHistory::Loading { pending } = self {
            for chat in pending.drain(..) {
                if !chats.iter().any(|c| c.id == chat.id) {
                    chats.push(chat);
                }
            }
        }
        *self = ChatHistory::Loaded(chats);
    }

    /// Append a newly created chat without re-fetching.
    pub(crate) fn append(&mut self, chat: Chat) {
        match self {
            ChatHistory::Loaded(chats) => chats.push(chat),
            ChatHistory::Loading { pending } => pending.push(chat),
            ChatHistory::Unloaded => *self = ChatHistory::Loaded(vec![chat]),
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = ChatHistory::Unloaded;
    }
}
