//! Chat domain model: chats, messages, and the transcript.

use serde::{Deserialize, Serialize};

use crate::ids::{ChatId, MessageId};

/// One conversation, as listed in the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
}

/// Who produced a message.
///
/// The backend reports its own messages with the sender `"OLLAMA"`; any
/// sender other than `"USER"` is treated as the agent so a renamed backend
/// model doesn't break decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    User,
    Agent,
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        if value == "USER" { Self::User } else { Self::Agent }
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        match value {
            Sender::User => "USER".to_owned(),
            Sender::Agent => "OLLAMA".to_owned(),
        }
    }
}

/// One entry in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
}

/// Ordered message history for one chat.
///
/// Append-only during a session; replaced wholesale when the active chat
/// changes. Messages loaded from the server keep their server-assigned ids;
/// appended messages are numbered `len + 1` (see [`MessageId`] for why these
/// are ordinals, not identity).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript loaded fresh from the server.
    #[must_use]
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message from the user, returning its assigned id.
    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push(text.into(), Sender::User)
    }

    /// Append a message from the agent (replies and inline-surfaced errors).
    pub fn push_agent(&mut self, text: impl Into<String>) -> MessageId {
        self.push(text.into(), Sender::Agent)
    }

    fn push(&mut self, text: String, sender: Sender) -> MessageId {
        let id = MessageId::new(self.messages.len() as u64 + 1);
        self.messages.push(Message { id, text, sender });
        id
    }
}
