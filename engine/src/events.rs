//! Completion events posted by spawned network tasks.

use parley_client::{ChatWithMessages, ClientError};
use parley_types::{AuthToken, Chat};

/// One network call, one event. Events for chat-scoped operations carry the
/// generation they were spawned under; [`crate::App`] drops events whose
/// generation no longer matches (the user moved on — activated another chat,
/// started a new one, or signed out).
#[derive(Debug)]
pub(crate) enum ChatEvent {
    Registered(Result<(), ClientError>),
    SignedIn(Result<AuthToken, ClientError>),
    HistoryLoaded {
        generation: u64,
        result: Result<Vec<Chat>, ClientError>,
    },
    TranscriptLoaded {
        generation: u64,
        result: Result<ChatWithMessages, ClientError>,
    },
    /// Step 1 of the send pipeline for a new conversation. `text` is the
    /// user's composed message, carried through so the pipeline can continue
    /// with the optimistic append and the send proper.
    ChatCreated {
        generation: u64,
        result: Result<Chat, ClientError>,
        text: String,
    },
    ReplyReceived {
        generation: u64,
        result: Result<String, ClientError>,
    },
}
