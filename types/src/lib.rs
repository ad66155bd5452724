//! Core domain types for Parley.
//!
//! Everything here is plain data: no IO, no async, no HTTP. The crate defines
//! the chat domain model (chats, messages, transcripts), proof types for
//! validated content, and the client-side form validation rules.

mod chat;
mod ids;
mod proofs;
mod session;
mod text;
pub mod validation;

pub use chat::{Chat, Message, Sender, Transcript};
pub use ids::{ChatId, MessageId};
pub use proofs::{ComposedText, EmptyTextError};
pub use session::AuthToken;
pub use text::{TITLE_MAX_CHARS, derive_title};
pub use validation::ValidationError;
