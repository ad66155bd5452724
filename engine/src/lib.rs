//! Session, chat history, and send-pipeline state machine for Parley.
//!
//! # Architecture
//!
//! [`App`] owns all client-side state and is the only writer to it:
//!
//! - [`Session`] — the auth token and current route. Only the sign-in/out
//!   transitions mutate the token; everything else reads it through `App`.
//! - [`ChatHistory`] — the in-memory list of prior chats, fetched once per
//!   authenticated session and appended to as chats are created.
//! - [`ActiveChat`] — which chat (if any) is active, and its transcript.
//! - The send pipeline — optimistic transcript updates plus the network
//!   round-trips, guarded by a single-flight busy flag.
//!
//! # Concurrency
//!
//! Network calls run in spawned tasks; each task posts exactly one
//! completion event back through an mpsc channel. The
//! frame loop drains the channel via [`App::process_events`], so all state
//! mutation happens on the caller's thread and the UI stays live while
//! requests are in flight. Events that outlive the state they were spawned
//! for (the user activated another chat, started a new one, or signed out)
//! carry a stale generation number and are dropped — there is no
//! cancellation, the abandoned task simply finishes into the void.

mod app;
mod chat;
mod events;
mod forms;
mod history;
mod session;


pub use app::App;
pub use chat::{ActiveChat, ChatPhase, OnSendFailure};
pub use forms::{DraftInput, RegisterField, RegisterForm, SignInField, SignInForm};
pub use history::ChatHistory;
pub use session::{Route, Session};

pub use parley_client::{ApiClient, ClientError};
pub use parley_types::{Chat, ChatId, Message, MessageId, Sender, Transcript};
