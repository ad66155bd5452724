//! Active-chat controller: which chat is showing, and its transcript.

use parley_types::{Chat, Transcript};

/// Where the controller is in its activation lifecycle.
///
/// `None` is a real state, not an error: the compose area targets a new
/// conversation. It is distinct from an active chat with no messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChatPhase {
    /// No chat selected; sending creates a new chat.
    #[default]
    None,
    /// Transcript fetch in flight for a newly activated chat.
    Loading(Chat),
    /// Transcript loaded; ready to send and receive.
    Active(Chat),
}

/// What to do with the optimistic USER message when a send fails.
///
/// The failed send's error is surfaced inline as an agent-side bubble either
/// way; this policy only decides the fate of the message the user already
/// saw appear. Matched exhaustively at the failure site, so adding a
/// rollback variant forces that site to choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnSendFailure {
    /// The optimistic message stays even though it never reached the server.
    KeepOptimisticMessage,
}

/// Tracks the active chat and owns the transcript.
///
/// At most one chat is active at a time. The transcript is append-only while
/// a chat stays active and is replaced wholesale on activation.
#[derive(Debug, Default)]
pub struct ActiveChat {
    phase: ChatPhase,
    transcript: Transcript,
}

impl ActiveChat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &ChatPhase {
        &self.phase
    }

    /// The chat currently receiving messages, if any.
    #[must_use]
    pub fn chat(&self) -> Option<&Chat> {
        match &self.phase {
            ChatPhase::Active(chat) => Some(chat),
            ChatPhase::None | ChatPhase::Loading(_) => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ChatPhase::Loading(_))
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Deactivate: back to the new-chat target with an empty transcript.
    pub(crate) fn clear(&mut self) {
        self.phase = ChatPhase::None;
        self.transcript = Transcript::new();
    }

    /// Start activating `chat`. The previous transcript stays visible until
    /// the fetch resolves and replaces it.
    pub(crate) fn begin_load(&mut self, chat: Chat) {
        self.phase = ChatPhase::Loading(chat);
    }

    /// Finish activation with the fetched transcript (or an empty one when
    /// the fetch failed and the caller chose to degrade).
    pub(crate) fn install(&mut self, chat: Chat, transcript: Transcript) {
        self.phase = ChatPhase::Active(chat);
        self.transcript = transcript;
    }

    /// Transition `None -> Active` for a chat that was just created, seeding
    /// the transcript with its first message. No load round-trip happens.
    pub(crate) fn install_created(&mut self, chat: Chat, first_message: &str) {
        let mut transcript = Transcript::new();
        transcript.push_user(first_message);
        self.phase = ChatPhase::Active(chat);
        self.transcript = transcript;
    }

    pub(crate) fn push_user(&mut self, text: &str) {
        self.transcript.push_user(text);
    }

    pub(crate) fn push_agent(&mut self, text: &str) {
        self.transcript.push_agent(text);
    }
}
