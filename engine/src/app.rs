//! Application state and orchestration.

use std::sync::Arc;

use tokio::sync::mpsc;

use parley_client::{ApiClient, ClientError};
use parley_types::{Chat, ComposedText, Transcript, derive_title};

use crate::chat::{ActiveChat, ChatPhase, OnSendFailure};
use crate::events::ChatEvent;
use crate::forms::{DraftInput, RegisterForm, SignInForm};
use crate::history::ChatHistory;
use crate::session::{Route, Session};

/// Policy for the optimistic USER message when a send fails: the message
/// stays, and the error joins the transcript as an agent bubble.
const ON_SEND_FAILURE: OnSendFailure = OnSendFailure::KeepOptimisticMessage;

const REGISTRATION_NOTICE: &str = "Registration successful. Please sign in.";
const FALLBACK_SUBMIT_ERROR: &str = "An unexpected error occurred. Try again later";

/// Message shown under an API failure on a form: the backend's body text
/// when it said anything, a generic fallback otherwise.
fn submit_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { body, .. } if !body.trim().is_empty() => body.trim().to_owned(),
        ClientError::Api { .. } => FALLBACK_SUBMIT_ERROR.to_owned(),
        ClientError::Http(e) => e.to_string(),
    }
}

/// All client-side state, and the only writer to it.
///
/// Network calls run in spawned tasks that post one completion event each;
/// the frame loop drains them with [`App::process_events`]. The `generation`
/// counter stamps chat-scoped tasks at spawn time so that results arriving
/// after the user moved on are recognized and dropped.
pub struct App {
    client: Arc<ApiClient>,
    session: Session,
    history: ChatHistory,
    chat: ActiveChat,
    sign_in_form: SignInForm,
    register_form: RegisterForm,
    compose: DraftInput,
    /// Single-flight admission control for the send pipeline: while true the
    /// compose input is disabled. No queue, no timeout — a hung send keeps
    /// this set until its connection dies.
    sending: bool,
    generation: u64,
    sidebar_cursor: usize,
    ticks: usize,
    should_quit: bool,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
    events_rx: mpsc::UnboundedReceiver<ChatEvent>,
}

impl App {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            session: Session::new(),
            history: ChatHistory::default(),
            chat: ActiveChat::new(),
            sign_in_form: SignInForm::default(),
            register_form: RegisterForm::default(),
            compose: DraftInput::default(),
            sending: false,
            generation: 0,
            sidebar_cursor: 0,
            ticks: 0,
            should_quit: false,
            events_tx,
            events_rx,
        }
    }

    // --- accessors -------------------------------------------------------

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.session.route()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    #[must_use]
    pub fn active_chat(&self) -> &ActiveChat {
        &self.chat
    }

    #[must_use]
    pub fn sign_in_form(&self) -> &SignInForm {
        &self.sign_in_form
    }

    #[must_use]
    pub fn sign_in_form_mut(&mut self) -> &mut SignInForm {
        &mut self.sign_in_form
    }

    #[must_use]
    pub fn register_form(&self) -> &RegisterForm {
        &self.register_form
    }

    #[must_use]
    pub fn register_form_mut(&mut self) -> &mut RegisterForm {
        &mut self.register_form
    }

    #[must_use]
    pub fn compose(&self) -> &DraftInput {
        &self.compose
    }

    #[must_use]
    pub fn compose_mut(&mut self) -> &mut DraftInput {
        &mut self.compose
    }

    /// Whether a send pipeline is in flight (the compose input is disabled).
    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    #[must_use]
    pub fn sidebar_cursor(&self) -> usize {
        self.sidebar_cursor
    }

    // --- navigation ------------------------------------------------------

    pub fn show_register(&mut self) {
        self.session.show(Route::Register);
    }

    pub fn show_sign_in(&mut self) {
        self.session.show(Route::SignIn);
    }

    /// Per-frame upkeep. Authenticated views observing an absent token
    /// redirect to sign-in — checked on every render, not just on mount.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.session.route() == Route::Chat && !self.session.is_authenticated() {
            self.session.show(Route::SignIn);
        }
        self.ensure_history_loaded();
    }

    /// Frame counter, used by the view to animate spinners.
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.ticks
    }

    // --- auth flows ------------------------------------------------------

    pub fn submit_sign_in(&mut self) {
        if self.sign_in_form.busy {
            return;
        }
        self.sign_in_form.submit_error = None;
        if !self.sign_in_form.validate() {
            return;
        }
        self.sign_in_form.busy = true;

        let email = self.sign_in_form.email.as_str().to_owned();
        let password = self.sign_in_form.password.as_str().to_owned();
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.sign_in(&email, &password).await;
            let _ = tx.send(ChatEvent::SignedIn(result));
        });
    }

    pub fn submit_register(&mut self) {
        if self.register_form.busy {
            return;
        }
        self.register_form.submit_error = None;
        if !self.register_form.validate() {
            return;
        }
        self.register_form.busy = true;

        let email = self.register_form.email.as_str().to_owned();
        let display_name = self.register_form.display_name.as_str().to_owned();
        let password = self.register_form.password.as_str().to_owned();
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.register(&email, &display_name, &password).await;
            let _ = tx.send(ChatEvent::Registered(result));
        });
    }

    /// Clear the token and return to the sign-in view. Idempotent: a second
    /// call finds no token and does nothing. The history cache is scoped to
    /// the authenticated session, so it resets here too.
    pub fn sign_out(&mut self) {
        if !self.session.sign_out() {
            return;
        }
        self.generation += 1;
        self.history.reset();
        self.chat.clear();
        self.compose.clear();
        self.sending = false;
        self.sidebar_cursor = 0;
    }

    fn ensure_history_loaded(&mut self) {
        if self.session.route() != Route::Chat {
            return;
        }
        let Some(token) = self.session.token().cloned() else {
            return;
        };
        if !self.history.begin_load() {
            return;
        }

        let generation = self.generation;
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_chats(&token).await;
            let _ = tx.send(ChatEvent::HistoryLoaded { generation, result });
        });
    }

    // --- active chat -----------------------------------------------------

    /// Activate a chat (loading its transcript), or `None` for the new-chat
    /// target. Either way the previous pipeline's eventual result is
    /// abandoned: the generation moves on and stale events are dropped.
    pub fn activate_chat(&mut self, chat: Option<Chat>) {
        self.generation += 1;
        self.sending = false;

        let Some(chat) = chat else {
            self.chat.clear();
            return;
        };
        let Some(token) = self.session.token().cloned() else {
            return;
        };

        self.chat.begin_load(chat.clone());
        let generation = self.generation;
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_chat(&token, chat.id).await;
            let _ = tx.send(ChatEvent::TranscriptLoaded { generation, result });
        });
    }

    pub fn new_chat(&mut self) {
        self.activate_chat(None);
    }

    pub fn sidebar_next(&mut self) {
        let last = self.history.chats().len().saturating_sub(1);
        self.sidebar_cursor = (self.sidebar_cursor + 1).min(last);
    }

    pub fn sidebar_prev(&mut self) {
        self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
    }

    /// Activate the chat under the sidebar cursor.
    pub fn activate_selected(&mut self) {
        let chat = self.history.chats().get(self.sidebar_cursor).cloned();
        if let Some(chat) = chat {
            self.activate_chat(Some(chat));
        }
    }

    // --- send pipeline ---------------------------------------------------

    /// Send the composed message.
    ///
    /// Empty-after-trim text is a no-op, not an error: nothing is appended
    /// and no network call is issued. Otherwise, with an active chat, the
    /// USER message is appended optimistically *before* the request settles;
    /// with no active chat the creation round-trip runs first and the
    /// optimistic append follows the created chat's installation.
    pub fn send_message(&mut self) {
        if self.sending {
            return;
        }
        if self.chat.is_loading() {
            // No send target until the activation resolves.
            tracing::debug!("Send ignored while a chat activation is in flight");
            return;
        }
        let Ok(text) = ComposedText::new(self.compose.as_str()) else {
            return;
        };
        let Some(token) = self.session.token().cloned() else {
            return;
        };

        self.compose.clear();
        self.sending = true;
        let generation = self.generation;
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();

        match self.chat.chat().map(|chat| chat.id) {
            // Step 1: no active chat — create one from this message.
            None => {
                let title = derive_title(text.as_str());
                let raw = text.into_inner();
                tokio::spawn(async move {
                    let result = client.create_chat(&token, &title, &raw).await;
                    let _ = tx.send(ChatEvent::ChatCreated {
                        generation,
                        result,
                        text: raw,
                    });
                });
            }
            // Steps 2 + 3: optimistic append, then the send proper.
            Some(id) => {
                self.chat.push_user(text.as_str());
                tokio::spawn(async move {
                    let result = client.send_message(&token, id, text.as_str()).await;
                    let _ = tx.send(ChatEvent::ReplyReceived { generation, result });
                });
            }
        }
    }

    // --- event application -----------------------------------------------

    /// Drain and apply all pending completion events. Called once per frame.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Await and apply the next completion event.
    ///
    /// The blocking counterpart to [`App::process_events`], used by tests to
    /// step the pipeline deterministically.
    pub async fn pump_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Registered(Ok(())) => {
                self.register_form.reset();
                self.sign_in_form.notice = Some(REGISTRATION_NOTICE.to_owned());
                self.session.show(Route::SignIn);
            }
            ChatEvent::Registered(Err(err)) => {
                self.register_form.busy = false;
                self.register_form.submit_error = Some(submit_error_message(&err));
            }
            ChatEvent::SignedIn(Ok(token)) => {
                self.sign_in_form = SignInForm::default();
                self.session.sign_in(token);
                self.ensure_history_loaded();
            }
            ChatEvent::SignedIn(Err(err)) => {
                self.sign_in_form.busy = false;
                self.sign_in_form.submit_error = Some(submit_error_message(&err));
            }
            ChatEvent::HistoryLoaded { generation, result } => {
                if generation != self.generation || !self.history.is_loading() {
                    tracing::debug!("Dropping stale history load result");
                    return;
                }
                match result {
                    Ok(chats) => self.history.install(chats),
                    Err(err) => {
                        // Silent-degrade, chosen here and not in the client:
                        // the user sees "no history", never a crash.
                        tracing::warn!(%err, "Failed to load chat history; showing none");
                        self.history.install(Vec::new());
                    }
                }
            }
            ChatEvent::TranscriptLoaded { generation, result } => {
                if generation != self.generation {
                    tracing::debug!("Dropping stale transcript load result");
                    return;
                }
                let ChatPhase::Loading(pending) = self.chat.phase().clone() else {
                    tracing::debug!("Transcript result with no activation in flight");
                    return;
                };
                match result {
                    Ok(fetched) => {
                        let chat = Chat {
                            id: fetched.id,
                            title: fetched.title,
                        };
                        self.chat
                            .install(chat, Transcript::from_messages(fetched.messages));
                    }
                    Err(err) => {
                        // Same silent-degrade policy as the history load: the
                        // chat opens empty rather than erroring.
                        tracing::warn!(%err, chat = %pending.id, "Failed to load transcript");
                        self.chat.install(pending, Transcript::new());
                    }
                }
            }
            ChatEvent::ChatCreated {
                generation,
                result,
                text,
            } => {
                if generation != self.generation {
                    tracing::debug!("Dropping stale chat-creation result");
                    return;
                }
                match result {
                    Ok(chat) => {
                        self.history.append(chat.clone());
                        // Direct None -> Active with the optimistic message;
                        // no separate load round-trip.
                        self.chat.install_created(chat.clone(), &text);
                        self.spawn_send(generation, chat.id, text);
                    }
                    Err(err) => {
                        self.sending = false;
                        self.chat.push_agent(&err.to_string());
                    }
                }
            }
            ChatEvent::ReplyReceived { generation, result } => {
                if generation != self.generation {
                    tracing::debug!("Dropping abandoned send result");
                    return;
                }
                self.sending = false;
                match result {
                    Ok(reply) => self.chat.push_agent(&reply),
                    Err(err) => {
                        match ON_SEND_FAILURE {
                            // The ghost message stays; the failure joins the
                            // conversation where the user is looking.
                            OnSendFailure::KeepOptimisticMessage => {}
                        }
                        self.chat.push_agent(&err.to_string());
                    }
                }
            }
        }
    }

    fn spawn_send(&self, generation: u64, id: parley_types::ChatId, text: String) {
        let Some(token) = self.session.token().cloned() else {
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.send_message(&token, id, &text).await;
            let _ = tx.send(ChatEvent::ReplyReceived { generation, result });
        });
    }
}
