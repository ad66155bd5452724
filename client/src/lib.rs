//! HTTP client for the Parley chat backend.
//!
//! # Architecture
//!
//! [`ApiClient`] wraps the backend's six JSON endpoints:
//!
//! | Operation | Method & Path | Auth |
//! |-----------|---------------|------|
//! | [`ApiClient::register`] | `POST /auth/register` | none |
//! | [`ApiClient::sign_in`] | `POST /auth/login` | none |
//! | [`ApiClient::list_chats`] | `GET /chat` | Bearer |
//! | [`ApiClient::fetch_chat`] | `GET /chat/{id}` | Bearer |
//! | [`ApiClient::create_chat`] | `POST /chat` | Bearer |
//! | [`ApiClient::send_message`] | `POST /chat/{id}` | Bearer |
//!
//! # Error Handling
//!
//! Every method returns a typed [`ClientError`]; the client never swallows a
//! failure. Whether a failed call degrades silently (history and transcript
//! loads) or surfaces inline (sends) is the caller's policy, not this crate's.
//!
//! Non-2xx responses carry the body text (capped at 32 KiB) in
//! [`ClientError::Api`] — the backend reports validation problems as plain
//! text, so the body *is* the user-facing message.
//!
//! There are no retries and no request timeout: every failure is terminal for
//! that one call, and a non-responding backend blocks its caller until the
//! connection drops.

mod wire;

use std::sync::OnceLock;
use std::time::Duration;

use thiserror::Error;

use parley_types::{AuthToken, Chat, ChatId};

pub use wire::ChatWithMessages;

/// Default backend base URL, matching a locally run chat server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_MAX_IDLE_PER_HOST: usize = 8;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-2xx status; `body` is the response text.
    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The request never produced a usable response (connect, IO, or decode).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Shared HTTP client with connection tuning.
///
/// Note the absence of a total request timeout: an accepted-but-silent
/// backend stalls the caller indefinitely, which is the documented behavior
/// of every operation in this crate.
fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build tuned HTTP client: {e}. Using defaults.");
                reqwest::Client::new()
            })
    })
}

async fn read_capped_error_body(response: reqwest::Response) -> String {
    match response.bytes().await {
        Ok(bytes) if bytes.len() > MAX_ERROR_BODY_BYTES => {
            let text = String::from_utf8_lossy(&bytes[..MAX_ERROR_BODY_BYTES]);
            format!("{text}...(truncated)")
        }
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(%e, "Failed to read error response body");
            String::new()
        }
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = read_capped_error_body(response).await;
        Err(ClientError::Api { status, body })
    }
}

/// Client for one backend instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: http_client().clone(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a new user. A 2xx response carries no body.
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&wire::RegisterRequest {
                email: email.trim(),
                display_name: display_name.trim(),
                password,
            })
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    /// Exchange credentials for an auth token.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthToken, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&wire::SignInRequest {
                email: email.trim(),
                password,
            })
            .send()
            .await?;
        let body: wire::SignInResponse = expect_success(response).await?.json().await?;
        Ok(AuthToken::new(body.token))
    }

    /// List the authenticated user's chats, oldest first.
    pub async fn list_chats(&self, token: &AuthToken) -> Result<Vec<Chat>, ClientError> {
        let response = self
            .http
            .get(self.url("/chat"))
            .bearer_auth(token.expose())
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    /// Fetch one chat with its full message transcript.
    pub async fn fetch_chat(
        &self,
        token: &AuthToken,
        id: ChatId,
    ) -> Result<ChatWithMessages, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/chat/{id}")))
            .bearer_auth(token.expose())
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    /// Create a new chat from its first message.
    ///
    /// The server stores the chat and returns its summary; the first agent
    /// reply still comes from a separate [`ApiClient::send_message`] call.
    pub async fn create_chat(
        &self,
        token: &AuthToken,
        title: &str,
        message: &str,
    ) -> Result<Chat, ClientError> {
        let response = self
            .http
            .post(self.url("/chat"))
            .bearer_auth(token.expose())
            .json(&wire::CreateChatRequest {
                title: title.trim(),
                message: message.trim(),
            })
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }

    /// Send a message to a chat; returns the agent's reply text.
    pub async fn send_message(
        &self,
        token: &AuthToken,
        id: ChatId,
        message: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/chat/{id}")))
            .bearer_auth(token.expose())
            .json(&wire::SendMessageRequest {
                message: message.trim(),
            })
            .send()
            .await?;
        let body: wire::SendMessageResponse = expect_success(response).await?.json().await?;
        Ok(body.text)
    }
}
