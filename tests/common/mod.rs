//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests: a wiremock backend speaking
//! the chat server's JSON dialect, plus helpers to drive the app through the
//! auth flow.

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parley_engine::{ApiClient, App, DraftInput};

/// Start a mock server that simulates the chat backend.
pub async fn start_backend() -> MockServer {
    MockServer::start().await
}

pub fn app_for(server: &MockServer) -> App {
    App::new(ApiClient::new(server.uri()))
}

/// Mount a successful login returning `token`.
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": token})),
        )
        .mount(server)
        .await;
}

/// Mount the history listing with the given `[{id, title}]` payload.
pub async fn mount_history(server: &MockServer, chats: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chats))
        .mount(server)
        .await;
}

/// Mount one chat's transcript payload.
pub async fn mount_chat(server: &MockServer, id: i64, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/chat/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount chat creation returning `{id, title}`.
pub async fn mount_create_chat(server: &MockServer, id: i64, title: &str) {
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": id, "title": title})),
        )
        .mount(server)
        .await;
}

/// Mount the agent's reply for messages sent to chat `id`.
pub async fn mount_reply(server: &MockServer, id: i64, text: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/chat/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": text})))
        .mount(server)
        .await;
}

pub fn type_str(input: &mut DraftInput, text: &str) {
    for c in text.chars() {
        input.push(c);
    }
}

pub fn compose(app: &mut App, text: &str) {
    app.compose_mut().clear();
    for c in text.chars() {
        app.compose_mut().push(c);
    }
}

/// Drive the sign-in flow to completion, including the history load that
/// entering the chat view triggers. Expects `mount_login` (and whatever
/// history mock the test wants) to be mounted already.
pub async fn sign_in(app: &mut App) {
    type_str(&mut app.sign_in_form_mut().email, "user@example.com");
    type_str(&mut app.sign_in_form_mut().password, "secret123");
    app.submit_sign_in();
    app.pump_event().await; // SignedIn
    app.pump_event().await; // HistoryLoaded
}
