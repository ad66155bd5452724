//! Wire DTOs for the backend's JSON API.
//!
//! Request bodies borrow from the caller; only responses own their data.
//! Field names follow the backend's camelCase convention where they differ
//! from Rust's.

use serde::{Deserialize, Serialize};

use parley_types::{ChatId, Message};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub display_name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateChatRequest<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessageResponse {
    pub text: String,
}

/// Full chat payload from `GET /chat/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatWithMessages {
    pub id: ChatId,
    pub title: String,
    pub messages: Vec<Message>,
}
