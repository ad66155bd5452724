mod auth;
mod chat_flow;
mod validation;
