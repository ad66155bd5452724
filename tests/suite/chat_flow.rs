//! Active-chat and send-pipeline behavior end to end.

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use parley_engine::ChatPhase;
use parley_types::{Chat, ChatId, Sender};

use crate::common;

fn weather_chat() -> Chat {
    Chat {
        id: ChatId::new(1),
        title: "Weather".to_owned(),
    }
}

async fn mount_weather_transcript(server: &wiremock::MockServer) {
    common::mount_chat(
        server,
        1,
        serde_json::json!({
            "id": 1,
            "title": "Weather",
            "messages": [
                {"id": 1, "text": "Is it raining?", "sender": "USER"},
                {"id": 2, "text": "No.", "sender": "OLLAMA"},
            ],
        }),
    )
    .await;
}

#[tokio::test]
async fn activating_a_chat_loads_its_transcript() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(&server, serde_json::json!([{"id": 1, "title": "Weather"}])).await;
    mount_weather_transcript(&server).await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;

    app.activate_chat(Some(weather_chat()));
    assert!(app.active_chat().is_loading());
    app.pump_event().await;

    assert!(matches!(app.active_chat().phase(), ChatPhase::Active(_)));
    let messages = app.active_chat().transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text, "Is it raining?");
    assert_eq!(messages[1].sender, Sender::Agent);
}

#[tokio::test]
async fn switching_chats_replaces_the_transcript_wholesale() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(
        &server,
        serde_json::json!([{"id": 1, "title": "Weather"}, {"id": 2, "title": "Cooking"}]),
    )
    .await;
    mount_weather_transcript(&server).await;
    common::mount_chat(
        &server,
        2,
        serde_json::json!({
            "id": 2,
            "title": "Cooking",
            "messages": [
                {"id": 1, "text": "How long do eggs boil?", "sender": "USER"},
            ],
        }),
    )
    .await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;

    app.activate_chat(Some(weather_chat()));
    app.pump_event().await;
    assert_eq!(app.active_chat().transcript().len(), 2);

    app.activate_chat(Some(Chat {
        id: ChatId::new(2),
        title: "Cooking".to_owned(),
    }));
    app.pump_event().await;

    let messages = app.active_chat().transcript().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "How long do eggs boil?");
}

#[tokio::test]
async fn new_chat_returns_to_the_empty_compose_target() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(&server, serde_json::json!([{"id": 1, "title": "Weather"}])).await;
    mount_weather_transcript(&server).await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;
    app.activate_chat(Some(weather_chat()));
    app.pump_event().await;

    app.new_chat();
    assert_eq!(*app.active_chat().phase(), ChatPhase::None);
    assert!(app.active_chat().transcript().is_empty());
}

#[tokio::test]
async fn send_appends_optimistically_then_reconciles() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(&server, serde_json::json!([{"id": 1, "title": "Weather"}])).await;
    mount_weather_transcript(&server).await;
    Mock::given(method("POST"))
        .and(path("/chat/1"))
        .and(body_json(serde_json::json!({"message": "And tomorrow?"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "Cloudy."})),
        )
        .mount(&server)
        .await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;
    app.activate_chat(Some(weather_chat()));
    app.pump_event().await;

    common::compose(&mut app, "And tomorrow?");
    app.send_message();

    // Visible immediately, before the reply exists.
    let messages = app.active_chat().transcript().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].sender, Sender::User);
    assert!(app.is_sending());

    app.pump_event().await;
    let messages = app.active_chat().transcript().messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3].text, "Cloudy.");
    assert!(!app.is_sending());
}

#[tokio::test]
async fn first_message_creates_installs_and_replies() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(&server, serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({
            "title": "hello",
            "message": "hello",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 10, "title": "hello"})),
        )
        .mount(&server)
        .await;
    common::mount_reply(&server, 10, "Hi! How can I help?").await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;

    common::compose(&mut app, "hello");
    app.send_message();
    app.pump_event().await; // ChatCreated: installed + optimistic message
    assert_eq!(
        app.active_chat().chat().map(|c| c.id),
        Some(ChatId::new(10))
    );
    assert_eq!(app.history().chats().len(), 1);

    app.pump_event().await; // ReplyReceived
    let messages = app.active_chat().transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        (messages[0].sender, messages[0].text.as_str()),
        (Sender::User, "hello")
    );
    assert_eq!(messages[1].sender, Sender::Agent);
}

#[tokio::test]
async fn long_first_message_truncates_the_title_to_200_chars() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(&server, serde_json::json!([])).await;

    let long = "y".repeat(450);
    let expected_title: String = long.chars().take(200).collect();
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({
            "title": expected_title,
            "message": long.clone(),
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 11, "title": expected_title})),
        )
        .expect(1)
        .mount(&server)
        .await;
    common::mount_reply(&server, 11, "That's a lot of y's.").await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;

    common::compose(&mut app, &long);
    app.send_message();
    app.pump_event().await;
    app.pump_event().await;

    assert_eq!(app.history().chats().len(), 1);
}

#[tokio::test]
async fn failed_send_keeps_the_ghost_and_reports_inline() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(&server, serde_json::json!([{"id": 1, "title": "Weather"}])).await;
    mount_weather_transcript(&server).await;
    Mock::given(method("POST"))
        .and(path("/chat/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("model unavailable"))
        .mount(&server)
        .await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;
    app.activate_chat(Some(weather_chat()));
    app.pump_event().await;

    common::compose(&mut app, "anyone home?");
    app.send_message();
    app.pump_event().await;

    let messages = app.active_chat().transcript().messages();
    assert_eq!(messages.len(), 4);
    // The optimistic message survives the failure.
    assert_eq!(messages[2].text, "anyone home?");
    assert_eq!(messages[2].sender, Sender::User);
    // The failure reads like an agent reply, keeping conversational context.
    assert_eq!(messages[3].sender, Sender::Agent);
    assert!(messages[3].text.contains("model unavailable"));
    assert!(!app.is_sending());
}

#[tokio::test]
async fn broken_transcript_fetch_opens_an_empty_conversation() {
    let server = common::start_backend().await;
    common::mount_login(&server, "tok123").await;
    common::mount_history(&server, serde_json::json!([{"id": 9, "title": "Lost"}])).await;
    Mock::given(method("GET"))
        .and(path("/chat/9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("no such chat"))
        .mount(&server)
        .await;

    let mut app = common::app_for(&server);
    common::sign_in(&mut app).await;

    app.activate_chat(Some(Chat {
        id: ChatId::new(9),
        title: "Lost".to_owned(),
    }));
    app.pump_event().await;

    assert!(matches!(app.active_chat().phase(), ChatPhase::Active(_)));
    assert!(app.active_chat().transcript().is_empty());
}
