//! Client-side validation: nothing invalid reaches the network.

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

/// Mount auth endpoints that must never be called.
async fn mount_forbidden_auth(server: &wiremock::MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn seven_char_password_is_rejected_before_the_network() {
    let server = common::start_backend().await;
    mount_forbidden_auth(&server).await;

    let mut app = common::app_for(&server);
    app.show_register();
    common::type_str(&mut app.register_form_mut().email, "user@example.com");
    common::type_str(&mut app.register_form_mut().display_name, "Ada");
    common::type_str(&mut app.register_form_mut().password, "abcdefg");
    common::type_str(&mut app.register_form_mut().password_confirm, "abcdefg");
    app.submit_register();

    assert!(!app.register_form().busy);
    assert_eq!(
        app.register_form()
            .password_error
            .map(|e| e.to_string())
            .as_deref(),
        Some("Password must be at least 8 characters long")
    );
}

#[tokio::test]
async fn malformed_email_is_rejected_before_the_network() {
    let server = common::start_backend().await;
    mount_forbidden_auth(&server).await;

    let mut app = common::app_for(&server);
    common::type_str(&mut app.sign_in_form_mut().email, "not an email");
    common::type_str(&mut app.sign_in_form_mut().password, "secret123");
    app.submit_sign_in();

    assert!(!app.sign_in_form().busy);
    assert_eq!(
        app.sign_in_form()
            .email_error
            .map(|e| e.to_string())
            .as_deref(),
        Some("Invalid email address")
    );
}

#[tokio::test]
async fn mismatched_confirmation_is_rejected_before_the_network() {
    let server = common::start_backend().await;
    mount_forbidden_auth(&server).await;

    let mut app = common::app_for(&server);
    app.show_register();
    common::type_str(&mut app.register_form_mut().email, "user@example.com");
    common::type_str(&mut app.register_form_mut().display_name, "Ada");
    common::type_str(&mut app.register_form_mut().password, "secret123");
    common::type_str(&mut app.register_form_mut().password_confirm, "secret456");
    app.submit_register();

    assert!(!app.register_form().busy);
    assert_eq!(
        app.register_form()
            .confirm_error
            .map(|e| e.to_string())
            .as_deref(),
        Some("Passwords do not match")
    );
}

#[tokio::test]
async fn empty_fields_report_every_missing_requirement() {
    let server = common::start_backend().await;
    mount_forbidden_auth(&server).await;

    let mut app = common::app_for(&server);
    app.show_register();
    app.submit_register();

    let form = app.register_form();
    assert_eq!(
        form.email_error.map(|e| e.to_string()).as_deref(),
        Some("Email is required")
    );
    assert_eq!(
        form.display_name_error.map(|e| e.to_string()).as_deref(),
        Some("Display name is required")
    );
    assert_eq!(
        form.password_error.map(|e| e.to_string()).as_deref(),
        Some("Password is required")
    );
    assert_eq!(
        form.confirm_error.map(|e| e.to_string()).as_deref(),
        Some("Please confirm your password")
    );
}
