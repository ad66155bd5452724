//! Form state for the sign-in and register views.
//!
//! Validation is client-side and runs on submit, before any network call;
//! per-field errors point at the exact rule that failed. The busy flag
//! disables the submit control while the request is in flight (single-flight,
//! like the send pipeline).

use parley_types::ValidationError;
use parley_types::validation::{
    validate_confirmation, validate_display_name, validate_email, validate_password,
};

/// A single-line text field being edited.
#[derive(Debug, Default, Clone)]
pub struct DraftInput {
    text: String,
}

impl DraftInput {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInField {
    Email,
    Password,
}

impl SignInField {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            SignInField::Email => SignInField::Password,
            SignInField::Password => SignInField::Email,
        }
    }

    // Two fields: forward and backward are the same cycle.
    #[must_use]
    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Sign-in form: email + password.
#[derive(Debug)]
pub struct SignInForm {
    pub email: DraftInput,
    pub password: DraftInput,
    pub email_error: Option<ValidationError>,
    pub password_error: Option<ValidationError>,
    /// API failure from the last submit, shown under the form.
    pub submit_error: Option<String>,
    /// One-shot notice from elsewhere (e.g. "Registration successful.").
    /// When absent the view shows its default greeting.
    pub notice: Option<String>,
    pub busy: bool,
    pub focus: SignInField,
}

impl Default for SignInForm {
    fn default() -> Self {
        Self {
            email: DraftInput::default(),
            password: DraftInput::default(),
            email_error: None,
            password_error: None,
            submit_error: None,
            notice: None,
            busy: false,
            focus: SignInField::Email,
        }
    }
}

impl SignInForm {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    #[must_use]
    pub fn focused_input(&mut self) -> &mut DraftInput {
        match self.focus {
            SignInField::Email => &mut self.email,
            SignInField::Password => &mut self.password,
        }
    }

    /// Run client-side validation, recording per-field errors.
    /// Returns true when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.email_error = validate_email(self.email.as_str()).err();
        self.password_error = validate_password(self.password.as_str()).err();
        self.email_error.is_none() && self.password_error.is_none()
    }

    /// Reset everything except the one-shot notice.
    pub fn reset(&mut self) {
        let notice = self.notice.take();
        *self = Self::default();
        self.notice = notice;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Email,
    DisplayName,
    Password,
    PasswordConfirm,
}

impl RegisterField {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            RegisterField::Email => RegisterField::DisplayName,
            RegisterField::DisplayName => RegisterField::Password,
            RegisterField::Password => RegisterField::PasswordConfirm,
            RegisterField::PasswordConfirm => RegisterField::Email,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            RegisterField::Email => RegisterField::PasswordConfirm,
            RegisterField::DisplayName => RegisterField::Email,
            RegisterField::Password => RegisterField::DisplayName,
            RegisterField::PasswordConfirm => RegisterField::Password,
        }
    }
}

/// Register form: email + display name + password + confirmation.
#[derive(Debug)]
pub struct RegisterForm {
    pub email: DraftInput,
    pub display_name: DraftInput,
    pub password: DraftInput,
    pub password_confirm: DraftInput,
    pub email_error: Option<ValidationError>,
    pub display_name_error: Option<ValidationError>,
    pub password_error: Option<ValidationError>,
    pub confirm_error: Option<ValidationError>,
    pub submit_error: Option<String>,
    pub busy: bool,
    pub focus: RegisterField,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            email: DraftInput::default(),
            display_name: DraftInput::default(),
            password: DraftInput::default(),
            password_confirm: DraftInput::default(),
            email_error: None,
            display_name_error: None,
            password_error: None,
            confirm_error: None,
            submit_error: None,
            busy: false,
            focus: RegisterField::Email,
        }
    }
}

impl RegisterForm {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    #[must_use]
    pub fn focused_input(&mut self) -> &mut DraftInput {
        match self.focus {
            RegisterField::Email => &mut self.email,
            RegisterField::DisplayName => &mut self.display_name,
            RegisterField::Password => &mut self.password,
            RegisterField::PasswordConfirm => &mut self.password_confirm,
        }
    }

    /// Run client-side validation, recording per-field errors.
    /// Returns true when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.email_error = validate_email(self.email.as_str()).err();
        self.display_name_error = validate_display_name(self.display_name.as_str()).err();
        self.password_error = validate_password(self.password.as_str()).err();
        self.confirm_error =
            validate_confirmation(self.password.as_str(), self.password_confirm.as_str()).err();
        self.email_error.is_none()
            && self.display_name_error.is_none()
            && self.password_error.is_none()
            && self.confirm_error.is_none()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
