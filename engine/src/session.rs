//! Session store: the auth token and the current route.

use parley_types::AuthToken;

/// Which top-level view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Register,
    Chat,
}

/// Holds the authentication token and exposes the sign-in/sign-out
/// transitions.
///
/// Single-writer: `Session` is owned by [`crate::App`] and handed to
/// consumers by reference; only the two transitions below mutate the token.
#[derive(Debug)]
pub struct Session {
    token: Option<AuthToken>,
    route: Route,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            route: Route::SignIn,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// Navigate between the unauthenticated views.
    pub fn show(&mut self, route: Route) {
        self.route = route;
    }

    /// Store the token and navigate to the chat view.
    pub fn sign_in(&mut self, token: AuthToken) {
        self.token = Some(token);
        self.route = Route::Chat;
    }

    /// Clear the token and navigate to the sign-in view.
    ///
    /// Returns whether a transition actually happened: signing out while
    /// already signed out is a no-op, and the navigation side effect is not
    /// duplicated.
    pub fn sign_out(&mut self) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.token = None;
        self.route = Route::SignIn;
        true
    }
}
