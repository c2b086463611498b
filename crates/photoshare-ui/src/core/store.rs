//! App-wide yewdux store.
//!
//! # Design
//! - Only the session is process-wide; list state stays in its page.
//! - The auth slice is mutated exclusively through [`AuthSlice::apply`].

use crate::core::auth::{AuthEvent, Session, SessionStatus, SessionUser};
use yewdux::store::Store;

/// Global application store.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Session state.
    pub auth: AuthSlice,
}

/// Session slice.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthSlice {
    /// Status consumed by guards and the navbar.
    pub status: SessionStatus,
    /// Active session tokens.
    pub session: Option<Session>,
}

impl AuthSlice {
    /// Apply a session transition.
    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => {
                tracing::info!(user_id = %session.user.id, "session active");
                self.status = SessionStatus::SignedIn(SessionUser::from(&session.user));
                self.session = Some(session);
            }
            AuthEvent::UserUpdated(user) => {
                if let Some(session) = self.session.as_mut() {
                    session.user = user;
                    self.status = SessionStatus::SignedIn(SessionUser::from(&session.user));
                }
            }
            AuthEvent::SignedOut => {
                tracing::info!("session ended");
                self.status = SessionStatus::SignedOut;
                self.session = None;
            }
        }
    }

    /// Signed-in user id.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(Session::user_id)
    }

    /// Bearer token for outbound requests.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.access_token.as_str())
    }
}
