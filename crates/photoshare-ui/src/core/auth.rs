//! Session state, auth events and route guarding.
//!
//! # Design
//! - Session data is plain serialisable data; persistence and transport live in
//!   the app shell.
//! - Every session transition is an [`AuthEvent`] so reducers stay in one place.
//! - Guards are pure: `(route access, session status) -> decision`.

use photoshare_models::{AuthUser, PasswordCredentials, SessionPayload, SignUpRequest, UserMetadata};
use serde::{Deserialize, Serialize};

/// Sessions this close to expiry are refreshed before use.
pub const EXPIRY_MARGIN_SECS: i64 = 60;
/// Minimum accepted password length on registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Persisted session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Absolute expiry (unix seconds).
    pub expires_at: i64,
    /// Session owner.
    pub user: AuthUser,
}

impl Session {
    /// Build a session from a token grant received at `now_secs`.
    #[must_use]
    pub fn from_payload(payload: SessionPayload, now_secs: i64) -> Self {
        let expires_at = payload
            .expires_at
            .unwrap_or_else(|| now_secs.saturating_add(payload.expires_in));
        Self {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            expires_at,
            user: payload.user,
        }
    }

    /// Whether the access token is expired or about to expire.
    #[must_use]
    pub const fn is_expired(&self, now_secs: i64) -> bool {
        now_secs.saturating_add(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// Owner id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Signed-in user as shown by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    /// User id.
    pub id: String,
    /// Account email.
    pub email: Option<String>,
    /// Display name from the account metadata.
    pub display_name: Option<String>,
}

impl From<&AuthUser> for SessionUser {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            display_name: user.user_metadata.display_name.clone(),
        }
    }
}

/// Session status.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Startup: the persisted session has not been validated yet.
    #[default]
    Loading,
    /// No session.
    SignedOut,
    /// Active session.
    SignedIn(SessionUser),
}

/// Session transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// Sign-in, sign-up with session, or a restored session.
    SignedIn(Session),
    /// Tokens were refreshed for the same user.
    TokenRefreshed(Session),
    /// User metadata changed.
    UserUpdated(AuthUser),
    /// Session ended or could not be restored.
    SignedOut,
}

/// Which sessions a route accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Only reachable while signed out (login, register).
    GuestOnly,
    /// Only reachable while signed in.
    Protected,
    /// Reachable either way.
    Public,
}

/// Outcome of a route guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the route.
    Render,
    /// Session still loading; render a placeholder.
    Wait,
    /// Send the visitor to the login page.
    RedirectToLogin,
    /// Send the user to the feed.
    RedirectToFeed,
}

/// Decide whether a route may render for the current session.
#[must_use]
pub const fn guard(access: RouteAccess, status: &SessionStatus) -> GuardDecision {
    match (access, status) {
        (RouteAccess::Public, _) => GuardDecision::Render,
        (_, SessionStatus::Loading) => GuardDecision::Wait,
        (RouteAccess::Protected, SessionStatus::SignedOut) => GuardDecision::RedirectToLogin,
        (RouteAccess::GuestOnly, SessionStatus::SignedIn(_)) => GuardDecision::RedirectToFeed,
        (RouteAccess::Protected, SessionStatus::SignedIn(_))
        | (RouteAccess::GuestOnly, SessionStatus::SignedOut) => GuardDecision::Render,
    }
}

/// Validate the login form.
///
/// # Errors
///
/// Returns a user-facing message when a field is missing.
pub fn validate_login(email: &str, password: &str) -> Result<PasswordCredentials, String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(PasswordCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Validate the registration form.
///
/// # Errors
///
/// Returns a user-facing message for the first invalid field.
pub fn validate_registration(
    email: &str,
    password: &str,
    display_name: &str,
) -> Result<SignUpRequest, String> {
    let email = email.trim();
    let display_name = display_name.trim();
    if !email.contains('@') {
        return Err("Enter a valid email address".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if display_name.is_empty() {
        return Err("Display name is required".to_string());
    }
    Ok(SignUpRequest {
        email: email.to_string(),
        password: password.to_string(),
        data: UserMetadata {
            display_name: Some(display_name.to_string()),
        },
    })
}
