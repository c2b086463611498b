//! Auth flows over an [`AuthClient`].

use photoshare_models::SignUpResponse;

use crate::core::auth::{Session, validate_login, validate_registration};
use crate::core::backend::{AuthClient, BackendError};

/// Result of a registration attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created and signed in.
    SignedIn(Session),
    /// Account created; the user must confirm their email first.
    ConfirmationPending,
}

/// Validate and sign in.
///
/// # Errors
///
/// Returns the validation or backend message.
pub async fn sign_in(
    client: &dyn AuthClient,
    email: &str,
    password: &str,
    now_secs: i64,
) -> Result<Session, String> {
    let credentials = validate_login(email, password)?;
    let payload = client
        .sign_in(&credentials)
        .await
        .map_err(|err| err.to_string())?;
    Ok(Session::from_payload(payload, now_secs))
}

/// Validate and register.
///
/// # Errors
///
/// Returns the validation or backend message.
pub async fn sign_up(
    client: &dyn AuthClient,
    email: &str,
    password: &str,
    display_name: &str,
    now_secs: i64,
) -> Result<SignUpOutcome, String> {
    let request = validate_registration(email, password, display_name)?;
    match client.sign_up(&request).await.map_err(|err| err.to_string())? {
        SignUpResponse::Session(payload) => {
            Ok(SignUpOutcome::SignedIn(Session::from_payload(payload, now_secs)))
        }
        SignUpResponse::Pending(_) => Ok(SignUpOutcome::ConfirmationPending),
    }
}

/// Result of validating the persisted session at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The stored session is valid (possibly after a refresh).
    Restored(Session),
    /// Nothing stored, or the backend rejected it; the stored copy should go.
    Rejected,
    /// The backend could not be reached; keep the stored copy for next time.
    Unreachable,
}

fn restore_failure(err: &BackendError, step: &'static str) -> RestoreOutcome {
    if err.is_transient() {
        tracing::warn!(error = %err, step, "session check unavailable; keeping stored session");
        RestoreOutcome::Unreachable
    } else {
        tracing::info!(error = %err, step, "stored session rejected");
        RestoreOutcome::Rejected
    }
}

/// Validate a persisted session, refreshing it when expired.
pub async fn restore_session(
    client: &dyn AuthClient,
    stored: Option<Session>,
    now_secs: i64,
) -> RestoreOutcome {
    let Some(mut session) = stored else {
        return RestoreOutcome::Rejected;
    };
    if session.is_expired(now_secs) {
        match client.refresh_session(&session.refresh_token).await {
            Ok(payload) => session = Session::from_payload(payload, now_secs),
            Err(err) => return restore_failure(&err, "refresh"),
        }
    }
    match client.current_user(&session.access_token).await {
        Ok(user) => {
            session.user = user;
            RestoreOutcome::Restored(session)
        }
        Err(err) => restore_failure(&err, "current_user"),
    }
}

/// Refresh a session ahead of expiry.
///
/// # Errors
///
/// Returns the backend message; the caller should sign out.
pub async fn refresh(
    client: &dyn AuthClient,
    session: &Session,
    now_secs: i64,
) -> Result<Session, String> {
    client
        .refresh_session(&session.refresh_token)
        .await
        .map(|payload| Session::from_payload(payload, now_secs))
        .map_err(|err| err.to_string())
}

/// Revoke the session server-side. Failures are logged and otherwise ignored.
pub async fn sign_out(client: &dyn AuthClient, session: Option<&Session>) {
    let Some(session) = session else {
        return;
    };
    if let Err(err) = client.sign_out(&session.access_token).await {
        tracing::warn!(error = %err, "sign-out request failed; clearing local session anyway");
    }
}
