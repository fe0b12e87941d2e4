//! One-shot flash messages.
//!
//! A flash is queued in the session before a redirect and drained by the
//! next page render, so each message is shown exactly once.

use tower_sessions::Session;

use crate::models::session_keys;

/// Queue a flash message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn flash(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut pending: Vec<String> = session
        .get(session_keys::FLASH)
        .await?
        .unwrap_or_default();
    pending.push(message.into());
    session.insert(session_keys::FLASH, pending).await
}

/// Drain all pending flash messages.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn take_flashes(
    session: &Session,
) -> Result<Vec<String>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<String>>(session_keys::FLASH)
        .await?
        .unwrap_or_default())
}
