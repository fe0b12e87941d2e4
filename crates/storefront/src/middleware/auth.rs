//! Authentication session state.
//!
//! Provides an extractor for the optional logged-in identity plus the
//! helpers that transition a session between anonymous and authenticated.
//! There is no required-auth gate anywhere on this site: the cart and all
//! catalog pages work for anonymous sessions too.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{SessionIdentity, session_keys};

/// Extractor for the current identity, if any.
///
/// Never rejects the request; anonymous sessions yield `None`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     CurrentIdentity(identity): CurrentIdentity,
/// ) -> impl IntoResponse {
///     match identity {
///         Some(who) => format!("Hello, {}!", who.first_name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct CurrentIdentity(pub Option<SessionIdentity>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let identity = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<SessionIdentity>(session_keys::IDENTITY)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(identity))
    }
}

/// Store the logged-in identity in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_identity(
    session: &Session,
    identity: &SessionIdentity,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::IDENTITY, identity).await
}

/// Remove the logged-in identity from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_identity(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<SessionIdentity>(session_keys::IDENTITY).await?;
    Ok(())
}
