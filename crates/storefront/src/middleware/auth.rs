//! Authentication state and extractors.
//!
//! The session holds two entries: the bearer token from the account API and
//! the user record it belongs to. All reads and writes go through the
//! helpers in this module so the two entries stay set and cleared together.
//! Nothing here validates the token; validity is delegated entirely to the
//! account API's status codes.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// The raw auth pair as stored in the session.
///
/// Either field may be absent; a missing token means "not authenticated"
/// regardless of whether a user record is still present.
#[derive(Debug, Clone, Default)]
pub struct StoredAuth {
    /// Opaque bearer token for the account API.
    pub token: Option<String>,
    /// The user the token belongs to.
    pub user: Option<CurrentUser>,
}

/// A fully authenticated session: token plus user.
#[derive(Debug, Clone)]
pub struct Authenticated {
    /// Opaque bearer token for the account API.
    pub token: String,
    /// The logged-in user.
    pub user: CurrentUser,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Persist the token and user into the session.
///
/// Both entries are written in one call so a reader never observes a token
/// without its user.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_auth(
    session: &Session,
    token: &str,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::AUTH_TOKEN, token).await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Read the stored auth pair, yielding absent fields if nothing is stored.
pub async fn read_auth(session: &Session) -> StoredAuth {
    let token = session
        .get::<String>(session_keys::AUTH_TOKEN)
        .await
        .ok()
        .flatten();
    let user = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    StoredAuth { token, user }
}

/// Remove both auth entries from the session (logout, expired token).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_auth(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<String>(session_keys::AUTH_TOKEN).await?;
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

/// Whether the session holds a bearer token.
pub async fn is_authenticated(session: &Session) -> bool {
    session
        .get::<String>(session_keys::AUTH_TOKEN)
        .await
        .ok()
        .flatten()
        .is_some()
}

/// The stored user record, or `None` when not logged in.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

// =============================================================================
// Extractors
// =============================================================================

/// Extractor that requires an authenticated session.
///
/// If the user is not logged in, returns a redirect to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(auth): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", auth.user.name)
/// }
/// ```
pub struct RequireAuth(pub Authenticated);

/// Error returned when authentication is required but the user is not logged in.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let stored = read_auth(session).await;

        let rejection = || {
            // Check if this is an API request
            let is_api = parts.uri.path().starts_with("/api/");
            if is_api {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin
            }
        };

        let token = stored.token.ok_or_else(rejection)?;
        let user = stored.user.ok_or_else(rejection)?;

        Ok(Self(Authenticated { token, user }))
    }
}

/// Extractor that optionally gets the authenticated session.
///
/// Unlike `RequireAuth`, this does not reject the request if the user is not
/// logged in.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     OptionalAuth(auth): OptionalAuth,
/// ) -> impl IntoResponse {
///     match auth {
///         Some(a) => format!("Hello, {}!", a.user.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<Authenticated>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = match parts.extensions.get::<Session>() {
            Some(session) => {
                let stored = read_auth(session).await;
                match (stored.token, stored.user) {
                    (Some(token), Some(user)) => Some(Authenticated { token, user }),
                    _ => None,
                }
            }
            None => None,
        };

        Ok(Self(auth))
    }
}
