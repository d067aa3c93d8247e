//! Authentication route handlers.
//!
//! Login and registration delegate credential checks to the account API;
//! the storefront never sees a password hash. On success the bearer token
//! and user record are saved into the session together. Server-supplied
//! failure messages are surfaced verbatim via redirect query parameters.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use dawe_audio_core::Email;

use crate::account::{ApiResult, AuthPayload, Credentials, RegisterInput};
use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_auth, save_auth};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Redirect back to a form page with a verbatim error message.
fn redirect_with_error(path: &str, message: &str) -> Response {
    let url = format!("{path}?error={}", urlencoding::encode(message));
    Redirect::to(&url).into_response()
}

/// Save the auth payload into the session and land on the home page.
async fn establish_session(session: &Session, form_page: &str, auth: AuthPayload) -> Response {
    let user = match CurrentUser::from_profile(&auth.user) {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("account API returned an invalid profile: {e}");
            return redirect_with_error(form_page, "Received an invalid profile, please try again");
        }
    };

    if let Err(e) = save_auth(session, &auth.token, &user).await {
        tracing::error!("Failed to set session: {e}");
        return redirect_with_error(form_page, "Could not start a session, please try again");
    }

    set_sentry_user(user.email.as_str());
    Redirect::to("/").into_response()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
///
/// Authenticates via the account API's login endpoint.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    match state.account().login(&credentials).await {
        ApiResult::Success(auth) => {
            add_breadcrumb("auth", "Signed in", None);
            establish_session(&session, "/auth/login", auth).await
        }
        // A 401 here means bad credentials, not an expired session; there
        // is nothing to tear down yet.
        ApiResult::Unauthorized { message } | ApiResult::Failure { message, .. } => {
            tracing::warn!("Login failed: {message}");
            redirect_with_error("/auth/login", &message)
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
///
/// Creates the account via the account API; on success the user is signed
/// in immediately with the returned token.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    // Validate passwords match
    if form.password != form.password_confirm {
        return redirect_with_error("/auth/register", "Passwords do not match");
    }

    // Validate password length
    if form.password.len() < MIN_PASSWORD_LENGTH {
        return redirect_with_error("/auth/register", "Password must be at least 8 characters");
    }

    // Reject obviously malformed emails before a round-trip to the API
    if let Err(e) = Email::parse(&form.email) {
        return redirect_with_error("/auth/register", &e.to_string());
    }

    let input = RegisterInput {
        name: form.name,
        email: form.email,
        password: form.password,
    };

    match state.account().register(&input).await {
        ApiResult::Success(auth) => {
            add_breadcrumb("auth", "Registered", None);
            establish_session(&session, "/auth/register", auth).await
        }
        ApiResult::Unauthorized { message } | ApiResult::Failure { message, .. } => {
            tracing::warn!("Registration failed: {message}");
            redirect_with_error("/auth/register", &message)
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the auth entries and destroys the session (which also drops the
/// cart, matching its per-session lifecycle).
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_auth(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();
    add_breadcrumb("auth", "Signed out", None);

    Redirect::to("/").into_response()
}
