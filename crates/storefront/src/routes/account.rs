//! Account route handlers.
//!
//! These routes require authentication. The profile page reads through to
//! the account API and reconciles the session's user record with whatever
//! the API returns; an unauthorized answer tears the session down and sends
//! the user back to the login page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use dawe_audio_core::Email;

use crate::account::{ApiResult, ProfileUpdate};
use crate::error::{add_breadcrumb, clear_sentry_user};
use crate::filters;
use crate::middleware::{RequireAuth, clear_auth, save_auth};
use crate::models::CurrentUser;
use crate::state::AppState;

/// One tab on the profile page.
#[derive(Debug, Clone, Copy)]
pub struct TabView {
    pub id: &'static str,
    pub name: &'static str,
}

/// Profile tabs, in display order.
pub const TABS: &[TabView] = &[
    TabView { id: "profile", name: "Profile" },
    TabView { id: "purchases", name: "Purchases" },
    TabView { id: "favorites", name: "Favorites" },
    TabView { id: "settings", name: "Settings" },
];

/// User display data for templates.
#[derive(Clone)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub initial: String,
    pub member_since: String,
}

impl From<&CurrentUser> for ProfileView {
    fn from(user: &CurrentUser) -> Self {
        let member_since = user.member_since.unwrap_or_else(Utc::now);
        Self {
            name: user.name.clone(),
            email: user.email.to_string(),
            initial: user.initial(),
            member_since: member_since.format("%B %-d, %Y").to_string(),
        }
    }
}

/// Account statistics shown on the profile header.
///
/// Placeholder data until the shop backend reports real purchase history.
#[derive(Clone)]
pub struct AccountStats {
    pub total_purchases: u32,
    pub favorite_plugins: u32,
    pub total_spent: String,
}

impl Default for AccountStats {
    fn default() -> Self {
        Self {
            total_purchases: 12,
            favorite_plugins: 8,
            total_spent: "$1247.99".to_string(),
        }
    }
}

/// Query parameters for the profile page.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub tab: Option<String>,
    pub edit: Option<bool>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub user: ProfileView,
    pub stats: AccountStats,
    pub tabs: &'static [TabView],
    pub active_tab: String,
    pub edit_mode: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Tear the session down after an unauthorized answer from the account API.
async fn expire_session(session: &Session, message: &str) -> Response {
    if let Err(e) = clear_auth(session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    clear_sentry_user();

    let url = format!("/auth/login?error={}", urlencoding::encode(message));
    Redirect::to(&url).into_response()
}

/// Display the profile page.
///
/// Fetches the profile from the account API so edits made elsewhere show
/// up; falls back to the session copy when the API is unavailable.
#[instrument(skip(state, session, auth))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    session: Session,
    Query(query): Query<ProfileQuery>,
) -> Response {
    let active_tab = query
        .tab
        .filter(|t| TABS.iter().any(|tab| tab.id == t.as_str()))
        .unwrap_or_else(|| "profile".to_string());

    let (user, error) = match state.account().get_profile(&auth.token).await {
        ApiResult::Success(payload) => match CurrentUser::from_profile(&payload.user) {
            Ok(fresh) => {
                // Reconcile the session copy with the API's answer.
                if fresh != auth.user
                    && let Err(e) = save_auth(&session, &auth.token, &fresh).await
                {
                    tracing::error!("Failed to refresh session user: {e}");
                }
                (fresh, query.error)
            }
            Err(e) => {
                tracing::error!("account API returned an invalid profile: {e}");
                (auth.user, query.error)
            }
        },
        ApiResult::Unauthorized { message } => {
            return expire_session(&session, &message).await;
        }
        ApiResult::Failure { message, .. } => (auth.user, Some(message)),
    };

    AccountIndexTemplate {
        user: ProfileView::from(&user),
        stats: AccountStats::default(),
        tabs: TABS,
        active_tab,
        edit_mode: query.edit.unwrap_or(false),
        error,
        success: query.success,
    }
    .into_response()
}

/// Handle profile update form submission.
///
/// On success the session's user record is replaced with the updated one;
/// failures re-render the page with the server's message and leave the
/// prior state intact.
#[instrument(skip(state, session, auth, form))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Response {
    if let Err(e) = Email::parse(&form.email) {
        let url = format!(
            "/account?edit=true&error={}",
            urlencoding::encode(&e.to_string())
        );
        return Redirect::to(&url).into_response();
    }

    let update = ProfileUpdate {
        name: form.name,
        email: form.email,
    };

    match state.account().update_profile(&auth.token, &update).await {
        ApiResult::Success(payload) => {
            match CurrentUser::from_profile(&payload.user) {
                Ok(fresh) => {
                    if let Err(e) = save_auth(&session, &auth.token, &fresh).await {
                        tracing::error!("Failed to update session user: {e}");
                    }
                }
                Err(e) => {
                    tracing::error!("account API returned an invalid profile: {e}");
                }
            }

            add_breadcrumb("account", "Updated profile", None);

            let url = format!(
                "/account?success={}",
                urlencoding::encode("Profile updated successfully!")
            );
            Redirect::to(&url).into_response()
        }
        ApiResult::Unauthorized { message } => expire_session(&session, &message).await,
        ApiResult::Failure { message, .. } => {
            tracing::warn!("Profile update failed: {message}");
            let url = format!("/account?edit=true&error={}", urlencoding::encode(&message));
            Redirect::to(&url).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_view_formats_member_since() {
        let user = CurrentUser {
            name: "Ada Lovelace".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            member_since: Some("2025-03-01T12:00:00Z".parse().unwrap()),
        };

        let view = ProfileView::from(&user);
        assert_eq!(view.member_since, "March 1, 2025");
        assert_eq!(view.initial, "A");
    }

    #[test]
    fn test_tabs_contain_profile_first() {
        assert_eq!(TABS[0].id, "profile");
        assert_eq!(TABS.len(), 4);
    }
}
