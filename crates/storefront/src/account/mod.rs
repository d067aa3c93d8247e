//! Account API client.
//!
//! The account API owns registration, login, and user profiles. This client
//! wraps its five endpoints and normalizes every transport outcome into an
//! [`ApiResult`] so callers never have to look at raw HTTP:
//!
//! - 2xx responses parse into `Success(data)`
//! - 401 responses become `Unauthorized { message }` - the *caller* decides
//!   whether to tear down the session; the client never mutates state
//! - everything else (including network failures) becomes
//!   `Failure { message, errors }`, preferring the server's message and
//!   falling back to a fixed default per operation
//!
//! Token-scoped operations take the bearer token as an argument; it is read
//! from the session at the call site and attached as an `Authorization`
//! header here.
//!
//! # Example
//!
//! ```rust,ignore
//! use dawe_audio_storefront::account::{AccountClient, ApiResult, Credentials};
//!
//! let client = AccountClient::new(&config.account)?;
//!
//! match client.login(&Credentials { email, password }).await {
//!     ApiResult::Success(auth) => { /* save auth.token + auth.user */ }
//!     ApiResult::Unauthorized { message } | ApiResult::Failure { message, .. } => {
//!         /* show message */
//!     }
//! }
//! ```

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::config::AccountApiConfig;

/// Fixed fallback messages, used when the server does not supply one.
mod defaults {
    pub const REGISTER: &str = "Registration failed";
    pub const LOGIN: &str = "Login failed";
    pub const GET_PROFILE: &str = "Failed to get profile";
    pub const UPDATE_PROFILE: &str = "Failed to update profile";
    pub const HEALTH: &str = "Backend server is not running";
}

/// Normalized outcome of one account API operation.
///
/// Operations never return a raw transport error; the three variants are
/// the complete surface callers match on.
#[derive(Debug, Clone)]
pub enum ApiResult<T> {
    /// The operation succeeded; `T` is the parsed response body.
    Success(T),
    /// The API rejected the bearer token (or the credentials). The caller
    /// is responsible for clearing the session if one exists.
    Unauthorized {
        /// Server message, or the operation's fixed default.
        message: String,
    },
    /// The operation failed for any other reason: validation, business
    /// rules, or transport.
    Failure {
        /// Server message, or the operation's fixed default.
        message: String,
        /// Server-supplied error details, verbatim. Empty on transport
        /// failures.
        errors: Vec<String>,
    },
}

impl<T> ApiResult<T> {
    /// Whether this is a `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Client for the account API.
///
/// Cheaply cloneable; holds one `reqwest::Client` with the configured
/// timeout applied to every request.
#[derive(Clone)]
pub struct AccountClient {
    inner: Arc<AccountClientInner>,
}

struct AccountClientInner {
    client: reqwest::Client,
    base_url: Url,
    health_url: Url,
}

impl AccountClient {
    /// Create a new account API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built or the
    /// configured base URL cannot carry endpoint paths.
    pub fn new(config: &AccountApiConfig) -> Result<Self, AccountClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AccountClientError::Http)?;

        // `Url::join` treats the last path segment as a file unless the base
        // ends with a slash, so normalize here once.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        // The health endpoint lives at the service origin, not under the
        // API prefix (e.g., http://localhost:5500/health).
        let mut health_url = base_url.clone();
        if health_url.cannot_be_a_base() {
            return Err(AccountClientError::InvalidBaseUrl(base_url.to_string()));
        }
        health_url.set_path("/health");
        health_url.set_query(None);

        Ok(Self {
            inner: Arc::new(AccountClientInner {
                client,
                base_url,
                health_url,
            }),
        })
    }

    /// The normalized base URL endpoint paths are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new user.
    ///
    /// `POST {base}/users/register`. On success the account API logs the
    /// user in immediately and returns a token alongside the user record.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: &RegisterInput) -> ApiResult<AuthPayload> {
        self.execute(Method::POST, "users/register", None, Some(input), defaults::REGISTER)
            .await
    }

    /// Log an existing user in.
    ///
    /// `POST {base}/users/login`.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthPayload> {
        self.execute(Method::POST, "users/login", None, Some(credentials), defaults::LOGIN)
            .await
    }

    /// Fetch the authenticated user's profile.
    ///
    /// `GET {base}/users/profile` with a bearer token.
    #[instrument(skip(self, token))]
    pub async fn get_profile(&self, token: &str) -> ApiResult<ProfilePayload> {
        self.execute::<(), ProfilePayload>(
            Method::GET,
            "users/profile",
            Some(token),
            None,
            defaults::GET_PROFILE,
        )
        .await
    }

    /// Update the authenticated user's profile.
    ///
    /// `PUT {base}/users/profile` with a bearer token.
    #[instrument(skip(self, token, update))]
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<ProfilePayload> {
        self.execute(
            Method::PUT,
            "users/profile",
            Some(token),
            Some(update),
            defaults::UPDATE_PROFILE,
        )
        .await
    }

    /// Probe the account service's liveness endpoint.
    ///
    /// Unauthenticated; reports reachability only.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        let request = self.inner.client.get(self.inner.health_url.clone());
        Self::send(request, defaults::HEALTH).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request Execution
    // ─────────────────────────────────────────────────────────────────────────

    /// Build and send one request against `path`, normalizing the outcome.
    async fn execute<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
        default_message: &str,
    ) -> ApiResult<T> {
        let url = match self.inner.base_url.join(path) {
            Ok(url) => url,
            Err(e) => {
                // Only reachable with a malformed endpoint path constant.
                tracing::error!("invalid account API path {path}: {e}");
                return ApiResult::Failure {
                    message: default_message.to_owned(),
                    errors: Vec::new(),
                };
            }
        };

        let mut request = self.inner.client.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Self::send(request, default_message).await
    }

    /// Send a prepared request and normalize status, body, and transport
    /// failures into an [`ApiResult`].
    async fn send<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        default_message: &str,
    ) -> ApiResult<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("account API request failed: {e}");
                return ApiResult::Failure {
                    message: default_message.to_owned(),
                    errors: Vec::new(),
                };
            }
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let bytes = response.bytes().await.unwrap_or_default();
            let (message, _) = ErrorBody::from_bytes(&bytes).message_or(default_message);
            return ApiResult::Unauthorized { message };
        }

        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            let (message, errors) = ErrorBody::from_bytes(&bytes).message_or(default_message);
            tracing::debug!(status = %status, message = %message, "account API rejected request");
            return ApiResult::Failure { message, errors };
        }

        match response.json::<T>().await {
            Ok(data) => ApiResult::Success(data),
            Err(e) => {
                tracing::warn!("failed to parse account API response: {e}");
                ApiResult::Failure {
                    message: default_message.to_owned(),
                    errors: Vec::new(),
                }
            }
        }
    }
}

/// Errors creating an [`AccountClient`].
#[derive(Debug, thiserror::Error)]
pub enum AccountClientError {
    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// The configured base URL cannot carry endpoint paths.
    #[error("invalid account API base URL: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::AccountApiConfig;

    fn client_for(base: &str) -> AccountClient {
        AccountClient::new(&AccountApiConfig {
            base_url: Url::parse(base).unwrap(),
            timeout: Duration::from_secs(10),
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let client = client_for("http://localhost:5500/api");
        assert_eq!(client.base_url().as_str(), "http://localhost:5500/api/");

        // Endpoint paths must join under the prefix, not replace it.
        let joined = client.base_url().join("users/login").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:5500/api/users/login");
    }

    #[test]
    fn test_base_url_with_trailing_slash_unchanged() {
        let client = client_for("http://localhost:5500/api/");
        assert_eq!(client.base_url().as_str(), "http://localhost:5500/api/");
    }

    #[test]
    fn test_health_url_is_at_origin() {
        let client = client_for("http://localhost:5500/api");
        assert_eq!(
            client.inner.health_url.as_str(),
            "http://localhost:5500/health"
        );
    }

    #[test]
    fn test_api_result_is_success() {
        assert!(ApiResult::Success(()).is_success());
        assert!(
            !ApiResult::<()>::Failure {
                message: "Login failed".to_string(),
                errors: vec![],
            }
            .is_success()
        );
        assert!(
            !ApiResult::<()>::Unauthorized {
                message: "Invalid token".to_string(),
            }
            .is_success()
        );
    }
}
