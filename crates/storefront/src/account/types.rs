//! Wire types for the account API.
//!
//! The account API speaks JSON. Success bodies carry the requested data
//! (plus an optional human-readable `message`); failure bodies carry
//! `{ "message": ..., "errors": [...] }`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

/// Registration request body for `POST /users/register`.
#[derive(Debug, Serialize)]
pub struct RegisterInput {
    /// Display name for the new account.
    pub name: String,
    /// Email address; also the login identifier.
    pub email: String,
    /// Plaintext password; hashed by the account API.
    pub password: String,
}

/// Login request body for `POST /users/login`.
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile update body for `PUT /users/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// A user record as returned by the account API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response body for login and registration: the bearer token plus the
/// user it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: UserProfile,
}

/// Response body for profile reads and updates.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePayload {
    /// The current user record.
    pub user: UserProfile,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Reported status string (e.g., "ok"), if the service sends one.
    #[serde(default)]
    pub status: Option<String>,
}

/// Failure body shape shared by all endpoints.
///
/// Both fields are optional on the wire; the client substitutes a fixed
/// per-operation default when `message` is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ErrorBody {
    /// Parse a failure body, falling back to an empty body when the
    /// payload is missing or not JSON.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// The server-supplied message, or `default` when the server sent none.
    #[must_use]
    pub fn message_or(self, default: &str) -> (String, Vec<String>) {
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default.to_owned());
        (message, self.errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_server_message() {
        let body = ErrorBody::from_bytes(
            br#"{"message":"Email already registered","errors":["email taken"]}"#,
        );
        let (message, errors) = body.message_or("Registration failed");

        assert_eq!(message, "Email already registered");
        assert_eq!(errors, vec!["email taken".to_string()]);
    }

    #[test]
    fn test_error_body_falls_back_to_default() {
        let body = ErrorBody::from_bytes(b"{}");
        let (message, errors) = body.message_or("Login failed");

        assert_eq!(message, "Login failed");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_error_body_empty_message_falls_back() {
        let body = ErrorBody::from_bytes(br#"{"message":""}"#);
        let (message, _) = body.message_or("Failed to get profile");

        assert_eq!(message, "Failed to get profile");
    }

    #[test]
    fn test_error_body_tolerates_non_json() {
        let body = ErrorBody::from_bytes(b"<html>502 Bad Gateway</html>");
        let (message, errors) = body.message_or("Failed to update profile");

        assert_eq!(message, "Failed to update profile");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_auth_payload_deserializes() {
        let payload: AuthPayload = serde_json::from_str(
            r#"{
                "message": "Login successful",
                "token": "tok_7f3a",
                "user": {"name": "Ada", "email": "ada@example.com"}
            }"#,
        )
        .unwrap();

        assert_eq!(payload.token, "tok_7f3a");
        assert_eq!(payload.user.name, "Ada");
        assert!(payload.user.created_at.is_none());
    }

    #[test]
    fn test_user_profile_with_created_at() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "created_at": "2025-03-01T12:00:00Z"}"#,
        )
        .unwrap();

        assert!(profile.created_at.is_some());
    }
}
