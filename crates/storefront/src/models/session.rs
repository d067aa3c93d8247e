//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dawe_audio_core::Email;

use crate::account::UserProfile;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// User's display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// When the account was created, if the account API reported it.
    pub member_since: Option<DateTime<Utc>>,
}

impl CurrentUser {
    /// Build the session identity from an account API profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile's email does not parse; the account
    /// API should never send one, but a malformed record must not be
    /// persisted into the session.
    pub fn from_profile(profile: &UserProfile) -> Result<Self, dawe_audio_core::EmailError> {
        Ok(Self {
            name: profile.name.clone(),
            email: Email::parse(&profile.email)?,
            member_since: profile.created_at,
        })
    }

    /// First letter of the display name, for the avatar badge.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

/// Session keys for authentication and cart data.
pub mod keys {
    /// Key for storing the bearer token from the account API.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_profile() {
        let profile = UserProfile {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            created_at: None,
        };

        let user = CurrentUser::from_profile(&profile).unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_from_profile_rejects_invalid_email() {
        let profile = UserProfile {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            created_at: None,
        };

        assert!(CurrentUser::from_profile(&profile).is_err());
    }

    #[test]
    fn test_initial() {
        let profile = UserProfile {
            name: "ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: None,
        };
        let user = CurrentUser::from_profile(&profile).unwrap();
        assert_eq!(user.initial(), "A");
    }

    #[test]
    fn test_initial_empty_name() {
        let user = CurrentUser {
            name: String::new(),
            email: Email::parse("a@b.c").unwrap(),
            member_since: None,
        };
        assert_eq!(user.initial(), "");
    }
}
