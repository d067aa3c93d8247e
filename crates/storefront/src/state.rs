//! Application state shared across handlers.

use std::sync::Arc;

use crate::account::{AccountClient, AccountClientError};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Error creating the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("account client error: {0}")]
    AccountClient(#[from] AccountClientError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the account API client and the plugin catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    account: AccountClient,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the account API client cannot be constructed
    /// from the configuration.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let account = AccountClient::new(&config.account)?;
        let catalog = Catalog::new();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                account,
                catalog,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the account API client.
    #[must_use]
    pub fn account(&self) -> &AccountClient {
        &self.inner.account
    }

    /// Get a reference to the plugin catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
