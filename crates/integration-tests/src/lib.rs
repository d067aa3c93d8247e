//! Integration tests for the Dawe Audio storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the account API, then the storefront
//! cargo run -p dawe-audio-storefront
//!
//! # Run integration tests
//! cargo test -p dawe-audio-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Page rendering and catalog filtering
//! - `storefront_cart` - Cart flows (require a signed-in session)
//! - `storefront_health` - Liveness and readiness probes
//!
//! Server-dependent tests are `#[ignore]`-gated so a plain `cargo test`
//! stays green without a running storefront.

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client that keeps session cookies across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
