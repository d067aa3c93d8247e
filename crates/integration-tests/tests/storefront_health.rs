//! Integration tests for the storefront health endpoints.
//!
//! These tests require:
//! - The storefront running (cargo run -p dawe-audio-storefront)
//! - For readiness: the account API running behind `ACCOUNT_API_URL`
//!
//! Run with: cargo test -p dawe-audio-integration-tests -- --ignored

use reqwest::StatusCode;

use dawe_audio_integration_tests::{session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_health_returns_ok() {
    let base_url = storefront_base_url();
    let resp = session_client()
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront and account API"]
async fn test_readiness_reflects_account_api() {
    let base_url = storefront_base_url();
    let resp = session_client()
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach storefront");

    // OK with the account API up, 503 when it is down; both mean the
    // probe itself works.
    assert!(
        resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected readiness status: {}",
        resp.status()
    );
}
