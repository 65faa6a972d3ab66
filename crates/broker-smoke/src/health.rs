// crates/broker-smoke/src/health.rs
// ============================================================================
// Module: Gateway Health Check
// Description: HTTP health probe for the broker gateway.
// Purpose: Report whether the gateway answers its health endpoint with 200.
// Dependencies: reqwest, url
// ============================================================================

//! ## Overview
//! [`check_gateway_health`] issues one GET against the gateway health
//! endpoint with a bounded timeout.
//! Invariants:
//! - Success requires HTTP status exactly 200.
//! - Every failure mode (non-200 status, connect failure, timeout) folds
//!   into a single failing outcome with one diagnostic note.
//! - No retries and no backoff; the probe runs exactly once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use reqwest::Client;
use reqwest::StatusCode;
use url::Url;

use crate::report::CheckOutcome;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Health endpoint of a locally running broker gateway.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080/health";
/// Display name of the gateway health check.
pub const GATEWAY_CHECK_NAME: &str = "Broker Gateway";
/// Default bound on the health request round trip.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// SECTION: Health Check
// ============================================================================

/// Probes the gateway health endpoint once and reports the outcome.
pub async fn check_gateway_health(url: &Url, timeout: Duration) -> CheckOutcome {
    let started = Instant::now();
    match fetch_status(url, timeout).await {
        Ok(status) if status == StatusCode::OK => CheckOutcome::pass(
            GATEWAY_CHECK_NAME,
            vec!["✅ Broker Gateway is running".to_string()],
            started.elapsed(),
        ),
        Ok(status) => CheckOutcome::fail(
            GATEWAY_CHECK_NAME,
            vec![format!("❌ Broker Gateway health check failed: {}", status.as_u16())],
            started.elapsed(),
        ),
        Err(err) => CheckOutcome::fail(
            GATEWAY_CHECK_NAME,
            vec![format!("❌ Cannot reach broker gateway: {err}")],
            started.elapsed(),
        ),
    }
}

/// Issues the GET and returns the response status.
async fn fetch_status(url: &Url, timeout: Duration) -> Result<StatusCode, reqwest::Error> {
    let client = Client::builder().timeout(timeout).build()?;
    let response = client.get(url.clone()).send().await?;
    Ok(response.status())
}

#[cfg(test)]
#[path = "tests/health.rs"]
mod tests;
