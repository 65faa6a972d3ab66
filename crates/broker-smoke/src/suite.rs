// crates/broker-smoke/src/suite.rs
// ============================================================================
// Module: Smoke Suite
// Description: Sequential orchestration of the gateway and SDK checks.
// Purpose: Run health, settle, then the three SDK checks and aggregate.
// Dependencies: tokio, url
// ============================================================================

//! ## Overview
//! [`SmokeSuite`] runs the full smoke sequence: one gateway health probe, an
//! optional settle delay, then each SDK exerciser in order.
//! Invariants:
//! - Execution is fully sequential; a check starts only after the previous
//!   one returned.
//! - Every check completes with an outcome; no failure aborts the sequence.
//! - Outcomes are collected in run order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use tokio::time::sleep;
use url::Url;

use crate::exerciser::SdkExerciser;
use crate::exerciser::go_exerciser;
use crate::exerciser::node_exerciser;
use crate::exerciser::python_exerciser;
use crate::health::DEFAULT_HEALTH_TIMEOUT;
use crate::health::check_gateway_health;
use crate::report::SmokeReport;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default pause between the health probe and the first SDK check.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

// ============================================================================
// SECTION: Smoke Suite
// ============================================================================

/// Sequential smoke run over the gateway and its SDK clients.
pub struct SmokeSuite {
    /// Gateway health endpoint.
    gateway_url: Url,
    /// Bound on the health request round trip.
    health_timeout: Duration,
    /// Pause between the health probe and the first SDK check.
    settle_delay: Duration,
    /// SDK checks in run order.
    exercisers: Vec<SdkExerciser>,
}

impl SmokeSuite {
    /// Constructs a suite with the three built-in SDK checks.
    #[must_use]
    pub fn new(gateway_url: Url) -> Self {
        Self {
            gateway_url,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            exercisers: vec![python_exerciser(), node_exerciser(), go_exerciser()],
        }
    }

    /// Overrides the health request timeout.
    #[must_use]
    pub const fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Overrides the settle delay; zero disables the pause.
    #[must_use]
    pub const fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Replaces the SDK checks (used by tests and timeout overrides).
    #[must_use]
    pub fn with_exercisers(mut self, exercisers: Vec<SdkExerciser>) -> Self {
        self.exercisers = exercisers;
        self
    }

    /// Runs the full sequence without progress output.
    pub async fn run(&self) -> SmokeReport {
        self.run_with_progress(|_| {}).await
    }

    /// Runs the full sequence, handing each diagnostic note to `progress`
    /// as it is produced.
    pub async fn run_with_progress(&self, mut progress: impl FnMut(&str)) -> SmokeReport {
        let gateway = check_gateway_health(&self.gateway_url, self.health_timeout).await;
        for note in &gateway.notes {
            progress(note);
        }
        if !self.settle_delay.is_zero() {
            sleep(self.settle_delay).await;
        }

        let mut sdks = Vec::with_capacity(self.exercisers.len());
        for exerciser in &self.exercisers {
            let outcome = exerciser.run().await;
            for note in &outcome.notes {
                progress(note);
            }
            sdks.push(outcome);
        }

        SmokeReport {
            gateway,
            sdks,
        }
    }
}

#[cfg(test)]
#[path = "tests/suite.rs"]
mod tests;
