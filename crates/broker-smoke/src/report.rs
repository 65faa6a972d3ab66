// crates/broker-smoke/src/report.rs
// ============================================================================
// Module: Smoke Report
// Description: Outcome data model and summary rendering for smoke runs.
// Purpose: Aggregate per-check results into a verdict and printable summary.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`CheckOutcome`] records the result of one smoke check; [`SmokeReport`]
//! holds the ordered outcomes of a full run (gateway health first, then the
//! SDK checks in fixed order).
//! Invariants:
//! - Outcome count equals the number of checks run.
//! - The verdict considers only the SDK checks; the gateway outcome is
//!   reported but never decides the exit code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Serialize;

// ============================================================================
// SECTION: Check Outcomes
// ============================================================================

/// Number of SDK checks a full smoke run performs.
pub const SDK_CHECK_COUNT: usize = 3;

/// Status of a single smoke check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The check succeeded.
    Pass,
    /// The check failed; diagnostics are recorded on the outcome.
    Fail,
}

impl CheckStatus {
    /// Returns `true` for [`CheckStatus::Pass`].
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Result of one smoke check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Display name of the check (for example `Python SDK`).
    pub name: String,
    /// Pass/fail status.
    pub status: CheckStatus,
    /// Diagnostic lines produced while running the check, in order.
    pub notes: Vec<String>,
    /// Wall-clock duration of the check in milliseconds.
    pub duration_ms: u128,
}

impl CheckOutcome {
    /// Constructs a passing outcome.
    #[must_use]
    pub fn pass(name: &str, notes: Vec<String>, elapsed: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            notes,
            duration_ms: elapsed.as_millis(),
        }
    }

    /// Constructs a failing outcome.
    #[must_use]
    pub fn fail(name: &str, notes: Vec<String>, elapsed: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            notes,
            duration_ms: elapsed.as_millis(),
        }
    }

    /// Returns `true` when the check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.status.is_pass()
    }
}

// ============================================================================
// SECTION: Smoke Report
// ============================================================================

/// Ordered outcomes of a full smoke run.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    /// Gateway health outcome (reported, excluded from the verdict).
    pub gateway: CheckOutcome,
    /// SDK check outcomes in run order.
    pub sdks: Vec<CheckOutcome>,
}

impl SmokeReport {
    /// Counts the SDK checks that passed.
    #[must_use]
    pub fn sdk_success_count(&self) -> usize {
        self.sdks.iter().filter(|outcome| outcome.passed()).count()
    }

    /// Returns the overall verdict: all [`SDK_CHECK_COUNT`] SDK checks passed.
    ///
    /// The gateway health outcome is intentionally excluded from the verdict;
    /// it is reported for operators but never decides the exit code.
    #[must_use]
    pub fn all_sdks_passed(&self) -> bool {
        self.sdks.len() == SDK_CHECK_COUNT && self.sdk_success_count() == SDK_CHECK_COUNT
    }

    /// Renders the results line of the text summary.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "📊 Results: {}/{} SDKs working successfully",
            self.sdk_success_count(),
            SDK_CHECK_COUNT
        )
    }

    /// Renders the closing line of the text summary.
    #[must_use]
    pub fn closing_line(&self) -> &'static str {
        if self.all_sdks_passed() {
            "🚀 All SDKs ready for integration!"
        } else {
            "⚠️  Some SDKs need attention before integration"
        }
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns a [`serde_json::Error`] when serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
