// crates/broker-smoke/src/lib.rs
// ============================================================================
// Module: Broker Smoke Library
// Description: Smoke checks for the Atomic Broker Gateway and its SDKs.
// Purpose: Provide the health probe, SDK exercisers, and run aggregation.
// Dependencies: reqwest, serde, tokio, url
// ============================================================================

//! ## Overview
//! broker-smoke runs a sequential smoke pass over an externally running
//! Atomic Broker Gateway: one HTTP health probe plus one subprocess check per
//! SDK client (Python, Node.js, Go), each judged by a literal marker
//! substring in captured stdout.
//! Invariants:
//! - Checks run strictly in order; no failure aborts the sequence.
//! - The verdict covers the SDK checks only; the gateway outcome is
//!   reported but never decides the exit code.
//! - The gateway and SDKs themselves are external; nothing here implements
//!   broker protocol or SDK behavior.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod exerciser;
pub mod health;
pub mod report;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use exerciser::DEFAULT_SDK_TIMEOUT;
pub use exerciser::ScriptOutput;
pub use exerciser::SdkExerciser;
pub use exerciser::go_exerciser;
pub use exerciser::node_exerciser;
pub use exerciser::python_exerciser;
pub use health::DEFAULT_GATEWAY_URL;
pub use health::DEFAULT_HEALTH_TIMEOUT;
pub use health::GATEWAY_CHECK_NAME;
pub use health::check_gateway_health;
pub use report::CheckOutcome;
pub use report::CheckStatus;
pub use report::SDK_CHECK_COUNT;
pub use report::SmokeReport;
pub use suite::DEFAULT_SETTLE_DELAY;
pub use suite::SmokeSuite;
