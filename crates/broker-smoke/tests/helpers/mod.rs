// crates/broker-smoke/tests/helpers/mod.rs
// ============================================================================
// Module: Smoke Test Helpers
// Description: Shared helpers for broker-smoke end-to-end tests.
// Purpose: Provide health stubs and fake SDK runtimes on an isolated PATH.
// Dependencies: axum, tempfile, tokio
// ============================================================================

//! ## Overview
//! Shared helpers for broker-smoke end-to-end tests.
//! Purpose: Provide health stubs and fake SDK runtimes on an isolated PATH.
//! Invariants:
//! - Stubs bind ephemeral loopback ports only.
//! - Fake runtimes are plain `/bin/sh` scripts created in temp directories.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panics surface setup failures directly."
)]

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tempfile::TempDir;
use tokio::net::TcpListener;
use url::Url;

/// Marker the harness expects from the Python SDK check.
pub const PYTHON_MARKER: &str = "Python SDK working";
/// Marker the harness expects from the Node.js SDK check.
pub const NODE_MARKER: &str = "Node.js SDK working";
/// Marker the harness expects from the Go SDK check.
pub const GO_MARKER: &str = "Go SDK working";

/// Serves `/health` with HTTP 200 on an ephemeral loopback port.
pub async fn spawn_healthy_stub() -> Url {
    spawn_health_stub(StatusCode::OK).await
}

/// Serves `/health` with a fixed status on an ephemeral loopback port.
pub async fn spawn_health_stub(status: StatusCode) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|err| {
        panic!("bind health stub failed: {err}");
    });
    let addr = listener.local_addr().unwrap_or_else(|err| {
        panic!("resolve stub addr failed: {err}");
    });
    let app = Router::new().route("/health", get(move || async move { status }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    parse_health_url(&addr.to_string())
}

/// Returns a loopback URL whose port was just released.
pub async fn refused_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|err| {
        panic!("bind probe listener failed: {err}");
    });
    let addr = listener.local_addr().unwrap_or_else(|err| {
        panic!("resolve probe addr failed: {err}");
    });
    drop(listener);
    parse_health_url(&addr.to_string())
}

/// Installs a fake runtime script that prints one line on stdout.
pub fn install_fake_runtime(bin_dir: &Path, program: &str, line: &str) -> io::Result<()> {
    let path = bin_dir.join(program);
    fs::write(&path, format!("#!/bin/sh\necho '{line}'\n"))?;
    let mut permissions = fs::metadata(&path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions)
}

/// Creates a working directory containing the Go client layout the harness
/// expects (`go/broker-client`).
pub fn sdk_workdir() -> io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("go").join("broker-client"))?;
    Ok(dir)
}

/// Parses a loopback authority into a health endpoint URL.
fn parse_health_url(authority: &str) -> Url {
    Url::parse(&format!("http://{authority}/health")).unwrap_or_else(|err| {
        panic!("stub url parse failed: {err}");
    })
}
