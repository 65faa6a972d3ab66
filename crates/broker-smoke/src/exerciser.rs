// crates/broker-smoke/src/exerciser.rs
// ============================================================================
// Module: SDK Exercisers
// Description: Subprocess checks that exercise broker SDK clients.
// Purpose: Launch each SDK's native runtime and scan stdout for a marker.
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! An [`SdkExerciser`] launches a foreign language runtime with an inline
//! client program, captures its output under a timeout, and passes only when
//! the captured stdout contains the expected marker substring.
//! Invariants:
//! - A check passes iff the process spawns, exits within the timeout, AND
//!   stdout contains the marker.
//! - Spawn failure, timeout, non-UTF-8 output, and a missing marker all fold
//!   into a failing outcome; none of them aborts the run.
//! - The child is killed when the timeout fires.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

use tokio::process::Command;
use tokio::time::timeout;

use crate::report::CheckOutcome;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bound on one SDK subprocess invocation.
pub const DEFAULT_SDK_TIMEOUT: Duration = Duration::from_secs(10);

/// Inline Python client program handed to `python3 -c`.
const PYTHON_CLIENT_PROGRAM: &str = r"import sys; sys.path.append('python/broker-client'); from atomic_broker_sdk import create_client; client = create_client(); response = client.invoke_operation('ping', {'test': 'python-sdk'}); print('✅ Python SDK: OK' if response.success else f'❌ Python SDK: {response.errors}')";

/// Inline Node.js client program handed to `node -e`.
const NODE_CLIENT_PROGRAM: &str = r"require('./atomic_broker_sdk.js'); client = require('./atomic_broker_sdk.js')(); client.invokeOperation('ping', {test: 'nodejs-sdk'}).then(response => console.log(response.success ? '✅ Node.js SDK: OK' : '❌ Node.js SDK: ' + response.errors.map(e => e.message).join(', ')))";

// NOTE: the inline programs print "✅ <name>: OK" while the markers below say
// "<name> working"; the markers stay as-is until the SDK authors confirm the
// intended success line. See DESIGN.md.

// ============================================================================
// SECTION: Script Output
// ============================================================================

/// Captured output of one SDK subprocess.
pub struct ScriptOutput {
    /// Exit status of the child process.
    pub status: ExitStatus,
    /// Decoded standard output.
    pub stdout: String,
    /// Decoded standard error.
    pub stderr: String,
}

// ============================================================================
// SECTION: Exerciser
// ============================================================================

/// One SDK smoke check: a runtime invocation plus an expected stdout marker.
pub struct SdkExerciser {
    /// Display name of the check (for example `Python SDK`).
    name: String,
    /// Marker substring that must appear in captured stdout.
    marker: String,
    /// Program to launch (runtime interpreter or toolchain binary).
    program: String,
    /// Argument vector handed to the program.
    args: Vec<String>,
    /// Working directory for the child, when the client expects one.
    workdir: Option<PathBuf>,
    /// Bound on the subprocess invocation.
    timeout: Duration,
}

impl SdkExerciser {
    /// Constructs an exerciser with the default timeout.
    #[must_use]
    pub fn new(name: &str, marker: &str, program: &str, args: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            marker: marker.to_string(),
            program: program.to_string(),
            args,
            workdir: None,
            timeout: DEFAULT_SDK_TIMEOUT,
        }
    }

    /// Sets the working directory for the child process.
    #[must_use]
    pub fn with_workdir(mut self, workdir: PathBuf) -> Self {
        self.workdir = Some(workdir);
        self
    }

    /// Overrides the subprocess timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the display name of the check.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the marker substring the check searches for.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Runs the subprocess and reports the outcome.
    pub async fn run(&self) -> CheckOutcome {
        let started = Instant::now();
        match self.capture().await {
            Ok(output) if output.stdout.contains(&self.marker) => {
                CheckOutcome::pass(&self.name, Vec::new(), started.elapsed())
            }
            Ok(output) => CheckOutcome::fail(
                &self.name,
                vec![
                    format!("marker \"{}\" not found in stdout", self.marker),
                    format!("subprocess {}", output.status),
                ],
                started.elapsed(),
            ),
            Err(reason) => CheckOutcome::fail(
                &self.name,
                vec![format!("❌ {} test failed: {reason}", self.name)],
                started.elapsed(),
            ),
        }
    }

    /// Spawns the child with piped stdio and waits under the timeout.
    async fn capture(&self) -> Result<ScriptOutput, String> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(workdir) = &self.workdir {
            command.current_dir(workdir);
        }
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);

        let child = command.spawn().map_err(|err| format!("spawn failed: {err}"))?;
        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| format!("timed out after {}s", self.timeout.as_secs()))?
            .map_err(|err| format!("wait failed: {err}"))?;

        let stdout = String::from_utf8(output.stdout)
            .map_err(|err| format!("stdout decode failed: {err}"))?;
        let stderr = String::from_utf8(output.stderr)
            .map_err(|err| format!("stderr decode failed: {err}"))?;

        Ok(ScriptOutput {
            status: output.status,
            stdout,
            stderr,
        })
    }
}

// ============================================================================
// SECTION: Built-in Exercisers
// ============================================================================

/// Python SDK check: `python3 -c` with the inline client program.
#[must_use]
pub fn python_exerciser() -> SdkExerciser {
    SdkExerciser::new(
        "Python SDK",
        "Python SDK working",
        "python3",
        vec!["-c".to_string(), PYTHON_CLIENT_PROGRAM.to_string()],
    )
}

/// Node.js SDK check: `node -e` with the inline client program.
#[must_use]
pub fn node_exerciser() -> SdkExerciser {
    SdkExerciser::new(
        "Node.js SDK",
        "Node.js SDK working",
        "node",
        vec!["-e".to_string(), NODE_CLIENT_PROGRAM.to_string()],
    )
}

/// Go SDK check: `go run main.go` inside the Go client directory.
#[must_use]
pub fn go_exerciser() -> SdkExerciser {
    SdkExerciser::new(
        "Go SDK",
        "Go SDK working",
        "go",
        vec!["run".to_string(), "main.go".to_string()],
    )
    .with_workdir(PathBuf::from("go/broker-client"))
}

#[cfg(test)]
#[path = "tests/exerciser.rs"]
mod tests;
