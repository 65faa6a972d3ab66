// crates/broker-smoke/src/main.rs
// ============================================================================
// Module: Broker Smoke CLI Entry Point
// Description: Command-line front end for the smoke suite.
// Purpose: Run the full smoke sequence and map the verdict to an exit code.
// Dependencies: broker-smoke, clap, thiserror, tokio, url
// ============================================================================

//! ## Overview
//! Running `broker-smoke` with no flags performs the full sequence against
//! `http://localhost:8080/health` with the default 5s health and 10s SDK
//! timeouts and exits 0 iff all three SDK checks pass. Flags only override
//! those defaults; no configuration files or environment variables are read.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use broker_smoke::SmokeSuite;
use broker_smoke::go_exerciser;
use broker_smoke::health::DEFAULT_GATEWAY_URL;
use broker_smoke::node_exerciser;
use broker_smoke::python_exerciser;
use clap::Parser;
use clap::ValueEnum;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Smoke runner for the Atomic Broker Gateway and its SDK clients.
#[derive(Parser, Debug)]
#[command(name = "broker-smoke", version)]
struct Cli {
    /// Gateway health endpoint URL.
    #[arg(long, value_name = "URL", default_value = DEFAULT_GATEWAY_URL)]
    gateway_url: Url,
    /// Health request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    health_timeout_secs: u64,
    /// Per-SDK subprocess timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    sdk_timeout_secs: u64,
    /// Pause between the health probe and the first SDK check, in
    /// milliseconds; zero disables the pause.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    settle_ms: u64,
    /// Output format for the run summary.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,
}

/// Output formats for the run summary.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum SummaryFormat {
    /// Progress lines plus the human-readable summary.
    Text,
    /// JSON serialization of the full report.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for fatal failures (output streams, serialization).
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the smoke sequence and renders the summary.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let suite = build_suite(&cli);

    let report = match cli.format {
        SummaryFormat::Text => {
            write_stdout_line("🧪 Testing Atomic Broker Gateway SDKs")
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            write_stdout_line(&"=".repeat(50))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            let report = suite
                .run_with_progress(|line| {
                    let _ = write_stdout_line(line);
                })
                .await;
            write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
            write_stdout_line(&report.summary_line())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            write_stdout_line(report.closing_line())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            report
        }
        SummaryFormat::Json => {
            let report = suite.run().await;
            let rendered = report
                .to_json()
                .map_err(|err| CliError::new(format!("failed to serialize report: {err}")))?;
            write_stdout_line(&rendered)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            report
        }
    };

    Ok(if report.all_sdks_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Builds the suite from CLI flags.
fn build_suite(cli: &Cli) -> SmokeSuite {
    let sdk_timeout = Duration::from_secs(cli.sdk_timeout_secs);
    SmokeSuite::new(cli.gateway_url.clone())
        .with_health_timeout(Duration::from_secs(cli.health_timeout_secs))
        .with_settle_delay(Duration::from_millis(cli.settle_ms))
        .with_exercisers(vec![
            python_exerciser().with_timeout(sdk_timeout),
            node_exerciser().with_timeout(sdk_timeout),
            go_exerciser().with_timeout(sdk_timeout),
        ])
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes one line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a stream write failure.
fn output_error(stream: &str, err: &std::io::Error) -> String {
    format!("failed to write {stream}: {err}")
}

/// Reports a fatal error on stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
