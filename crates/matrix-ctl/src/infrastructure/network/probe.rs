//! ICMP reachability probe built on the system `ping` tool.
//!
//! A raw ICMP socket needs elevated privileges on most platforms, so the
//! probe shells out to the stock `ping` binary with a single echo request
//! and interprets its text output:
//!
//! - Windows prints a `TTL=` field for every reply;
//! - POSIX pings summarize with `1 received` (Linux) or
//!   `1 packets received` (BSD/macOS).
//!
//! An unreachable host is a normal `Ok(false)` result. Only an environment
//! failure (the tool missing or unspawnable) surfaces as an error, so the
//! connectivity use case can tell "device is down" apart from "cannot
//! check".

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::application::check_connectivity::ReachabilityProbe;

/// Upper bound on one probe, including process startup.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for a probe that could not run.
#[derive(Debug, Error)]
#[error("failed to run {program}: {source}")]
pub struct ProbeSpawnError {
    program: String,
    #[source]
    source: std::io::Error,
}

/// Reachability probe backed by the system `ping` binary.
#[derive(Debug, Clone)]
pub struct PingProbe {
    program: String,
}

impl Default for PingProbe {
    fn default() -> Self {
        Self {
            program: "ping".to_string(),
        }
    }
}

impl PingProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a non-default ping executable (or any stand-in, in tests).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs one echo request against `host`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeSpawnError`] only when the tool cannot be executed.
    async fn run_ping(&self, host: &str) -> Result<bool, ProbeSpawnError> {
        let output = match timeout(
            PROBE_TIMEOUT,
            Command::new(&self.program)
                .arg(count_flag())
                .arg("1")
                .arg(host)
                .output(),
        )
        .await
        {
            Ok(result) => result.map_err(|source| ProbeSpawnError {
                program: self.program.clone(),
                source,
            })?,
            // The tool hung past the probe bound: report unreachable.
            Err(_) => {
                debug!(%host, "ping did not finish within {PROBE_TIMEOUT:?}");
                return Ok(false);
            }
        };

        if !output.status.success() {
            // Non-zero exit means no reply on every supported platform.
            return Ok(false);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(%host, "ping output: {}", stdout.trim_end());
        Ok(reply_received(&stdout))
    }
}

/// Count flag differs between the Windows and POSIX ping tools.
fn count_flag() -> &'static str {
    if cfg!(windows) {
        "-n"
    } else {
        "-c"
    }
}

/// Whether the ping output text reports a successful echo reply.
fn reply_received(output: &str) -> bool {
    if cfg!(windows) {
        output.contains("TTL=")
    } else {
        output.contains("1 received") || output.contains("1 packets received")
    }
}

#[async_trait]
impl ReachabilityProbe for PingProbe {
    async fn probe(&self, host: &str) -> Result<bool, String> {
        self.run_ping(host).await.map_err(|e| e.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
