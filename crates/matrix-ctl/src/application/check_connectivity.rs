//! CheckConnectivityUseCase: fire-and-report device reachability.
//!
//! Reachability runs on its own Tokio task so a slow or absent device never
//! stalls routing operations. Each invocation produces exactly one message
//! on a oneshot channel:
//!
//! - `Ok(true)` – the device answered the echo request;
//! - `Ok(false)` – no answer within the probe timeout (a status, not an
//!   error);
//! - `Err(ProbeFailure)` – the probe itself could not run, e.g. the ping
//!   binary is missing.
//!
//! Repetition is the caller's responsibility (the UI wires it to a manual
//! retry button and to settings changes). Concurrent invocations are
//! allowed and independent; a probe in flight cannot be cancelled and
//! simply runs to its timeout.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

/// Error produced when the reachability probe could not run at all.
///
/// Distinct from an unreachable device, which is the `Ok(false)` outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("reachability probe failed to run: {0}")]
pub struct ProbeFailure(pub String);

/// One probe result: reachable / unreachable, or the probe itself failed.
pub type ProbeOutcome = Result<bool, ProbeFailure>;

/// Trait for checking whether a host answers an echo request.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// `Ok(true)` if the host replied, `Ok(false)` if it did not. `Err` only
    /// for environment-level failures, never for an unreachable host.
    async fn probe(&self, host: &str) -> Result<bool, String>;
}

/// Launches one probe task and returns the channel its single result
/// arrives on.
///
/// The caller may drop the receiver at any time; the probe then finishes in
/// the background and its result is discarded.
pub fn spawn_probe(
    probe: Arc<dyn ReachabilityProbe>,
    host: String,
) -> oneshot::Receiver<ProbeOutcome> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = probe.probe(&host).await.map_err(ProbeFailure);
        debug!(%host, ?outcome, "connectivity probe finished");
        // Delivery fails only if the listener is gone; nothing to do then.
        let _ = tx.send(outcome);
    });
    rx
}

// ── Tests ─────────────────────────────────────────────────────────────────────
