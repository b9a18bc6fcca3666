//! SwitchRoutesUseCase: translates routing intents into wire commands and
//! keeps the local routing map authoritative.
//!
//! # Architecture
//!
//! This use case depends only on the [`CommandTransport`] trait and
//! `matrix-core` types. The UDP implementation is injected at construction
//! time, making the use case fully unit-testable.
//!
//! # Optimistic state
//!
//! The device never acknowledges a command, so the local map is committed
//! before the datagram leaves the socket. A failed send surfaces as an error
//! while the committed route stays in place; the accepted worst case is
//! local state that believes in a route the device never received. The
//! mitigations are a manual retry and [`SwitchRoutesUseCase::sync_all`],
//! which replays every populated route to the device.

use std::sync::Arc;

use async_trait::async_trait;
use matrix_core::{CommandRecord, Endpoint, InputPort, MatrixCommand, OutputPort, RoutingState};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for routing operations.
#[derive(Debug, Error)]
pub enum SwitchError {
    /// The datagram could not be handed to the network stack. The local
    /// routing map has already been updated when this is returned.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Trait for delivering an encoded command to the device.
///
/// The UDP implementation sends exactly one datagram per call and enforces
/// the device's 50 ms settling delay; test implementations record calls and
/// skip the delay.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// Sends one encoded command to `endpoint`.
    async fn send(&self, payload: &[u8], endpoint: &Endpoint) -> Result<(), String>;
}

/// The Switch Routes use case.
///
/// Owns the authoritative [`RoutingState`], the device [`Endpoint`], and the
/// injected transport. All operations return the human-readable description
/// of the action for the UI's "last command" readout.
pub struct SwitchRoutesUseCase {
    endpoint: Endpoint,
    routes: RoutingState,
    transport: Arc<dyn CommandTransport>,
    last_command: Option<CommandRecord>,
}

impl SwitchRoutesUseCase {
    /// Creates the use case with an initial routing map (typically restored
    /// from the persisted configuration).
    pub fn new(
        endpoint: Endpoint,
        routes: RoutingState,
        transport: Arc<dyn CommandTransport>,
    ) -> Self {
        Self {
            endpoint,
            routes,
            transport,
            last_command: None,
        }
    }

    /// Routes `input` to `output`.
    ///
    /// Commits the local map, then performs exactly one transport send.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Transport`] if the send failed; the local map
    /// keeps the new route either way.
    pub async fn route(
        &mut self,
        input: InputPort,
        output: OutputPort,
    ) -> Result<String, SwitchError> {
        self.routes.set_route(output, input);
        self.dispatch(MatrixCommand::Route { input, output }).await
    }

    /// Routes `input` to every output with a single wire command.
    pub async fn route_all(&mut self, input: InputPort) -> Result<String, SwitchError> {
        self.routes.set_all_routed_to(input);
        self.dispatch(MatrixCommand::RouteAll { input }).await
    }

    /// Resets the device and the local map to the identity mapping.
    pub async fn map_one_to_one(&mut self) -> Result<String, SwitchError> {
        self.routes.reset_one_to_one();
        self.dispatch(MatrixCommand::OneToOne).await
    }

    /// Replays every populated route to the device, serialized in output
    /// order.
    ///
    /// Each replayed command carries the full send cost including the
    /// device's settling delay, so total latency grows linearly with the
    /// number of routes. Returns the number of commands sent.
    ///
    /// # Errors
    ///
    /// Stops at the first transport failure; routes already replayed stay
    /// sent, and no automatic retry happens.
    pub async fn sync_all(&mut self) -> Result<usize, SwitchError> {
        let snapshot = self.routes.snapshot();
        let count = snapshot.len();
        debug!(routes = count, "syncing local state to device");
        for (output, input) in snapshot {
            self.dispatch(MatrixCommand::Route { input, output }).await?;
        }
        Ok(count)
    }

    /// Read access to the authoritative routing map.
    pub fn routing(&self) -> &RoutingState {
        &self.routes
    }

    /// Replaces the routing map, e.g. after importing an I/O map file.
    pub fn load_routes(&mut self, routes: RoutingState) {
        self.routes = routes;
    }

    /// Exports `(output, input)` pairs for the persistence collaborator.
    pub fn export_routes(&self) -> Vec<(u8, u8)> {
        self.routes.raw_entries()
    }

    /// The endpoint commands are currently sent to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Points subsequent commands at a different device address. Only called
    /// between operations.
    pub fn set_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoint = endpoint;
    }

    /// The most recent command record, if any operation ran yet.
    pub fn last_command(&self) -> Option<&CommandRecord> {
        self.last_command.as_ref()
    }

    /// Captures, transmits, and records one command.
    async fn dispatch(&mut self, command: MatrixCommand) -> Result<String, SwitchError> {
        let record = CommandRecord::capture(&command);
        let description = record.description.clone();
        debug!(
            command = %command.wire_text(),
            endpoint = %self.endpoint,
            "sending matrix command"
        );
        let result = self.transport.send(&record.payload, &self.endpoint).await;
        self.last_command = Some(record);
        match result {
            Ok(()) => Ok(description),
            Err(e) => {
                warn!("send failed for \"{description}\": {e}");
                Err(SwitchError::Transport(e))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_core::encode_wire;
    use std::sync::Mutex;

    // ── Test double ───────────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(Vec<u8>, String)>>,
        should_fail: bool,
    }

    #[async_trait]
    impl CommandTransport for RecordingTransport {
        async fn send(&self, payload: &[u8], endpoint: &Endpoint) -> Result<(), String> {
            if self.should_fail {
                return Err("injected failure".to_string());
            }
            self.sent
                .lock()
                .unwrap()
                .push((payload.to_vec(), endpoint.to_string()));
            Ok(())
        }
    }

    fn make_use_case() -> (SwitchRoutesUseCase, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let uc = SwitchRoutesUseCase::new(
            Endpoint::new("10.1.1.20", 20107).unwrap(),
            RoutingState::new(),
            Arc::clone(&transport) as Arc<dyn CommandTransport>,
        );
        (uc, transport)
    }

    fn input(n: u8) -> InputPort {
        InputPort::new(n).unwrap()
    }

    fn output(n: u8) -> OutputPort {
        OutputPort::new(n).unwrap()
    }

    // ── Routing ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_route_sends_one_narrowed_datagram() {
        let (mut uc, tx) = make_use_case();

        let description = uc.route(input(3), output(7)).await.unwrap();

        let sent = tx.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, encode_wire("3V7."));
        assert_eq!(sent[0].1, "10.1.1.20:20107");
        assert_eq!(description, "Routing Input 3 to Output 7");
    }

    #[tokio::test]
    async fn test_route_commits_local_state() {
        let (mut uc, _tx) = make_use_case();

        uc.route(input(5), output(2)).await.unwrap();

        assert_eq!(uc.routing().get(output(2)), Some(input(5)));
    }

    #[tokio::test]
    async fn test_failed_send_keeps_optimistic_state_and_surfaces_error() {
        let transport = Arc::new(RecordingTransport {
            should_fail: true,
            ..Default::default()
        });
        let mut uc = SwitchRoutesUseCase::new(
            Endpoint::default(),
            RoutingState::new(),
            transport as Arc<dyn CommandTransport>,
        );

        let result = uc.route(input(4), output(9)).await;

        assert!(matches!(result, Err(SwitchError::Transport(_))));
        // Optimistic commit: the route stays even though the send failed.
        assert_eq!(uc.routing().get(output(9)), Some(input(4)));
    }

    #[tokio::test]
    async fn test_route_all_sends_single_datagram_but_fills_all_outputs() {
        let (mut uc, tx) = make_use_case();

        uc.route_all(input(6)).await.unwrap();

        assert_eq!(tx.sent.lock().unwrap().len(), 1);
        assert_eq!(tx.sent.lock().unwrap()[0].0, encode_wire("6All"));
        for out in OutputPort::all() {
            assert_eq!(uc.routing().get(out), Some(input(6)));
        }
    }

    #[tokio::test]
    async fn test_map_one_to_one_sends_reset_command() {
        let (mut uc, tx) = make_use_case();

        uc.map_one_to_one().await.unwrap();

        assert_eq!(tx.sent.lock().unwrap()[0].0, encode_wire("All#."));
        for out in OutputPort::all() {
            assert_eq!(uc.routing().get(out).map(InputPort::get), Some(out.get()));
        }
    }

    // ── Sync ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_sync_all_replays_routes_in_output_order() {
        let (mut uc, tx) = make_use_case();
        uc.route(input(9), output(12)).await.unwrap();
        uc.route(input(2), output(3)).await.unwrap();
        tx.sent.lock().unwrap().clear();

        let count = uc.sync_all().await.unwrap();

        assert_eq!(count, 2);
        let sent = tx.sent.lock().unwrap();
        assert_eq!(sent[0].0, encode_wire("2V3."));
        assert_eq!(sent[1].0, encode_wire("9V12."));
    }

    #[tokio::test]
    async fn test_sync_all_with_empty_map_sends_nothing() {
        let (mut uc, tx) = make_use_case();

        let count = uc.sync_all().await.unwrap();

        assert_eq!(count, 0);
        assert!(tx.sent.lock().unwrap().is_empty());
    }

    // ── Endpoint and observability ────────────────────────────────────────────

    #[tokio::test]
    async fn test_set_endpoint_redirects_subsequent_sends() {
        let (mut uc, tx) = make_use_case();

        uc.set_endpoint(Endpoint::new("10.9.9.9", 9000).unwrap());
        uc.route(input(1), output(1)).await.unwrap();

        assert_eq!(tx.sent.lock().unwrap()[0].1, "10.9.9.9:9000");
    }

    #[tokio::test]
    async fn test_last_command_records_description_and_payload() {
        let (mut uc, _tx) = make_use_case();
        assert!(uc.last_command().is_none());

        uc.route(input(3), output(7)).await.unwrap();

        let record = uc.last_command().unwrap();
        assert_eq!(record.description, "Routing Input 3 to Output 7");
        assert_eq!(record.payload, encode_wire("3V7."));
    }

    #[tokio::test]
    async fn test_load_and_export_routes_round_trip() {
        let (mut uc, _tx) = make_use_case();
        let mut routes = RoutingState::new();
        routes.set_route(output(4), input(11));
        routes.set_route(output(15), input(2));

        uc.load_routes(routes.clone());

        assert_eq!(
            RoutingState::from_raw_entries(uc.export_routes()),
            routes
        );
    }
}
