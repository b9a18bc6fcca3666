//! Integration tests for the routing pipeline.
//!
//! These tests exercise the application layer of matrix-ctl end-to-end:
//! `SwitchRoutesUseCase` + `ManagePresetsUseCase` + mock infrastructure,
//! including the device-pacing timing contract with a delay-respecting fake
//! transport.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use matrix_core::{encode_wire, Endpoint, InputPort, OutputPort, PresetId, RoutingState};
use matrix_ctl::application::manage_presets::ManagePresetsUseCase;
use matrix_ctl::application::switch_routes::{CommandTransport, SwitchRoutesUseCase};

// ── Test doubles ──────────────────────────────────────────────────────────────

/// Records every datagram; optionally honours the device's 50 ms pacing.
#[derive(Default)]
struct FakeTransport {
    sent: Mutex<Vec<Vec<u8>>>,
    settle: Option<Duration>,
}

impl FakeTransport {
    fn instant() -> Self {
        Self::default()
    }

    fn paced() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            settle: Some(Duration::from_millis(50)),
        }
    }
}

#[async_trait]
impl CommandTransport for FakeTransport {
    async fn send(&self, payload: &[u8], _endpoint: &Endpoint) -> Result<(), String> {
        self.sent.lock().unwrap().push(payload.to_vec());
        if let Some(delay) = self.settle {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

fn input(n: u8) -> InputPort {
    InputPort::new(n).unwrap()
}

fn output(n: u8) -> OutputPort {
    OutputPort::new(n).unwrap()
}

// ── Full routing flow ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_route_then_trace_then_sync_flow() {
    let transport = Arc::new(FakeTransport::instant());
    let mut switcher = SwitchRoutesUseCase::new(
        Endpoint::default(),
        RoutingState::new(),
        Arc::clone(&transport) as Arc<dyn CommandTransport>,
    );

    // Route two inputs, trace one output back, then replay everything.
    switcher.route(input(5), output(2)).await.unwrap();
    switcher.route(input(9), output(14)).await.unwrap();
    assert_eq!(switcher.routing().get(output(2)), Some(input(5)));

    let replayed = switcher.sync_all().await.unwrap();

    assert_eq!(replayed, 2);
    let sent = transport.sent.lock().unwrap();
    assert_eq!(
        *sent,
        vec![
            encode_wire("5V2."),
            encode_wire("9V14."),
            encode_wire("5V2."),
            encode_wire("9V14."),
        ]
    );
}

#[tokio::test]
async fn test_persisted_state_survives_a_controller_restart() {
    let transport = Arc::new(FakeTransport::instant());
    let mut first = SwitchRoutesUseCase::new(
        Endpoint::default(),
        RoutingState::new(),
        Arc::clone(&transport) as Arc<dyn CommandTransport>,
    );
    first.route(input(3), output(7)).await.unwrap();
    first.route_all(input(1)).await.unwrap();
    first.route(input(3), output(7)).await.unwrap();

    // "Restart": rebuild from the exported raw entries.
    let second = SwitchRoutesUseCase::new(
        Endpoint::default(),
        RoutingState::from_raw_entries(first.export_routes()),
        Arc::clone(&transport) as Arc<dyn CommandTransport>,
    );

    assert_eq!(second.routing().get(output(7)), Some(input(3)));
    for o in 1..=16u8 {
        if o != 7 {
            assert_eq!(second.routing().get(output(o)), Some(input(1)));
        }
    }
}

// ── Preset flow ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_preset_store_and_recall_wire_sequence() {
    let transport = Arc::new(FakeTransport::instant());
    let mut presets = ManagePresetsUseCase::new(
        Endpoint::default(),
        Arc::clone(&transport) as Arc<dyn CommandTransport>,
    );

    presets.store(PresetId::new(7).unwrap()).await.unwrap();
    presets.recall(PresetId::new(21).unwrap()).await.unwrap();

    let sent = transport.sent.lock().unwrap();
    assert_eq!(*sent, vec![encode_wire("Save07."), encode_wire("Recall21.")]);
}

// ── Timing contract ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_two_routes_through_paced_transport_take_at_least_100ms() {
    let transport = Arc::new(FakeTransport::paced());
    let mut switcher = SwitchRoutesUseCase::new(
        Endpoint::default(),
        RoutingState::new(),
        Arc::clone(&transport) as Arc<dyn CommandTransport>,
    );

    let started = Instant::now();
    switcher.route(input(1), output(1)).await.unwrap();
    switcher.route(input(2), output(2)).await.unwrap();

    assert!(
        started.elapsed() >= Duration::from_millis(100),
        "two paced sends must take at least 2 × 50 ms, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_full_sync_is_serialized_through_the_pacing_delay() {
    let transport = Arc::new(FakeTransport::paced());
    let mut switcher = SwitchRoutesUseCase::new(
        Endpoint::default(),
        RoutingState::new(),
        Arc::clone(&transport) as Arc<dyn CommandTransport>,
    );
    switcher.load_routes({
        let mut routes = RoutingState::new();
        routes.set_route(output(1), input(1));
        routes.set_route(output(2), input(2));
        routes.set_route(output(3), input(3));
        routes
    });

    let started = Instant::now();
    let replayed = switcher.sync_all().await.unwrap();

    assert_eq!(replayed, 3);
    assert!(started.elapsed() >= Duration::from_millis(150));
}
