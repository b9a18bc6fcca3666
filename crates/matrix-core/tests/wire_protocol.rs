//! Integration tests for the matrix wire protocol.
//!
//! These tests sweep the full identifier space: every route pair and every
//! preset slot must produce the exact narrowed byte sequence the device
//! expects.

use matrix_core::{
    encode_wire, InputPort, MatrixCommand, OutputPort, PresetId, RoutingState, MATRIX_SIZE,
    PRESET_SLOTS,
};

/// Reference narrowing: one low byte per UTF-16 code unit.
fn narrowed(text: &str) -> Vec<u8> {
    text.encode_utf16().map(|unit| unit as u8).collect()
}

// ── Encoder sweeps ────────────────────────────────────────────────────────────

#[test]
fn test_every_route_pair_encodes_to_narrowed_command_text() {
    for i in 1..=MATRIX_SIZE {
        for o in 1..=MATRIX_SIZE {
            let cmd = MatrixCommand::Route {
                input: InputPort::new(i).unwrap(),
                output: OutputPort::new(o).unwrap(),
            };
            let expected = narrowed(&format!("{i}V{o}."));
            assert_eq!(cmd.encode(), expected, "route {i}V{o}. must narrow exactly");
        }
    }
}

#[test]
fn test_every_preset_recall_and_store_is_zero_padded() {
    for n in 1..=PRESET_SLOTS {
        let preset = PresetId::new(n).unwrap();
        assert_eq!(
            MatrixCommand::RecallPreset(preset).wire_text(),
            format!("Recall{n:02}.")
        );
        assert_eq!(
            MatrixCommand::StorePreset(preset).wire_text(),
            format!("Save{n:02}.")
        );
    }
}

#[test]
fn test_encoded_length_is_half_the_wide_encoding() {
    for text in ["3V7.", "16V16.", "Recall32.", "All#.", "9All"] {
        let wide_bytes = text.encode_utf16().count() * 2;
        assert_eq!(encode_wire(text).len() * 2, wide_bytes);
    }
}

// ── Routing scenario from the device manual ───────────────────────────────────

#[test]
fn test_route_five_to_two_scenario() {
    let input = InputPort::new(5).unwrap();
    let output = OutputPort::new(2).unwrap();

    let mut state = RoutingState::new();
    state.set_route(output, input);
    assert_eq!(state.get(output), Some(input));

    let cmd = MatrixCommand::Route { input, output };
    assert_eq!(cmd.encode(), narrowed("5V2."));
}

#[test]
fn test_preset_seven_and_twenty_one_scenario() {
    let store = MatrixCommand::StorePreset(PresetId::new(7).unwrap());
    let recall = MatrixCommand::RecallPreset(PresetId::new(21).unwrap());

    assert_eq!(store.wire_text(), "Save07.");
    assert_eq!(recall.wire_text(), "Recall21.");
}

// ── Persistence round trip ────────────────────────────────────────────────────

#[test]
fn test_export_import_round_trip_is_lossless() {
    let mut original = RoutingState::new();
    original.set_route(OutputPort::new(1).unwrap(), InputPort::new(16).unwrap());
    original.set_route(OutputPort::new(8).unwrap(), InputPort::new(8).unwrap());
    original.set_route(OutputPort::new(16).unwrap(), InputPort::new(1).unwrap());

    let exported = original.raw_entries();
    let restored = RoutingState::from_raw_entries(exported);

    for o in 1..=MATRIX_SIZE {
        let out = OutputPort::new(o).unwrap();
        assert_eq!(restored.get(out), original.get(out));
    }
}
