//! Wire command builder for the matrix protocol.
//!
//! The device speaks a terse one-way text protocol: every operation is a
//! short command string, encoded through [`encode_wire`] before
//! transmission, and nothing ever comes back.
//!
//! | Operation | Wire text |
//! |---|---|
//! | Route input 3 to output 7 | `3V7.` |
//! | Route input 3 to all outputs | `3All` |
//! | Map inputs 1:1 to outputs | `All#.` |
//! | Recall preset 3 | `Recall03.` |
//! | Store preset 12 | `Save12.` |
//!
//! Preset numbers are zero-padded to two digits. Route and preset commands
//! are terminated with `.`; the route-all command is not.

use crate::ports::{InputPort, OutputPort, PresetId};
use crate::protocol::encode::encode_wire;

/// A single operation expressible on the wire.
///
/// Variants are built from validated port and preset types, so a command
/// that would produce a malformed wire string cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixCommand {
    /// Connect one input to one output.
    Route {
        input: InputPort,
        output: OutputPort,
    },
    /// Connect one input to every output.
    RouteAll { input: InputPort },
    /// Reset the device to the identity mapping: output i fed by input i.
    OneToOne,
    /// Apply a routing configuration stored on the device.
    RecallPreset(PresetId),
    /// Store the device's current routing into a preset slot.
    StorePreset(PresetId),
}

impl MatrixCommand {
    /// The exact command text sent to the device, before byte narrowing.
    pub fn wire_text(&self) -> String {
        match self {
            MatrixCommand::Route { input, output } => format!("{input}V{output}."),
            MatrixCommand::RouteAll { input } => format!("{input}All"),
            MatrixCommand::OneToOne => "All#.".to_string(),
            MatrixCommand::RecallPreset(preset) => format!("Recall{:02}.", preset.get()),
            MatrixCommand::StorePreset(preset) => format!("Save{:02}.", preset.get()),
        }
    }

    /// Human-readable description of the action, independent of the wire
    /// payload. This is what the UI shows in its "last command" readout.
    pub fn description(&self) -> String {
        match self {
            MatrixCommand::Route { input, output } => {
                format!("Routing Input {input} to Output {output}")
            }
            MatrixCommand::RouteAll { input } => {
                format!("Patching Input {input} to all outputs")
            }
            MatrixCommand::OneToOne => "Mapping all inputs 1:1 to outputs".to_string(),
            MatrixCommand::RecallPreset(preset) => format!("Recalling Preset {preset}"),
            MatrixCommand::StorePreset(preset) => format!("Storing Preset {preset}"),
        }
    }

    /// Encodes the command into the byte sequence transmitted over UDP.
    pub fn encode(&self) -> Vec<u8> {
        encode_wire(&self.wire_text())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
