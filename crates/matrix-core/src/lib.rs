//! # matrix-core
//!
//! Shared library for the HDMI matrix controller containing the wire-protocol
//! command builder, the legacy byte encoder, and the authoritative routing
//! state.
//!
//! This crate is used by the controller application and its tests. It has
//! zero dependencies on sockets, the file system, or UI frameworks.
//!
//! # Architecture overview
//!
//! The matrix switcher is a hardware device that connects any of 16 video
//! inputs to any of 16 video outputs and stores 32 routing presets. It is
//! driven over a one-way UDP text protocol; commands go out and nothing comes
//! back: no acknowledgement, no state query.
//!
//! This crate defines:
//!
//! - **`protocol`** – How commands travel over the wire. Each operation is a
//!   short command string (`"3V7."` routes input 3 to output 7) narrowed
//!   through a legacy 16-bit-code-unit encoding before transmission.
//!
//! - **`routing`** – The in-memory output→input map. Because the device
//!   cannot be queried, this map is the single source of truth the
//!   application renders and persists.
//!
//! - **`ports`** – Validated identifier types for inputs, outputs, and
//!   presets, so an out-of-range number is rejected before any wire command
//!   is built.
//!
//! - **`endpoint`** – The host/port pair identifying the device.

pub mod endpoint;
pub mod ports;
pub mod protocol;
pub mod routing;

// Re-export the most-used types at the crate root so callers can write
// `matrix_core::RoutingState` instead of `matrix_core::routing::state::RoutingState`.
pub use endpoint::{Endpoint, EndpointError, DEFAULT_HOST, DEFAULT_PORT};
pub use ports::{InputPort, OutputPort, PresetId, RangeError, MATRIX_SIZE, PRESET_SLOTS};
pub use protocol::command::MatrixCommand;
pub use protocol::encode::{encode_wire, wire_safe};
pub use protocol::record::CommandRecord;
pub use routing::RoutingState;
