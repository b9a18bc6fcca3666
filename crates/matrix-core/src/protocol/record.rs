//! Ephemeral record of the last transmitted command.

use std::time::SystemTime;

use crate::protocol::command::MatrixCommand;

/// What was last sent: the logical description, the exact wire payload, and
/// when it happened.
///
/// Kept only long enough to report the last action in the UI; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    /// Human-readable description, e.g. `Routing Input 3 to Output 7`.
    pub description: String,
    /// The narrowed byte sequence handed to the transport.
    pub payload: Vec<u8>,
    /// When the record was captured, immediately before the send.
    pub sent_at: SystemTime,
}

impl CommandRecord {
    /// Captures `command` at the current instant.
    pub fn capture(command: &MatrixCommand) -> Self {
        Self {
            description: command.description(),
            payload: command.encode(),
            sent_at: SystemTime::now(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
