//! Legacy byte encoder for matrix wire commands.
//!
//! The matrix firmware does not take plain ASCII. It expects each command
//! character as the low-order byte of a 16-bit code unit: the command text
//! is widened to UTF-16 and only the low byte of every unit is kept, in
//! order, halving the natural wide-encoding length.
//!
//! ```text
//! "3V7."  →  UTF-16 units [0x0033, 0x0056, 0x0037, 0x002E]
//!         →  wire bytes   [0x33, 0x56, 0x37, 0x2E]
//! ```
//!
//! The command alphabet is restricted to printable ASCII (digits, letters,
//! `V`, `#`, `.`), where the high byte of every unit is zero and the
//! narrowing is lossless. Characters outside that alphabet would be silently
//! truncated; [`wire_safe`] guards against them in debug builds and tests.
//!
//! The device requires a byte-exact match of this scheme, so the encoder is
//! defined in terms of narrowed UTF-16 units rather than `str::as_bytes`,
//! even though the two agree on the command alphabet.

/// Encodes a command string into the byte sequence transmitted over UDP.
///
/// Pure and total over the wire alphabet: one output byte per UTF-16 code
/// unit of `command`, each the low-order byte of its unit.
///
/// # Examples
///
/// ```rust
/// use matrix_core::protocol::encode::encode_wire;
///
/// assert_eq!(encode_wire("5V2."), vec![0x35, 0x56, 0x32, 0x2E]);
/// ```
pub fn encode_wire(command: &str) -> Vec<u8> {
    debug_assert!(
        wire_safe(command),
        "command {command:?} contains characters outside the wire alphabet"
    );
    command.encode_utf16().map(|unit| unit as u8).collect()
}

/// Returns `true` if `command` stays within the protocol's printable-ASCII
/// alphabet, for which the narrowing encoding is lossless.
pub fn wire_safe(command: &str) -> bool {
    command.chars().all(|c| c.is_ascii() && !c.is_ascii_control())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
