//! Authoritative output→input routing map.
//!
//! The device protocol offers no acknowledgement and no state query, so this
//! map is the single source of truth the application renders. It is presumed
//! correct immediately after a successful send and is never reconciled
//! against the device.
//!
//! Mutations are optimistic by design: the caller applies them whether or
//! not the paired transport send succeeded. The map itself takes no position
//! on delivery; commit policy belongs to the application layer, which joins
//! the two concerns.

use std::collections::BTreeMap;

use tracing::warn;

use crate::ports::{InputPort, OutputPort};

/// In-memory mapping of each output to the input feeding it.
///
/// Outputs with no entry are unrouted. A `BTreeMap` keeps snapshots and
/// sync replays in ascending output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingState {
    routes: BTreeMap<OutputPort, InputPort>,
}

impl RoutingState {
    /// Creates an empty map: every output unrouted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `output` as fed by `input`, replacing any previous route.
    pub fn set_route(&mut self, output: OutputPort, input: InputPort) {
        self.routes.insert(output, input);
    }

    /// Routes every output to `input`.
    pub fn set_all_routed_to(&mut self, input: InputPort) {
        for output in OutputPort::all() {
            self.routes.insert(output, input);
        }
    }

    /// Resets to the identity mapping: output i fed by input i.
    pub fn reset_one_to_one(&mut self) {
        for (input, output) in InputPort::all().zip(OutputPort::all()) {
            self.routes.insert(output, input);
        }
    }

    /// The input currently feeding `output`, if any.
    pub fn get(&self, output: OutputPort) -> Option<InputPort> {
        self.routes.get(&output).copied()
    }

    /// A copy of the full map, in ascending output order.
    pub fn snapshot(&self) -> BTreeMap<OutputPort, InputPort> {
        self.routes.clone()
    }

    /// Number of routed outputs.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// `true` if no output is routed.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Forgets every route.
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Rebuilds state from persisted `(output, input)` pairs.
    ///
    /// Entries with an out-of-range output or input are dropped with a
    /// warning rather than propagated; a corrupt settings file must not
    /// poison the live map.
    pub fn from_raw_entries(entries: impl IntoIterator<Item = (u8, u8)>) -> Self {
        let mut state = Self::new();
        for (raw_output, raw_input) in entries {
            match (OutputPort::new(raw_output), InputPort::new(raw_input)) {
                (Ok(out), Ok(inp)) => {
                    state.routes.insert(out, inp);
                }
                _ => warn!(
                    output = raw_output,
                    input = raw_input,
                    "dropping persisted route with out-of-range port"
                ),
            }
        }
        state
    }

    /// Exports `(output, input)` pairs for the persistence collaborator.
    ///
    /// Round-trips losslessly through [`RoutingState::from_raw_entries`] for
    /// every populated entry.
    pub fn raw_entries(&self) -> Vec<(u8, u8)> {
        self.routes
            .iter()
            .map(|(out, inp)| (out.get(), inp.get()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
