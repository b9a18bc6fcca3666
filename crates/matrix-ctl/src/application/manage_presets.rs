//! ManagePresetsUseCase: device-side preset recall and store.
//!
//! Presets are opaque to the controller. The device applies or stores the
//! routing internally and the protocol offers no way to read a preset's
//! contents back, so this use case only issues the two commands and tracks
//! which preset id was recalled last. The presentation layer uses that
//! marker to pick the matching display-name set; no name lookup happens
//! here.

use std::sync::Arc;

use matrix_core::{CommandRecord, Endpoint, MatrixCommand, PresetId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::switch_routes::CommandTransport;

/// Error type for preset operations.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The datagram could not be handed to the network stack.
    #[error("transport error: {0}")]
    Transport(String),
}

/// The Manage Presets use case.
pub struct ManagePresetsUseCase {
    endpoint: Endpoint,
    transport: Arc<dyn CommandTransport>,
    current_preset: Option<PresetId>,
    last_command: Option<CommandRecord>,
}

impl ManagePresetsUseCase {
    pub fn new(endpoint: Endpoint, transport: Arc<dyn CommandTransport>) -> Self {
        Self {
            endpoint,
            transport,
            current_preset: None,
            last_command: None,
        }
    }

    /// Recalls `preset` on the device and marks it as current.
    ///
    /// The marker is committed optimistically, like routing state: the
    /// protocol has no acknowledgement to wait for.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Transport`] if the send failed.
    pub async fn recall(&mut self, preset: PresetId) -> Result<String, PresetError> {
        self.current_preset = Some(preset);
        self.dispatch(MatrixCommand::RecallPreset(preset)).await
    }

    /// Stores the device's current routing into `preset`.
    ///
    /// Does not change the current-preset marker; storing is not switching.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Transport`] if the send failed.
    pub async fn store(&mut self, preset: PresetId) -> Result<String, PresetError> {
        self.dispatch(MatrixCommand::StorePreset(preset)).await
    }

    /// The preset recalled last, if any.
    pub fn current_preset(&self) -> Option<PresetId> {
        self.current_preset
    }

    /// Points subsequent commands at a different device address.
    pub fn set_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoint = endpoint;
    }

    /// The most recent command record, if any operation ran yet.
    pub fn last_command(&self) -> Option<&CommandRecord> {
        self.last_command.as_ref()
    }

    async fn dispatch(&mut self, command: MatrixCommand) -> Result<String, PresetError> {
        let record = CommandRecord::capture(&command);
        let description = record.description.clone();
        debug!(
            command = %command.wire_text(),
            endpoint = %self.endpoint,
            "sending preset command"
        );
        let result = self.transport.send(&record.payload, &self.endpoint).await;
        self.last_command = Some(record);
        match result {
            Ok(()) => Ok(description),
            Err(e) => {
                warn!("send failed for \"{description}\": {e}");
                Err(PresetError::Transport(e))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
