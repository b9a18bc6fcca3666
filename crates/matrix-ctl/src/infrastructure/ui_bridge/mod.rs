//! UI command bridge: exposes application-layer operations to the GUI shell.
//!
//! The graphical presentation layer (routing grid, preset buttons, settings
//! tab) is an external collaborator; this module is the only surface it
//! talks to. Every command delegates to the shared [`AppState`] and returns
//! a [`CommandResult`] so the frontend always receives the same response
//! shape: `{ success, data, error }`.
//!
//! # Data Transfer Objects
//!
//! The bridge converts internal types (validated ports, `RoutingState`) into
//! plain DTOs with only directly serialisable fields, so the frontend never
//! sees a type it cannot decode.
//!
//! # Persistence
//!
//! Routing and rename commands mutate in-memory state only; the GUI calls
//! [`persist`] after a burst of changes (and on exit) to fold the live
//! routing map into the config file and write both config and names to
//! disk.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use matrix_core::{CommandRecord, Endpoint, InputPort, OutputPort, PresetId};

use crate::application::check_connectivity::{spawn_probe, ReachabilityProbe};
use crate::application::manage_presets::ManagePresetsUseCase;
use crate::application::switch_routes::{CommandTransport, SwitchRoutesUseCase};
use crate::infrastructure::network::probe::PingProbe;
use crate::infrastructure::network::transport::UdpTransport;
use crate::infrastructure::storage::config::{load_config, save_config, AppConfig, Theme};
use crate::infrastructure::storage::iomap::{load_io_map, save_io_map, IoMapFile};
use crate::infrastructure::storage::names::{load_names, save_names, NamesFile};

// ── Shared application state ──────────────────────────────────────────────────

/// Application state shared between UI commands.
///
/// All mutable fields sit behind async mutexes because commands run
/// concurrently on the Tokio runtime; routing commands serialize on the
/// `switcher` lock, which also keeps `RoutingState` single-writer.
pub struct AppState {
    /// The persisted configuration (device address, theme, last routing).
    pub config: Mutex<AppConfig>,
    /// Routing operations and the authoritative routing map.
    pub switcher: Mutex<SwitchRoutesUseCase>,
    /// Preset recall/store operations.
    pub presets: Mutex<ManagePresetsUseCase>,
    /// Display names for the presentation layer.
    pub names: Mutex<NamesFile>,
    /// Reachability probe used by [`check_connection`].
    probe: Arc<dyn ReachabilityProbe>,
}

impl AppState {
    /// Initialises application state from the persisted configuration with
    /// the real UDP transport and ping probe.
    ///
    /// Falls back to defaults if no config or names file exists yet.
    pub fn new() -> Arc<Self> {
        let config = load_config().unwrap_or_default();
        let names = load_names().unwrap_or_default();
        Self::with_infrastructure(
            config,
            names,
            Arc::new(UdpTransport::new()),
            Arc::new(PingProbe::new()),
        )
    }

    /// Initialises application state with injected transport and probe.
    pub fn with_infrastructure(
        config: AppConfig,
        names: NamesFile,
        transport: Arc<dyn CommandTransport>,
        probe: Arc<dyn ReachabilityProbe>,
    ) -> Arc<Self> {
        let endpoint = config.endpoint();
        let routes = config.initial_routes();
        let switcher =
            SwitchRoutesUseCase::new(endpoint.clone(), routes, Arc::clone(&transport));
        let presets = ManagePresetsUseCase::new(endpoint, transport);

        Arc::new(Self {
            config: Mutex::new(config),
            switcher: Mutex::new(switcher),
            presets: Mutex::new(presets),
            names: Mutex::new(names),
            probe,
        })
    }
}

// ── Data Transfer Objects (Presentation layer) ────────────────────────────────

/// DTO for one populated routing entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDto {
    pub output: u8,
    pub input: u8,
}

/// DTO for the settings tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsDto {
    pub ip: String,
    pub port: u16,
    pub theme: Theme,
    pub confirm_before_switch: bool,
}

/// DTO for the display names of the current preset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamesDto {
    pub current_preset: String,
    pub inputs: BTreeMap<String, String>,
    pub outputs: BTreeMap<String, String>,
}

/// DTO for the "last command" readout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastCommandDto {
    pub description: String,
    pub payload: Vec<u8>,
}

impl From<&CommandRecord> for LastCommandDto {
    fn from(record: &CommandRecord) -> Self {
        Self {
            description: record.description.clone(),
            payload: record.payload.clone(),
        }
    }
}

/// Unified response wrapper used by all UI commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Routing commands ──────────────────────────────────────────────────────────

/// Returns every populated routing entry in output order.
pub async fn get_routes(state: Arc<AppState>) -> CommandResult<Vec<RouteDto>> {
    let switcher = state.switcher.lock().await;
    let dtos = switcher
        .export_routes()
        .into_iter()
        .map(|(output, input)| RouteDto { output, input })
        .collect();
    CommandResult::ok(dtos)
}

/// Returns the input currently feeding `output`, if any.
///
/// The GUI uses this before a route to build its override-confirmation
/// dialog when `confirm_before_switch` is set; the dialog itself is
/// presentation, not core policy.
pub async fn get_route(state: Arc<AppState>, output: u8) -> CommandResult<Option<u8>> {
    let output = match OutputPort::new(output) {
        Ok(o) => o,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let switcher = state.switcher.lock().await;
    CommandResult::ok(switcher.routing().get(output).map(InputPort::get))
}

/// Routes `input` to `output` and mirrors the change into the in-memory
/// config mapping.
pub async fn route(state: Arc<AppState>, input: u8, output: u8) -> CommandResult<String> {
    let (input, output) = match (InputPort::new(input), OutputPort::new(output)) {
        (Ok(i), Ok(o)) => (i, o),
        (Err(e), _) | (_, Err(e)) => return CommandResult::err(e.to_string()),
    };

    let mut switcher = state.switcher.lock().await;
    let result = switcher.route(input, output).await;
    sync_config_mappings(&state, &switcher).await;
    match result {
        Ok(description) => CommandResult::ok(description),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Routes `input` to all outputs with a single device command.
pub async fn route_all(state: Arc<AppState>, input: u8) -> CommandResult<String> {
    let input = match InputPort::new(input) {
        Ok(i) => i,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let mut switcher = state.switcher.lock().await;
    let result = switcher.route_all(input).await;
    sync_config_mappings(&state, &switcher).await;
    match result {
        Ok(description) => CommandResult::ok(description),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Resets device and local map to the identity mapping.
pub async fn map_one_to_one(state: Arc<AppState>) -> CommandResult<String> {
    let mut switcher = state.switcher.lock().await;
    let result = switcher.map_one_to_one().await;
    sync_config_mappings(&state, &switcher).await;
    match result {
        Ok(description) => CommandResult::ok(description),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Replays every local route to the device; returns how many were sent.
pub async fn sync_to_device(state: Arc<AppState>) -> CommandResult<usize> {
    let mut switcher = state.switcher.lock().await;
    match switcher.sync_all().await {
        Ok(count) => CommandResult::ok(count),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

// ── Preset commands ───────────────────────────────────────────────────────────

/// Recalls a device preset and switches the active display-name set.
pub async fn recall_preset(state: Arc<AppState>, preset: u8) -> CommandResult<String> {
    let preset = match PresetId::new(preset) {
        Ok(p) => p,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let mut presets = state.presets.lock().await;
    let result = presets.recall(preset).await;
    state.names.lock().await.set_current_preset(preset);
    match result {
        Ok(description) => CommandResult::ok(description),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Stores the device's current routing into a preset slot.
pub async fn store_preset(state: Arc<AppState>, preset: u8) -> CommandResult<String> {
    let preset = match PresetId::new(preset) {
        Ok(p) => p,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let mut presets = state.presets.lock().await;
    match presets.store(preset).await {
        Ok(description) => CommandResult::ok(description),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

// ── Connectivity ──────────────────────────────────────────────────────────────

/// Fires one reachability probe and reports the result.
///
/// The probe runs on its own task; this command only awaits its single
/// result message, so routing commands issued meanwhile are not blocked by
/// an unreachable device.
pub async fn check_connection(state: Arc<AppState>) -> CommandResult<bool> {
    let host = state.config.lock().await.device.ip.clone();
    let rx = spawn_probe(Arc::clone(&state.probe), host);
    match rx.await {
        Ok(Ok(reachable)) => CommandResult::ok(reachable),
        Ok(Err(failure)) => CommandResult::err(failure.to_string()),
        Err(_) => CommandResult::err("connectivity probe task was dropped"),
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Returns the current settings for the settings tab.
pub async fn get_settings(state: Arc<AppState>) -> CommandResult<SettingsDto> {
    let config = state.config.lock().await;
    CommandResult::ok(SettingsDto {
        ip: config.device.ip.clone(),
        port: config.device.port,
        theme: config.ui.theme,
        confirm_before_switch: config.ui.confirm_before_switch,
    })
}

/// Applies new settings in memory and repoints both use cases at the new
/// device address. Call [`persist`] to write them to disk.
pub async fn apply_settings(state: Arc<AppState>, settings: SettingsDto) -> CommandResult<()> {
    let endpoint = match Endpoint::new(settings.ip.clone(), settings.port) {
        Ok(ep) => ep,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    {
        let mut config = state.config.lock().await;
        config.device.ip = settings.ip;
        config.device.port = settings.port;
        config.ui.theme = settings.theme;
        config.ui.confirm_before_switch = settings.confirm_before_switch;
    }
    state.switcher.lock().await.set_endpoint(endpoint.clone());
    state.presets.lock().await.set_endpoint(endpoint.clone());
    info!(%endpoint, "settings applied");
    CommandResult::ok(())
}

/// Folds the live routing map into the config and writes config and names
/// to disk.
pub async fn persist(state: Arc<AppState>) -> CommandResult<()> {
    {
        let switcher = state.switcher.lock().await;
        sync_config_mappings(&state, &switcher).await;
    }
    let config = state.config.lock().await;
    if let Err(e) = save_config(&config) {
        return CommandResult::err(e.to_string());
    }
    let names = state.names.lock().await;
    if let Err(e) = save_names(&names) {
        return CommandResult::err(e.to_string());
    }
    CommandResult::ok(())
}

// ── Display names ─────────────────────────────────────────────────────────────

/// Returns the display names of the current preset.
pub async fn get_names(state: Arc<AppState>) -> CommandResult<NamesDto> {
    let names = state.names.lock().await;
    let set = names.current_set().cloned().unwrap_or_default();
    CommandResult::ok(NamesDto {
        current_preset: names.current_preset.clone(),
        inputs: set.inputs,
        outputs: set.outputs,
    })
}

/// Renames an input in the current preset (empty string removes the label).
pub async fn rename_input(state: Arc<AppState>, input: u8, name: String) -> CommandResult<()> {
    let input = match InputPort::new(input) {
        Ok(i) => i,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    state.names.lock().await.rename_input(input, name);
    CommandResult::ok(())
}

/// Renames an output in the current preset (empty string removes the label).
pub async fn rename_output(state: Arc<AppState>, output: u8, name: String) -> CommandResult<()> {
    let output = match OutputPort::new(output) {
        Ok(o) => o,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    state.names.lock().await.rename_output(output, name);
    CommandResult::ok(())
}

// ── I/O map exchange ──────────────────────────────────────────────────────────

/// Exports the routing map plus current output names to a JSON file;
/// returns the number of exported entries.
pub async fn export_io_map(state: Arc<AppState>, path: String) -> CommandResult<usize> {
    let map = {
        let switcher = state.switcher.lock().await;
        let names = state.names.lock().await;
        IoMapFile::from_state(switcher.routing(), names.current_output_names())
    };
    match save_io_map(Path::new(&path), &map) {
        Ok(()) => CommandResult::ok(map.mappings.len()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Imports a routing map plus output names from a JSON file; returns the
/// number of imported entries. The device is not updated; the GUI offers a
/// follow-up [`sync_to_device`].
pub async fn import_io_map(state: Arc<AppState>, path: String) -> CommandResult<usize> {
    let map = match load_io_map(Path::new(&path)) {
        Ok(map) => map,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let routes = map.routes();
    let count = routes.len();

    let mut switcher = state.switcher.lock().await;
    switcher.load_routes(routes);
    sync_config_mappings(&state, &switcher).await;
    state
        .names
        .lock()
        .await
        .replace_current_output_names(map.output_names);
    CommandResult::ok(count)
}

// ── Observability ─────────────────────────────────────────────────────────────

/// Returns the most recent command across routing and preset operations.
pub async fn last_command(state: Arc<AppState>) -> CommandResult<Option<LastCommandDto>> {
    let switcher = state.switcher.lock().await;
    let presets = state.presets.lock().await;
    let latest = match (switcher.last_command(), presets.last_command()) {
        (Some(a), Some(b)) => Some(if a.sent_at >= b.sent_at { a } else { b }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    };
    CommandResult::ok(latest.map(LastCommandDto::from))
}

/// Mirrors the switcher's routing map into the in-memory config.
async fn sync_config_mappings(state: &AppState, switcher: &SwitchRoutesUseCase) {
    let mut config = state.config.lock().await;
    config.store_routes(switcher.routing());
}

// ── Tests ─────────────────────────────────────────────────────────────────────
