//! Network endpoint of the matrix device.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// UDP port the matrix listens on out of the box.
pub const DEFAULT_PORT: u16 = 20107;

/// Factory-default address of the device.
pub const DEFAULT_HOST: &str = "192.168.1.230";

/// Error type for endpoint construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Port 0 cannot be the destination of a UDP datagram.
    #[error("port 0 is not a valid device port")]
    ZeroPort,
    /// The host string was empty.
    #[error("device host must not be empty")]
    EmptyHost,
}

/// Host and UDP port identifying the matrix device.
///
/// Treated as immutable while a routing or connectivity operation is in
/// flight; callers reconfigure it only between operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Hostname or IP address of the device.
    pub host: String,
    /// UDP port, [`DEFAULT_PORT`] unless reconfigured.
    pub port: u16,
}

impl Endpoint {
    /// Creates an endpoint after validating host and port.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] for an empty host or port 0.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let host = host.into();
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        if port == 0 {
            return Err(EndpointError::ZeroPort);
        }
        Ok(Self { host, port })
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
