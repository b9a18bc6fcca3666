//! Connectionless UDP transport for matrix commands.
//!
//! The protocol is fire-and-forget: the device never replies, so each send
//! opens a fresh socket, transmits one datagram, and drops the socket. No
//! connection pooling, no socket reuse, no retry: UDP gives no delivery
//! guarantee and the mitigation is a user-level retry or a full state sync.
//!
//! Two timing rules are enforced on every real send:
//!
//! - a 1-second bound on the send itself, in case the local stack
//!   misbehaves even though no response is awaited;
//! - a 50 ms settling delay after the send returns, because the device
//!   drops commands that arrive back-to-back faster than that.
//!
//! The settling delay lives here rather than in the use case so that
//! injected test transports can skip it.

use std::time::Duration;

use async_trait::async_trait;
use matrix_core::Endpoint;
use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

use crate::application::switch_routes::CommandTransport;

/// Bound on a single `send_to`.
const SEND_TIMEOUT: Duration = Duration::from_secs(1);

/// Minimum gap the device needs between consecutive commands.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Error type for datagram transmission.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No local UDP socket could be opened.
    #[error("failed to open UDP socket: {0}")]
    Bind(#[source] std::io::Error),

    /// The datagram could not be sent (includes hostname resolution
    /// failures and unreachable-network errors).
    #[error("failed to send datagram to {endpoint}: {source}")]
    Send {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The send did not complete within [`SEND_TIMEOUT`].
    #[error("send to {0} timed out after 1s")]
    Timeout(String),
}

/// Per-send connectionless UDP client.
#[derive(Debug, Clone, Default)]
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }

    /// Sends one datagram and observes the device's pacing rules.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for bind, send, or timeout failures. The
    /// settling delay is skipped on failure; there was nothing for the
    /// device to settle from.
    async fn send_datagram(
        &self,
        payload: &[u8],
        endpoint: &Endpoint,
    ) -> Result<(), TransportError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(TransportError::Bind)?;

        let target = (endpoint.host.as_str(), endpoint.port);
        match timeout(SEND_TIMEOUT, socket.send_to(payload, target)).await {
            Ok(Ok(written)) => {
                debug!(bytes = written, endpoint = %endpoint, "datagram sent");
            }
            Ok(Err(source)) => {
                return Err(TransportError::Send {
                    endpoint: endpoint.to_string(),
                    source,
                });
            }
            Err(_) => return Err(TransportError::Timeout(endpoint.to_string())),
        }

        // Device pacing: it cannot accept back-to-back commands.
        tokio::time::sleep(SETTLE_DELAY).await;
        Ok(())
    }
}

#[async_trait]
impl CommandTransport for UdpTransport {
    async fn send(&self, payload: &[u8], endpoint: &Endpoint) -> Result<(), String> {
        self.send_datagram(payload, endpoint)
            .await
            .map_err(|e| e.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Binds a loopback listener and returns it with its port.
    fn loopback_listener() -> (std::net::UdpSocket, u16) {
        let socket = std::net::UdpSocket::bind("127.0.0.1:0").expect("listener bind");
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = socket.local_addr().unwrap().port();
        (socket, port)
    }

    #[tokio::test]
    async fn test_send_delivers_exact_bytes_to_listener() {
        // Arrange
        let (listener, port) = loopback_listener();
        let endpoint = Endpoint::new("127.0.0.1", port).unwrap();
        let payload = vec![0x33, 0x56, 0x37, 0x2E]; // "3V7." narrowed

        // Act
        UdpTransport::new().send(&payload, &endpoint).await.unwrap();

        // Assert – the datagram is already buffered by the OS
        let mut buf = [0u8; 64];
        let (len, _) = listener.recv_from(&mut buf).expect("datagram must arrive");
        assert_eq!(&buf[..len], payload.as_slice());
    }

    #[tokio::test]
    async fn test_send_takes_at_least_the_settling_delay() {
        let (_listener, port) = loopback_listener();
        let endpoint = Endpoint::new("127.0.0.1", port).unwrap();

        let started = Instant::now();
        UdpTransport::new().send(b"1V1.", &endpoint).await.unwrap();

        assert!(
            started.elapsed() >= SETTLE_DELAY,
            "send must pace commands for the device, took {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_two_sends_take_at_least_twice_the_settling_delay() {
        let (_listener, port) = loopback_listener();
        let endpoint = Endpoint::new("127.0.0.1", port).unwrap();
        let transport = UdpTransport::new();

        let started = Instant::now();
        transport.send(b"1V1.", &endpoint).await.unwrap();
        transport.send(b"2V2.", &endpoint).await.unwrap();

        assert!(started.elapsed() >= SETTLE_DELAY * 2);
    }

    #[tokio::test]
    async fn test_send_to_unresolvable_host_reports_error() {
        let endpoint = Endpoint::new("host.invalid", 20107).unwrap();

        let result = UdpTransport::new().send(b"1V1.", &endpoint).await;

        assert!(result.is_err(), "unresolvable host must surface an error");
    }

    #[test]
    fn test_transport_error_messages_name_the_endpoint() {
        let err = TransportError::Timeout("10.0.0.1:20107".to_string());
        assert_eq!(err.to_string(), "send to 10.0.0.1:20107 timed out after 1s");
    }
}
