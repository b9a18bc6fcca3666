//! Network infrastructure for the matrix controller.
//!
//! # Sub-modules
//!
//! - **`transport`** – Connectionless UDP client for the device's one-way
//!   command protocol. One socket per send, a 1-second send bound, and the
//!   device's mandatory 50 ms settling delay.
//!
//! - **`probe`** – ICMP reachability check built on the system `ping` tool,
//!   used by the connectivity use case. Independent of the command channel:
//!   a probe never gates a routing operation.

pub mod probe;
pub mod transport;
