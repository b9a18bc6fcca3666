//! Infrastructure layer for the matrix controller.
//!
//! Contains the OS-facing adapters: UDP sockets, the ping subprocess,
//! file-system storage, and the UI command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `matrix_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod network;
pub mod storage;
pub mod ui_bridge;
