//! Application layer use cases for the matrix controller.
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "route
//!   input 3 to output 7 and remember that locally").
//! - **Depend on abstractions** (traits) rather than concrete
//!   implementations, so the UDP transport and the ping probe can be swapped
//!   for recording fakes in tests.
//! - **Contain no socket calls, no process spawning, no file system
//!   access.**
//!
//! # Sub-modules
//!
//! - **`switch_routes`** – Translates routing intents into wire commands and
//!   keeps the local routing map authoritative. This is the heart of the
//!   controller.
//!
//! - **`manage_presets`** – Issues device-side preset recall/store commands
//!   and tracks which preset was recalled last.
//!
//! - **`check_connectivity`** – Fires one reachability probe per invocation
//!   on its own task and delivers a single boolean result, so an unreachable
//!   device never stalls routing.

pub mod check_connectivity;
pub mod manage_presets;
pub mod switch_routes;
