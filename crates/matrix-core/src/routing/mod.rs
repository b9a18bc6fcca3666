//! Routing domain: the authoritative output→input map.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies. The device protocol is one-way, so the map defined here is
//! the only routing state the application can trust; see
//! [`state::RoutingState`].

pub mod state;

pub use state::RoutingState;
