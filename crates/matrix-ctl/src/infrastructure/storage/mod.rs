//! File-system storage for the matrix controller.
//!
//! # Sub-modules
//!
//! - **`config`** – TOML persistence of the device address, presentation
//!   settings, and the last known routing map.
//!
//! - **`names`** – TOML persistence of per-preset display names for inputs
//!   and outputs plus the current-preset marker. Purely presentational; the
//!   controller core addresses everything by number.
//!
//! - **`iomap`** – JSON import/export of a routing map together with its
//!   output names, for moving a configuration between machines.

pub mod config;
pub mod iomap;
pub mod names;
