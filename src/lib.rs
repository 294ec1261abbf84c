// Ecotrack: dashboard backend for environmental incident reports.
//
// This is the library root. The binary in main.rs wires these together into
// the `init`, `serve` and `status` commands.

pub mod config;
pub mod db;
pub mod output;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
