//! Foundation types for surf.
//!
//! Shared by every surf crate: the error taxonomy used by the session
//! engine and the command layer, and the TOML-backed configuration.

pub mod config;
pub mod error;
