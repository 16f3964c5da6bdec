//! Deterministic particle and node tables.
//!
//! The tables are pure functions of compile-time constants and are built once per process.

pub(crate) mod network;
pub(crate) mod particles;
