//! Command orchestration layer.
//!
//! Provides high-level command functions that coordinate the core
//! executor with datasets loaded by the store.

pub mod engine_command;
pub mod execute;
