//! Core types shared across crosscut facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! structured logging facility and by error reporting. Keeping them in one
//! place lets the engine, store and tests agree on field names without
//! depending on each other.

pub mod schema;
