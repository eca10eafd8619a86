//! Structured logging facility for crosscut
//!
//! - `init(profile)`, driven by `EngineConfig::log_profile`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`) keyed
//!   by the schema constants
//! - An in-memory capture layer for assertions on cut and state fields
//!
//! Boundary events (`start`/`end`/`end_error`) belong to the engine crate.
//! The executor and compilers below it only emit `tracing::debug!` events.
//!
//! # Usage
//!
//! ```rust
//! use crosscut_core::logging_facility::{init, Profile};
//!
//! init(Profile::Test);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{active_profile, init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
