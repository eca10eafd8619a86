//! Crosscut Engine - Orchestration layer
//!
//! Runs batches of cuts against a loaded dataset, owns boundary logging
//! for every operation, and renders run reports.

pub mod commands;
pub mod report;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::execute::{
    execute_cut, execute_cuts, execute_dataset_cuts, materialize_segments, CutFailure,
    ExecutionResult,
};
pub use report::{render_result_json, render_run_report};
