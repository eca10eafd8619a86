//! Engine-level commands dispatched against one executor.

use crate::commands::execute::{execute_cut, execute_cuts, materialize_segments, ExecutionResult};
use crosscut_core::model::{CutSpec, Table};
use crosscut_core::Executor;
use crosscut_store::errors::Result;
use std::collections::BTreeMap;

/// Engine-level commands.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Execute a single cut; its failure is the command's failure.
    ExecuteCut { cut: CutSpec },
    /// Execute many cuts, collecting per-cut failures.
    ExecuteBatch { cuts: Vec<CutSpec> },
    /// Count respondents in every catalog segment.
    MaterializeSegments,
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    ExecuteCut(Table),
    ExecuteBatch(ExecutionResult),
    MaterializeSegments(BTreeMap<String, usize>),
}

/// Apply an engine command.
///
/// # Errors
///
/// - `ExecuteCut`: the cut's configuration or data error
/// - `ExecuteBatch`, `MaterializeSegments`: a segment that does not resolve
pub fn apply_engine_command(
    cmd: EngineCommand,
    executor: &Executor<'_>,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::ExecuteCut { cut } => {
            execute_cut(executor, &cut).map(EngineCommandResult::ExecuteCut)
        }
        EngineCommand::ExecuteBatch { cuts } => {
            execute_cuts(executor, &cuts).map(EngineCommandResult::ExecuteBatch)
        }
        EngineCommand::MaterializeSegments => {
            materialize_segments(executor).map(EngineCommandResult::MaterializeSegments)
        }
    }
}
