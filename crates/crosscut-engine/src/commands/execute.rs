//! Cut execution with boundary logging.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for cut execution:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.
//! [`execute_dataset_cuts`] installs the subscriber named by the engine
//! config's `log_profile` before the first event.

use crosscut_core::errors::CxError;
use crosscut_core::logging_facility;
use crosscut_core::model::{CutSpec, Table};
use crosscut_core::{log_op_end, log_op_error, log_op_start, EngineConfig, Executor};
use crosscut_store::errors::Result;
use crosscut_core_types::schema::{
    FIELD_CUT_COUNT, FIELD_FAILURE_COUNT, FIELD_SEGMENT_COUNT, FIELD_TABLE_COUNT,
};
use crosscut_store::Dataset;
use serde::Serialize;
use std::collections::BTreeMap;

/// A cut that failed, recorded without stopping the batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutFailure {
    pub cut_id: String,
    /// Stable error code, e.g. `ERR_UNKNOWN_QUESTION`
    pub code: String,
    pub message: String,
}

impl CutFailure {
    fn from_error(cut_id: &str, err: &CxError) -> Self {
        Self {
            cut_id: cut_id.to_string(),
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

/// Outcome of a batch of cuts
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionResult {
    /// Successful tables in input order
    pub tables: Vec<Table>,
    /// Failed cuts in input order
    pub failures: Vec<CutFailure>,
    /// Respondent count of every catalog segment
    pub segment_bases: BTreeMap<String, usize>,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Table for `cut_id`, if that cut succeeded
    pub fn table(&self, cut_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.cut_id == cut_id)
    }

    /// Failure for `cut_id`, if that cut failed
    pub fn failure(&self, cut_id: &str) -> Option<&CutFailure> {
        self.failures.iter().find(|f| f.cut_id == cut_id)
    }
}

/// Execute one cut
///
/// # Errors
///
/// The executor's configuration or data error, carrying the cut id.
pub fn execute_cut(executor: &Executor<'_>, cut: &CutSpec) -> Result<Table> {
    log_op_start!("execute_cut", cut = cut);
    let start = std::time::Instant::now();

    let table = executor.execute(cut).map_err(|e| {
        log_op_error!(
            "execute_cut",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            cut = cut
        );
        CxError::from(e)
            .with_op("execute_cut")
            .with_cut_id(cut.cut_id.clone())
    })?;

    log_op_end!(
        "execute_cut",
        duration_ms = start.elapsed().as_millis() as u64,
        table = table
    );

    Ok(table)
}

/// Respondent count of every catalog segment
///
/// # Errors
///
/// The first segment whose definition does not resolve or whose columns
/// are missing.
pub fn materialize_segments(executor: &Executor<'_>) -> Result<BTreeMap<String, usize>> {
    log_op_start!("materialize_segments");
    let start = std::time::Instant::now();

    let bases = executor.segment_resolver().materialize().map_err(|e| {
        log_op_error!(
            "materialize_segments",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        CxError::from(e).with_op("materialize_segments")
    })?;

    log_op_end!(
        "materialize_segments",
        duration_ms = start.elapsed().as_millis() as u64,
        { FIELD_SEGMENT_COUNT } = bases.len()
    );

    Ok(bases)
}

/// Execute a batch of cuts
///
/// Segments are materialized first. A failing cut is recorded in
/// `failures` and the batch continues.
///
/// # Errors
///
/// Only segment materialization failures abort the batch.
pub fn execute_cuts(executor: &Executor<'_>, cuts: &[CutSpec]) -> Result<ExecutionResult> {
    log_op_start!("execute_cuts", { FIELD_CUT_COUNT } = cuts.len());
    let start = std::time::Instant::now();

    let segment_bases = materialize_segments(executor).map_err(|e| {
        log_op_error!(
            "execute_cuts",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    let mut result = ExecutionResult {
        segment_bases,
        ..ExecutionResult::default()
    };

    for cut in cuts {
        match execute_cut(executor, cut) {
            Ok(table) => result.tables.push(table),
            Err(err) => result.failures.push(CutFailure::from_error(&cut.cut_id, &err)),
        }
    }

    log_op_end!(
        "execute_cuts",
        duration_ms = start.elapsed().as_millis() as u64,
        { FIELD_CUT_COUNT } = cuts.len(),
        { FIELD_TABLE_COUNT } = result.tables.len(),
        { FIELD_FAILURE_COUNT } = result.failures.len()
    );

    Ok(result)
}

/// Execute a batch of cuts against a loaded dataset
///
/// Installs the subscriber for `config.log_profile` unless one is already
/// active, then runs [`execute_cuts`] with the config's thresholds.
///
/// # Errors
///
/// As [`execute_cuts`].
pub fn execute_dataset_cuts(
    dataset: &Dataset,
    cuts: &[CutSpec],
    config: &EngineConfig,
) -> Result<ExecutionResult> {
    logging_facility::init(config.log_profile);
    let executor = Executor::from_config(&dataset.catalog, &dataset.table, config);
    execute_cuts(&executor, cuts)
}
