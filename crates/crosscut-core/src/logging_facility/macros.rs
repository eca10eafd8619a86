//! Boundary logging macros
//!
//! Every key is taken from `crosscut_core_types::schema`, so the engine and
//! test capture agree on field names. The `cut = ..` and `table = ..` arms
//! expand a `CutSpec` or result `Table` into its identifying fields.

/// Log the start of an operation
///
/// With `cut = <&CutSpec>` the event carries the cut id, metric question
/// and metric type.
///
/// # Example
///
/// ```
/// # use crosscut_core::log_op_start;
/// # use crosscut_core::model::{CutSpec, MetricSpec, MetricType};
/// let cut = CutSpec::new("cut-1", MetricSpec::new(MetricType::Nps, "Q_NPS"));
/// log_op_start!("materialize_segments");
/// log_op_start!("execute_cut", cut = &cut);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, cut = $cut:expr) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_START,
            { $crate::schema::FIELD_CUT_ID } = %$cut.cut_id,
            { $crate::schema::FIELD_QUESTION_ID } = %$cut.metric.question_id,
            { $crate::schema::FIELD_METRIC } = %$cut.metric.metric_type,
        );
    };
    ($op:expr) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// With `table = <&Table>` the event carries the cut id, base size and
/// row count of the emitted table.
///
/// # Example
///
/// ```
/// # use crosscut_core::log_op_end;
/// log_op_end!("materialize_segments", duration_ms = 42);
/// log_op_end!("execute_cuts", duration_ms = 42, cut_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr, table = $table:expr) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_END,
            { $crate::schema::FIELD_DURATION_MS } = $duration,
            { $crate::schema::FIELD_CUT_ID } = %$table.cut_id,
            { $crate::schema::FIELD_BASE_N } = $table.base_n,
            { $crate::schema::FIELD_ROW_COUNT } = $table.rows.len(),
        );
    };
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_END,
            { $crate::schema::FIELD_DURATION_MS } = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_END,
            { $crate::schema::FIELD_DURATION_MS } = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `CxError` and records its kind and
/// stable code. With `cut = <&CutSpec>` the failing cut id is attached.
///
/// # Example
///
/// ```
/// # use crosscut_core::{log_op_error, errors::CutError};
/// let err = CutError::UnknownQuestion { question_id: "Q9".to_string() };
/// log_op_error!("execute_cut", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr, cut = $cut:expr) => {{
        let cx_err: $crate::errors::CxError = $err.into();
        tracing::error!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_END_ERROR,
            { $crate::schema::FIELD_DURATION_MS } = $duration,
            { $crate::schema::FIELD_ERR_KIND } = ?cx_err.kind(),
            { $crate::schema::FIELD_ERR_CODE } = cx_err.code(),
            { $crate::schema::FIELD_CUT_ID } = %$cut.cut_id,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let cx_err: $crate::errors::CxError = $err.into();
        tracing::error!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_END_ERROR,
            { $crate::schema::FIELD_DURATION_MS } = $duration,
            { $crate::schema::FIELD_ERR_KIND } = ?cx_err.kind(),
            { $crate::schema::FIELD_ERR_CODE } = cx_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let cx_err: $crate::errors::CxError = $err.into();
        tracing::error!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_END_ERROR,
            { $crate::schema::FIELD_DURATION_MS } = $duration,
            { $crate::schema::FIELD_ERR_KIND } = ?cx_err.kind(),
            { $crate::schema::FIELD_ERR_CODE } = cx_err.code(),
            $($field)*
        );
    }};
}
