//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_CUT_ID: &str = "cut_id";
pub const FIELD_QUESTION_ID: &str = "question_id";
pub const FIELD_SEGMENT_ID: &str = "segment_id";
pub const FIELD_METRIC: &str = "metric";

// Execution progress
pub const FIELD_STATE: &str = "state";

// Collection sizes
pub const FIELD_ROW_COUNT: &str = "row_count";
pub const FIELD_BASE_N: &str = "base_n";
pub const FIELD_CUT_COUNT: &str = "cut_count";
pub const FIELD_SEGMENT_COUNT: &str = "segment_count";
pub const FIELD_TABLE_COUNT: &str = "table_count";
pub const FIELD_FAILURE_COUNT: &str = "failure_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
