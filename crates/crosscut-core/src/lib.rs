//! crosscut core - deterministic survey cut execution
//!
//! This crate provides:
//! - Question catalog, response table and filter/cut contracts
//! - Filter compilation into row masks, including named segments
//! - Metric computation (frequency, mean, top/bottom-2-box, NPS)
//! - Single-dimension cross-tabulation
//! - Base-size reliability warnings via an injected policy
//! - The `Executor` state machine tying these together
//! - Markdown and JSON rendering of result tables
//!
//! Nothing here performs I/O; loading lives in `crosscut-store` and batch
//! orchestration in `crosscut-engine`.

pub mod config;
pub mod crosstab;
pub mod errors;
pub mod executor;
pub mod filter_compiler;
pub mod logging_facility;
pub mod mask;
pub mod metrics;
pub mod model;
pub mod reliability;
pub mod render;
pub mod rules;
pub mod segment_resolver;

// Re-export commonly used types
pub use crosscut_core_types::schema;
pub use config::EngineConfig;
pub use errors::{CutError, CxError, CxErrorKind, ErrorCategory, Result};
pub use executor::{ExecutionState, Executor};
pub use filter_compiler::FilterCompiler;
pub use mask::Mask;
pub use model::{Catalog, CutSpec, FilterExpr, ResponseTable, SegmentSpec, Table};
pub use reliability::{NoopReliabilityPolicy, ReliabilityPolicy, ThresholdPolicy};
pub use segment_resolver::SegmentResolver;
