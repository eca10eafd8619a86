//! Crosscut Store - dataset import from disk
//!
//! Provides:
//! - Question and segment catalog loading (JSON)
//! - Response record loading into a typed `ResponseTable`
//! - Engine configuration loading (TOML)
//! - Dataset directory import with a reproducibility digest

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod digest;
pub mod errors;
pub mod responses;

// Re-export key types
pub use catalog::{load_catalog, parse_questions_str, parse_segments_str};
pub use config::load_engine_config;
pub use dataset::{load_dataset, load_dataset_with_delimiter, Dataset};
pub use digest::compute_dataset_digest;
pub use errors::Result;
pub use responses::load_responses;
