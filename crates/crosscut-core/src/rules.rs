pub mod validation;

pub use validation::{validate_cut, validate_filter, validate_segment};
