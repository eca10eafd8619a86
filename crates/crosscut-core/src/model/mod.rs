pub mod catalog;
pub mod code;
pub mod filter;
pub mod question;
pub mod response;
pub mod spec;
pub mod table;

pub use catalog::Catalog;
pub use code::{CodeKey, CodeValue};
pub use filter::FilterExpr;
pub use question::{Question, QuestionOption, QuestionType};
pub use response::{RawCell, Record, ResponseTable, ResponseValue};
pub use spec::{CutSpec, DimensionKind, DimensionSpec, MetricSpec, MetricType, SegmentSpec};
pub use table::{MetricResult, MetricValue, Severity, Table, Warning, WarningCode};
