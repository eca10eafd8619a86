use thiserror::Error;

/// Result type alias using CutError
pub type Result<T> = std::result::Result<T, CutError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised while executing a cut. Each kind maps to a stable error code that
/// can be used for programmatic handling, testing, and batch failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CxErrorKind {
    // Configuration
    UnknownQuestion,
    UnknownSegment,
    MetricIncompatible,
    PredicateIncompatible,
    DimensionIncompatible,
    InvalidOption,
    InvalidRange,
    NestedSegmentReference,
    InvalidConfig,

    // Data
    MissingColumn,
    InvalidCell,
    InvalidWeight,
    ColumnLengthMismatch,

    // Integration/IO
    InvalidInput,
    Io,
    Serialization,

    // Internal
    Internal,
}

/// Coarse grouping of error kinds.
///
/// `Configuration` errors mean the cut (or a segment it references) does not
/// resolve against the catalog. `Data` errors mean the response table cannot
/// support a cut that is otherwise well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    Io,
    Serialization,
    Internal,
}

impl CxErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            CxErrorKind::UnknownQuestion => "ERR_UNKNOWN_QUESTION",
            CxErrorKind::UnknownSegment => "ERR_UNKNOWN_SEGMENT",
            CxErrorKind::MetricIncompatible => "ERR_METRIC_INCOMPATIBLE",
            CxErrorKind::PredicateIncompatible => "ERR_PREDICATE_INCOMPATIBLE",
            CxErrorKind::DimensionIncompatible => "ERR_DIMENSION_INCOMPATIBLE",
            CxErrorKind::InvalidOption => "ERR_INVALID_OPTION",
            CxErrorKind::InvalidRange => "ERR_INVALID_RANGE",
            CxErrorKind::NestedSegmentReference => "ERR_NESTED_SEGMENT_REFERENCE",
            CxErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            CxErrorKind::MissingColumn => "ERR_MISSING_COLUMN",
            CxErrorKind::InvalidCell => "ERR_INVALID_CELL",
            CxErrorKind::InvalidWeight => "ERR_INVALID_WEIGHT",
            CxErrorKind::ColumnLengthMismatch => "ERR_COLUMN_LENGTH_MISMATCH",
            CxErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            CxErrorKind::Io => "ERR_IO",
            CxErrorKind::Serialization => "ERR_SERIALIZATION",
            CxErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Get the category this kind belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            CxErrorKind::UnknownQuestion
            | CxErrorKind::UnknownSegment
            | CxErrorKind::MetricIncompatible
            | CxErrorKind::PredicateIncompatible
            | CxErrorKind::DimensionIncompatible
            | CxErrorKind::InvalidOption
            | CxErrorKind::InvalidRange
            | CxErrorKind::NestedSegmentReference
            | CxErrorKind::InvalidConfig => ErrorCategory::Configuration,
            CxErrorKind::MissingColumn
            | CxErrorKind::InvalidCell
            | CxErrorKind::InvalidWeight
            | CxErrorKind::ColumnLengthMismatch => ErrorCategory::Data,
            CxErrorKind::InvalidInput | CxErrorKind::Io => ErrorCategory::Io,
            CxErrorKind::Serialization => ErrorCategory::Serialization,
            CxErrorKind::Internal => ErrorCategory::Internal,
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct CxError {
    kind: CxErrorKind,
    op: Option<String>,
    cut_id: Option<String>,
    question_id: Option<String>,
    segment_id: Option<String>,
    row: Option<usize>,
    message: String,
    source: Option<Box<CxError>>,
}

impl CxError {
    /// Create a new error with the specified kind
    pub fn new(kind: CxErrorKind) -> Self {
        Self {
            kind,
            op: None,
            cut_id: None,
            question_id: None,
            segment_id: None,
            row: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add cut ID context
    pub fn with_cut_id(mut self, id: impl Into<String>) -> Self {
        self.cut_id = Some(id.into());
        self
    }

    /// Add question ID context
    pub fn with_question_id(mut self, id: impl Into<String>) -> Self {
        self.question_id = Some(id.into());
        self
    }

    /// Add segment ID context
    pub fn with_segment_id(mut self, id: impl Into<String>) -> Self {
        self.segment_id = Some(id.into());
        self
    }

    /// Add row index context
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: CxError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> CxErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Whether this error is a configuration error (cut does not resolve against the catalog)
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    /// Whether this error is a data error (response table cannot support the cut)
    pub fn is_data(&self) -> bool {
        self.category() == ErrorCategory::Data
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the cut ID context, if any
    pub fn cut_id(&self) -> Option<&str> {
        self.cut_id.as_deref()
    }

    /// Get the question ID context, if any
    pub fn question_id(&self) -> Option<&str> {
        self.question_id.as_deref()
    }

    /// Get the segment ID context, if any
    pub fn segment_id(&self) -> Option<&str> {
        self.segment_id.as_deref()
    }

    /// Get the row index context, if any
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&CxError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for CxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(cut_id) = &self.cut_id {
            write!(f, " (cut_id: {})", cut_id)?;
        }
        if let Some(question_id) = &self.question_id {
            write!(f, " (question_id: {})", question_id)?;
        }
        if let Some(segment_id) = &self.segment_id {
            write!(f, " (segment_id: {})", segment_id)?;
        }
        if let Some(row) = self.row {
            write!(f, " (row: {})", row)?;
        }
        Ok(())
    }
}

impl std::error::Error for CxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for cut execution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutError {
    // ===== Configuration Errors =====
    /// Question id does not resolve against the catalog
    #[error("Unknown question: {question_id}")]
    UnknownQuestion { question_id: String },

    /// Segment id does not resolve against the catalog
    #[error("Unknown segment: {segment_id}")]
    UnknownSegment { segment_id: String },

    /// Metric cannot be computed for this question type
    #[error("Metric '{metric}' is not compatible with question {question_id} of type '{question_type}'")]
    MetricIncompatible {
        metric: String,
        question_id: String,
        question_type: String,
    },

    /// Predicate kind cannot be applied to this question type
    #[error("Predicate '{predicate}' cannot be used with question {question_id} of type '{question_type}'")]
    PredicateIncompatible {
        predicate: String,
        question_id: String,
        question_type: String,
    },

    /// Question cannot be used as a cross-tab dimension
    #[error("Question {question_id} of type '{question_type}' cannot be used as a dimension")]
    DimensionIncompatible {
        question_id: String,
        question_type: String,
    },

    /// Filter value is not a declared option code
    #[error("Option value '{value}' is not valid for question {question_id}")]
    InvalidOption { question_id: String, value: String },

    /// Range lower bound exceeds upper bound
    #[error("Range min ({min}) is greater than max ({max}) for question {question_id}")]
    InvalidRange {
        question_id: String,
        min: f64,
        max: f64,
    },

    /// Segment definition references another segment
    #[error("Segment {segment_id} references segment {referenced_id} in its definition")]
    NestedSegmentReference {
        segment_id: String,
        referenced_id: String,
    },

    /// Engine configuration is inconsistent
    #[error("Invalid engine config: {reason}")]
    InvalidConfig { reason: String },

    // ===== Data Errors =====
    /// Response column for a referenced question is absent
    #[error("Response column not found: {column}")]
    MissingColumn { column: String },

    /// Response cell cannot be typed for its question
    #[error("Invalid value '{value}' in column {column} at row {row}")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },

    /// Weight cell is not a finite non-negative number
    #[error("Invalid weight in column {column} at row {row}: {reason}")]
    InvalidWeight {
        column: String,
        row: usize,
        reason: String,
    },

    /// Columns of the response table have different lengths
    #[error("Column {column} has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    // ===== Encoding Errors =====
    /// JSON/TOML encoding or decoding failed
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl CutError {
    /// Get the canonical kind for this error
    pub fn kind(&self) -> CxErrorKind {
        CxError::from(self.clone()).kind()
    }
}

impl From<serde_json::Error> for CutError {
    fn from(err: serde_json::Error) -> Self {
        CutError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CutError {
    fn from(err: toml::de::Error) -> Self {
        CutError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<CutError> for CxError {
    fn from(err: CutError) -> Self {
        let message = err.to_string();
        match err {
            CutError::UnknownQuestion { question_id } => {
                CxError::new(CxErrorKind::UnknownQuestion)
                    .with_question_id(question_id)
                    .with_message(message)
            }
            CutError::UnknownSegment { segment_id } => CxError::new(CxErrorKind::UnknownSegment)
                .with_segment_id(segment_id)
                .with_message(message),
            CutError::MetricIncompatible { question_id, .. } => {
                CxError::new(CxErrorKind::MetricIncompatible)
                    .with_question_id(question_id)
                    .with_message(message)
            }
            CutError::PredicateIncompatible { question_id, .. } => {
                CxError::new(CxErrorKind::PredicateIncompatible)
                    .with_question_id(question_id)
                    .with_message(message)
            }
            CutError::DimensionIncompatible { question_id, .. } => {
                CxError::new(CxErrorKind::DimensionIncompatible)
                    .with_question_id(question_id)
                    .with_message(message)
            }
            CutError::InvalidOption { question_id, .. } => {
                CxError::new(CxErrorKind::InvalidOption)
                    .with_question_id(question_id)
                    .with_message(message)
            }
            CutError::InvalidRange { question_id, .. } => CxError::new(CxErrorKind::InvalidRange)
                .with_question_id(question_id)
                .with_message(message),
            CutError::NestedSegmentReference { segment_id, .. } => {
                CxError::new(CxErrorKind::NestedSegmentReference)
                    .with_segment_id(segment_id)
                    .with_message(message)
            }
            CutError::InvalidConfig { .. } => {
                CxError::new(CxErrorKind::InvalidConfig).with_message(message)
            }
            CutError::MissingColumn { .. } => {
                CxError::new(CxErrorKind::MissingColumn).with_message(message)
            }
            CutError::InvalidCell { row, .. } => CxError::new(CxErrorKind::InvalidCell)
                .with_row(row)
                .with_message(message),
            CutError::InvalidWeight { row, .. } => CxError::new(CxErrorKind::InvalidWeight)
                .with_row(row)
                .with_message(message),
            CutError::ColumnLengthMismatch { .. } => {
                CxError::new(CxErrorKind::ColumnLengthMismatch).with_message(message)
            }
            CutError::Serialization { .. } => {
                CxError::new(CxErrorKind::Serialization).with_message(message)
            }
        }
    }
}
