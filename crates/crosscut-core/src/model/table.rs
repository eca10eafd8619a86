//! Execution output
//!
//! A [`Table`] is the only artifact a cut produces. Non-finite floats (the
//! mean of an empty subset, for instance) serialize as JSON `null`.

use super::code::CodeValue;
use super::spec::{DimensionSpec, MetricType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    LowBase,
    CautionBase,
    NoMatchingRespondents,
    NoValidResponses,
    IgnoredDimensions,
    IgnoredParameter,
}

/// Non-fatal condition attached to a table or a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub code: WarningCode,
    pub severity: Severity,
    pub message: String,
}

impl Warning {
    pub fn low_base(base_n: usize, min_base: usize) -> Self {
        Self {
            code: WarningCode::LowBase,
            severity: Severity::High,
            message: format!(
                "Base size ({}) is below minimum threshold ({}). Results may not be statistically reliable.",
                base_n, min_base
            ),
        }
    }

    pub fn caution_base(base_n: usize, recommended_base: usize) -> Self {
        Self {
            code: WarningCode::CautionBase,
            severity: Severity::Low,
            message: format!(
                "Base size ({}) is below recommended threshold ({}). Interpret results with caution.",
                base_n, recommended_base
            ),
        }
    }

    pub fn no_matching_respondents() -> Self {
        Self {
            code: WarningCode::NoMatchingRespondents,
            severity: Severity::High,
            message: "No respondents match the filter.".to_string(),
        }
    }

    pub fn no_valid_responses(question_id: &str) -> Self {
        Self {
            code: WarningCode::NoValidResponses,
            severity: Severity::High,
            message: format!(
                "Matching respondents have no valid responses for {}.",
                question_id
            ),
        }
    }

    pub fn ignored_dimensions(ids: &[&str]) -> Self {
        Self {
            code: WarningCode::IgnoredDimensions,
            severity: Severity::Info,
            message: format!(
                "Only the first dimension is used. Ignored: {}",
                ids.join(", ")
            ),
        }
    }

    pub fn ignored_parameter(name: &str) -> Self {
        Self {
            code: WarningCode::IgnoredParameter,
            severity: Severity::Info,
            message: format!("Metric parameter '{}' is not supported and was ignored.", name),
        }
    }
}

/// One observed value in a frequency distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub value: CodeValue,
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Top-2 or bottom-2 box share
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxScore {
    pub pct: f64,
    pub count: usize,
    pub total: usize,
    /// Scale points counted into the box
    pub values: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpsScore {
    pub nps: f64,
    pub promoters_count: usize,
    pub promoters_pct: f64,
    pub passives_count: usize,
    pub passives_pct: f64,
    pub detractors_count: usize,
    pub detractors_pct: f64,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "metric")]
pub enum MetricValue {
    #[serde(rename = "frequency")]
    Frequency { distribution: Vec<FrequencyRow> },
    #[serde(rename = "mean")]
    Mean(MeanStats),
    #[serde(rename = "top2box")]
    Top2Box(BoxScore),
    #[serde(rename = "bottom2box")]
    Bottom2Box(BoxScore),
    #[serde(rename = "nps")]
    Nps(NpsScore),
}

impl MetricValue {
    /// Single headline number, if the metric has one
    pub fn headline(&self) -> Option<f64> {
        match self {
            MetricValue::Frequency { .. } => None,
            MetricValue::Mean(stats) => Some(stats.mean),
            MetricValue::Top2Box(score) | MetricValue::Bottom2Box(score) => Some(score.pct),
            MetricValue::Nps(score) => Some(score.nps),
        }
    }
}

/// Metric value for one partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub dimension_label: Option<String>,
    pub dimension_value: Option<CodeValue>,
    pub value: MetricValue,
    pub base_n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_base: Option<f64>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub cut_id: String,
    pub metric_type: MetricType,
    pub question_id: String,
    pub dimension: Option<DimensionSpec>,
    pub rows: Vec<MetricResult>,
    pub base_n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_base: Option<f64>,
    pub warnings: Vec<Warning>,
}

impl Table {
    /// Whether any warning on the table or its rows has `severity`
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.warnings
            .iter()
            .chain(self.rows.iter().flat_map(|r| r.warnings.iter()))
            .any(|w| w.severity == severity)
    }

    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
