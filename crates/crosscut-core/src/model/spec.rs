//! Analysis contracts: segments and cuts

use super::filter::FilterExpr;
use super::question::QuestionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named reusable respondent filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub segment_id: String,
    pub name: String,
    pub definition: FilterExpr,
    /// Advisory only; never changes how the segment partitions rows
    #[serde(default)]
    pub intended_partition: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SegmentSpec {
    pub fn new(
        segment_id: impl Into<String>,
        name: impl Into<String>,
        definition: FilterExpr,
    ) -> Self {
        Self {
            segment_id: segment_id.into(),
            name: name.into(),
            definition,
            intended_partition: false,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    #[serde(rename = "frequency")]
    Frequency,
    #[serde(rename = "mean")]
    Mean,
    #[serde(rename = "top2box")]
    Top2Box,
    #[serde(rename = "bottom2box")]
    Bottom2Box,
    #[serde(rename = "nps")]
    Nps,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Frequency => "frequency",
            MetricType::Mean => "mean",
            MetricType::Top2Box => "top2box",
            MetricType::Bottom2Box => "bottom2box",
            MetricType::Nps => "nps",
        }
    }

    /// Whether this metric can be computed for a question of `question_type`
    pub fn supports(&self, question_type: QuestionType) -> bool {
        use QuestionType::*;
        match self {
            MetricType::Frequency => matches!(
                question_type,
                SingleChoice | MultiChoice | Likert1To5 | Likert1To7 | Nps0To10
            ),
            MetricType::Mean => {
                matches!(question_type, Likert1To5 | Likert1To7 | Numeric | Nps0To10)
            }
            MetricType::Top2Box | MetricType::Bottom2Box => question_type.is_likert(),
            MetricType::Nps => question_type == Nps0To10,
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub question_id: String,
    /// Accepted on the wire; scale points are fixed, so every entry is reported
    /// back as an ignored parameter
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl MetricSpec {
    pub fn new(metric_type: MetricType, question_id: impl Into<String>) -> Self {
        Self {
            metric_type,
            question_id: question_id.into(),
            params: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Question,
    Segment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub kind: DimensionKind,
    pub id: String,
}

impl DimensionSpec {
    pub fn question(id: impl Into<String>) -> Self {
        Self {
            kind: DimensionKind::Question,
            id: id.into(),
        }
    }

    pub fn segment(id: impl Into<String>) -> Self {
        Self {
            kind: DimensionKind::Segment,
            id: id.into(),
        }
    }
}

/// One analysis cut: metric, optional filter, optional dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutSpec {
    pub cut_id: String,
    pub metric: MetricSpec,
    /// Only the first entry is honoured
    #[serde(default)]
    pub dimensions: Vec<DimensionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterExpr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_column: Option<String>,
}

impl CutSpec {
    pub fn new(cut_id: impl Into<String>, metric: MetricSpec) -> Self {
        Self {
            cut_id: cut_id.into(),
            metric,
            dimensions: Vec::new(),
            filter: None,
            weight_column: None,
        }
    }

    pub fn with_dimension(mut self, dimension: DimensionSpec) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn with_filter(mut self, filter: FilterExpr) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_weight_column(mut self, column: impl Into<String>) -> Self {
        self.weight_column = Some(column.into());
        self
    }

    /// The dimension that will be honoured
    pub fn primary_dimension(&self) -> Option<&DimensionSpec> {
        self.dimensions.first()
    }
}
