use super::code::CodeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn default_inclusive() -> bool {
    true
}

/// Boolean filter expression over response columns
///
/// Serialized with an internal `kind` tag:
///
/// ```json
/// {"kind": "and", "children": [
///     {"kind": "eq", "question_id": "Q_REGION", "value": "north"},
///     {"kind": "range", "question_id": "Q_AGE", "min": 18, "max": 34}
/// ]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterExpr {
    Eq {
        question_id: String,
        value: CodeValue,
    },
    In {
        question_id: String,
        values: Vec<CodeValue>,
    },
    Range {
        question_id: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default = "default_inclusive")]
        inclusive: bool,
    },
    ContainsAny {
        question_id: String,
        values: Vec<CodeValue>,
    },
    And {
        children: Vec<FilterExpr>,
    },
    Or {
        children: Vec<FilterExpr>,
    },
    Not {
        child: Box<FilterExpr>,
    },
    /// Named segment used as a filter
    Segment {
        segment_id: String,
    },
}

impl FilterExpr {
    pub fn eq(question_id: impl Into<String>, value: impl Into<CodeValue>) -> Self {
        FilterExpr::Eq {
            question_id: question_id.into(),
            value: value.into(),
        }
    }

    pub fn is_in<V: Into<CodeValue>>(
        question_id: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        FilterExpr::In {
            question_id: question_id.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(question_id: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        FilterExpr::Range {
            question_id: question_id.into(),
            min,
            max,
            inclusive: true,
        }
    }

    pub fn contains_any<V: Into<CodeValue>>(
        question_id: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        FilterExpr::ContainsAny {
            question_id: question_id.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and(children: Vec<FilterExpr>) -> Self {
        FilterExpr::And { children }
    }

    pub fn or(children: Vec<FilterExpr>) -> Self {
        FilterExpr::Or { children }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: FilterExpr) -> Self {
        FilterExpr::Not {
            child: Box::new(child),
        }
    }

    pub fn segment(segment_id: impl Into<String>) -> Self {
        FilterExpr::Segment {
            segment_id: segment_id.into(),
        }
    }

    /// Short name of the node kind, as used on the wire
    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterExpr::Eq { .. } => "eq",
            FilterExpr::In { .. } => "in",
            FilterExpr::Range { .. } => "range",
            FilterExpr::ContainsAny { .. } => "contains_any",
            FilterExpr::And { .. } => "and",
            FilterExpr::Or { .. } => "or",
            FilterExpr::Not { .. } => "not",
            FilterExpr::Segment { .. } => "segment",
        }
    }

    /// Question ids referenced directly by this tree (segments not expanded)
    pub fn referenced_questions(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.walk(&mut |node| match node {
            FilterExpr::Eq { question_id, .. }
            | FilterExpr::In { question_id, .. }
            | FilterExpr::Range { question_id, .. }
            | FilterExpr::ContainsAny { question_id, .. } => {
                out.insert(question_id.as_str());
            }
            _ => {}
        });
        out
    }

    /// Segment ids referenced by this tree
    pub fn referenced_segments(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.walk(&mut |node| {
            if let FilterExpr::Segment { segment_id } = node {
                out.insert(segment_id.as_str());
            }
        });
        out
    }

    /// Pre-order visit of every node
    pub fn walk<'a, F: FnMut(&'a FilterExpr)>(&'a self, visit: &mut F) {
        visit(self);
        match self {
            FilterExpr::And { children } | FilterExpr::Or { children } => {
                for child in children {
                    child.walk(visit);
                }
            }
            FilterExpr::Not { child } => child.walk(visit),
            _ => {}
        }
    }
}
