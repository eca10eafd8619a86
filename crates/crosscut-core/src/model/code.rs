use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An option code or filter value as it appears on the wire
///
/// Catalogs and filters mix integer and string codes freely (`1` and `"1"`
/// name the same option), so comparisons go through [`CodeValue::as_code`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeValue {
    Number(f64),
    Text(String),
}

impl CodeValue {
    /// Canonical text form of the code (`1.0` renders as `"1"`)
    pub fn as_code(&self) -> String {
        match self {
            CodeValue::Number(n) => format_number(*n),
            CodeValue::Text(s) => s.clone(),
        }
    }

    /// Numeric reading of the code, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CodeValue::Number(n) => Some(*n),
            CodeValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl From<&str> for CodeValue {
    fn from(value: &str) -> Self {
        CodeValue::Text(value.to_string())
    }
}

impl From<f64> for CodeValue {
    fn from(value: f64) -> Self {
        CodeValue::Number(value)
    }
}

impl From<i32> for CodeValue {
    fn from(value: i32) -> Self {
        CodeValue::Number(f64::from(value))
    }
}

impl From<i64> for CodeValue {
    fn from(value: i64) -> Self {
        CodeValue::Number(value as f64)
    }
}

/// Render a number the way codes are written: integral values drop the
/// fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Ordered key for a distinct observed value
///
/// Numeric columns produce `Number` keys ordered ascending; choice columns
/// produce `Text` keys ordered lexicographically. The two never mix within
/// one column, but `Number` sorts first if they do.
#[derive(Debug, Clone)]
pub enum CodeKey {
    Number(f64),
    Text(String),
}

impl CodeKey {
    pub fn as_code(&self) -> String {
        match self {
            CodeKey::Number(n) => format_number(*n),
            CodeKey::Text(s) => s.clone(),
        }
    }

    pub fn to_value(&self) -> CodeValue {
        match self {
            CodeKey::Number(n) => CodeValue::Number(*n),
            CodeKey::Text(s) => CodeValue::Text(s.clone()),
        }
    }
}

impl PartialEq for CodeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CodeKey {}

impl PartialOrd for CodeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CodeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CodeKey::Number(a), CodeKey::Number(b)) => a.total_cmp(b),
            (CodeKey::Text(a), CodeKey::Text(b)) => a.cmp(b),
            (CodeKey::Number(_), CodeKey::Text(_)) => Ordering::Less,
            (CodeKey::Text(_), CodeKey::Number(_)) => Ordering::Greater,
        }
    }
}
