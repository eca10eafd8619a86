//! Base-size reliability policy
//!
//! The policy is injected into the executor. Callers choose thresholds; the
//! executor only asks for a verdict.

use crate::config::{DEFAULT_MIN_BASE, DEFAULT_RECOMMENDED_BASE};
use crate::model::{Table, Warning};

/// Decide whether a base size deserves a warning
pub trait ReliabilityPolicy: Send + Sync {
    /// Warning for a result computed over `base_n` respondents, if any
    fn assess(&self, base_n: usize) -> Option<Warning>;
}

/// Two-threshold policy
///
/// - `base_n < min_base` → HIGH "may not be statistically reliable"
/// - `min_base <= base_n < recommended_base` → LOW "interpret with caution"
/// - otherwise no warning
///
/// # Example
/// ```
/// use crosscut_core::reliability::{ReliabilityPolicy, ThresholdPolicy};
/// use crosscut_core::model::Severity;
///
/// let policy = ThresholdPolicy::default();
/// assert_eq!(policy.assess(29).map(|w| w.severity), Some(Severity::High));
/// assert_eq!(policy.assess(30).map(|w| w.severity), Some(Severity::Low));
/// assert!(policy.assess(100).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    pub min_base: usize,
    pub recommended_base: usize,
}

impl ThresholdPolicy {
    pub fn new(min_base: usize, recommended_base: usize) -> Self {
        Self {
            min_base,
            recommended_base,
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_BASE, DEFAULT_RECOMMENDED_BASE)
    }
}

impl ReliabilityPolicy for ThresholdPolicy {
    fn assess(&self, base_n: usize) -> Option<Warning> {
        if base_n < self.min_base {
            Some(Warning::low_base(base_n, self.min_base))
        } else if base_n < self.recommended_base {
            Some(Warning::caution_base(base_n, self.recommended_base))
        } else {
            None
        }
    }
}

/// Policy that never warns
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReliabilityPolicy;

impl ReliabilityPolicy for NoopReliabilityPolicy {
    fn assess(&self, _base_n: usize) -> Option<Warning> {
        None
    }
}

/// Attach base-size warnings to every row and to the table itself
pub fn annotate_table(table: &mut Table, policy: &dyn ReliabilityPolicy) {
    for row in &mut table.rows {
        if let Some(warning) = policy.assess(row.base_n) {
            row.warnings.push(warning);
        }
    }
    if let Some(warning) = policy.assess(table.base_n) {
        table.warnings.push(warning);
    }
}
