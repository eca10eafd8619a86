//! Filter expression compilation
//!
//! A filter tree is checked in full before any row is read: references,
//! predicate compatibility, option codes and response columns. Evaluation
//! afterwards cannot fail on data; missing cells simply evaluate to false.

use crate::errors::Result;
use crate::mask::Mask;
use crate::model::{Catalog, CodeValue, FilterExpr, ResponseTable, ResponseValue, SegmentSpec};
use crate::rules::validation::{validate_filter, validate_segment};
use std::collections::BTreeSet;

pub struct FilterCompiler<'a> {
    catalog: &'a Catalog,
    table: &'a ResponseTable,
}

impl<'a> FilterCompiler<'a> {
    pub fn new(catalog: &'a Catalog, table: &'a ResponseTable) -> Self {
        Self { catalog, table }
    }

    /// Compile a filter into a row mask
    ///
    /// # Errors
    /// Configuration errors from validation, or `MissingColumn` when a
    /// referenced question has no response column.
    pub fn compile(&self, expr: &FilterExpr) -> Result<Mask> {
        validate_filter(expr, self.catalog)?;
        self.check_columns(expr)?;
        let mask = self.evaluate(expr)?;
        tracing::debug!(
            kind = expr.kind_name(),
            selected = mask.count(),
            rows = mask.len(),
            "compiled filter"
        );
        Ok(mask)
    }

    /// Compile a segment's definition into a row mask
    ///
    /// # Errors
    /// As [`FilterCompiler::compile`], plus `NestedSegmentReference`.
    pub fn compile_segment(&self, segment: &SegmentSpec) -> Result<Mask> {
        validate_segment(segment, self.catalog)?;
        self.check_columns(&segment.definition)?;
        self.evaluate(&segment.definition)
    }

    fn check_columns(&self, expr: &FilterExpr) -> Result<()> {
        let mut question_ids: BTreeSet<&str> = expr.referenced_questions();
        for segment_id in expr.referenced_segments() {
            let segment = self.catalog.segment(segment_id)?;
            question_ids.extend(segment.definition.referenced_questions());
        }
        for question_id in question_ids {
            let question = self.catalog.question(question_id)?;
            self.table.question_column(question)?;
        }
        Ok(())
    }

    fn evaluate(&self, expr: &FilterExpr) -> Result<Mask> {
        let rows = self.table.row_count();
        let mask = match expr {
            FilterExpr::Eq { question_id, value } => {
                let column = self.column(question_id)?;
                Mask::from_fn(rows, |i| cell_equals(&column[i], value))
            }
            FilterExpr::In {
                question_id,
                values,
            } => {
                let column = self.column(question_id)?;
                Mask::from_fn(rows, |i| values.iter().any(|v| cell_equals(&column[i], v)))
            }
            FilterExpr::Range {
                question_id,
                min,
                max,
                inclusive,
            } => {
                let column = self.column(question_id)?;
                Mask::from_fn(rows, |i| {
                    column[i]
                        .as_number()
                        .is_some_and(|n| in_range(n, *min, *max, *inclusive))
                })
            }
            FilterExpr::ContainsAny {
                question_id,
                values,
            } => {
                let column = self.column(question_id)?;
                let targets: BTreeSet<String> = values.iter().map(CodeValue::as_code).collect();
                Mask::from_fn(rows, |i| match &column[i] {
                    ResponseValue::MultiValue(codes) => !codes.is_disjoint(&targets),
                    _ => false,
                })
            }
            FilterExpr::And { children } => {
                let mut acc = Mask::all(rows);
                for child in children {
                    acc = &acc & &self.evaluate(child)?;
                }
                acc
            }
            FilterExpr::Or { children } => {
                let mut acc = Mask::none(rows);
                for child in children {
                    acc = &acc | &self.evaluate(child)?;
                }
                acc
            }
            FilterExpr::Not { child } => !self.evaluate(child)?,
            FilterExpr::Segment { segment_id } => {
                let segment = self.catalog.segment(segment_id)?;
                self.evaluate(&segment.definition)?
            }
        };
        Ok(mask)
    }

    fn column(&self, question_id: &str) -> Result<&'a [ResponseValue]> {
        let question = self.catalog.question(question_id)?;
        self.table.question_column(question)
    }
}

fn cell_equals(cell: &ResponseValue, target: &CodeValue) -> bool {
    match cell {
        ResponseValue::Numeric(n) => target.as_number() == Some(*n),
        ResponseValue::Scalar(code) => *code == target.as_code(),
        ResponseValue::MultiValue(codes) => {
            codes.len() == 1 && codes.contains(&target.as_code())
        }
        ResponseValue::Missing => false,
    }
}

fn in_range(value: f64, min: Option<f64>, max: Option<f64>, inclusive: bool) -> bool {
    let above = match min {
        Some(lo) if inclusive => value >= lo,
        Some(lo) => value > lo,
        None => true,
    };
    let below = match max {
        Some(hi) if inclusive => value <= hi,
        Some(hi) => value < hi,
        None => true,
    };
    above && below
}
