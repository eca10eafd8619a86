//! Partitioning of a filtered subset by one dimension

use crate::errors::{CutError, Result};
use crate::mask::Mask;
use crate::metrics::{MetricComputer, MetricOutcome};
use crate::model::{
    CodeKey, CodeValue, MetricResult, MetricType, Question, ResponseTable, ResponseValue,
    SegmentSpec,
};
use crate::segment_resolver::SegmentResolver;
use std::collections::BTreeMap;

/// The honoured dimension of a cut, resolved against the catalog
#[derive(Debug, Clone, Copy)]
pub enum Dimension<'a> {
    Question(&'a Question),
    Segment(&'a SegmentSpec),
}

impl Dimension<'_> {
    pub fn id(&self) -> &str {
        match self {
            Dimension::Question(q) => &q.question_id,
            Dimension::Segment(s) => &s.segment_id,
        }
    }
}

/// One level of a dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub label: String,
    pub value: CodeValue,
    pub mask: Mask,
}

pub struct CrossTabulator<'a> {
    table: &'a ResponseTable,
    resolver: &'a SegmentResolver<'a>,
}

impl<'a> CrossTabulator<'a> {
    pub fn new(table: &'a ResponseTable, resolver: &'a SegmentResolver<'a>) -> Self {
        Self { table, resolver }
    }

    /// Levels of `dimension` within `filtered`
    ///
    /// Question levels are the distinct observed non-missing values, ordered
    /// by code. Segment levels are always the segment then its complement.
    ///
    /// # Errors
    /// `MissingColumn` for an absent dimension column, `DimensionIncompatible`
    /// for multi-valued cells, or segment resolution errors.
    pub fn partitions(
        &self,
        dimension: Dimension<'_>,
        filtered: &Mask,
    ) -> Result<Vec<Partition>> {
        match dimension {
            Dimension::Question(question) => self.question_partitions(question, filtered),
            Dimension::Segment(segment) => Ok(self
                .resolver
                .partition(segment, filtered)?
                .into_iter()
                .map(|level| Partition {
                    value: CodeValue::Text(level.label.clone()),
                    label: level.label,
                    mask: level.mask,
                })
                .collect()),
        }
    }

    fn question_partitions(
        &self,
        question: &Question,
        filtered: &Mask,
    ) -> Result<Vec<Partition>> {
        let column = self.table.question_column(question)?;
        let rows = filtered.len();
        let mut levels: BTreeMap<CodeKey, Vec<bool>> = BTreeMap::new();

        for row in filtered.indices() {
            let key = match &column[row] {
                ResponseValue::Numeric(n) => CodeKey::Number(*n),
                ResponseValue::Scalar(code) => CodeKey::Text(code.clone()),
                ResponseValue::Missing => continue,
                ResponseValue::MultiValue(_) => {
                    return Err(CutError::DimensionIncompatible {
                        question_id: question.question_id.clone(),
                        question_type: question.question_type.to_string(),
                    })
                }
            };
            levels.entry(key).or_insert_with(|| vec![false; rows])[row] = true;
        }

        Ok(levels
            .into_iter()
            .map(|(key, bits)| {
                let code = key.as_code();
                Partition {
                    label: question
                        .option_label(&code)
                        .map_or_else(|| code.clone(), str::to_string),
                    value: key.to_value(),
                    mask: Mask::from(bits),
                }
            })
            .collect())
    }

    /// Compute `metric` once per level
    ///
    /// Each partition mask is already a subset of the filtered rows, so no
    /// filter is re-applied here.
    ///
    /// # Errors
    /// Metric errors.
    pub fn compute_partitions(
        &self,
        computer: &MetricComputer<'_>,
        metric: MetricType,
        partitions: Vec<Partition>,
    ) -> Result<Vec<MetricResult>> {
        partitions
            .into_iter()
            .map(|partition| {
                let outcome = computer.compute(metric, &partition.mask)?;
                Ok(MetricResult {
                    dimension_label: Some(partition.label),
                    dimension_value: Some(partition.value),
                    ..undimensioned_row(outcome)
                })
            })
            .collect()
    }
}

/// Result row for a cut without a dimension
pub fn undimensioned_row(outcome: MetricOutcome) -> MetricResult {
    MetricResult {
        dimension_label: None,
        dimension_value: None,
        value: outcome.value,
        base_n: outcome.base_n,
        weighted_base: outcome.weighted_base,
        warnings: Vec::new(),
    }
}
