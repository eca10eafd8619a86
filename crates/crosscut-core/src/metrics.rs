//! Metric computation over a row subset
//!
//! Counts and `base_n` are always respondent counts. When weights are
//! supplied, percentages, means and standard deviations use them and the
//! sum of weights is reported as the weighted base.

use crate::errors::{CutError, Result};
use crate::mask::Mask;
use crate::model::table::{BoxScore, FrequencyRow, MeanStats, NpsScore};
use crate::model::{CodeKey, MetricType, MetricValue, Question, QuestionType, ResponseValue};
use std::collections::BTreeMap;

pub const PROMOTER_MIN: f64 = 9.0;
pub const DETRACTOR_MAX: f64 = 6.0;

const TOP_BOX_1_5: [u8; 2] = [4, 5];
const TOP_BOX_1_7: [u8; 2] = [6, 7];
const BOTTOM_BOX: [u8; 2] = [1, 2];

/// Metric value for one partition plus its bases
#[derive(Debug, Clone, PartialEq)]
pub struct MetricOutcome {
    pub value: MetricValue,
    pub base_n: usize,
    pub weighted_base: Option<f64>,
}

pub struct MetricComputer<'a> {
    question: &'a Question,
    column: &'a [ResponseValue],
    weights: Option<&'a [f64]>,
}

impl<'a> MetricComputer<'a> {
    pub fn new(question: &'a Question, column: &'a [ResponseValue]) -> Self {
        Self {
            question,
            column,
            weights: None,
        }
    }

    /// Use per-row weights, aligned with the response table
    pub fn with_weights(mut self, weights: &'a [f64]) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Compute `metric` over the rows selected by `subset`
    ///
    /// # Errors
    /// `MetricIncompatible` if the question type does not support `metric`.
    pub fn compute(&self, metric: MetricType, subset: &Mask) -> Result<MetricOutcome> {
        if !metric.supports(self.question.question_type) {
            return Err(CutError::MetricIncompatible {
                metric: metric.to_string(),
                question_id: self.question.question_id.clone(),
                question_type: self.question.question_type.to_string(),
            });
        }

        let rows: Vec<usize> = subset
            .indices()
            .into_iter()
            .filter(|&i| !self.column[i].is_missing())
            .collect();
        let total_weight: f64 = rows.iter().map(|&i| self.weight(i)).sum();

        let value = match metric {
            MetricType::Frequency => self.frequency(&rows, total_weight),
            MetricType::Mean => self.mean(&rows, total_weight),
            MetricType::Top2Box => {
                MetricValue::Top2Box(self.box_score(&rows, total_weight, self.top_values()))
            }
            MetricType::Bottom2Box => {
                MetricValue::Bottom2Box(self.box_score(&rows, total_weight, &BOTTOM_BOX))
            }
            MetricType::Nps => MetricValue::Nps(self.nps(&rows, total_weight)),
        };

        Ok(MetricOutcome {
            value,
            base_n: rows.len(),
            weighted_base: self.weights.map(|_| total_weight),
        })
    }

    fn weight(&self, row: usize) -> f64 {
        self.weights.map_or(1.0, |w| w[row])
    }

    fn top_values(&self) -> &'static [u8] {
        match self.question.question_type {
            QuestionType::Likert1To7 => &TOP_BOX_1_7,
            _ => &TOP_BOX_1_5,
        }
    }

    fn frequency(&self, rows: &[usize], total_weight: f64) -> MetricValue {
        let mut tally: BTreeMap<CodeKey, (usize, f64)> = BTreeMap::new();
        for &row in rows {
            let weight = self.weight(row);
            let keys: Vec<CodeKey> = match &self.column[row] {
                ResponseValue::Numeric(n) => vec![CodeKey::Number(*n)],
                ResponseValue::Scalar(code) => vec![CodeKey::Text(code.clone())],
                ResponseValue::MultiValue(codes) => {
                    codes.iter().cloned().map(CodeKey::Text).collect()
                }
                ResponseValue::Missing => Vec::new(),
            };
            for key in keys {
                let entry = tally.entry(key).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += weight;
            }
        }

        let distribution = tally
            .into_iter()
            .map(|(key, (count, weight))| {
                let code = key.as_code();
                FrequencyRow {
                    label: self
                        .question
                        .option_label(&code)
                        .map_or_else(|| code.clone(), str::to_string),
                    value: key.to_value(),
                    count,
                    percentage: round_to(percent(weight, total_weight), 2),
                }
            })
            .collect();

        MetricValue::Frequency { distribution }
    }

    fn mean(&self, rows: &[usize], total_weight: f64) -> MetricValue {
        let observed: Vec<(f64, f64)> = rows
            .iter()
            .filter_map(|&row| self.column[row].as_number().map(|x| (x, self.weight(row))))
            .collect();

        if observed.is_empty() {
            return MetricValue::Mean(MeanStats {
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                count: 0,
            });
        }

        let mean = if total_weight > 0.0 {
            observed.iter().map(|(x, w)| x * w).sum::<f64>() / total_weight
        } else {
            f64::NAN
        };

        let std = if observed.len() < 2 || total_weight - 1.0 <= 0.0 {
            f64::NAN
        } else {
            let ss: f64 = observed.iter().map(|(x, w)| w * (x - mean).powi(2)).sum();
            (ss / (total_weight - 1.0)).sqrt()
        };

        let min = observed.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
        let max = observed
            .iter()
            .map(|(x, _)| *x)
            .fold(f64::NEG_INFINITY, f64::max);

        MetricValue::Mean(MeanStats {
            mean: round_to(mean, 4),
            std: round_to(std, 4),
            min,
            max,
            count: observed.len(),
        })
    }

    fn box_score(&self, rows: &[usize], total_weight: f64, values: &[u8]) -> BoxScore {
        let mut count = 0;
        let mut weight = 0.0;
        for &row in rows {
            let hit = self.column[row]
                .as_number()
                .is_some_and(|x| values.iter().any(|v| f64::from(*v) == x));
            if hit {
                count += 1;
                weight += self.weight(row);
            }
        }

        BoxScore {
            pct: round_to(percent(weight, total_weight), 2),
            count,
            total: rows.len(),
            values: values.to_vec(),
        }
    }

    fn nps(&self, rows: &[usize], total_weight: f64) -> NpsScore {
        let (mut promoters, mut passives, mut detractors) = (0usize, 0usize, 0usize);
        let (mut w_promoters, mut w_passives, mut w_detractors) = (0.0, 0.0, 0.0);

        for &row in rows {
            let Some(score) = self.column[row].as_number() else {
                continue;
            };
            let weight = self.weight(row);
            if score >= PROMOTER_MIN {
                promoters += 1;
                w_promoters += weight;
            } else if score <= DETRACTOR_MAX {
                detractors += 1;
                w_detractors += weight;
            } else {
                passives += 1;
                w_passives += weight;
            }
        }

        let promoters_pct = percent(w_promoters, total_weight);
        let detractors_pct = percent(w_detractors, total_weight);

        NpsScore {
            nps: round_to(promoters_pct - detractors_pct, 2),
            promoters_count: promoters,
            promoters_pct: round_to(promoters_pct, 2),
            passives_count: passives,
            passives_pct: round_to(percent(w_passives, total_weight), 2),
            detractors_count: detractors,
            detractors_pct: round_to(detractors_pct, 2),
            total: rows.len(),
        }
    }
}

/// Per-row weight vector for the rows of `subset`
///
/// Rows outside the subset get weight 0 and are never read.
///
/// # Errors
/// `InvalidWeight` if a selected row has a missing, non-numeric, negative or
/// non-finite weight.
pub fn weight_vector(
    column_name: &str,
    column: &[ResponseValue],
    subset: &Mask,
) -> Result<Vec<f64>> {
    let mut weights = vec![0.0; column.len()];
    for row in subset.indices() {
        let invalid = |reason: &str| CutError::InvalidWeight {
            column: column_name.to_string(),
            row,
            reason: reason.to_string(),
        };
        let weight = match &column[row] {
            ResponseValue::Numeric(w) => *w,
            ResponseValue::Missing => return Err(invalid("missing")),
            _ => return Err(invalid("not a number")),
        };
        if !weight.is_finite() {
            return Err(invalid("not finite"));
        }
        if weight < 0.0 {
            return Err(invalid("negative"));
        }
        weights[row] = weight;
    }
    Ok(weights)
}

fn percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        f64::NAN
    }
}

/// Round half away from zero to `places` decimals; NaN passes through
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
