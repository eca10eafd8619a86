//! Respondent-level response data
//!
//! Cells are typed once, at load time, from the question type of the column
//! they belong to. Everything downstream works on [`ResponseValue`]s.

use super::catalog::Catalog;
use super::code::format_number;
use super::question::{Question, QuestionType};
use crate::errors::{CutError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One typed (respondent, column) cell
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseValue {
    Scalar(String),
    MultiValue(BTreeSet<String>),
    Numeric(f64),
    Missing,
}

impl ResponseValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, ResponseValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResponseValue::Numeric(n) => Some(*n),
            _ => None,
        }
    }
}

/// Untyped cell as read from a response record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Number(f64),
    Text(String),
    Null,
}

/// One respondent: column name to raw cell
pub type Record = BTreeMap<String, RawCell>;

/// Immutable, row-aligned response columns
///
/// Columns bound to a catalog question are keyed by `question_id`; all other
/// columns (weights, respondent ids) are keyed by their header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseTable {
    row_count: usize,
    columns: BTreeMap<String, Vec<ResponseValue>>,
}

impl ResponseTable {
    /// Build a table from already-typed columns
    ///
    /// # Errors
    ///
    /// Returns `ColumnLengthMismatch` if the columns differ in length.
    pub fn from_columns(columns: BTreeMap<String, Vec<ResponseValue>>) -> Result<Self> {
        let row_count = columns.values().next().map(Vec::len).unwrap_or(0);
        for (name, values) in &columns {
            if values.len() != row_count {
                return Err(CutError::ColumnLengthMismatch {
                    column: name.clone(),
                    expected: row_count,
                    actual: values.len(),
                });
            }
        }
        Ok(Self { row_count, columns })
    }

    /// Type raw records against the catalog
    ///
    /// A record lacking a key yields `Missing` for that cell. Questions whose
    /// column appears in no record get no column at all, so referencing them
    /// later is a `MissingColumn` error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCell` when a numeric-typed cell does not parse.
    pub fn from_records(catalog: &Catalog, records: &[Record], delimiter: &str) -> Result<Self> {
        let headers: BTreeSet<&str> = records
            .iter()
            .flat_map(|record| record.keys().map(String::as_str))
            .collect();

        let mut bound: BTreeSet<&str> = BTreeSet::new();
        let mut columns = BTreeMap::new();

        for question in catalog.questions.values() {
            let header = question.effective_column_name();
            if !headers.contains(header) {
                continue;
            }
            bound.insert(header);
            let values = records
                .iter()
                .enumerate()
                .map(|(row, record)| match record.get(header) {
                    Some(cell) => type_question_cell(question, cell, delimiter, row),
                    None => Ok(ResponseValue::Missing),
                })
                .collect::<Result<Vec<_>>>()?;
            columns.insert(question.question_id.clone(), values);
        }

        for header in headers.difference(&bound) {
            if columns.contains_key(*header) {
                continue;
            }
            let values = records
                .iter()
                .map(|record| record.get(*header).map_or(ResponseValue::Missing, type_auxiliary_cell))
                .collect();
            columns.insert(header.to_string(), values);
        }

        tracing::debug!(
            rows = records.len(),
            columns = columns.len(),
            "typed response records"
        );

        Self::from_columns(columns)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, key: &str) -> Option<&[ResponseValue]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    /// Column bound to `question`
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` naming the question's response column.
    pub fn question_column(&self, question: &Question) -> Result<&[ResponseValue]> {
        self.column(&question.question_id)
            .ok_or_else(|| CutError::MissingColumn {
                column: question.effective_column_name().to_string(),
            })
    }

    /// Auxiliary column by header (weights)
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if no such column exists.
    pub fn named_column(&self, header: &str) -> Result<&[ResponseValue]> {
        self.column(header).ok_or_else(|| CutError::MissingColumn {
            column: header.to_string(),
        })
    }
}

fn type_question_cell(
    question: &Question,
    cell: &RawCell,
    delimiter: &str,
    row: usize,
) -> Result<ResponseValue> {
    let text = match cell {
        RawCell::Null => return Ok(ResponseValue::Missing),
        RawCell::Text(s) if s.trim().is_empty() => return Ok(ResponseValue::Missing),
        RawCell::Text(s) => s.trim(),
        RawCell::Number(n) => {
            return Ok(match question.question_type {
                QuestionType::SingleChoice => ResponseValue::Scalar(format_number(*n)),
                QuestionType::MultiChoice => {
                    ResponseValue::MultiValue(BTreeSet::from([format_number(*n)]))
                }
                _ => ResponseValue::Numeric(*n),
            })
        }
    };

    match question.question_type {
        QuestionType::SingleChoice => Ok(ResponseValue::Scalar(text.to_string())),
        QuestionType::MultiChoice => {
            let codes: BTreeSet<String> = text
                .split(delimiter)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect();
            if codes.is_empty() {
                Ok(ResponseValue::Missing)
            } else {
                Ok(ResponseValue::MultiValue(codes))
            }
        }
        _ => text
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(ResponseValue::Numeric)
            .ok_or_else(|| CutError::InvalidCell {
                column: question.effective_column_name().to_string(),
                row,
                value: text.to_string(),
            }),
    }
}

fn type_auxiliary_cell(cell: &RawCell) -> ResponseValue {
    match cell {
        RawCell::Null => ResponseValue::Missing,
        RawCell::Number(n) => ResponseValue::Numeric(*n),
        RawCell::Text(s) => {
            let text = s.trim();
            if text.is_empty() {
                ResponseValue::Missing
            } else {
                text.parse::<f64>()
                    .map(ResponseValue::Numeric)
                    .unwrap_or_else(|_| ResponseValue::Scalar(text.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut channels = Question::new("Q_CH", "Channels", QuestionType::MultiChoice);
        channels.column_name = Some("channels".to_string());
        Catalog::from_parts(
            vec![
                Question::new("Q_REGION", "Region", QuestionType::SingleChoice),
                Question::new("Q_AGE", "Age", QuestionType::Numeric),
                channels,
            ],
            vec![],
        )
    }

    fn record(pairs: &[(&str, RawCell)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_cells_typed_by_question_type() {
        let records = vec![
            record(&[
                ("Q_REGION", RawCell::Number(1.0)),
                ("Q_AGE", RawCell::Text(" 34 ".into())),
                ("channels", RawCell::Text("web; app;;".into())),
                ("weight", RawCell::Text("1.5".into())),
            ]),
            record(&[
                ("Q_REGION", RawCell::Text("  ".into())),
                ("Q_AGE", RawCell::Null),
                ("channels", RawCell::Text(" ; ".into())),
            ]),
        ];

        let table = ResponseTable::from_records(&catalog(), &records, ";").unwrap();
        assert_eq!(table.row_count(), 2);

        let region = table.column("Q_REGION").unwrap();
        assert_eq!(region[0], ResponseValue::Scalar("1".into()));
        assert!(region[1].is_missing());

        let age = table.column("Q_AGE").unwrap();
        assert_eq!(age[0], ResponseValue::Numeric(34.0));
        assert!(age[1].is_missing());

        let channels = table.column("Q_CH").unwrap();
        assert_eq!(
            channels[0],
            ResponseValue::MultiValue(BTreeSet::from(["app".to_string(), "web".to_string()]))
        );
        assert!(channels[1].is_missing());
        assert!(table.column("channels").is_none());

        let weight = table.named_column("weight").unwrap();
        assert_eq!(weight[0], ResponseValue::Numeric(1.5));
        assert!(weight[1].is_missing());
    }

    #[test]
    fn test_unparseable_numeric_cell_is_fatal() {
        let records = vec![
            record(&[("Q_AGE", RawCell::Number(20.0))]),
            record(&[("Q_AGE", RawCell::Text("old".into()))]),
        ];

        let err = ResponseTable::from_records(&catalog(), &records, ";").unwrap_err();
        assert_eq!(
            err,
            CutError::InvalidCell {
                column: "Q_AGE".into(),
                row: 1,
                value: "old".into()
            }
        );
    }

    #[test]
    fn test_column_length_mismatch() {
        let mut columns = BTreeMap::new();
        columns.insert("A".to_string(), vec![ResponseValue::Missing; 3]);
        columns.insert("B".to_string(), vec![ResponseValue::Missing; 2]);

        let err = ResponseTable::from_columns(columns).unwrap_err();
        assert!(matches!(err, CutError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_absent_question_column_reports_column_name() {
        let table = ResponseTable::from_records(&catalog(), &[], ";").unwrap();
        let cat = catalog();
        let err = table.question_column(cat.question("Q_CH").unwrap()).unwrap_err();
        assert_eq!(
            err,
            CutError::MissingColumn {
                column: "channels".into()
            }
        );
    }
}
