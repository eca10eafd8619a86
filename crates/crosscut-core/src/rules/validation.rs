use crate::errors::{CutError, Result};
use crate::model::{
    Catalog, CodeValue, CutSpec, DimensionKind, FilterExpr, Question, QuestionType, SegmentSpec,
};

/// Validate a filter tree against the catalog
///
/// Checks, in pre-order:
///
/// 1. Every referenced question and segment exists
/// 2. `range` only targets numeric-typed questions, with `min <= max`
/// 3. `contains_any` only targets `multi_choice` questions
/// 4. `eq`/`in`/`contains_any` values are declared option codes
/// 5. Segments referenced from the top level have valid definitions
///
/// # Errors
/// Returns the first violation found.
pub fn validate_filter(expr: &FilterExpr, catalog: &Catalog) -> Result<()> {
    check_node(expr, catalog, None)
}

/// Validate a segment definition
///
/// Same checks as [`validate_filter`], plus a segment definition may not
/// reference another segment.
///
/// # Errors
/// Returns the first violation found, including `NestedSegmentReference`.
pub fn validate_segment(segment: &SegmentSpec, catalog: &Catalog) -> Result<()> {
    check_node(&segment.definition, catalog, Some(&segment.segment_id))
}

/// Validate a cut before any row is touched
///
/// Every dimension id must resolve. Only the honoured (first) dimension is
/// checked further; the rest are ignored by execution and reported as a
/// warning.
///
/// # Errors
/// * `UnknownQuestion` / `UnknownSegment` - unresolved reference
/// * `MetricIncompatible` - metric cannot run on the target question type
/// * `DimensionIncompatible` - `multi_choice` question used as a dimension
/// * any filter or segment violation from [`validate_filter`]
pub fn validate_cut(cut: &CutSpec, catalog: &Catalog) -> Result<()> {
    let question = catalog.question(&cut.metric.question_id)?;
    if !cut.metric.metric_type.supports(question.question_type) {
        return Err(CutError::MetricIncompatible {
            metric: cut.metric.metric_type.to_string(),
            question_id: question.question_id.clone(),
            question_type: question.question_type.to_string(),
        });
    }

    if let Some(filter) = &cut.filter {
        validate_filter(filter, catalog)?;
    }

    for dimension in cut.dimensions.iter().skip(1) {
        match dimension.kind {
            DimensionKind::Question => {
                catalog.question(&dimension.id)?;
            }
            DimensionKind::Segment => {
                catalog.segment(&dimension.id)?;
            }
        }
    }

    if let Some(dimension) = cut.primary_dimension() {
        match dimension.kind {
            DimensionKind::Question => {
                let dim_question = catalog.question(&dimension.id)?;
                if dim_question.question_type == QuestionType::MultiChoice {
                    return Err(CutError::DimensionIncompatible {
                        question_id: dim_question.question_id.clone(),
                        question_type: dim_question.question_type.to_string(),
                    });
                }
            }
            DimensionKind::Segment => {
                validate_segment(catalog.segment(&dimension.id)?, catalog)?;
            }
        }
    }

    Ok(())
}

fn check_node(expr: &FilterExpr, catalog: &Catalog, owner: Option<&str>) -> Result<()> {
    match expr {
        FilterExpr::Eq { question_id, value } => {
            let question = catalog.question(question_id)?;
            check_option_codes(question, std::slice::from_ref(value))
        }
        FilterExpr::In {
            question_id,
            values,
        } => {
            let question = catalog.question(question_id)?;
            check_option_codes(question, values)
        }
        FilterExpr::Range {
            question_id,
            min,
            max,
            ..
        } => {
            let question = catalog.question(question_id)?;
            if !question.question_type.is_numeric() {
                return Err(incompatible("range", question));
            }
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    return Err(CutError::InvalidRange {
                        question_id: question_id.clone(),
                        min: *lo,
                        max: *hi,
                    });
                }
            }
            Ok(())
        }
        FilterExpr::ContainsAny {
            question_id,
            values,
        } => {
            let question = catalog.question(question_id)?;
            if question.question_type != QuestionType::MultiChoice {
                return Err(incompatible("contains_any", question));
            }
            check_option_codes(question, values)
        }
        FilterExpr::And { children } | FilterExpr::Or { children } => children
            .iter()
            .try_for_each(|child| check_node(child, catalog, owner)),
        FilterExpr::Not { child } => check_node(child, catalog, owner),
        FilterExpr::Segment { segment_id } => match owner {
            Some(owner_id) => Err(CutError::NestedSegmentReference {
                segment_id: owner_id.to_string(),
                referenced_id: segment_id.clone(),
            }),
            None => validate_segment(catalog.segment(segment_id)?, catalog),
        },
    }
}

fn check_option_codes(question: &Question, values: &[CodeValue]) -> Result<()> {
    if !question.question_type.has_option_codes() {
        return Ok(());
    }
    match values.iter().find(|v| !question.accepts_code(&v.as_code())) {
        Some(bad) => Err(CutError::InvalidOption {
            question_id: question.question_id.clone(),
            value: bad.as_code(),
        }),
        None => Ok(()),
    }
}

fn incompatible(predicate: &str, question: &Question) -> CutError {
    CutError::PredicateIncompatible {
        predicate: predicate.to_string(),
        question_id: question.question_id.clone(),
        question_type: question.question_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DimensionSpec, MetricSpec, MetricType};

    fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                Question::new("Q_REGION", "Region", QuestionType::SingleChoice)
                    .with_option("north", "North")
                    .with_option("south", "South"),
                Question::new("Q_CH", "Channels", QuestionType::MultiChoice)
                    .with_option("web", "Web")
                    .with_option("app", "App"),
                Question::new("Q_AGE", "Age", QuestionType::Numeric),
                Question::new("Q_NPS", "Recommend", QuestionType::Nps0To10),
            ],
            vec![
                SegmentSpec::new("S_NORTH", "North", FilterExpr::eq("Q_REGION", "north")),
                SegmentSpec::new("S_NESTED", "Nested", FilterExpr::segment("S_NORTH")),
            ],
        )
    }

    #[test]
    fn test_range_requires_numeric_question() {
        let err = validate_filter(&FilterExpr::range("Q_REGION", Some(1.0), None), &catalog())
            .unwrap_err();
        assert!(matches!(err, CutError::PredicateIncompatible { ref predicate, .. } if predicate == "range"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = validate_filter(&FilterExpr::range("Q_AGE", Some(50.0), Some(18.0)), &catalog())
            .unwrap_err();
        assert!(matches!(err, CutError::InvalidRange { .. }));
    }

    #[test]
    fn test_contains_any_requires_multi_choice() {
        let err = validate_filter(&FilterExpr::contains_any("Q_REGION", ["north"]), &catalog())
            .unwrap_err();
        assert!(matches!(err, CutError::PredicateIncompatible { .. }));
        assert!(validate_filter(&FilterExpr::contains_any("Q_CH", ["web"]), &catalog()).is_ok());
    }

    #[test]
    fn test_invalid_option_detected_deep_in_tree() {
        let expr = FilterExpr::and(vec![
            FilterExpr::range("Q_AGE", Some(18.0), None),
            FilterExpr::not(FilterExpr::is_in("Q_REGION", ["north", "west"])),
        ]);
        let err = validate_filter(&expr, &catalog()).unwrap_err();
        assert_eq!(
            err,
            CutError::InvalidOption {
                question_id: "Q_REGION".into(),
                value: "west".into()
            }
        );
    }

    #[test]
    fn test_nested_segment_reference_rejected() {
        let cat = catalog();
        let err = validate_filter(&FilterExpr::segment("S_NESTED"), &cat).unwrap_err();
        assert_eq!(
            err,
            CutError::NestedSegmentReference {
                segment_id: "S_NESTED".into(),
                referenced_id: "S_NORTH".into()
            }
        );
        assert!(validate_filter(&FilterExpr::segment("S_NORTH"), &cat).is_ok());
    }

    #[test]
    fn test_cut_checks_metric_and_dimension() {
        let cat = catalog();

        let cut = CutSpec::new("c1", MetricSpec::new(MetricType::Nps, "Q_AGE"));
        assert!(matches!(
            validate_cut(&cut, &cat),
            Err(CutError::MetricIncompatible { .. })
        ));

        let cut = CutSpec::new("c2", MetricSpec::new(MetricType::Nps, "Q_NPS"))
            .with_dimension(DimensionSpec::question("Q_CH"));
        assert!(matches!(
            validate_cut(&cut, &cat),
            Err(CutError::DimensionIncompatible { .. })
        ));

        let cut = CutSpec::new("c3", MetricSpec::new(MetricType::Nps, "Q_NPS"))
            .with_dimension(DimensionSpec::segment("S_MISSING"));
        assert!(matches!(
            validate_cut(&cut, &cat),
            Err(CutError::UnknownSegment { .. })
        ));
    }

    #[test]
    fn test_unknown_secondary_dimension_rejected() {
        let cat = catalog();

        let cut = CutSpec::new("c4", MetricSpec::new(MetricType::Nps, "Q_NPS"))
            .with_dimension(DimensionSpec::question("Q_REGION"))
            .with_dimension(DimensionSpec::question("Q_DOES_NOT_EXIST"));
        assert_eq!(
            validate_cut(&cut, &cat),
            Err(CutError::UnknownQuestion {
                question_id: "Q_DOES_NOT_EXIST".into()
            })
        );

        let cut = CutSpec::new("c5", MetricSpec::new(MetricType::Nps, "Q_NPS"))
            .with_dimension(DimensionSpec::question("Q_REGION"))
            .with_dimension(DimensionSpec::segment("S_MISSING"));
        assert!(matches!(
            validate_cut(&cut, &cat),
            Err(CutError::UnknownSegment { .. })
        ));

        // Ignored dimensions resolve but are not otherwise checked
        let cut = CutSpec::new("c6", MetricSpec::new(MetricType::Nps, "Q_NPS"))
            .with_dimension(DimensionSpec::question("Q_REGION"))
            .with_dimension(DimensionSpec::question("Q_CH"));
        assert!(validate_cut(&cut, &cat).is_ok());
    }
}
