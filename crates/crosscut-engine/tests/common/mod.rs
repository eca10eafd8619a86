use crosscut_core::model::{
    Catalog, CutSpec, DimensionSpec, FilterExpr, MetricSpec, MetricType, Question, QuestionType,
    Record, ResponseTable, SegmentSpec,
};
use crosscut_store::Dataset;

/// Catalog with two regions, NPS, satisfaction, age and two segments
#[allow(dead_code)]
pub fn catalog() -> Catalog {
    Catalog::from_parts(
        vec![
            Question::new("Q_REGION", "Region", QuestionType::SingleChoice)
                .with_option(1, "North")
                .with_option(2, "South"),
            Question::new("Q_NPS", "Likelihood to recommend", QuestionType::Nps0To10),
            Question::new("Q_SAT", "Satisfaction", QuestionType::Likert1To5),
            Question::new("Q_AGE", "Age", QuestionType::Numeric),
        ],
        vec![
            SegmentSpec::new("S_NORTH", "North", FilterExpr::eq("Q_REGION", 1)),
            SegmentSpec::new(
                "S_SENIOR",
                "50 and over",
                FilterExpr::range("Q_AGE", Some(50.0), None),
            ),
        ],
    )
}

/// 40 respondents: 25 North, 15 South, ages 20..=59
#[allow(dead_code)]
pub fn dataset() -> Dataset {
    dataset_with(catalog())
}

#[allow(dead_code)]
pub fn dataset_with(catalog: Catalog) -> Dataset {
    let records: Vec<Record> = (0..40usize)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "Q_REGION": if i < 25 { 1 } else { 2 },
                "Q_NPS": i % 11,
                "Q_SAT": i % 5 + 1,
                "Q_AGE": 20 + i,
            }))
            .unwrap()
        })
        .collect();
    let table = ResponseTable::from_records(&catalog, &records, ";").unwrap();
    Dataset {
        catalog,
        table,
        digest: "0".repeat(64),
    }
}

/// Three valid cuts and one referencing an unknown question
#[allow(dead_code)]
pub fn mixed_cuts() -> Vec<CutSpec> {
    vec![
        CutSpec::new("nps_by_region", MetricSpec::new(MetricType::Nps, "Q_NPS"))
            .with_dimension(DimensionSpec::question("Q_REGION")),
        CutSpec::new("bad_question", MetricSpec::new(MetricType::Mean, "Q_MISSING")),
        CutSpec::new("sat_top2", MetricSpec::new(MetricType::Top2Box, "Q_SAT"))
            .with_dimension(DimensionSpec::segment("S_SENIOR")),
        CutSpec::new("age_mean", MetricSpec::new(MetricType::Mean, "Q_AGE"))
            .with_filter(FilterExpr::segment("S_NORTH")),
    ]
}
