use crosscut_core::model::{
    Catalog, FilterExpr, Question, QuestionType, RawCell, Record, ResponseTable, SegmentSpec,
};
use serde_json::Value;

/// Region option codes with their counts in the 100-respondent fixture
#[allow(dead_code)]
pub const REGION_COUNTS: [(i64, usize); 5] = [(1, 21), (2, 24), (3, 16), (4, 16), (5, 23)];

/// Catalog covering every question type plus two segments
#[allow(dead_code)]
pub fn survey_catalog() -> Catalog {
    let mut channels = Question::new("Q_CH", "Channels used", QuestionType::MultiChoice)
        .with_option("web", "Website")
        .with_option("app", "Mobile app")
        .with_option("store", "Store");
    channels.column_name = Some("channels".to_string());

    Catalog::from_parts(
        vec![
            Question::new("Q_REGION", "Region", QuestionType::SingleChoice)
                .with_option(1, "North")
                .with_option(2, "South")
                .with_option(3, "East")
                .with_option(4, "West")
                .with_option(5, "Central"),
            Question::new("Q_GENDER", "Gender", QuestionType::SingleChoice)
                .with_option("M", "Male")
                .with_option("F", "Female"),
            Question::new("Q_NPS", "Likelihood to recommend", QuestionType::Nps0To10),
            Question::new("Q_SAT", "Satisfaction", QuestionType::Likert1To5)
                .with_option(1, "Very dissatisfied")
                .with_option(2, "Dissatisfied")
                .with_option(3, "Neutral")
                .with_option(4, "Satisfied")
                .with_option(5, "Very satisfied"),
            Question::new("Q_EASE", "Ease of use", QuestionType::Likert1To7),
            Question::new("Q_AGE", "Age", QuestionType::Numeric),
            channels,
        ],
        vec![
            SegmentSpec::new(
                "S_YOUNG",
                "Under 35",
                FilterExpr::range("Q_AGE", None, Some(34.0)),
            ),
            SegmentSpec::new("S_NORTH", "North region", FilterExpr::eq("Q_REGION", 1)),
        ],
    )
}

/// Parse JSON objects into response records
#[allow(dead_code)]
pub fn records(rows: Vec<Value>) -> Vec<Record> {
    rows.into_iter()
        .map(|row| serde_json::from_value::<Record>(row).unwrap())
        .collect()
}

#[allow(dead_code)]
pub fn table_from(catalog: &Catalog, rows: Vec<Value>) -> ResponseTable {
    ResponseTable::from_records(catalog, &records(rows), ";").unwrap()
}

/// 100 respondents with regions split 21/24/16/16/23
///
/// Every other column is filled deterministically from the row index:
/// NPS cycles 0..=10, satisfaction 1..=5, ease 1..=7, age 18..=67, gender
/// alternates, and every fifth respondent skips the channels question.
#[allow(dead_code)]
pub fn hundred_respondents(catalog: &Catalog) -> ResponseTable {
    let mut rows = Vec::new();
    let mut i = 0usize;
    for (region, count) in REGION_COUNTS {
        for _ in 0..count {
            let channels = match i % 5 {
                0 => Value::Null,
                1 => Value::from("web"),
                2 => Value::from("web;app"),
                3 => Value::from("app"),
                _ => Value::from("store;web"),
            };
            rows.push(serde_json::json!({
                "respondent_id": format!("R{:03}", i),
                "Q_REGION": region,
                "Q_GENDER": if i % 2 == 0 { "M" } else { "F" },
                "Q_NPS": i % 11,
                "Q_SAT": i % 5 + 1,
                "Q_EASE": i % 7 + 1,
                "Q_AGE": 18 + i % 50,
                "channels": channels,
                "weight": 1.0,
            }));
            i += 1;
        }
    }
    table_from(catalog, rows)
}

/// Single-column NPS table with the given group sizes
#[allow(dead_code)]
pub fn nps_table(
    catalog: &Catalog,
    promoters: usize,
    passives: usize,
    detractors: usize,
) -> ResponseTable {
    let mut rows = Vec::new();
    for k in 0..promoters {
        rows.push(serde_json::json!({ "Q_NPS": 9 + k % 2 }));
    }
    for k in 0..passives {
        rows.push(serde_json::json!({ "Q_NPS": 7 + k % 2 }));
    }
    for k in 0..detractors {
        rows.push(serde_json::json!({ "Q_NPS": k % 7 }));
    }
    table_from(catalog, rows)
}

/// Raw cell helper for hand-built records
#[allow(dead_code)]
pub fn text(value: &str) -> RawCell {
    RawCell::Text(value.to_string())
}
