//! Metric Computation Tests
//!
//! ## Scenarios Covered
//!
//! 1. Frequency ordering, labels and percentages
//! 2. Multi-choice frequency counts each selected code
//! 3. Mean and sample standard deviation
//! 4. Top/bottom-2-box scale selection per Likert type
//! 5. NPS exactness
//! 6. Weighted percentages and means

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{nps_table, survey_catalog, table_from};
use crosscut_core::metrics::MetricComputer;
use crosscut_core::model::table::FrequencyRow;
use crosscut_core::model::{CodeValue, MetricType, MetricValue, Question, ResponseTable};
use crosscut_core::Mask;
use serde_json::json;

fn compute(table: &ResponseTable, question: &Question, metric: MetricType) -> (MetricValue, usize) {
    let column = table.question_column(question).unwrap();
    let outcome = MetricComputer::new(question, column)
        .compute(metric, &Mask::all(table.row_count()))
        .unwrap();
    (outcome.value, outcome.base_n)
}

fn distribution(value: MetricValue) -> Vec<FrequencyRow> {
    match value {
        MetricValue::Frequency { distribution } => distribution,
        other => panic!("expected frequency, got {:?}", other),
    }
}

#[test]
fn test_frequency_of_likert_ordered_numerically_with_labels() {
    // GIVEN satisfaction answers with one missing
    let catalog = survey_catalog();
    let table = table_from(
        &catalog,
        [5, 4, 4, 2, -1, 5, 5]
            .into_iter()
            .map(|v| if v < 0 { json!({"Q_SAT": null}) } else { json!({"Q_SAT": v}) })
            .collect(),
    );

    // WHEN computing a frequency
    let (value, base_n) = compute(&table, catalog.question("Q_SAT").unwrap(), MetricType::Frequency);
    let rows = distribution(value);

    // THEN only observed values appear, ascending, over the non-missing base
    assert_eq!(base_n, 6);
    assert_eq!(
        rows.iter().map(|r| r.value.clone()).collect::<Vec<_>>(),
        vec![CodeValue::Number(2.0), CodeValue::Number(4.0), CodeValue::Number(5.0)]
    );
    assert_eq!(
        rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
        vec!["Dissatisfied", "Satisfied", "Very satisfied"]
    );
    assert_eq!(
        rows.iter().map(|r| r.count).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(
        rows.iter().map(|r| r.percentage).collect::<Vec<_>>(),
        vec![16.67, 33.33, 50.0]
    );
}

#[test]
fn test_multi_choice_frequency_counts_each_code() {
    let catalog = survey_catalog();
    let table = table_from(
        &catalog,
        vec![
            json!({"channels": "web"}),
            json!({"channels": "web;app"}),
            json!({"channels": null}),
            json!({"channels": "app ; store"}),
        ],
    );

    let (value, base_n) = compute(&table, catalog.question("Q_CH").unwrap(), MetricType::Frequency);
    let rows = distribution(value);

    assert_eq!(base_n, 3);
    assert_eq!(
        rows.iter()
            .map(|r| (r.label.as_str(), r.count, r.percentage))
            .collect::<Vec<_>>(),
        vec![
            ("Mobile app", 2, 66.67),
            ("Store", 1, 33.33),
            ("Website", 2, 66.67)
        ]
    );
}

#[test]
fn test_mean_and_sample_std() {
    let catalog = survey_catalog();
    let table = table_from(
        &catalog,
        vec![
            json!({"Q_AGE": 20}),
            json!({"Q_AGE": 30}),
            json!({"Q_AGE": 40}),
            json!({"Q_AGE": null}),
        ],
    );

    let (value, base_n) = compute(&table, catalog.question("Q_AGE").unwrap(), MetricType::Mean);
    assert_eq!(base_n, 3);
    match value {
        MetricValue::Mean(stats) => {
            assert_eq!(stats.mean, 30.0);
            assert_eq!(stats.std, 10.0);
            assert_eq!((stats.min, stats.max), (20.0, 40.0));
            assert_eq!(stats.count, 3);
        }
        other => panic!("expected mean, got {:?}", other),
    }
}

#[test]
fn test_mean_rounds_to_four_places() {
    let catalog = survey_catalog();
    let table = table_from(
        &catalog,
        vec![json!({"Q_AGE": 1}), json!({"Q_AGE": 2}), json!({"Q_AGE": 2})],
    );

    let (value, _) = compute(&table, catalog.question("Q_AGE").unwrap(), MetricType::Mean);
    match value {
        MetricValue::Mean(stats) => {
            assert_eq!(stats.mean, 1.6667);
            assert_eq!(stats.std, 0.5774);
        }
        other => panic!("expected mean, got {:?}", other),
    }
}

#[test]
fn test_box_scores_use_scale_of_question_type() {
    // GIVEN a 1-5 and a 1-7 Likert question
    let catalog = survey_catalog();
    let table = table_from(
        &catalog,
        vec![
            json!({"Q_SAT": 5, "Q_EASE": 7}),
            json!({"Q_SAT": 4, "Q_EASE": 6}),
            json!({"Q_SAT": 3, "Q_EASE": 5}),
            json!({"Q_SAT": 2, "Q_EASE": 4}),
            json!({"Q_SAT": 1, "Q_EASE": 3}),
            json!({"Q_EASE": 2}),
            json!({"Q_EASE": 1}),
            json!({"Q_EASE": 5}),
        ],
    );

    // WHEN computing top and bottom boxes
    let sat = catalog.question("Q_SAT").unwrap();
    let ease = catalog.question("Q_EASE").unwrap();

    // THEN 1-5 tops at {4,5}, 1-7 at {6,7}, both bottom at {1,2}
    match compute(&table, sat, MetricType::Top2Box).0 {
        MetricValue::Top2Box(score) => {
            assert_eq!(score.values, vec![4, 5]);
            assert_eq!((score.count, score.total, score.pct), (2, 5, 40.0));
        }
        other => panic!("unexpected {:?}", other),
    }
    match compute(&table, ease, MetricType::Top2Box).0 {
        MetricValue::Top2Box(score) => {
            assert_eq!(score.values, vec![6, 7]);
            assert_eq!((score.count, score.total, score.pct), (2, 8, 25.0));
        }
        other => panic!("unexpected {:?}", other),
    }
    match compute(&table, ease, MetricType::Bottom2Box).0 {
        MetricValue::Bottom2Box(score) => {
            assert_eq!(score.values, vec![1, 2]);
            assert_eq!(score.pct, 25.0);
        }
        other => panic!("unexpected {:?}", other),
    }
    match compute(&table, sat, MetricType::Bottom2Box).0 {
        MetricValue::Bottom2Box(score) => assert_eq!(score.pct, 40.0),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_nps_exactness() {
    // GIVEN 19 promoters, 15 passives and 66 detractors
    let catalog = survey_catalog();
    let table = nps_table(&catalog, 19, 15, 66);

    // WHEN computing NPS
    let (value, base_n) = compute(&table, catalog.question("Q_NPS").unwrap(), MetricType::Nps);

    // THEN NPS is exactly 19 - 66
    assert_eq!(base_n, 100);
    match value {
        MetricValue::Nps(score) => {
            assert_eq!(score.nps, -47.0);
            assert_eq!(score.promoters_count, 19);
            assert_eq!(score.passives_count, 15);
            assert_eq!(score.detractors_count, 66);
            assert_eq!(score.promoters_pct, 19.0);
            assert_eq!(score.passives_pct, 15.0);
            assert_eq!(score.detractors_pct, 66.0);
            assert_eq!(score.total, 100);
        }
        other => panic!("expected nps, got {:?}", other),
    }
}

#[test]
fn test_empty_subset_yields_nan_not_error() {
    let catalog = survey_catalog();
    let table = nps_table(&catalog, 1, 1, 1);
    let question = catalog.question("Q_NPS").unwrap();
    let column = table.question_column(question).unwrap();

    let outcome = MetricComputer::new(question, column)
        .compute(MetricType::Nps, &Mask::none(3))
        .unwrap();

    assert_eq!(outcome.base_n, 0);
    assert!(outcome.value.headline().unwrap().is_nan());
}

#[test]
fn test_weighted_metrics_keep_respondent_counts() {
    // GIVEN two respondents weighted 3 and 1
    let catalog = survey_catalog();
    let table = table_from(
        &catalog,
        vec![
            json!({"Q_AGE": 20, "Q_NPS": 10}),
            json!({"Q_AGE": 40, "Q_NPS": 0}),
        ],
    );
    let weights = [3.0, 1.0];
    let all = Mask::all(2);

    // WHEN computing a weighted mean
    let age = catalog.question("Q_AGE").unwrap();
    let outcome = MetricComputer::new(age, table.question_column(age).unwrap())
        .with_weights(&weights)
        .compute(MetricType::Mean, &all)
        .unwrap();

    // THEN the mean and std use weights but base_n counts respondents
    assert_eq!(outcome.base_n, 2);
    assert_eq!(outcome.weighted_base, Some(4.0));
    match outcome.value {
        MetricValue::Mean(stats) => {
            assert_eq!(stats.mean, 25.0);
            assert_eq!(stats.std, 10.0);
            assert_eq!(stats.count, 2);
        }
        other => panic!("expected mean, got {:?}", other),
    }

    // AND NPS percentages are weight shares
    let nps = catalog.question("Q_NPS").unwrap();
    let outcome = MetricComputer::new(nps, table.question_column(nps).unwrap())
        .with_weights(&weights)
        .compute(MetricType::Nps, &all)
        .unwrap();
    match outcome.value {
        MetricValue::Nps(score) => {
            assert_eq!(score.promoters_pct, 75.0);
            assert_eq!(score.detractors_pct, 25.0);
            assert_eq!(score.nps, 50.0);
            assert_eq!((score.promoters_count, score.detractors_count), (1, 1));
        }
        other => panic!("expected nps, got {:?}", other),
    }
}
