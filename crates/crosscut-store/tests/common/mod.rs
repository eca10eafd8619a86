// Shared fixtures for store import tests

use std::fs;
use std::path::Path;

#[allow(dead_code)]
pub const QUESTIONS_JSON: &str = r#"{
  "questions": [
    {
      "question_id": "Q_REGION",
      "label": "Region",
      "type": "single_choice",
      "options": [
        {"code": 1, "label": "North"},
        {"code": 2, "label": "South"}
      ]
    },
    {"question_id": "Q_NPS", "label": "Recommend", "type": "nps_0_10", "options": null},
    {"question_id": "Q_AGE", "label": "Age", "type": "numeric", "column_name": "age"},
    {
      "question_id": "Q_CH",
      "label": "Channels",
      "type": "multi_choice",
      "options": [
        {"code": "web", "label": "Website"},
        {"code": "app", "label": "Mobile app"}
      ]
    }
  ]
}"#;

#[allow(dead_code)]
pub const SEGMENTS_JSON: &str = r#"[
  {
    "segment_id": "S_NORTH",
    "name": "North",
    "definition": {"kind": "eq", "question_id": "Q_REGION", "value": 1}
  },
  {
    "segment_id": "S_YOUNG",
    "name": "Under 35",
    "definition": {"kind": "range", "question_id": "Q_AGE", "max": 34},
    "intended_partition": true
  }
]"#;

#[allow(dead_code)]
pub const RESPONSES_JSON: &str = r#"[
  {"respondent_id": "R1", "Q_REGION": 1, "Q_NPS": 10, "age": 23, "Q_CH": "web;app", "weight": 1.5},
  {"respondent_id": "R2", "Q_REGION": 2, "Q_NPS": 3, "age": 45, "Q_CH": "app", "weight": 0.5},
  {"respondent_id": "R3", "Q_REGION": 1, "Q_NPS": 8, "age": "31", "Q_CH": null, "weight": 1.0},
  {"respondent_id": "R4", "Q_REGION": "2", "Q_NPS": null, "age": 67, "Q_CH": "web", "weight": 1.0}
]"#;

/// Write a dataset directory, optionally with segments
#[allow(dead_code)]
pub fn write_dataset(dir: &Path, with_segments: bool) {
    fs::write(dir.join("questions.json"), QUESTIONS_JSON).unwrap();
    fs::write(dir.join("responses.json"), RESPONSES_JSON).unwrap();
    if with_segments {
        fs::write(dir.join("segments.json"), SEGMENTS_JSON).unwrap();
    }
}
