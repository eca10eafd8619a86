use super::code::CodeValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Survey question type
///
/// The type decides how response cells are typed at load time and which
/// metrics and predicates may reference the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "single_choice")]
    SingleChoice,
    #[serde(rename = "multi_choice")]
    MultiChoice,
    #[serde(rename = "likert_1_5")]
    Likert1To5,
    #[serde(rename = "likert_1_7")]
    Likert1To7,
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "nps_0_10")]
    Nps0To10,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultiChoice => "multi_choice",
            QuestionType::Likert1To5 => "likert_1_5",
            QuestionType::Likert1To7 => "likert_1_7",
            QuestionType::Numeric => "numeric",
            QuestionType::Nps0To10 => "nps_0_10",
        }
    }

    /// Types whose cells load as `ResponseValue::Numeric`
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            QuestionType::Likert1To5
                | QuestionType::Likert1To7
                | QuestionType::Numeric
                | QuestionType::Nps0To10
        )
    }

    pub fn is_likert(&self) -> bool {
        matches!(self, QuestionType::Likert1To5 | QuestionType::Likert1To7)
    }

    /// Types whose declared options restrict filter values
    pub fn has_option_codes(&self) -> bool {
        matches!(
            self,
            QuestionType::SingleChoice
                | QuestionType::MultiChoice
                | QuestionType::Likert1To5
                | QuestionType::Likert1To7
        )
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub code: CodeValue,
    pub label: String,
}

/// A survey question definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,

    pub label: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// Ordered option list; absent or null for numeric questions
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<QuestionOption>,

    /// Response column holding this question, when it differs from the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<QuestionOption>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<QuestionOption>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Question {
    pub fn new(
        question_id: impl Into<String>,
        label: impl Into<String>,
        question_type: QuestionType,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            label: label.into(),
            question_type,
            options: Vec::new(),
            column_name: None,
        }
    }

    /// Builder-style option append
    pub fn with_option(mut self, code: impl Into<CodeValue>, label: impl Into<String>) -> Self {
        self.options.push(QuestionOption {
            code: code.into(),
            label: label.into(),
        });
        self
    }

    pub fn effective_column_name(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.question_id)
    }

    /// Label of the option whose canonical code equals `code`
    pub fn option_label(&self, code: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.code.as_code() == code)
            .map(|opt| opt.label.as_str())
    }

    /// Whether `code` is a declared option code
    ///
    /// Questions that declare no options accept every code.
    pub fn accepts_code(&self, code: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|opt| opt.code.as_code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_wire_names() {
        let t: QuestionType = serde_json::from_str("\"likert_1_7\"").unwrap();
        assert_eq!(t, QuestionType::Likert1To7);
        assert_eq!(
            serde_json::to_string(&QuestionType::Nps0To10).unwrap(),
            "\"nps_0_10\""
        );
    }

    #[test]
    fn test_effective_column_name_defaults_to_id() {
        let mut q = Question::new("Q1", "Region", QuestionType::SingleChoice);
        assert_eq!(q.effective_column_name(), "Q1");
        q.column_name = Some("region".to_string());
        assert_eq!(q.effective_column_name(), "region");
    }

    #[test]
    fn test_option_lookup_coerces_numeric_codes() {
        let q = Question::new("Q2", "Satisfaction", QuestionType::Likert1To5)
            .with_option(1, "Very dissatisfied")
            .with_option(5, "Very satisfied");

        assert_eq!(q.option_label("5"), Some("Very satisfied"));
        assert!(q.accepts_code("1"));
        assert!(!q.accepts_code("6"));
    }

    #[test]
    fn test_null_options_accepted() {
        let q: Question = serde_json::from_str(
            r#"{"question_id":"NPS","label":"Recommend","type":"nps_0_10","options":null}"#,
        )
        .unwrap();
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_deserialize_without_options() {
        let q: Question =
            serde_json::from_str(r#"{"question_id":"AGE","label":"Age","type":"numeric"}"#)
                .unwrap();
        assert!(q.options.is_empty());
        assert!(q.accepts_code("42"));
    }
}
