use super::question::Question;
use super::spec::SegmentSpec;
use crate::errors::{CutError, Result};
use std::collections::BTreeMap;

/// Question and segment definitions keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub questions: BTreeMap<String, Question>,
    pub segments: BTreeMap<String, SegmentSpec>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        questions: impl IntoIterator<Item = Question>,
        segments: impl IntoIterator<Item = SegmentSpec>,
    ) -> Self {
        let mut catalog = Self::new();
        for question in questions {
            catalog.add_question(question);
        }
        for segment in segments {
            catalog.add_segment(segment);
        }
        catalog
    }

    /// Insert a question, replacing any with the same id
    pub fn add_question(&mut self, question: Question) {
        self.questions
            .insert(question.question_id.clone(), question);
    }

    /// Insert a segment, replacing any with the same id
    pub fn add_segment(&mut self, segment: SegmentSpec) {
        self.segments.insert(segment.segment_id.clone(), segment);
    }

    /// Look up a question
    ///
    /// # Errors
    ///
    /// Returns `UnknownQuestion` if the id is not in the catalog.
    pub fn question(&self, question_id: &str) -> Result<&Question> {
        self.questions
            .get(question_id)
            .ok_or_else(|| CutError::UnknownQuestion {
                question_id: question_id.to_string(),
            })
    }

    /// Look up a segment
    ///
    /// # Errors
    ///
    /// Returns `UnknownSegment` if the id is not in the catalog.
    pub fn segment(&self, segment_id: &str) -> Result<&SegmentSpec> {
        self.segments
            .get(segment_id)
            .ok_or_else(|| CutError::UnknownSegment {
                segment_id: segment_id.to_string(),
            })
    }
}
